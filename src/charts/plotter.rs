//! Chart Plotter Module
//! Interactive dashboard charts drawn with egui / egui_plot.

use crate::views::CategoryCount;
use egui::{Color32, Pos2, RichText, Stroke};
use egui_plot::{Bar, BarChart, Plot};

/// Color palette for categories
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Creates the dashboard visualizations using egui painting and egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn category_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a pie chart of category counts with a swatch legend showing
    /// counts and percentages. Does nothing visible when the total is zero.
    pub fn draw_pie_chart(ui: &mut egui::Ui, counts: &[CategoryCount], size: f32) {
        let total: usize = counts.iter().map(|c| c.count).sum();
        if total == 0 {
            ui.label(RichText::new("No data").size(14.0).color(Color32::GRAY));
            return;
        }

        ui.vertical_centered(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
            let painter = ui.painter_at(rect);
            let center = rect.center();
            let radius = rect.width().min(rect.height()) / 2.0 - 4.0;

            // 12 o'clock start, clockwise
            let mut start_angle = -std::f32::consts::FRAC_PI_2;
            for (idx, slice) in counts.iter().enumerate() {
                let sweep = std::f32::consts::TAU * (slice.count as f32 / total as f32);
                let color = Self::category_color(idx);

                // Wedges are tessellated as small triangles so reflex slices
                // stay well-formed.
                let steps = ((sweep / 0.05).ceil() as usize).max(2);
                let point_at = |angle: f32| {
                    Pos2::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    )
                };
                let mut prev = point_at(start_angle);
                for step in 1..=steps {
                    let angle = start_angle + sweep * step as f32 / steps as f32;
                    let next = point_at(angle);
                    painter.add(egui::Shape::convex_polygon(
                        vec![center, prev, next],
                        color,
                        Stroke::NONE,
                    ));
                    prev = next;
                }
                start_angle += sweep;
            }
        });

        ui.add_space(8.0);
        for (idx, slice) in counts.iter().enumerate() {
            ui.horizontal(|ui| {
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 3.0, Self::category_color(idx));
                let pct = 100.0 * slice.count as f64 / total as f64;
                ui.label(
                    RichText::new(format!("{} - {} ({:.1}%)", slice.category, slice.count, pct))
                        .size(12.0),
                );
            });
        }
    }

    /// Draw a bar chart of category counts, one bar per category with the
    /// category names on the x-axis.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, counts: &[CategoryCount], height: f32) {
        if counts.is_empty() {
            ui.label(RichText::new("No data").size(14.0).color(Color32::GRAY));
            return;
        }

        let labels: Vec<String> = counts.iter().map(|c| c.category.clone()).collect();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.count as f64)
                    .width(0.6)
                    .fill(Self::category_color(i))
                    .name(&c.category)
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .allow_drag(false)
            .allow_zoom(false)
            .x_axis_label("Crop")
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}
