//! Dashboard Panel
//! Central panel with the metric boxes, gender pie chart, selected-village
//! detail table and the crop production bar chart.

use crate::charts::ChartPlotter;
use crate::views::{DashboardSummary, ViewBuilder};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use polars::prelude::*;

const METRIC_TEXT: Color32 = Color32::from_rgb(35, 35, 35);
const BG_LIGHT_YELLOW: Color32 = Color32::from_rgb(255, 249, 196);
const BG_LIGHT_GREEN: Color32 = Color32::from_rgb(200, 230, 201);
const BG_LIGHT_BLUE: Color32 = Color32::from_rgb(187, 222, 251);

/// Central dashboard. Holds only the current village selection and its
/// projected rows; everything else is recomputed from the table.
pub struct DashboardPanel {
    selected_village: String,
    detail_headers: Vec<String>,
    detail_rows: Vec<Vec<String>>,
}

impl Default for DashboardPanel {
    fn default() -> Self {
        Self {
            selected_village: String::new(),
            detail_headers: Vec::new(),
            detail_rows: Vec::new(),
        }
    }
}

impl DashboardPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the dashboard body.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        df: &DataFrame,
        summary: &DashboardSummary,
        villages: &[String],
    ) {
        // Default the selector to the first village, like the selection
        // widget would.
        if self.selected_village.is_empty() {
            if let Some(first) = villages.first() {
                self.select_village(df, first.clone());
            }
        }

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Village Farming Analytics")
                    .size(24.0)
                    .strong(),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.columns(4, |cols| {
                    self.draw_overview(&mut cols[0], summary);
                    Self::draw_gender_section(&mut cols[1], summary);
                    self.draw_village_section(&mut cols[2], df, villages);
                    Self::draw_crop_section(&mut cols[3], summary);
                });
            });
    }

    /// Metric boxes. A box whose view could not be computed is omitted, the
    /// rest still render.
    fn draw_overview(&self, ui: &mut egui::Ui, summary: &DashboardSummary) {
        ui.label(RichText::new("Farmer Overview").size(16.0).strong());
        ui.label("Here you can find an overview of the farmers' data.");
        ui.add_space(10.0);

        if let Some(n) = summary.total_farmers {
            Self::metric_box(ui, "👨\u{200d}🌾 Total Farmers", &n.to_string(), BG_LIGHT_YELLOW);
        }
        if let Some(n) = summary.total_villages {
            Self::metric_box(ui, "🏘 Total Villages", &n.to_string(), BG_LIGHT_GREEN);
        }
        if let Some(ha) = summary.total_land_ha {
            Self::metric_box(
                ui,
                "🌾 Total Land Holding (Ha)",
                &format!("{:.2}", ha),
                BG_LIGHT_BLUE,
            );
        }
    }

    fn metric_box(ui: &mut egui::Ui, title: &str, value: &str, fill: Color32) {
        egui::Frame::none()
            .fill(fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(title).size(13.0).strong().color(METRIC_TEXT));
                    ui.label(RichText::new(value).size(22.0).color(METRIC_TEXT));
                });
            });
        ui.add_space(10.0);
    }

    fn draw_gender_section(ui: &mut egui::Ui, summary: &DashboardSummary) {
        let Some(gender) = &summary.gender_distribution else {
            // gender column missing; the view is skipped, nothing renders
            return;
        };

        ui.label(RichText::new("Farmers Distribution").size(16.0).strong());
        ui.label("Distribution of farmers by gender.");
        ui.add_space(10.0);
        ChartPlotter::draw_pie_chart(ui, gender, 200.0);
    }

    fn draw_village_section(&mut self, ui: &mut egui::Ui, df: &DataFrame, villages: &[String]) {
        ui.label(
            RichText::new("Farmers in Selected Village")
                .size(16.0)
                .strong(),
        );
        ui.label("Displaying details of farmers in a selected village.");
        ui.add_space(10.0);

        if villages.is_empty() {
            ui.label(RichText::new("No villages in the data.").color(Color32::GRAY));
            return;
        }

        let mut changed: Option<String> = None;
        ComboBox::from_id_salt("village_select")
            .width(180.0)
            .selected_text(&self.selected_village)
            .show_ui(ui, |ui| {
                for village in villages {
                    if ui
                        .selectable_label(self.selected_village == *village, village)
                        .clicked()
                    {
                        changed = Some(village.clone());
                    }
                }
            });
        if let Some(village) = changed {
            self.select_village(df, village);
        }

        ui.add_space(10.0);
        self.draw_detail_table(ui);
    }

    /// Recompute the detail view for a newly selected village. Same inputs
    /// always give the same rows; nothing is cached across selections.
    fn select_village(&mut self, df: &DataFrame, village: String) {
        match ViewBuilder::village_detail(df, &village) {
            Ok(detail) => {
                self.detail_headers = detail
                    .get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                self.detail_rows = (0..detail.height())
                    .map(|row| {
                        detail
                            .get_columns()
                            .iter()
                            .map(|col| {
                                let series = col.as_materialized_series();
                                match series.get(row) {
                                    Ok(val) if !val.is_null() => {
                                        val.to_string().trim_matches('"').to_string()
                                    }
                                    _ => String::new(),
                                }
                            })
                            .collect()
                    })
                    .collect();
            }
            Err(e) => {
                tracing::warn!(village = %village, error = %e, "village detail unavailable");
                self.detail_headers.clear();
                self.detail_rows.clear();
            }
        }
        self.selected_village = village;
    }

    fn draw_detail_table(&self, ui: &mut egui::Ui) {
        if self.detail_rows.is_empty() {
            ui.label(
                RichText::new("No farmers recorded for this village.")
                    .size(12.0)
                    .color(Color32::GRAY),
            );
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("village_detail_scroll")
                    .max_height(280.0)
                    .show(ui, |ui| {
                        egui::Grid::new("village_detail_table")
                            .striped(true)
                            .min_col_width(55.0)
                            .spacing([10.0, 4.0])
                            .show(ui, |ui| {
                                for header in &self.detail_headers {
                                    ui.label(RichText::new(header).strong().size(11.0));
                                }
                                ui.end_row();

                                for row in &self.detail_rows {
                                    for cell in row {
                                        ui.label(RichText::new(cell).size(11.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }

    fn draw_crop_section(ui: &mut egui::Ui, summary: &DashboardSummary) {
        // only rendered when the crop column exists in the workbook
        let Some(crops) = &summary.crop_distribution else {
            return;
        };

        ui.label(RichText::new("🌳 Production of Crop").size(16.0).strong());
        ui.label("Displaying production statistics by crop.");
        ui.add_space(10.0);
        ChartPlotter::draw_bar_chart(ui, "crop_production_bar", crops, 300.0);
    }
}
