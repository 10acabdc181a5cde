//! Sidebar Panel
//! Left panel with the data source info, the loaded column list (diagnostic
//! display), export actions and the status line.

use crate::data::{DATA_FILE, SHEET_NAME};
use egui::{Color32, RichText, ScrollArea};

/// Left side panel state.
pub struct Sidebar {
    pub columns: Vec<String>,
    pub row_count: usize,
    pub status: String,
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    ExportReport,
    ExportCharts,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
            status: "Ready".to_string(),
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the loaded table shape after a successful load.
    pub fn update_table_info(&mut self, columns: Vec<String>, row_count: usize) {
        self.row_count = row_count;
        self.status = format!("Loaded {} rows, {} columns", row_count, columns.len());
        self.columns = columns;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the sidebar
    pub fn show(&mut self, ui: &mut egui::Ui) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌾 Farmer Data Hub")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(DATA_FILE).size(12.0));
                ui.label(
                    RichText::new(format!("Sheet: {}", SHEET_NAME))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                if self.row_count > 0 {
                    ui.label(
                        RichText::new(format!("{} rows", self.row_count))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Columns Section =====
        ui.label(
            RichText::new("🔧 Columns in DataFrame")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                if self.columns.is_empty() {
                    ui.label(RichText::new("No data loaded").size(12.0).color(Color32::GRAY));
                } else {
                    ScrollArea::vertical()
                        .id_salt("sidebar_columns")
                        .max_height(180.0)
                        .show(ui, |ui| {
                            for col in &self.columns {
                                ui.label(RichText::new(col).size(12.0));
                            }
                        });
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.columns.is_empty(), |ui| {
                let report_button =
                    egui::Button::new(RichText::new("📄 Export Report").size(14.0))
                        .min_size(egui::vec2(180.0, 30.0));
                if ui.add(report_button).clicked() {
                    action = SidebarAction::ExportReport;
                }

                ui.add_space(8.0);

                let charts_button =
                    egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                        .min_size(egui::vec2(180.0, 30.0));
                if ui.add(charts_button).clicked() {
                    action = SidebarAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}
