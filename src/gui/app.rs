//! Dashboard Application
//! Main window. The farmer table is loaded exactly once, at startup; a load
//! failure replaces the dashboard body with the error message.

use crate::charts::StaticChartRenderer;
use crate::data::{ExcelLoader, LoadError, DATA_FILE, SHEET_NAME};
use crate::gui::{DashboardPanel, Sidebar, SidebarAction};
use crate::report::{self, DashboardReport};
use crate::views::{DashboardSummary, ViewBuilder};
use egui::{Color32, RichText, SidePanel};

/// Main application window.
pub struct DashboardApp {
    loader: ExcelLoader,
    sidebar: Sidebar,
    dashboard: DashboardPanel,
    summary: Option<DashboardSummary>,
    villages: Vec<String>,
    load_error: Option<LoadError>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut loader = ExcelLoader::new();
        let mut sidebar = Sidebar::new();
        let mut summary = None;
        let mut villages = Vec::new();
        let mut load_error = None;

        match loader.load(DATA_FILE, SHEET_NAME) {
            Ok(()) => {
                if let Some(df) = loader.get_dataframe() {
                    summary = Some(DashboardSummary::compute(df));
                    villages = ViewBuilder::villages(df);
                }
                sidebar.update_table_info(loader.get_columns(), loader.get_row_count());
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load farmer data");
                sidebar.set_status(&format!("Error: {e}"));
                load_error = Some(e);
            }
        }

        Self {
            loader,
            sidebar,
            dashboard: DashboardPanel::new(),
            summary,
            villages,
            load_error,
        }
    }

    fn handle_export_report(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("farmers_report.json")
            .save_file()
        else {
            return; // user cancelled
        };

        let status = match (&self.summary, self.loader.get_dataframe()) {
            (Some(summary), Some(df)) => {
                let columns = self.loader.get_columns();
                let dashboard_report = DashboardReport {
                    source: DATA_FILE,
                    sheet: SHEET_NAME,
                    rows: df.height(),
                    columns: &columns,
                    summary,
                };
                match report::write_report(&path, &dashboard_report) {
                    Ok(()) => {
                        let _ = open::that(&path);
                        format!("Report exported: {}", path.display())
                    }
                    Err(e) => format!("Error: {e:#}"),
                }
            }
            _ => "No data loaded".to_string(),
        };
        self.sidebar.set_status(&status);
    }

    fn handle_export_charts(&mut self) {
        let Some(summary) = self.summary.clone() else {
            self.sidebar.set_status("No data loaded");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // user cancelled
        };

        let mut exported = 0usize;
        let mut charts: Vec<(&str, anyhow::Result<Vec<u8>>)> = Vec::new();

        if let Some(gender) = &summary.gender_distribution {
            charts.push((
                "gender_distribution.png",
                StaticChartRenderer::render_pie_to_bytes(
                    "Farmers Distribution by Gender",
                    gender,
                    800,
                    600,
                ),
            ));
        }
        if let Some(crops) = &summary.crop_distribution {
            charts.push((
                "crop_production.png",
                StaticChartRenderer::render_bar_to_bytes(
                    "Production Area for Crops",
                    crops,
                    900,
                    600,
                ),
            ));
        }

        for (name, rendered) in charts {
            let result = rendered.and_then(|bytes| {
                std::fs::write(dir.join(name), bytes).map_err(anyhow::Error::from)
            });
            match result {
                Ok(()) => exported += 1,
                Err(e) => {
                    tracing::error!(chart = name, error = %e, "chart export failed");
                    self.sidebar.set_status(&format!("Error: {e:#}"));
                    return;
                }
            }
        }

        self.sidebar.set_status(&format!(
            "{} chart(s) exported to {}",
            exported,
            dir.display()
        ));
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("sidebar")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.sidebar.show(ui);
                    match action {
                        SidebarAction::ExportReport => self.handle_export_report(),
                        SidebarAction::ExportCharts => self.handle_export_charts(),
                        SidebarAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.load_error {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(err.to_string())
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }

            match (self.loader.get_dataframe(), &self.summary) {
                (Some(df), Some(summary)) => {
                    self.dashboard.show(ui, df, summary, &self.villages);
                }
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No Data").size(20.0));
                    });
                }
            }
        });
    }
}
