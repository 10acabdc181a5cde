//! Village Farming Analytics
//!
//! A desktop dashboard over a static farmer spreadsheet: summary metrics,
//! gender distribution, per-village detail and crop production.

mod charts;
mod data;
mod gui;
mod report;
mod views;

use eframe::egui;
use gui::DashboardApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Village Farming Analytics"),
        ..Default::default()
    };

    eframe::run_native(
        "Village Farming Analytics",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
