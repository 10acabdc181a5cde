//! Charts module - interactive and static chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
