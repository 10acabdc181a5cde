//! GUI module - User interface components

mod app;
mod dashboard;
mod sidebar;

pub use app::DashboardApp;
pub use dashboard::DashboardPanel;
pub use sidebar::{Sidebar, SidebarAction};
