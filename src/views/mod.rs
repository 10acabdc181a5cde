//! Views module - derived summaries over the farmer table

mod builder;

pub use builder::{CategoryCount, DashboardSummary, ViewBuilder, ViewError};
