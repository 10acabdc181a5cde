//! Data module - workbook loading and the table schema

mod loader;
pub mod schema;

pub use loader::{ExcelLoader, LoadError, DATA_FILE, SHEET_NAME};
