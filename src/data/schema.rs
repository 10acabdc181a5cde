//! Farmer Table Schema
//! Named spreadsheet columns. Headers are matched exactly as they appear in
//! the workbook; views check presence before use instead of assuming it.

/// Unique farmer identifier. Duplicates are tolerated (distinct counting).
pub const FARMER_ID: &str = "Farmer ID";
pub const FARMER_NAME: &str = "Name of the Farmer";
pub const MOBILE_NO: &str = "Mobile No";
pub const VILLAGE: &str = "Village";
pub const GENDER: &str = "Gender M/F";
pub const AREA_HA: &str = "Total Area Holding (Ha)";
/// Optional column; the crop view is skipped entirely when it is absent.
pub const CROP_AREA: &str = "Production area for crop";

/// Columns projected in the selected-village detail table.
pub const DETAIL_COLUMNS: [&str; 5] = [FARMER_ID, FARMER_NAME, MOBILE_NO, VILLAGE, AREA_HA];
