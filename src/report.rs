//! Report Export Module
//! Serializes the computed summary views to a JSON report file.

use crate::views::DashboardSummary;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Everything the dashboard derived from the table, plus enough provenance
/// to tell which file produced it.
#[derive(Debug, Serialize)]
pub struct DashboardReport<'a> {
    pub source: &'a str,
    pub sheet: &'a str,
    pub rows: usize,
    pub columns: &'a [String],
    pub summary: &'a DashboardSummary,
}

pub fn write_report(path: &Path, report: &DashboardReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .context("serializing dashboard report")?;
    tracing::info!(path = %path.display(), "report exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DATA_FILE, SHEET_NAME};
    use crate::views::CategoryCount;

    #[test]
    fn report_round_trips_through_json() {
        let summary = DashboardSummary {
            total_farmers: Some(3),
            total_villages: Some(2),
            total_land_ha: Some(6.5),
            gender_distribution: Some(vec![
                CategoryCount {
                    category: "F".to_string(),
                    count: 2,
                },
                CategoryCount {
                    category: "M".to_string(),
                    count: 1,
                },
            ]),
            crop_distribution: None,
        };
        let columns = vec!["Farmer ID".to_string(), "Village".to_string()];
        let report = DashboardReport {
            source: DATA_FILE,
            sheet: SHEET_NAME,
            rows: 3,
            columns: &columns,
            summary: &summary,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("farmers_report.json");
        write_report(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["source"], DATA_FILE);
        assert_eq!(value["rows"], 3);
        assert_eq!(value["summary"]["total_farmers"], 3);
        assert_eq!(value["summary"]["total_land_ha"], 6.5);
        assert_eq!(value["summary"]["gender_distribution"][0]["category"], "F");
        assert!(value["summary"]["crop_distribution"].is_null());
    }
}
