//! Excel Data Loader Module
//! Reads the farmer workbook with calamine and bridges it into a Polars
//! DataFrame. Loaded once per process run; the table is never mutated.

use calamine::{open_workbook_auto, Data, Range, Reader};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Fixed data source, expected next to the executable.
pub const DATA_FILE: &str = "farmers_data.xlsx";
pub const SHEET_NAME: &str = "Sheet1";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found. Please ensure '{path}' is in the same directory as the application.")]
    ResourceNotFound { path: String },
    #[error("Error parsing Excel file: {detail}")]
    Parse { detail: String },
    #[error("Error loading Excel file: {detail}")]
    Unknown { detail: String },
}

/// Handles workbook loading and holds the farmer table for the session.
pub struct ExcelLoader {
    df: Option<DataFrame>,
}

impl Default for ExcelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load the named sheet from an Excel workbook. A single attempt, no
    /// retries; every failure maps to a typed `LoadError`.
    pub fn load(&mut self, file_path: &str, sheet: &str) -> Result<(), LoadError> {
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(LoadError::ResourceNotFound {
                path: file_path.to_string(),
            });
        }

        let mut workbook = open_workbook_auto(path).map_err(classify_calamine_error)?;
        let range = workbook
            .worksheet_range(sheet)
            .map_err(classify_calamine_error)?;

        let df = dataframe_from_range(&range)?;
        tracing::info!(
            path = file_path,
            sheet,
            rows = df.height(),
            columns = df.width(),
            "loaded farmer table"
        );
        self.df = Some(df);
        Ok(())
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get list of column names from the loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }
}

/// I/O failures are "unknown" per the error taxonomy; everything else from
/// calamine means the file exists but could not be read as a workbook.
fn classify_calamine_error(err: calamine::Error) -> LoadError {
    match err {
        calamine::Error::Io(e) => LoadError::Unknown {
            detail: e.to_string(),
        },
        other => LoadError::Parse {
            detail: other.to_string(),
        },
    }
}

/// Build a DataFrame from a worksheet range. The first row is the header;
/// a column where every non-empty cell is numeric becomes Float64, anything
/// else becomes String. Empty cells become nulls.
fn dataframe_from_range(range: &Range<Data>) -> Result<DataFrame, LoadError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| LoadError::Parse {
        detail: "sheet has no header row".to_string(),
    })?;

    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell_to_string(cell);
            if name.is_empty() {
                format!("Unnamed: {i}")
            } else {
                name
            }
        })
        .collect();

    let mut cells: Vec<Vec<&Data>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(row.get(i).unwrap_or(&Data::Empty));
        }
    }

    let columns: Vec<Column> = names
        .iter()
        .zip(&cells)
        .map(|(name, col)| build_column(name, col))
        .collect();

    DataFrame::new(columns).map_err(|e| LoadError::Parse {
        detail: e.to_string(),
    })
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    let numeric = cells
        .iter()
        .any(|c| matches!(c, Data::Float(_) | Data::Int(_)))
        && cells
            .iter()
            .all(|c| matches!(c, Data::Empty | Data::Float(_) | Data::Int(_)));

    if numeric {
        let values: Vec<Option<f64>> = cells.iter().map(|c| cell_to_f64(c)).collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|c| match c {
                Data::Empty => None,
                c => Some(cell_to_string(c)),
            })
            .collect();
        Column::new(name.into(), values)
    }
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(n) => Some(*n as f64),
        _ => None,
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn range_with(rows: &[Vec<Data>]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height.saturating_sub(1), width.saturating_sub(1)));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let mut loader = ExcelLoader::new();
        let err = loader
            .load("no_such_farmers_data.xlsx", SHEET_NAME)
            .unwrap_err();
        assert!(matches!(err, LoadError::ResourceNotFound { .. }));
        assert!(loader.get_dataframe().is_none());
        assert_eq!(loader.get_row_count(), 0);
    }

    #[test]
    fn garbage_workbook_is_parse_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .unwrap();
        file.write_all(b"this is not a spreadsheet").unwrap();
        file.flush().unwrap();

        let mut loader = ExcelLoader::new();
        let err = loader
            .load(file.path().to_str().unwrap(), SHEET_NAME)
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn header_row_becomes_column_names() {
        let range = range_with(&[
            vec![
                Data::String("Farmer ID".into()),
                Data::String("Village".into()),
                Data::String("Total Area Holding (Ha)".into()),
            ],
            vec![
                Data::Int(1),
                Data::String("Akkalkot".into()),
                Data::Float(2.5),
            ],
            vec![Data::Int(2), Data::String("Bhigwan".into()), Data::Empty],
        ]);

        let df = dataframe_from_range(&range).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Farmer ID", "Village", "Total Area Holding (Ha)"]
        );
    }

    #[test]
    fn numeric_columns_become_float64_with_nulls_for_empty_cells() {
        let range = range_with(&[
            vec![Data::String("Farmer ID".into()), Data::String("Area".into())],
            vec![Data::Int(1), Data::Float(2.5)],
            vec![Data::Int(2), Data::Empty],
        ]);

        let df = dataframe_from_range(&range).unwrap();
        assert_eq!(df.column("Farmer ID").unwrap().dtype(), &DataType::Float64);
        let area = df.column("Area").unwrap().f64().unwrap();
        assert_eq!(area.get(0), Some(2.5));
        assert_eq!(area.get(1), None);
    }

    #[test]
    fn mixed_columns_become_strings() {
        let range = range_with(&[
            vec![Data::String("Mobile No".into())],
            vec![Data::Int(9000000001)],
            vec![Data::String("n/a".into())],
        ]);

        let df = dataframe_from_range(&range).unwrap();
        let col = df.column("Mobile No").unwrap();
        assert_eq!(col.dtype(), &DataType::String);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn blank_header_cells_get_placeholder_names() {
        let range = range_with(&[
            vec![Data::String("Village".into()), Data::Empty],
            vec![Data::String("A".into()), Data::Int(1)],
        ]);

        let df = dataframe_from_range(&range).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["Village", "Unnamed: 1"]);
    }
}
