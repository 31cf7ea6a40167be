//! Header-keyed records built from the raw rows of a sheet

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::client::SpreadsheetClient;
use super::models::cell_text;

/// All data rows of a sheet keyed by its header row.
///
/// Row 1 of the sheet is the header; every following row becomes one record.
/// Rows shorter than the header are padded with blank cells and cells beyond
/// the header width are dropped, so every record has exactly one value per header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Records {
    /// Read every row of `sheet` and key it by the header row
    pub async fn fetch(client: &dyn SpreadsheetClient, sheet: &str) -> Result<Self> {
        let rows = client
            .read_rows(sheet)
            .await
            .with_context(|| format!("Failed to read sheet '{}'", sheet))?;
        Self::from_rows(rows).with_context(|| format!("Sheet '{}' is malformed", sheet))
    }

    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut rows = rows.into_iter();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(cell_text).collect(),
            None => return Ok(Self::default()),
        };

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                bail!("Header row is not unique: column '{}' appears more than once", header);
            }
        }

        let width = headers.len();
        let rows = rows
            .map(|mut row| {
                row.resize(width, Value::String(String::new()));
                row
            })
            .collect();

        Ok(Self { headers, rows })
    }

    /// Index of the column with exactly this header
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Values of one column in row order, or `None` if the header does not exist
    pub fn column(&self, header: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(header)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_sheet() {
        let records = Records::from_rows(vec![]).unwrap();
        assert!(records.headers.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn test_header_only_sheet() {
        let records = Records::from_rows(vec![vec![json!("Item_EN"), json!("Item_PT")]]).unwrap();
        assert_eq!(records.headers, vec!["Item_EN", "Item_PT"]);
        assert_eq!(records.len(), 0);
    }

    #[test]
    fn test_rows_are_padded_and_truncated() {
        let records = Records::from_rows(vec![
            vec![json!("Item_EN"), json!("Item_PT"), json!("WO1")],
            vec![json!("Bolt")],
            vec![json!("Nut"), json!("Porca"), json!(4), json!("stray")],
        ])
        .unwrap();

        assert_eq!(records.rows[0], vec![json!("Bolt"), json!(""), json!("")]);
        assert_eq!(records.rows[1], vec![json!("Nut"), json!("Porca"), json!(4)]);
    }

    #[test]
    fn test_numeric_headers_become_text() {
        let records = Records::from_rows(vec![vec![json!("Item_EN"), json!(4471)]]).unwrap();
        assert_eq!(records.headers, vec!["Item_EN", "4471"]);
    }

    #[test]
    fn test_duplicate_headers_rejected() {
        let err = Records::from_rows(vec![vec![json!("WO1"), json!("WO1")]]).unwrap_err();
        assert!(err.to_string().contains("WO1"));
    }

    #[test]
    fn test_column_projection() {
        let records = Records::from_rows(vec![
            vec![json!("WO_ativas"), json!("Notes")],
            vec![json!("WO1"), json!("x")],
            vec![json!(" WO2 ")],
        ])
        .unwrap();

        assert_eq!(
            records.column("WO_ativas").unwrap(),
            vec![&json!("WO1"), &json!(" WO2 ")]
        );
        assert!(records.column("Missing").is_none());
    }
}
