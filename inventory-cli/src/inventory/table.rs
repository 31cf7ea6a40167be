//! In-memory projection of a sheet

use anyhow::{Result, bail};
use serde_json::Value;

use crate::api::{Records, cell_text};

/// A sheet's data rows with trimmed column names.
///
/// Row `i` of the table is row `i + 2` of the sheet; row 1 is the header.
/// Every row holds exactly one value per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, padding short rows with blanks
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::String(String::new()));
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a table from records, trimming whitespace around column names
    pub fn from_records(records: Records) -> Self {
        let columns = records
            .headers
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        Self::new(columns, records.rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 0-based positions of every column with exactly this name
    pub fn positions(&self, name: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_str() == name)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Values of the column at `idx`, in row order
    pub fn column_values(&self, idx: usize) -> Vec<Value> {
        self.rows.iter().map(|row| row[idx].clone()).collect()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Replace every value outside `keep` with its text rendering
    pub fn coerce_to_text_except(&mut self, keep: &[String]) {
        let targets: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !keep.contains(c))
            .map(|(idx, _)| idx)
            .collect();

        for row in &mut self.rows {
            for &idx in &targets {
                if !row[idx].is_string() {
                    row[idx] = Value::String(cell_text(&row[idx]));
                }
            }
        }
    }

    /// Set one cell by 0-based row and column name
    pub fn set_cell(&mut self, row: usize, column: &str, value: impl Into<String>) -> Result<()> {
        let idx = match self.positions(column).as_slice() {
            [idx] => *idx,
            [] => bail!("Column '{}' does not exist", column),
            _ => bail!("Column '{}' appears more than once", column),
        };
        let len = self.rows.len();
        let Some(cells) = self.rows.get_mut(row) else {
            bail!("Row {} is out of range (table has {} rows)", row + 1, len);
        };
        cells[idx] = Value::String(value.into());
        Ok(())
    }

    /// Project to the label columns plus one editable column.
    ///
    /// Returns `None` when a label column or the editable column is missing.
    pub fn view(&self, labels: &[String], column: &str) -> Option<EditView> {
        let label_idx: Vec<usize> = labels
            .iter()
            .map(|label| self.columns.iter().position(|c| c == label))
            .collect::<Option<_>>()?;
        let column_idx = self.columns.iter().position(|c| c == column)?;

        let rows = self
            .rows
            .iter()
            .map(|row| EditRow {
                labels: label_idx.iter().map(|&idx| cell_text(&row[idx])).collect(),
                quantity: cell_text(&row[column_idx]),
            })
            .collect();

        Some(EditView {
            labels: labels.to_vec(),
            column: column.to_string(),
            rows,
        })
    }

    /// Merge the editable column of `view` back into this table.
    ///
    /// The view must have been taken from this table: same column and row count.
    pub fn apply_edits(&mut self, view: &EditView) -> Result<usize> {
        if view.rows.len() != self.rows.len() {
            bail!(
                "Edited view has {} rows but the table has {}",
                view.rows.len(),
                self.rows.len()
            );
        }

        let mut changed = 0;
        for (row, edited) in view.rows.iter().enumerate() {
            let current = self.cell(row, &view.column).map(cell_text);
            if current.as_deref() != Some(edited.quantity.as_str()) {
                self.set_cell(row, &view.column, edited.quantity.clone())?;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

/// Label columns plus one editable quantity column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub labels: Vec<String>,
    pub column: String,
    pub rows: Vec<EditRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRow {
    pub labels: Vec<String>,
    pub quantity: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels() -> Vec<String> {
        vec!["Item_EN".to_string(), "Item_PT".to_string()]
    }

    fn sample() -> Table {
        Table::new(
            vec!["Item_EN".into(), "Item_PT".into(), "WO1".into(), "WO2".into()],
            vec![
                vec![json!("Bolt"), json!("Parafuso"), json!(4), json!("2")],
                vec![json!("Nut"), json!("Porca"), json!(""), json!(1.5)],
            ],
        )
    }

    #[test]
    fn test_from_records_trims_columns() {
        let records = Records {
            headers: vec![" Item_EN".into(), "Item_PT ".into(), " WO1 ".into()],
            rows: vec![vec![json!("Bolt"), json!("Parafuso"), json!(3)]],
        };
        let table = Table::from_records(records);
        assert_eq!(table.columns(), &["Item_EN", "Item_PT", "WO1"]);
    }

    #[test]
    fn test_coerce_leaves_labels_alone() {
        let mut table = Table::new(
            vec!["Item_EN".into(), "WO1".into(), "Item_PT".into()],
            vec![vec![json!(100), json!(7), json!(200)]],
        );
        table.coerce_to_text_except(&labels());
        assert_eq!(table.rows()[0], vec![json!(100), json!("7"), json!(200)]);
    }

    #[test]
    fn test_view_projects_selected_column() {
        let table = sample();
        let view = table.view(&labels(), "WO2").unwrap();
        assert_eq!(view.column, "WO2");
        assert_eq!(view.rows[0].labels, vec!["Bolt", "Parafuso"]);
        assert_eq!(view.rows[1].quantity, "1.5");
        assert!(table.view(&labels(), "WO9").is_none());
    }

    #[test]
    fn test_apply_edits_counts_changes() {
        let mut table = sample();
        let mut view = table.view(&labels(), "WO1").unwrap();
        view.rows[1].quantity = "6".to_string();

        assert_eq!(table.apply_edits(&view).unwrap(), 1);
        assert_eq!(table.cell(1, "WO1"), Some(&json!("6")));
        // Untouched rows keep their original values
        assert_eq!(table.cell(0, "WO1"), Some(&json!(4)));
    }

    #[test]
    fn test_apply_edits_rejects_row_count_mismatch() {
        let mut table = sample();
        let mut view = table.view(&labels(), "WO1").unwrap();
        view.rows.pop();
        assert!(table.apply_edits(&view).is_err());
    }

    #[test]
    fn test_set_cell_bounds() {
        let mut table = sample();
        assert!(table.set_cell(5, "WO1", "1").is_err());
        assert!(table.set_cell(0, "WO7", "1").is_err());
        table.set_cell(0, "WO2", "9").unwrap();
        assert_eq!(table.cell(0, "WO2"), Some(&json!("9")));
    }

    #[test]
    fn test_positions_finds_duplicates() {
        let table = Table::new(vec!["A".into(), "WO1".into(), "WO1".into()], vec![]);
        assert_eq!(table.positions("WO1"), vec![1, 2]);
        assert!(table.is_empty());
    }
}
