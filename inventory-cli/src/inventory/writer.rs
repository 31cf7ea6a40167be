//! Writing a quantity column back to its sheet

use log::{debug, info, warn};
use serde_json::Value;

use crate::api::{A1Range, Records, SpreadsheetClient, ValueInputOption, cell_text};

use super::outcome::{Outcome, Report};
use super::table::Table;

/// First sheet row holding data; row 1 is the header
const FIRST_DATA_ROW: usize = 2;

/// What a save wrote
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSummary {
    /// `None` when the table had no rows and nothing was written
    pub range: Option<A1Range>,
    pub cells: usize,
}

/// A column write ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWrite {
    pub range: A1Range,
    pub values: Vec<Vec<Value>>,
}

/// Work out the range and values for saving `column` of `table` to `sheet`.
///
/// `Ok(None)` means the table has no rows, so there is nothing to address.
pub fn plan_write(sheet: &str, table: &Table, column: &str) -> Result<Option<PlannedWrite>, Report> {
    let position = match table.positions(column).as_slice() {
        [idx] => *idx,
        [] => {
            return Err(Report::selection(format!(
                "Column '{}' was not found in the '{}' table.",
                column, sheet
            )));
        }
        _ => {
            return Err(Report::selection(format!(
                "Column '{}' appears more than once in the '{}' tab; refusing to guess which one to write.",
                column, sheet
            )));
        }
    };

    let values = table.column_values(position);
    if values.is_empty() {
        return Ok(None);
    }

    let column_number = position + 1;
    let last_row = values.len() + FIRST_DATA_ROW - 1;
    let Some(range) = A1Range::column_span(sheet, column_number, FIRST_DATA_ROW, last_row) else {
        return Ok(None);
    };
    debug!(
        "Column '{}' is at position {} of '{}', writing {}",
        column,
        column_number,
        sheet,
        range.local()
    );

    Ok(Some(PlannedWrite {
        range,
        values: values.into_iter().map(|v| vec![v]).collect(),
    }))
}

/// Overwrite `column` on `sheet` with the values held in `table`.
///
/// Exactly one remote write covering rows 2..=N+1 of the column. Values are
/// sent as user-entered text so numeric strings are stored as numbers.
pub async fn save(
    client: &dyn SpreadsheetClient,
    sheet: &str,
    table: &Table,
    column: &str,
) -> Outcome<SaveSummary> {
    let plan = match plan_write(sheet, table, column) {
        Ok(Some(plan)) => plan,
        Ok(None) => {
            info!("'{}' has no rows; nothing to save for '{}'", sheet, column);
            return Outcome::Ready(SaveSummary {
                range: None,
                cells: 0,
            });
        }
        Err(report) => {
            warn!("{}", report);
            return report.into();
        }
    };

    let cells = plan.values.len();
    match client
        .write_range(&plan.range, plan.values, ValueInputOption::UserEntered)
        .await
    {
        Ok(_) => {
            info!("Saved {} cells of '{}' to {}", cells, column, plan.range);
            Outcome::Ready(SaveSummary {
                range: Some(plan.range),
                cells,
            })
        }
        Err(err) => Outcome::Fatal(err.context(format!("Failed to save '{}' on '{}'", column, sheet))),
    }
}

/// Like [`save`], but first re-reads the sheet and refuses to write if the
/// label cells no longer line up with the table row for row.
pub async fn save_verified(
    client: &dyn SpreadsheetClient,
    labels: &[String],
    sheet: &str,
    table: &Table,
    column: &str,
) -> Outcome<SaveSummary> {
    let current = match Records::fetch(client, sheet).await {
        Ok(records) => Table::from_records(records),
        Err(err) => return Outcome::Fatal(err),
    };

    if let Some(report) = row_order_conflict(labels, sheet, table, &current) {
        warn!("{}", report);
        return report.into();
    }
    save(client, sheet, table, column).await
}

/// Compare the label cells of `edited` against the sheet as it is now
fn row_order_conflict(
    labels: &[String],
    sheet: &str,
    edited: &Table,
    current: &Table,
) -> Option<Report> {
    if edited.len() != current.len() {
        return Some(Report::conflict(format!(
            "The '{}' tab now has {} rows but {} were loaded; reload before saving.",
            sheet,
            current.len(),
            edited.len()
        )));
    }

    for row in 0..edited.len() {
        for label in labels {
            let before = edited.cell(row, label).map(cell_text);
            let now = current.cell(row, label).map(cell_text);
            if before != now {
                return Some(Report::conflict(format!(
                    "Row {} of the '{}' tab changed since it was loaded ({} was {:?}, now {:?}); reload before saving.",
                    row + FIRST_DATA_ROW,
                    sheet,
                    label,
                    before.unwrap_or_default(),
                    now.unwrap_or_default()
                )));
            }
        }
    }
    None
}
