//! Loading business tabs into tables

use log::{info, warn};

use crate::api::{Records, SpreadsheetClient};

use super::layout::Layout;
use super::outcome::{Outcome, Report};
use super::table::Table;

/// Load `sheet` as a table.
///
/// A sheet missing one of the label columns yields a schema report (and an
/// empty table through [`Outcome::into_parts`]). Remote faults are fatal.
pub async fn load(client: &dyn SpreadsheetClient, layout: &Layout, sheet: &str) -> Outcome<Table> {
    let records = match Records::fetch(client, sheet).await {
        Ok(records) => records,
        Err(err) => return Outcome::Fatal(err),
    };
    build_table(records, layout, sheet)
}

/// Validate the label columns and coerce every other column to text
pub fn build_table(records: Records, layout: &Layout, sheet: &str) -> Outcome<Table> {
    let mut table = Table::from_records(records);

    let missing: Vec<&str> = layout
        .label_columns
        .iter()
        .filter(|label| !table.has_column(label))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        let required = layout
            .label_columns
            .iter()
            .map(|c| format!("'{}'", c))
            .collect::<Vec<_>>()
            .join(" and ");
        warn!("Sheet '{}' is missing columns {:?}", sheet, missing);
        return Report::schema(format!(
            "The '{}' tab must have the columns {}.",
            sheet, required
        ))
        .into();
    }

    table.coerce_to_text_except(&layout.label_columns);
    info!(
        "Loaded {} rows and {} columns from '{}'",
        table.len(),
        table.columns().len(),
        sheet
    );
    Outcome::Ready(table)
}
