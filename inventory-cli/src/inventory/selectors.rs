//! Active work orders listed on the config sheet

use log::{info, warn};

use crate::api::{Records, SpreadsheetClient, cell_text};

use super::layout::Layout;
use super::outcome::{Outcome, Report};

/// Read the active work orders, in sheet order.
///
/// Values are trimmed and blanks dropped. Every failure, remote or schema,
/// comes back as a report so callers can treat "nothing usable" uniformly.
pub async fn load_active_selectors(
    client: &dyn SpreadsheetClient,
    layout: &Layout,
) -> Outcome<Vec<String>> {
    let records = match Records::fetch(client, &layout.config_sheet).await {
        Ok(records) => records,
        Err(err) => {
            warn!("Failed to load active work orders: {:#}", err);
            return Report::remote(format!(
                "Failed to load active work orders from the '{}' tab: {:#}",
                layout.config_sheet, err
            ))
            .into();
        }
    };

    match active_selectors(&records, &layout.selector_column) {
        Some(selectors) => {
            info!(
                "{} active work orders in '{}'",
                selectors.len(),
                layout.config_sheet
            );
            Outcome::Ready(selectors)
        }
        None => {
            warn!(
                "Column '{}' not found in '{}'",
                layout.selector_column, layout.config_sheet
            );
            Report::schema(format!(
                "Failed to load active work orders: the '{}' tab has no '{}' column.",
                layout.config_sheet, layout.selector_column
            ))
            .into()
        }
    }
}

/// Trimmed, non-blank values of `column`, or `None` if the column is absent
pub fn active_selectors(records: &Records, column: &str) -> Option<Vec<String>> {
    let idx = records.headers.iter().position(|h| h.trim() == column)?;
    Some(
        records
            .rows
            .iter()
            .map(|row| cell_text(&row[idx]).trim().to_string())
            .filter(|value| !value.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryClient;
    use crate::inventory::ReportKind;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_blanks_dropped_and_order_kept() {
        let client = MemoryClient::new().with_sheet(
            "Config",
            vec![
                vec![json!("WO_ativas")],
                vec![json!("WO1")],
                vec![json!(" ")],
                vec![json!("WO2")],
                vec![Value::Null],
            ],
        );
        let selectors = load_active_selectors(&client, &Layout::default())
            .await
            .ready()
            .unwrap();
        assert_eq!(selectors, vec!["WO1", "WO2"]);
    }

    #[tokio::test]
    async fn test_values_are_trimmed_and_numbers_rendered() {
        let client = MemoryClient::new().with_sheet(
            "Config",
            vec![
                vec![json!("Notes"), json!("WO_ativas")],
                vec![json!("first"), json!("  WO-17  ")],
                vec![json!("second"), json!(4471)],
                vec![json!("short row")],
            ],
        );
        let selectors = load_active_selectors(&client, &Layout::default())
            .await
            .ready()
            .unwrap();
        assert_eq!(selectors, vec!["WO-17", "4471"]);
    }

    #[tokio::test]
    async fn test_missing_column_reports_empty() {
        let client = MemoryClient::new().with_sheet("Config", vec![vec![json!("Other")]]);
        let outcome = load_active_selectors(&client, &Layout::default()).await;
        assert_eq!(outcome.report().unwrap().kind, ReportKind::Schema);
        let (selectors, _) = outcome.into_parts().unwrap();
        assert!(selectors.is_empty());
    }

    #[tokio::test]
    async fn test_remote_fault_is_reported_not_fatal() {
        let client = MemoryClient::new();
        client.fail_reads();
        let outcome = load_active_selectors(&client, &Layout::default()).await;
        assert_eq!(outcome.report().unwrap().kind, ReportKind::Remote);
    }

    #[tokio::test]
    async fn test_missing_config_sheet_is_reported() {
        let client = MemoryClient::new();
        let outcome = load_active_selectors(&client, &Layout::default()).await;
        assert!(outcome.is_reported());
    }

    #[tokio::test]
    async fn test_empty_column_is_ready_and_empty() {
        let client = MemoryClient::new().with_sheet("Config", vec![vec![json!("WO_ativas")]]);
        let selectors = load_active_selectors(&client, &Layout::default())
            .await
            .ready()
            .unwrap();
        assert!(selectors.is_empty());
    }
}
