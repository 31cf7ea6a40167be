//! `set`: change one quantity without prompting

use anyhow::{Result, bail};
use colored::*;

use super::resolve_tab;
use crate::inventory::Inventory;

/// Set the quantity of 1-based data `row` and save the whole column
pub async fn handle_set_command(
    inventory: &Inventory,
    tab: &str,
    work_order: &str,
    row: usize,
    value: &str,
) -> Result<()> {
    let tab = resolve_tab(inventory, tab)?;

    let mut table = match inventory.load(&tab.name).await.into_result()? {
        Ok(table) => table,
        Err(report) => bail!("{}", report),
    };
    if !table.has_column(work_order) {
        bail!(
            "The WO column '{}' does not exist in the '{}' tab",
            work_order,
            tab.name
        );
    }
    if row == 0 || row > table.len() {
        bail!(
            "Row {} is out of range; the '{}' tab has {} data rows",
            row,
            tab.name,
            table.len()
        );
    }

    table.set_cell(row - 1, work_order, value.trim())?;

    match inventory.save(&tab.name, &table, work_order).await.into_result()? {
        Ok(summary) => {
            println!(
                "{} Quantities of '{}' updated for WO {} ({} cells)",
                "✓".green().bold(),
                tab.name,
                work_order,
                summary.cells
            );
            Ok(())
        }
        Err(report) => bail!("{}", report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryClient;
    use crate::inventory::Layout;
    use serde_json::json;
    use std::sync::Arc;

    fn inventory(client: &Arc<MemoryClient>) -> Inventory {
        Inventory::new(client.clone(), Layout::default())
    }

    fn document() -> Arc<MemoryClient> {
        Arc::new(MemoryClient::new().with_sheet(
            "Consumiveis",
            vec![
                vec![json!("Item_EN"), json!("Item_PT"), json!("WO1"), json!("WO2")],
                vec![json!("Glue"), json!("Cola"), json!(3), json!(1)],
                vec![json!("Tape"), json!("Fita"), json!(5), json!(0)],
            ],
        ))
    }

    #[tokio::test]
    async fn test_set_writes_whole_column() {
        let client = document();
        handle_set_command(&inventory(&client), "consumíveis", "WO2", 2, " 8 ")
            .await
            .unwrap();

        let writes = client.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].range, "'Consumiveis'!D2:D3");
        assert_eq!(writes[0].values, vec![vec![json!("1")], vec![json!("8")]]);
    }

    #[tokio::test]
    async fn test_set_rejects_bad_row() {
        let client = document();
        let err = handle_set_command(&inventory(&client), "Consumiveis", "WO1", 3, "1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(client.writes().is_empty());
    }

    #[tokio::test]
    async fn test_set_rejects_unknown_work_order() {
        let client = document();
        assert!(
            handle_set_command(&inventory(&client), "Consumiveis", "WO3", 1, "1")
                .await
                .is_err()
        );
        assert!(client.writes().is_empty());
    }
}
