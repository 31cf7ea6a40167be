//! `show`: print one tab for one work order

use anyhow::{Context, Result, bail};
use colored::*;

use super::resolve_tab;
use crate::cli::console::Console;
use crate::cli::render::format_grid;
use crate::inventory::Inventory;

pub async fn handle_show_command(
    inventory: &Inventory,
    console: &mut dyn Console,
    tab: &str,
    work_order: Option<String>,
) -> Result<()> {
    let tab = resolve_tab(inventory, tab)?;

    let work_order = match work_order {
        Some(wo) => wo,
        None => {
            let selectors = match inventory.load_active_selectors().await.into_result()? {
                Ok(selectors) if !selectors.is_empty() => selectors,
                Ok(_) => bail!(
                    "There are no active work orders in the '{}' tab",
                    inventory.layout().config_sheet
                ),
                Err(report) => bail!("{}", report),
            };
            let idx = console.select("Select the WO", &selectors)?;
            selectors[idx].clone()
        }
    };

    let table = match inventory.load(&tab.name).await.into_result()? {
        Ok(table) => table,
        Err(report) => bail!("{}", report),
    };
    let view = inventory
        .edit_view(&table, &work_order)
        .with_context(|| {
            format!(
                "The WO column '{}' does not exist in the '{}' tab",
                work_order, tab.name
            )
        })?;

    println!(
        "{} {}",
        tab.title().bright_blue().bold(),
        format!("(WO {}, {} rows)", work_order, view.rows.len()).dimmed()
    );
    println!("{}", format_grid(&view));
    Ok(())
}
