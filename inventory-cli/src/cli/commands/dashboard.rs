//! Interactive dashboard: pick a work order, edit its quantities per tab

use anyhow::Result;
use log::info;

use crate::cli::console::{Console, RowChoice};
use crate::inventory::{Inventory, TabConfig};

/// What happened during a dashboard session
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub work_order: Option<String>,
    pub saved_tabs: Vec<String>,
}

/// Run the dashboard flow.
///
/// Stops before any tab when no work order is available. Reported errors are
/// shown and the flow moves on; fatal errors end the session.
pub async fn run_dashboard(
    inventory: &Inventory,
    console: &mut dyn Console,
    work_order: Option<&str>,
) -> Result<DashboardSummary> {
    let mut summary = DashboardSummary::default();

    let selectors = match inventory.load_active_selectors().await.into_result()? {
        Ok(selectors) => selectors,
        Err(report) => {
            console.error(&report.message);
            return Ok(summary);
        }
    };
    if selectors.is_empty() {
        console.warning(&format!(
            "There are no active work orders in the '{}' tab.",
            inventory.layout().config_sheet
        ));
        return Ok(summary);
    }

    let selected = match work_order {
        Some(wo) if selectors.iter().any(|s| s == wo) => wo.to_string(),
        Some(wo) => {
            console.error(&format!("'{}' is not an active work order.", wo));
            return Ok(summary);
        }
        None => {
            let idx = console.select("Select the WO", &selectors)?;
            selectors[idx].clone()
        }
    };
    info!("Dashboard session for WO {}", selected);
    summary.work_order = Some(selected.clone());

    for tab in &inventory.layout().tabs {
        console.heading(tab.title());
        if edit_tab(inventory, console, tab, &selected).await? {
            summary.saved_tabs.push(tab.name.clone());
        }
    }

    Ok(summary)
}

/// Show and edit one tab; returns whether it was saved
async fn edit_tab(
    inventory: &Inventory,
    console: &mut dyn Console,
    tab: &TabConfig,
    work_order: &str,
) -> Result<bool> {
    let (mut table, report) = inventory.load(&tab.name).await.into_parts()?;
    if let Some(report) = report {
        console.error(&report.message);
    }
    if table.is_empty() {
        console.warning(&format!("No data found in the '{}' tab.", tab.name));
        return Ok(false);
    }

    let Some(mut view) = inventory.edit_view(&table, work_order) else {
        console.error(&format!(
            "The WO column '{}' does not exist in the '{}' tab.",
            work_order, tab.name
        ));
        return Ok(false);
    };
    console.success(&format!("Data loaded from Google Sheets for WO {}", work_order));
    console.grid(tab.title(), &view);

    loop {
        match console.choose_row(&view)? {
            RowChoice::Edit(row) => {
                let quantity = console.input_quantity(&view.column, &view.rows[row])?;
                view.rows[row].quantity = quantity.trim().to_string();
            }
            RowChoice::Skip => return Ok(false),
            RowChoice::Save => break,
        }
    }

    let changed = table.apply_edits(&view)?;
    info!("{} changed cells in '{}'", changed, tab.name);
    if !console.confirm(&format!("Save {} - WO {}?", tab.name, work_order))? {
        console.warning("Changes discarded.");
        return Ok(false);
    }

    match inventory.save(&tab.name, &table, work_order).await.into_result()? {
        Ok(_) => {
            console.success(&format!(
                "Quantities of '{}' updated in Google Sheets for WO {}",
                tab.name, work_order
            ));
            Ok(true)
        }
        Err(report) => {
            console.error(&report.message);
            Ok(false)
        }
    }
}
