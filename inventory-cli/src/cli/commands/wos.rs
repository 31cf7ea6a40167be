//! `wos`: list the active work orders

use anyhow::{Result, bail};

use crate::inventory::Inventory;

pub async fn handle_wos_command(inventory: &Inventory) -> Result<()> {
    let selectors = match inventory.load_active_selectors().await.into_result()? {
        Ok(selectors) => selectors,
        Err(report) => bail!("{}", report),
    };

    if selectors.is_empty() {
        eprintln!(
            "There are no active work orders in the '{}' tab.",
            inventory.layout().config_sheet
        );
        return Ok(());
    }

    for selector in selectors {
        println!("{}", selector);
    }
    Ok(())
}
