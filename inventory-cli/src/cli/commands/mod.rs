//! Subcommand handlers

pub mod config;
pub mod dashboard;
pub mod set;
pub mod show;
pub mod wos;

use anyhow::{Result, bail};

use crate::inventory::{Inventory, TabConfig};

/// Find a configured tab by sheet name or title
fn resolve_tab<'a>(inventory: &'a Inventory, name: &str) -> Result<&'a TabConfig> {
    match inventory.layout().find_tab(name) {
        Some(tab) => Ok(tab),
        None => {
            let known = inventory
                .layout()
                .tabs
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            bail!("Unknown tab '{}'. Available tabs: {}", name, known)
        }
    }
}
