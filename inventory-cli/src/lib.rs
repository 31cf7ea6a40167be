//! Inventory and consumables tracking on top of a shared Google Sheets document.
//!
//! - [`api`]: the spreadsheet client and A1 helpers
//! - [`inventory`]: loading tabs, listing active work orders, saving quantities
//! - [`config`]: layered configuration
//! - [`cli`]: the `inventory-cli` command line

pub mod api;
pub mod cli;
pub mod config;
pub mod inventory;
