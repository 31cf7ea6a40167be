//! Command-line interface

pub mod commands;
pub mod console;
pub mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use crate::api::GoogleSheetsClient;
use crate::config::Config;
use crate::inventory::Inventory;
use console::TerminalConsole;

#[derive(Parser, Debug)]
#[command(name = "inventory-cli")]
#[command(about = "Track inventory and consumables per work order in a shared Google Sheet")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Spreadsheet document key, overrides config and environment
    #[arg(long, global = true)]
    pub spreadsheet_id: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick a work order and edit its quantities tab by tab (default)
    Dashboard {
        /// Work order to open instead of prompting
        #[arg(long)]
        wo: Option<String>,
    },
    /// List the active work orders
    Wos,
    /// Print a tab's quantities for one work order
    Show {
        /// Tab name or title, e.g. Inventario
        #[arg(long)]
        tab: String,
        /// Work order column; prompts when omitted
        #[arg(long)]
        wo: Option<String>,
    },
    /// Set one quantity and save the work order's column
    Set {
        #[arg(long)]
        tab: String,
        #[arg(long)]
        wo: String,
        /// 1-based data row (the first row under the header is 1)
        #[arg(long)]
        row: usize,
        #[arg(long)]
        value: String,
    },
    /// Print the effective configuration
    Config,
}

/// Load configuration and dispatch the chosen subcommand
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(id) = cli.spreadsheet_id {
        config.spreadsheet_id = id;
    }
    debug!(
        "Spreadsheet {} at {}, layout {:?}",
        config.spreadsheet_id, config.api_base_url, config.layout
    );

    let command = cli.command.unwrap_or(Commands::Dashboard { wo: None });
    if let Commands::Config = command {
        return commands::config::handle_config_command(&config);
    }

    let inventory = connect(&config)?;
    let mut console = TerminalConsole::new();

    match command {
        Commands::Dashboard { wo } => {
            let summary =
                commands::dashboard::run_dashboard(&inventory, &mut console, wo.as_deref()).await?;
            info!(
                "Dashboard finished: WO {:?}, saved {:?}",
                summary.work_order, summary.saved_tabs
            );
            Ok(())
        }
        Commands::Wos => commands::wos::handle_wos_command(&inventory).await,
        Commands::Show { tab, wo } => {
            commands::show::handle_show_command(&inventory, &mut console, &tab, wo).await
        }
        Commands::Set {
            tab,
            wo,
            row,
            value,
        } => commands::set::handle_set_command(&inventory, &tab, &wo, row, &value).await,
        Commands::Config => Ok(()),
    }
}

/// Build the one client shared by every operation of this process
fn connect(config: &Config) -> Result<Inventory> {
    let settings = config.client_settings()?;
    let client = GoogleSheetsClient::new(settings).context("Failed to create Sheets client")?;
    info!("Using spreadsheet {}", client.spreadsheet_id());

    Ok(Inventory::new(Arc::new(client), config.layout.clone())
        .with_row_order_check(config.verify_row_order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_dashboard() {
        let cli = Cli::parse_from(["inventory-cli", "-vv"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_set_arguments() {
        let cli = Cli::parse_from([
            "inventory-cli",
            "set",
            "--tab",
            "Inventario",
            "--wo",
            "WO1",
            "--row",
            "3",
            "--value",
            "12",
        ]);
        match cli.command {
            Some(Commands::Set { tab, wo, row, value }) => {
                assert_eq!(tab, "Inventario");
                assert_eq!(wo, "WO1");
                assert_eq!(row, 3);
                assert_eq!(value, "12");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
