//! Inventory and consumables data flow
//!
//! Loads business tabs into [`Table`]s, lists the active work orders from the
//! config tab and writes an edited quantity column back. All remote access goes
//! through one injected [`SpreadsheetClient`].

pub mod layout;
pub mod loader;
pub mod outcome;
pub mod selectors;
pub mod table;
pub mod writer;

use std::sync::Arc;

use crate::api::SpreadsheetClient;

pub use layout::{Layout, TabConfig};
pub use outcome::{Outcome, Report, ReportKind};
pub use table::{EditRow, EditView, Table};
pub use writer::SaveSummary;

/// The three inventory operations bound to one document
#[derive(Clone)]
pub struct Inventory {
    client: Arc<dyn SpreadsheetClient>,
    layout: Layout,
    verify_row_order: bool,
}

impl Inventory {
    pub fn new(client: Arc<dyn SpreadsheetClient>, layout: Layout) -> Self {
        Self {
            client,
            layout,
            verify_row_order: false,
        }
    }

    /// Re-read the sheet before each save and refuse to write if rows moved
    pub fn with_row_order_check(mut self, enabled: bool) -> Self {
        self.verify_row_order = enabled;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub async fn load(&self, sheet: &str) -> Outcome<Table> {
        loader::load(self.client.as_ref(), &self.layout, sheet).await
    }

    pub async fn load_active_selectors(&self) -> Outcome<Vec<String>> {
        selectors::load_active_selectors(self.client.as_ref(), &self.layout).await
    }

    pub async fn save(&self, sheet: &str, table: &Table, column: &str) -> Outcome<SaveSummary> {
        if self.verify_row_order {
            writer::save_verified(
                self.client.as_ref(),
                &self.layout.label_columns,
                sheet,
                table,
                column,
            )
            .await
        } else {
            writer::save(self.client.as_ref(), sheet, table, column).await
        }
    }

    /// Labels plus `column`, ready for editing; `None` if the column is missing
    pub fn edit_view(&self, table: &Table, column: &str) -> Option<EditView> {
        table.view(&self.layout.label_columns, column)
    }
}
