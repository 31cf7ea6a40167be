//! Sheet and column names of the inventory document

use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL_COLUMNS: [&str; 2] = ["Item_EN", "Item_PT"];
pub const DEFAULT_CONFIG_SHEET: &str = "Config";
pub const DEFAULT_SELECTOR_COLUMN: &str = "WO_ativas";

/// One business tab of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabConfig {
    /// Sheet name in the document
    pub name: String,
    /// Display title, defaults to the sheet name
    #[serde(default)]
    pub title: Option<String>,
}

impl TabConfig {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: Some(title.into()),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Where things live in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Read-only identifying columns present on every business tab
    pub label_columns: Vec<String>,
    /// Sheet listing the active work orders
    pub config_sheet: String,
    /// Column of `config_sheet` holding the active work orders
    pub selector_column: String,
    pub tabs: Vec<TabConfig>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            label_columns: DEFAULT_LABEL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            config_sheet: DEFAULT_CONFIG_SHEET.to_string(),
            selector_column: DEFAULT_SELECTOR_COLUMN.to_string(),
            tabs: vec![
                TabConfig::new("Inventario", "Inventário"),
                TabConfig::new("Consumiveis", "Consumíveis"),
            ],
        }
    }
}

impl Layout {
    pub fn is_label(&self, column: &str) -> bool {
        self.label_columns.iter().any(|label| label == column)
    }

    /// Find a tab by sheet name or title, ignoring case
    pub fn find_tab(&self, name: &str) -> Option<&TabConfig> {
        let wanted = name.trim();
        self.tabs.iter().find(|tab| {
            tab.name.eq_ignore_ascii_case(wanted) || tab.title().eq_ignore_ascii_case(wanted)
        })
    }
}
