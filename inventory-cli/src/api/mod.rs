//! Google Sheets access layer
//!
//! A narrow interface over the Sheets v4 values API: read every row of a sheet
//! and overwrite a rectangular range. Everything above this layer talks to the
//! [`SpreadsheetClient`] trait, so tests can swap in an in-memory store.

pub mod a1;
pub mod client;
#[cfg(test)]
pub mod memory;
pub mod models;
pub mod records;

pub use a1::{A1Range, column_letter};
pub use client::{ClientSettings, DEFAULT_API_BASE_URL, GoogleSheetsClient, SpreadsheetClient};
pub use models::{UpdateValuesResponse, ValueInputOption, cell_text};
pub use records::Records;
