//! In-memory spreadsheet used by tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use serde_json::Value;

use super::a1::A1Range;
use super::client::SpreadsheetClient;
use super::models::{UpdateValuesResponse, ValueInputOption};

/// A write seen by [`MemoryClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub range: String,
    pub values: Vec<Vec<Value>>,
    pub input: ValueInputOption,
}

#[derive(Debug, Default)]
pub struct MemoryClient {
    sheets: Mutex<HashMap<String, Vec<Vec<Value>>>>,
    writes: Mutex<Vec<RecordedWrite>>,
    reads: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(self, name: &str, rows: Vec<Vec<Value>>) -> Self {
        self.sheets.lock().unwrap().insert(name.to_string(), rows);
        self
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn sheet(&self, name: &str) -> Option<Vec<Vec<Value>>> {
        self.sheets.lock().unwrap().get(name).cloned()
    }

    /// Replace a sheet's rows, as another editor would
    pub fn replace_sheet(&self, name: &str, rows: Vec<Vec<Value>>) {
        self.sheets.lock().unwrap().insert(name.to_string(), rows);
    }
}

#[async_trait]
impl SpreadsheetClient for MemoryClient {
    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<Value>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("connection reset by peer");
        }
        self.sheets
            .lock()
            .unwrap()
            .get(sheet)
            .cloned()
            .ok_or_else(|| anyhow!("Unable to parse range: {}", sheet))
    }

    async fn write_range(
        &self,
        range: &A1Range,
        values: Vec<Vec<Value>>,
        input: ValueInputOption,
    ) -> Result<UpdateValuesResponse> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("Sheets API error 503: The service is currently unavailable.");
        }
        if values.len() != range.cell_count() {
            bail!(
                "Requested writing within range {}, but tried writing {} rows",
                range,
                values.len()
            );
        }

        self.writes.lock().unwrap().push(RecordedWrite {
            range: range.to_string(),
            values: values.clone(),
            input,
        });

        let mut sheets = self.sheets.lock().unwrap();
        let rows = sheets.entry(range.sheet().to_string()).or_default();
        let col = range.column() - 1;
        for (offset, row_values) in values.iter().enumerate() {
            let row_idx = range.first_row() - 1 + offset;
            if rows.len() <= row_idx {
                rows.resize(row_idx + 1, Vec::new());
            }
            let row = &mut rows[row_idx];
            if row.len() <= col {
                row.resize(col + 1, Value::String(String::new()));
            }
            row[col] = row_values.first().cloned().unwrap_or(Value::Null);
        }

        Ok(UpdateValuesResponse {
            updated_range: Some(range.to_string()),
            updated_rows: values.len(),
            updated_cells: values.len(),
        })
    }
}
