//! A1 notation helpers
//!
//! Column numbers are 1-based throughout, matching the spreadsheet UI:
//! column 1 is `A`, column 27 is `AA`.

use std::fmt;

const ALPHABET_LEN: usize = 26;

/// Convert a 1-based column number into spreadsheet column letters.
///
/// Uses bijective base 26, so 26 is `Z`, 27 is `AA`, 702 is `ZZ` and 703 is `AAA`.
/// Returns `None` for 0, which names no column.
pub fn column_letter(number: usize) -> Option<String> {
    if number == 0 {
        return None;
    }

    let mut letters = Vec::new();
    let mut remaining = number;
    while remaining > 0 {
        let (quotient, remainder) = ((remaining - 1) / ALPHABET_LEN, (remaining - 1) % ALPHABET_LEN);
        letters.push(b'A' + remainder as u8);
        remaining = quotient;
    }
    letters.reverse();

    String::from_utf8(letters).ok()
}

/// Quote a sheet name for use in a range reference (`'My Sheet'`).
pub fn quote_sheet_name(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// A single-column block of cells on one sheet, e.g. `'Inventario'!C2:C4`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    sheet: String,
    /// 1-based column number
    column: usize,
    /// 1-based, inclusive
    first_row: usize,
    /// 1-based, inclusive
    last_row: usize,
}

impl A1Range {
    /// Build a column range. Returns `None` when the column or rows are out of bounds.
    pub fn column_span(
        sheet: impl Into<String>,
        column: usize,
        first_row: usize,
        last_row: usize,
    ) -> Option<Self> {
        if column == 0 || first_row == 0 || last_row < first_row {
            return None;
        }
        Some(Self {
            sheet: sheet.into(),
            column,
            first_row,
            last_row,
        })
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn last_row(&self) -> usize {
        self.last_row
    }

    /// Number of cells covered by the range
    pub fn cell_count(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    /// The range without its sheet prefix (`C2:C4`)
    pub fn local(&self) -> String {
        let letter = column_letter(self.column).unwrap_or_default();
        format!("{letter}{}:{letter}{}", self.first_row, self.last_row)
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", quote_sheet_name(&self.sheet), self.local())
    }
}
