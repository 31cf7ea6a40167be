//! Plain-text table rendering

use unicode_width::UnicodeWidthStr;

use crate::inventory::{EditRow, EditView};

const SEPARATOR: &str = "  ";

/// Render the labels and quantity column as an aligned text grid
pub fn format_grid(view: &EditView) -> String {
    let mut header: Vec<&str> = vec!["#"];
    header.extend(view.labels.iter().map(String::as_str));
    header.push(&view.column);

    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut cells = vec![(idx + 1).to_string()];
            cells.extend(row.labels.iter().cloned());
            cells.push(row.quantity.clone());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (col, cell) in cells.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(join_padded(header.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    );
    for cells in &body {
        lines.push(join_padded(cells.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

/// One-line description of a row, used in the row picker
pub fn row_summary(row: &EditRow, column: &str) -> String {
    let quantity = if row.quantity.is_empty() {
        "-"
    } else {
        row.quantity.as_str()
    };
    format!("{}  [{}: {}]", row.labels.join(" / "), column, quantity)
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .trim_end()
        .to_string()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
