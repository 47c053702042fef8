//! Output formatting utilities.

use serde::Serialize;

/// Formats a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats cells as a table row.
///
/// Every cell but the last is padded (or truncated) to its width.
pub fn format_table_row(cells: &[&str], widths: &[usize]) -> String {
    let mut row = String::new();
    for (i, cell) in cells.iter().enumerate() {
        match widths.get(i) {
            Some(&width) if i + 1 < cells.len() => {
                row.push_str(&format!("{:<width$} ", truncate(cell, width)));
            }
            _ => row.push_str(cell),
        }
    }
    row
}

/// Prints table header.
pub fn print_table_header(columns: &[&str], widths: &[usize], rule: usize) {
    println!("{}", format_table_row(columns, widths));
    println!("{}", "-".repeat(rule));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
