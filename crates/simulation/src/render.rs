//! Text and CSV rendering of tables.
//!
//! Formatting is fully explicit: precision, decimal separator and field
//! delimiter are parameters, never taken from process-wide locale state.
//! A NaN cell means no replication produced that sample and renders as
//! [`PLACEHOLDER`] in both formats.

use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Rendering of a missing sample.
pub const PLACEHOLDER: &str = "-";

/// Options for the aligned text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    /// Digits after the decimal point.
    pub precision: usize,
    /// Spaces between columns.
    pub column_gap: usize,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            precision: 3,
            column_gap: 2,
        }
    }
}

impl TextFormat {
    /// Set the precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the gap between columns.
    pub fn with_column_gap(mut self, gap: usize) -> Self {
        self.column_gap = gap;
        self
    }
}

/// Options for the CSV rendering.
///
/// The default targets spreadsheet locales that use a decimal comma:
/// `;` between fields and `,` before the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvFormat {
    /// Digits after the decimal separator.
    pub precision: usize,
    /// Character separating integer and fractional digits.
    pub decimal_separator: char,
    /// Character terminating every field.
    pub field_delimiter: char,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            precision: 5,
            decimal_separator: ',',
            field_delimiter: ';',
        }
    }
}

impl CsvFormat {
    /// Decimal point and comma-delimited fields.
    pub fn point_decimal() -> Self {
        Self {
            decimal_separator: '.',
            field_delimiter: ',',
            ..Self::default()
        }
    }

    /// Set the precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the decimal separator.
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Set the field delimiter.
    pub fn with_field_delimiter(mut self, delimiter: char) -> Self {
        self.field_delimiter = delimiter;
        self
    }
}

/// Fixed-precision rendering of one value, or the placeholder for NaN.
pub fn format_value(value: f64, precision: usize, decimal_separator: char) -> String {
    if value.is_nan() {
        return PLACEHOLDER.to_string();
    }
    let formatted = format!("{value:.precision$}");
    if decimal_separator == '.' {
        formatted
    } else {
        formatted.replace('.', &decimal_separator.to_string())
    }
}

/// Format every cell of `table`.
pub fn to_string_table(table: &Table, precision: usize, decimal_separator: char) -> Vec<Vec<String>> {
    table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|&value| format_value(value, precision, decimal_separator))
                .collect()
        })
        .collect()
}

/// Render as whitespace-aligned columns, one line per row.
///
/// Each column is right-aligned to its widest cell. An empty table renders
/// as an empty string.
pub fn render_text(table: &Table, format: &TextFormat) -> String {
    let cells = to_string_table(table, format.precision, '.');
    let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            cells
                .iter()
                .filter_map(|row| row.get(c))
                .map(String::len)
                .max()
                .unwrap_or(0)
        })
        .collect();

    let gap = " ".repeat(format.column_gap);
    let mut out = String::new();
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:>width$}"))
            .collect();
        out.push_str(&line.join(&gap));
        out.push('\n');
    }
    out
}

/// Render as delimited rows; every field is followed by the delimiter and
/// every row by `\n`.
pub fn render_csv(table: &Table, format: &CsvFormat) -> String {
    let mut out = String::new();
    for row in to_string_table(table, format.precision, format.decimal_separator) {
        for cell in row {
            out.push_str(&cell);
            out.push(format.field_delimiter);
        }
        out.push('\n');
    }
    out
}

/// Render arbitrary rows of values as CSV.
pub fn csv_rows(rows: &[Vec<f64>], format: &CsvFormat) -> String {
    render_csv(&Table::from_rows(rows.to_vec()), format)
}
