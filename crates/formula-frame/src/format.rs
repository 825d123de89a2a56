#![forbid(unsafe_code)]

use crate::table::Table;
use crate::types::{Timestamp, Value};
use std::fmt::{self, Write as _};

/// Options for rendering cells and tables as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Decimal places for float cells.
    pub float_precision: usize,
    /// `chrono` strftime pattern for timestamp cells.
    pub timestamp_format: String,
    /// Rendered in place of a table with no rows or no columns.
    pub empty_placeholder: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            float_precision: 3,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            empty_placeholder: "empty table".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => format!("{v:.prec$}", prec = self.float_precision),
            Value::String(v) => v.clone(),
            Value::Boolean(v) => v.to_string(),
            Value::Timestamp(v) => self.format_timestamp(v),
        }
    }

    // An unparseable pattern falls back to RFC 3339 rather than panicking inside `Display`.
    fn format_timestamp(&self, ts: &Timestamp) -> String {
        let mut out = String::new();
        if write!(out, "{}", ts.format(&self.timestamp_format)).is_err() {
            return ts.to_rfc3339();
        }
        out
    }
}

impl Table {
    /// Fixed-width text rendering of the whole table.
    pub fn render(&self, options: &FormatOptions) -> String {
        if self.is_empty() {
            let mut out = options.empty_placeholder.clone();
            out.push('\n');
            return out;
        }

        let rows = self.row_count();
        let cells: Vec<Vec<String>> = self
            .columns()
            .map(|(_, column)| {
                (0..rows)
                    .map(|row| {
                        column
                            .value_at(row)
                            .map(|value| options.format_value(&value))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = self
            .headers()
            .iter()
            .zip(&cells)
            .map(|(header, column)| {
                column
                    .iter()
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let number_width = rows.to_string().len();

        let mut out = format!("> Table [{}x{}]\n", self.column_count(), rows);

        let mut line = " ".repeat(number_width + 2);
        push_cells(&mut line, self.headers().iter().map(String::as_str), &widths);
        push_line(&mut out, &line);

        for row in 0..rows {
            line.clear();
            let _ = write!(line, "{:>number_width$}: ", row + 1);
            push_cells(&mut line, cells.iter().map(|col| col[row].as_str()), &widths);
            push_line(&mut out, &line);
        }
        out
    }
}

fn push_cells<'a>(line: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    for (idx, (cell, &width)) in cells.zip(widths).enumerate() {
        if idx > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{cell:<width$}");
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatOptions::default()))
    }
}
