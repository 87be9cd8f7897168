//! Formatting helpers for axis labels and metric values.

use time::{macros::format_description, Date};

/// Placeholder for a label or value that cannot be shown.
pub const PLACEHOLDER: &str = "—";

/// Short day-and-month label, e.g. `22 Jan`.
pub fn day_label(date: Date) -> String {
    date.format(&format_description!(
        "[day padding:none] [month repr:short]"
    ))
    .unwrap_or_else(|_| PLACEHOLDER.to_string())
}

/// Short month name, e.g. `Feb`.
pub fn month_label(date: Date) -> String {
    date.format(&format_description!("[month repr:short]"))
        .unwrap_or_else(|_| PLACEHOLDER.to_string())
}

/// Compact month/year label for trend points, e.g. `1/26`.
pub fn trend_label(date: Date) -> String {
    date.format(&format_description!(
        "[month padding:none]/[year repr:last_two]"
    ))
    .unwrap_or_else(|_| PLACEHOLDER.to_string())
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        PLACEHOLDER.to_string()
    }
}

/// Formats a possibly-absent bucket value; gaps render as the placeholder.
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format_number(v, decimals))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
