//! Common utilities for deed document generation.
//!
//! Shared helpers for date and currency formatting, HTML escaping, and
//! locating the bundled template directory.

use chrono::{Datelike, NaiveDate};
use std::path::Path;

/// Format a date the way the en-IN locale displays it (e.g., "5/3/2025").
pub fn format_indian_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Render a number without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Format an amount in Indian Rupees with lakh/crore grouping
/// (e.g., 1234567 becomes "₹12,34,567").
///
/// Fractional paise are rounded away, matching the form's display.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.abs().round();
    let digits = format_number(rounded);
    let sign = if amount < 0.0 && rounded > 0.0 { "-" } else { "" };

    if digits.len() <= 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return format!("{sign}₹{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{sign}₹{},{last_three}", groups.join(","))
}

/// Escape special characters for literal inclusion in HTML.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Check the PDF magic bytes.
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF")
}

/// Get the bundled templates directory path.
pub fn get_templates_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

/// Get the bundled static assets (form UI) directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}
