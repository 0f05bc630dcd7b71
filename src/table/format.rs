//! Cell-level text format of the persisted dataset.
//!
//! Every parser here is total: a cell that cannot be understood maps to the
//! field's default (missing, unknown, or `false`) instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Separator between tags in the persisted `required_skills` cell.
pub const SKILL_SEPARATOR: &str = ", ";

/// Format used when writing `date_time` cells. Fractional seconds are only
/// written when present.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const TIMESTAMP_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Serialize a tag list into its single-cell form.
pub fn join_skills(skills: &[String]) -> String {
    skills.join(SKILL_SEPARATOR)
}

/// Deserialize a `required_skills` cell back into its tag list.
///
/// An empty or whitespace-only cell is an empty list, and empty segments left
/// by stray separators are dropped.
pub fn split_skills(cell: &str) -> Vec<String> {
    cell.split(SKILL_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a boolean cell. Missing or unrecognized values normalize to `false`.
pub fn parse_flag(cell: Option<&str>) -> bool {
    match cell.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "t" | "1" | "yes" | "y") => true,
        Some("false" | "f" | "0" | "no" | "n" | "") | None => false,
        Some(other) => {
            tracing::trace!("Unrecognized boolean cell '{}', treating as false", other);
            false
        }
    }
}

pub fn format_flag(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

/// Parse a timestamp cell; `None` is the "unknown" marker. RFC 3339 values
/// with an offset are converted to UTC.
pub fn parse_timestamp(cell: Option<&str>) -> Option<NaiveDateTime> {
    let text = cell?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for format in TIMESTAMP_INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    tracing::trace!("Unparsable timestamp '{}', marking as unknown", text);
    None
}

pub fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse a numeric cell; empty, `nan`, infinite and unparsable cells are missing.
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    let text = cell?.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::trace!("Unparsable number '{}', marking as missing", text);
            None
        }
    }
}

pub fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
