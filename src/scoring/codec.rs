//! Parsing and formatting of the report encodings: `"hh:mm:ss"` durations
//! and locale decimals with a comma separator.
//!
//! All functions are total. Hand-entered operational data is dirty, so a
//! field that fails to parse contributes a zero/neutral value instead of
//! aborting the aggregation it feeds.

/// Number of seconds encoded by an `"hh:mm:ss"` string.
///
/// Hours are unbounded. Returns 0 when the string is empty, does not have
/// exactly three colon-separated parts, or any part is not an integer.
pub fn parse_duration(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return 0;
    }

    let mut fields = [0i64; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        match part.trim().parse::<i64>() {
            Ok(value) => *slot = value,
            Err(_) => return 0,
        }
    }

    fields[0] * 3600 + fields[1] * 60 + fields[2]
}

/// Inverse of [`parse_duration`]: renders a second count as `"hh:mm:ss"`,
/// each field zero-padded to two digits. Negative input renders the zero
/// duration.
pub fn format_duration(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return "00:00:00".to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses a locale decimal using a comma separator (`"11,9"` -> 11.9).
/// Returns 0 on failure.
pub fn parse_decimal(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}
