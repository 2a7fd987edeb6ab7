/*!
 * Conversion between SRT clock strings and seconds.
 *
 * Parsing accepts `MM:SS` and `HH:MM:SS`, with an optional fractional part on
 * the last field introduced by either `,` (SRT) or `.` (WebVTT style).
 * Formatting always produces whole seconds as `HH:MM:SS`.
 */

use crate::errors::TimecodeError;

// @const: Field weights, most significant first
const FIELD_WEIGHTS: [f64; 3] = [3600.0, 60.0, 1.0];

// @const: Field names matching FIELD_WEIGHTS
const FIELD_NAMES: [&str; 3] = ["hours", "minutes", "seconds"];

/// Parse a clock string such as `01:02:03,456` or `02:03.5` into seconds
pub fn parse_timestamp(timestamp: &str) -> Result<f64, TimecodeError> {
    let normalized = timestamp.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    if parts.len() != 2 && parts.len() != 3 {
        return Err(TimecodeError::InvalidFormat(timestamp.to_string()));
    }

    // Two fields are minutes and seconds
    let offset = FIELD_WEIGHTS.len() - parts.len();

    let mut total = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let value = parse_field(part).ok_or_else(|| TimecodeError::InvalidField {
            input: timestamp.to_string(),
            field: FIELD_NAMES[offset + i],
        })?;
        total += value * FIELD_WEIGHTS[offset + i];
    }

    Ok(total)
}

fn parse_field(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Format seconds as `HH:MM:SS`, dropping any fractional part
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };

    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
