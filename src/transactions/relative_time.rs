//! Relative time expressions
//!
//! Grammar: `<digits><unit>` where unit is one of `s`, `m`, `h`, `d`.
//! Examples: `1s`, `10s`, `1m`, `5h`, `3d`.

use std::time::Duration;

use thiserror::Error;

/// Failure to parse a relative time expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelativeTimeError {
    #[error("time must not be empty")]
    Empty,

    #[error("negative time '{0}' is not allowed")]
    Negative(String),

    #[error("missing time unit in '{0}' (expected one of s, m, h, d)")]
    MissingUnit(String),

    #[error("invalid time unit '{0}' (expected one of s, m, h, d)")]
    InvalidUnit(char),

    #[error("invalid time magnitude '{0}'")]
    InvalidMagnitude(String),

    #[error("time '{0}' is too large")]
    Overflow(String),
}

/// Unit suffix and its length in seconds.
fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(60 * 60),
        'd' => Some(24 * 60 * 60),
        _ => None,
    }
}

/// Parse a relative time expression into a non-negative duration.
pub fn parse_relative_time(text: &str) -> Result<Duration, RelativeTimeError> {
    if text.is_empty() {
        return Err(RelativeTimeError::Empty);
    }
    if text.starts_with('-') {
        return Err(RelativeTimeError::Negative(text.to_string()));
    }

    // Non-empty, so there is a last char.
    let unit = text.chars().last().unwrap_or_default();
    if unit.is_ascii_digit() {
        return Err(RelativeTimeError::MissingUnit(text.to_string()));
    }
    let seconds_per_unit = unit_seconds(unit).ok_or(RelativeTimeError::InvalidUnit(unit))?;

    let magnitude = &text[..text.len() - unit.len_utf8()];
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RelativeTimeError::InvalidMagnitude(magnitude.to_string()));
    }
    let magnitude: u64 = magnitude
        .parse()
        .map_err(|_| RelativeTimeError::Overflow(text.to_string()))?;

    let millis = magnitude
        .checked_mul(seconds_per_unit)
        .and_then(|secs| secs.checked_mul(1000))
        .ok_or_else(|| RelativeTimeError::Overflow(text.to_string()))?;

    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(text: &str) -> u128 {
        parse_relative_time(text).unwrap().as_millis()
    }

    #[test]
    fn test_valid_units() {
        assert_eq!(millis("1s"), 1_000);
        assert_eq!(millis("10s"), 10_000);
        assert_eq!(millis("1m"), 60_000);
        assert_eq!(millis("5h"), 5 * 3_600_000);
        assert_eq!(millis("3d"), 3 * 86_400_000);
        assert_eq!(millis("0s"), 0);
    }

    #[test]
    fn test_magnitude_times_unit() {
        for magnitude in [0u64, 1, 7, 59, 1_000, 123_456] {
            for (unit, secs) in [('s', 1u64), ('m', 60), ('h', 3_600), ('d', 86_400)] {
                let text = format!("{}{}", magnitude, unit);
                assert_eq!(
                    millis(&text),
                    u128::from(magnitude * secs * 1000),
                    "{}",
                    text
                );
            }
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_relative_time(""), Err(RelativeTimeError::Empty));
        assert_eq!(
            parse_relative_time("-5s"),
            Err(RelativeTimeError::Negative("-5s".to_string()))
        );
        assert_eq!(
            parse_relative_time("5x"),
            Err(RelativeTimeError::InvalidUnit('x'))
        );
        assert_eq!(
            parse_relative_time("5"),
            Err(RelativeTimeError::MissingUnit("5".to_string()))
        );
        assert_eq!(
            parse_relative_time("abc"),
            Err(RelativeTimeError::InvalidUnit('c'))
        );
        assert_eq!(
            parse_relative_time("s"),
            Err(RelativeTimeError::InvalidMagnitude(String::new()))
        );
        assert_eq!(
            parse_relative_time("1.5h"),
            Err(RelativeTimeError::InvalidMagnitude("1.5".to_string()))
        );
        assert_eq!(
            parse_relative_time("+5s"),
            Err(RelativeTimeError::InvalidMagnitude("+5".to_string()))
        );
        assert!(parse_relative_time("5S").is_err());
        assert!(parse_relative_time(" 5s").is_err());
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(matches!(
            parse_relative_time("99999999999999999999s"),
            Err(RelativeTimeError::Overflow(_))
        ));
        assert!(matches!(
            parse_relative_time("999999999999999999d"),
            Err(RelativeTimeError::Overflow(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RelativeTimeError::InvalidUnit('x').to_string(),
            "invalid time unit 'x' (expected one of s, m, h, d)"
        );
        assert_eq!(
            RelativeTimeError::Negative("-5s".to_string()).to_string(),
            "negative time '-5s' is not allowed"
        );
    }
}
