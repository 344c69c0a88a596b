//! Conversion between race time display strings and seconds.
//!
//! Two shapes are accepted: `M:SS` and `H:MM:SS`, each with optional
//! fractional seconds in the last component. Only parseability is checked;
//! minutes and hours are unbounded and seconds may exceed 59.

use thiserror::Error;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// A time string that does not match either accepted shape.
///
/// Callers treat this as "no duration available" rather than a hard error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid race time: {input:?}")]
pub struct ParseFailure {
    input: String,
}

impl ParseFailure {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parses `M:SS[.ff]` or `H:MM:SS[.ff]` into seconds.
///
/// Leading components are integers, the last one is a real number.
pub fn parse_duration(text: &str) -> Result<f64, ParseFailure> {
    let parts: Vec<&str> = text.split(':').collect();
    let seconds = match parts.as_slice() {
        [minutes, seconds] => {
            whole(minutes, text)? * SECONDS_PER_MINUTE + fractional(seconds, text)?
        }
        [hours, minutes, seconds] => {
            whole(hours, text)? * SECONDS_PER_HOUR
                + whole(minutes, text)? * SECONDS_PER_MINUTE
                + fractional(seconds, text)?
        }
        _ => return Err(ParseFailure::new(text)),
    };

    if seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(ParseFailure::new(text))
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "hour and minute counts far beyond 2^52 are not race times"
)]
fn whole(component: &str, input: &str) -> Result<f64, ParseFailure> {
    component
        .trim()
        .parse::<i64>()
        .map(|value| value as f64)
        .map_err(|_| ParseFailure::new(input))
}

fn fractional(component: &str, input: &str) -> Result<f64, ParseFailure> {
    component
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseFailure::new(input))
}

/// Formats seconds as `M:SS.ss`, or `H:MM:SS.ss` from one hour upwards.
///
/// Only the numeric value round-trips through [`parse_duration`]; the
/// original display string (e.g. `15:30`) is not reproduced byte-for-byte.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 {
        return format!("-{}", format_duration(-seconds));
    }

    let secs = seconds % SECONDS_PER_MINUTE;
    if seconds >= SECONDS_PER_HOUR {
        let hours = (seconds / SECONDS_PER_HOUR).floor();
        let minutes = ((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE).floor();
        format!("{hours:.0}:{minutes:02.0}:{secs:05.2}")
    } else {
        let minutes = (seconds / SECONDS_PER_MINUTE).floor();
        format!("{minutes:.0}:{secs:05.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn parses_minutes_seconds() {
        assert_close(parse_duration("15:30").unwrap(), 930.0);
        assert_close(parse_duration("4:10").unwrap(), 250.0);
    }

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_close(parse_duration("1:05:30").unwrap(), 3930.0);
        assert_close(parse_duration("2:31:07").unwrap(), 9067.0);
    }

    #[test]
    fn parses_fractional_seconds() {
        assert_close(parse_duration("5:03.40").unwrap(), 303.4);
        assert_close(parse_duration("1:05:03.4").unwrap(), 3903.4);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_close(parse_duration(" 15 : 30.5 ").unwrap(), 930.5);
    }

    #[test]
    fn does_not_bound_components() {
        // 75 minutes and 75 seconds are accepted as-is
        assert_close(parse_duration("75:75").unwrap(), 4575.0);
        assert_close(parse_duration("100:00:00").unwrap(), 360_000.0);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["abc", "", "1:2:3:4", "15", "15:", ":30", "1.5:30", "a:30", "15:xx"] {
            let err = parse_duration(input).unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn rejects_non_finite_seconds() {
        assert!(parse_duration("1:inf").is_err());
        assert!(parse_duration("1:NaN").is_err());
    }

    #[test]
    fn parse_failure_message_names_input() {
        let err = parse_duration("not-a-time").unwrap_err();
        assert_eq!(err.to_string(), r#"invalid race time: "not-a-time""#);
    }

    #[test]
    fn formats_below_one_hour() {
        assert_eq!(format_duration(930.0), "15:30.00");
        assert_eq!(format_duration(303.4), "5:03.40");
        assert_eq!(format_duration(0.0), "0:00.00");
    }

    #[test]
    fn formats_one_hour_and_above() {
        assert_eq!(format_duration(3930.0), "1:05:30.00");
        assert_eq!(format_duration(3903.4), "1:05:03.40");
        assert_eq!(format_duration(3600.0), "1:00:00.00");
        assert_eq!(format_duration(36_000.0), "10:00:00.00");
    }

    #[test]
    fn stays_in_minute_branch_just_below_one_hour() {
        assert_eq!(format_duration(3599.99), "59:59.99");
    }

    #[test]
    fn formatted_input_does_not_roundtrip_textually() {
        let seconds = parse_duration("15:30").unwrap();
        assert_eq!(format_duration(seconds), "15:30.00");
    }

    proptest! {
        #[test]
        fn format_then_parse_preserves_value(seconds in 0.0f64..400_000.0) {
            let text = format_duration(seconds);
            let parsed = parse_duration(&text).unwrap();
            prop_assert!(
                (parsed - seconds).abs() <= 1e-2,
                "{seconds} -> {text} -> {parsed}"
            );
        }
    }
}
