//! Countdown duration configuration

use serde::{Deserialize, Serialize};

/// Duration used whenever the requested one is unusable
pub const DEFAULT_DURATION_SECONDS: u32 = 10;
/// Shortest accepted countdown
pub const MIN_DURATION_SECONDS: u32 = 1;
/// Longest accepted countdown
pub const MAX_DURATION_SECONDS: u32 = 60;

/// Target duration of a countdown, always within 1..=60 seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    duration_seconds: u32,
}

impl TimerConfig {
    /// Build a config from an integer, falling back to the default when out of range
    pub fn from_seconds(seconds: i64) -> Self {
        let duration_seconds = if (MIN_DURATION_SECONDS as i64..=MAX_DURATION_SECONDS as i64)
            .contains(&seconds)
        {
            seconds as u32
        } else {
            DEFAULT_DURATION_SECONDS
        };

        Self { duration_seconds }
    }

    /// Build a config from raw text as typed into a number field.
    ///
    /// Leading whitespace is skipped, an optional sign is honoured and the
    /// longest run of leading digits is used, so `"7s"` reads as 7. Text with
    /// no leading digits falls back to the default.
    pub fn from_text(input: &str) -> Self {
        match parse_leading_integer(input) {
            Some(seconds) => Self::from_seconds(seconds),
            None => Self::default(),
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECONDS,
        }
    }
}

fn parse_leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    // Anything too long for i64 is out of range anyway
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_value_in_range() {
        for seconds in 1..=60 {
            assert_eq!(TimerConfig::from_seconds(seconds).duration_seconds(), seconds as u32);
        }
    }

    #[test]
    fn out_of_range_falls_back_to_default() {
        assert_eq!(TimerConfig::from_seconds(0).duration_seconds(), 10);
        assert_eq!(TimerConfig::from_seconds(61).duration_seconds(), 10);
        assert_eq!(TimerConfig::from_seconds(-5).duration_seconds(), 10);
    }

    #[test]
    fn text_input_parses_leading_digits() {
        assert_eq!(TimerConfig::from_text("30").duration_seconds(), 30);
        assert_eq!(TimerConfig::from_text("  7s").duration_seconds(), 7);
        assert_eq!(TimerConfig::from_text("+12").duration_seconds(), 12);
    }

    #[test]
    fn malformed_text_falls_back_to_default() {
        assert_eq!(TimerConfig::from_text("abc").duration_seconds(), 10);
        assert_eq!(TimerConfig::from_text("").duration_seconds(), 10);
        assert_eq!(TimerConfig::from_text("-3").duration_seconds(), 10);
        assert_eq!(TimerConfig::from_text("99999999999999999999999").duration_seconds(), 10);
    }
}
