use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors produced when parsing or validating a clock time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockTimeError {
    #[error("malformed clock time '{0}', expected HH:MM")]
    Malformed(String),
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),
    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),
}

/// A wall-clock time of day with no date component.
///
/// The canonical form is a zero-padded 24-hour `HH:MM` string, which is also
/// the storage format. All arithmetic goes through minutes since midnight;
/// strings only appear at the serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockTimeError> {
        if hour >= 24 {
            return Err(ClockTimeError::HourOutOfRange(hour));
        }
        if minute >= 60 {
            return Err(ClockTimeError::MinuteOutOfRange(minute));
        }
        Ok(ClockTime { hour, minute })
    }

    /// Builds a time from minutes since midnight.
    ///
    /// Values of 1440 and above wrap around to the next day, so the result is
    /// always a valid time of day.
    pub fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        ClockTime {
            hour: minutes / 60,
            minute: minutes % 60,
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes since midnight (0-1439).
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// 12-hour display form with an AM/PM suffix ("13:05" becomes "1:05 PM").
    ///
    /// Hour 0 and hour 12 both display as 12; no locale handling.
    pub fn to_12h(&self) -> String {
        let period = if self.hour >= 12 { "PM" } else { "AM" };
        let display_hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, self.minute, period)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    /// Parses "HH:MM". Leading zeros are optional ("8:00" works), but the
    /// string must be exactly hour and minute separated by one colon.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 2 {
            return Err(ClockTimeError::Malformed(s.to_string()));
        }

        let hour = parts[0]
            .parse::<u32>()
            .map_err(|_| ClockTimeError::Malformed(s.to_string()))?;
        let minute = parts[1]
            .parse::<u32>()
            .map_err(|_| ClockTimeError::Malformed(s.to_string()))?;

        ClockTime::new(hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(t("08:00"), ClockTime::new(8, 0).unwrap());
        assert_eq!(t("00:00"), ClockTime::new(0, 0).unwrap());
        assert_eq!(t("23:59"), ClockTime::new(23, 59).unwrap());

        // Leading zeros are optional
        assert_eq!(t("8:00"), ClockTime::new(8, 0).unwrap());
        assert_eq!(t("8:5"), ClockTime::new(8, 5).unwrap());

        // Surrounding whitespace is tolerated
        assert_eq!(t(" 14:30 "), ClockTime::new(14, 30).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            "24:00".parse::<ClockTime>(),
            Err(ClockTimeError::HourOutOfRange(24))
        );
        assert_eq!(
            "8:60".parse::<ClockTime>(),
            Err(ClockTimeError::MinuteOutOfRange(60))
        );

        for bad in ["", "8", "8:30:00", "abc:def", ":30", "8:", "garbage"] {
            assert_eq!(
                bad.parse::<ClockTime>(),
                Err(ClockTimeError::Malformed(bad.to_string())),
                "expected '{}' to be rejected as malformed",
                bad
            );
        }
    }

    #[test]
    fn test_display_zero_padded() {
        assert_eq!(t("8:5").to_string(), "08:05");
        assert_eq!(t("00:00").to_string(), "00:00");
        assert_eq!(t("23:59").to_string(), "23:59");
    }

    #[test]
    fn test_minutes_round_trip() {
        for s in ["00:00", "08:00", "13:00", "16:45", "19:00", "23:59"] {
            let time = t(s);
            let minutes = time.minutes_from_midnight();
            assert_eq!(ClockTime::from_minutes(minutes).to_string(), s);
        }
    }

    #[test]
    fn test_from_minutes_wraps() {
        assert_eq!(ClockTime::from_minutes(0).to_string(), "00:00");
        assert_eq!(ClockTime::from_minutes(1439).to_string(), "23:59");
        assert_eq!(ClockTime::from_minutes(1440).to_string(), "00:00");
        assert_eq!(ClockTime::from_minutes(1500).to_string(), "01:00");
    }

    #[test]
    fn test_to_12h() {
        assert_eq!(t("00:00").to_12h(), "12:00 AM");
        assert_eq!(t("11:59").to_12h(), "11:59 AM");
        assert_eq!(t("12:30").to_12h(), "12:30 PM");
        assert_eq!(t("13:00").to_12h(), "1:00 PM");
        assert_eq!(t("23:59").to_12h(), "11:59 PM");
        assert_eq!(t("01:05").to_12h(), "1:05 AM");
    }

    #[test]
    fn test_serde_string_form() {
        let time = t("08:00");
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"08:00\"");

        let parsed: ClockTime = serde_json::from_str("\"19:00\"").unwrap();
        assert_eq!(parsed, t("19:00"));

        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }
}
