//! Budget period representation
//!
//! Three fixed windows are tracked, each relative to "now":
//!
//! - `day`: the calendar day containing now, midnight to the last nanosecond
//! - `week`: the trailing seven days ending at now
//! - `month`: the trailing thirty days ending at now (not the calendar month)

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A budget aggregation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// All periods in display order
    pub fn all() -> &'static [Self] {
        &[Self::Day, Self::Week, Self::Month]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Inclusive `[start, end]` window of this period relative to `now`
    pub fn window(&self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        match self {
            Self::Day => {
                let date = now.date();
                let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                    .unwrap_or(NaiveTime::MIN);
                (date.and_time(NaiveTime::MIN), date.and_time(end_of_day))
            }
            Self::Week => (now - Duration::days(7), now),
            Self::Month => (now - Duration::days(30), now),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

/// Error parsing a period name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown period {:?}, expected day, week or month", self.0)
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_day_window_covers_calendar_day() {
        let (start, end) = Period::Day.window(now());
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        assert_eq!(start, day.and_hms_opt(0, 0, 0).unwrap());
        assert!(end >= day.and_hms_opt(23, 59, 59).unwrap());
        assert_eq!(end.date(), day);
    }

    #[test]
    fn test_trailing_windows() {
        let (start, end) = Period::Week.window(now());
        assert_eq!(end, now());
        assert_eq!(start, now() - Duration::days(7));

        let (start, end) = Period::Month.window(now());
        assert_eq!(end, now());
        assert_eq!(start, now() - Duration::days(30));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Day".parse::<Period>().unwrap(), Period::Day);
        assert_eq!(" month ".parse::<Period>().unwrap(), Period::Month);
        assert!("year".parse::<Period>().is_err());
        assert_eq!(Period::Week.to_string(), "week");
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Period::Day).unwrap(), "\"day\"");
    }
}
