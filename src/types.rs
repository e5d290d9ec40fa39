use crate::consts::{DAY_TOKEN_SEPARATOR, MAX_MONTH};
use crate::prelude::*;
use crate::{Instant, ParseError};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const NANOS_PER_MILLI: u32 = 1_000_000;
const MAX_DAY_OF_MONTH: u32 = 31;

/// Granularity of an `Instant` comparison.
/// Components finer than the unit are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Unit {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "millisecond")]
    Millisecond,
}

type UnitKey = (i32, u32, u32, u32, u32, u32, u32);

impl Unit {
    /// Ordered key of `at` with every component below this unit zeroed
    pub(crate) fn key(self, at: &NaiveDateTime) -> UnitKey {
        let (y, mo, d) = (at.year(), at.month(), at.day());
        let (h, mi, s) = (at.hour(), at.minute(), at.second());
        let ms = at.nanosecond() / NANOS_PER_MILLI;
        match self {
            Self::Year => (y, 0, 0, 0, 0, 0, 0),
            Self::Month => (y, mo, 0, 0, 0, 0, 0),
            Self::Day => (y, mo, d, 0, 0, 0, 0),
            Self::Hour => (y, mo, d, h, 0, 0, 0),
            Self::Minute => (y, mo, d, h, mi, 0, 0),
            Self::Second => (y, mo, d, h, mi, s, 0),
            Self::Millisecond => (y, mo, d, h, mi, s, ms),
        }
    }
}

/// Which endpoints `Instant::is_between` treats as inside the interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Inclusivity {
    #[default]
    #[display(fmt = "()")]
    Exclusive,
    #[display(fmt = "[)")]
    IncludeStart,
    #[display(fmt = "(]")]
    IncludeEnd,
    #[display(fmt = "[]")]
    Inclusive,
}

impl Inclusivity {
    pub const fn includes_start(self) -> bool {
        matches!(self, Self::IncludeStart | Self::Inclusive)
    }

    pub const fn includes_end(self) -> bool {
        matches!(self, Self::IncludeEnd | Self::Inclusive)
    }
}

/// One of the two delegated pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

/// Key carried by a rendered calendar cell: month and day of month, `M_D`.
/// The year comes from the month the calendar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{month}{}{day}", DAY_TOKEN_SEPARATOR)]
pub struct DayToken {
    month: u32,
    day:   u32,
}

impl DayToken {
    /// Creates a token, checking the components a month can hold.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` for a month outside 1-12 and
    /// `ParseError::InvalidDayToken` for a day outside 1-31.
    pub fn new(month: u32, day: u32) -> Result<Self, ParseError> {
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day == 0 || day > MAX_DAY_OF_MONTH {
            return Err(ParseError::InvalidDayToken(format!("{month}{DAY_TOKEN_SEPARATOR}{day}")));
        }
        Ok(Self { month, day })
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn day(self) -> u32 {
        self.day
    }

    /// Resolves the token to midnight of that day in `year`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the day does not exist in that year
    /// (e.g. `2_29` outside leap years).
    pub fn in_year(self, year: i32) -> Result<Instant, ParseError> {
        Instant::from_ymd(year, self.month, self.day)
    }
}

impl From<NaiveDate> for DayToken {
    fn from(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day:   date.day(),
        }
    }
}

impl FromStr for DayToken {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let invalid = || ParseError::InvalidDayToken(trimmed.to_owned());
        let (month, day) = trimmed.split_once(DAY_TOKEN_SEPARATOR).ok_or_else(invalid)?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;
        Self::new(month, day)
    }
}

impl Serialize for DayToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DayToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::day;

    #[test]
    fn test_unit_key_truncates_below_unit() {
        let native = crate::test_utils::at(2024, 3, 10, 14, 30, 15).to_native();
        assert_eq!(Unit::Day.key(&native), (2024, 3, 10, 0, 0, 0, 0));
        assert_eq!(Unit::Minute.key(&native), (2024, 3, 10, 14, 30, 0, 0));
        assert_eq!(Unit::Year.key(&native), (2024, 0, 0, 0, 0, 0, 0));
    }

    #[test]
    fn test_inclusivity_flags() {
        assert!(!Inclusivity::default().includes_start());
        assert!(!Inclusivity::default().includes_end());
        assert!(Inclusivity::IncludeStart.includes_start());
        assert!(!Inclusivity::IncludeStart.includes_end());
        assert!(Inclusivity::Inclusive.includes_end());
        assert_eq!(Inclusivity::IncludeEnd.to_string(), "(]");
    }

    #[test]
    fn test_side_display_and_serde() {
        assert_eq!(Side::Start.to_string(), "start");
        assert_eq!(serde_json::to_string(&Side::End).unwrap(), r#""end""#);
    }

    #[test]
    fn test_parse_day_token() {
        let token = "3_9".parse::<DayToken>().unwrap();
        assert_eq!(token.month(), 3);
        assert_eq!(token.day(), 9);
        assert_eq!(token.to_string(), "3_9");
    }

    #[test]
    fn test_parse_day_token_errors() {
        assert!(matches!("".parse::<DayToken>(), Err(ParseError::EmptyInput)));
        assert!(matches!("3-9".parse::<DayToken>(), Err(ParseError::InvalidDayToken(_))));
        assert!(matches!("3_x".parse::<DayToken>(), Err(ParseError::InvalidDayToken(_))));
        assert!(matches!("3_9_1".parse::<DayToken>(), Err(ParseError::InvalidDayToken(_))));
        assert!(matches!("13_1".parse::<DayToken>(), Err(ParseError::InvalidMonth(13))));
        assert!(matches!("1_32".parse::<DayToken>(), Err(ParseError::InvalidDayToken(_))));
        assert!(matches!("1_0".parse::<DayToken>(), Err(ParseError::InvalidDayToken(_))));
    }

    #[test]
    fn test_day_token_in_year() {
        let token = DayToken::new(2, 29).unwrap();
        assert_eq!(token.in_year(2024).unwrap(), day(2024, 2, 29));
        assert!(matches!(token.in_year(2023), Err(ParseError::InvalidDay { .. })));
    }

    #[test]
    fn test_day_token_from_instant() {
        let token = day(2024, 12, 31).day_token();
        assert_eq!(token, DayToken::new(12, 31).unwrap());
        assert_eq!(token.in_year(2024).unwrap(), day(2024, 12, 31));
    }

    #[test]
    fn test_day_token_serde() {
        let token = DayToken::new(8, 15).unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#""8_15""#);
        let parsed: DayToken = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, token);

        let result: Result<DayToken, _> = serde_json::from_str(r#""0_15""#);
        assert!(result.is_err());
    }
}
