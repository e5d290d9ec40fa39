mod config;
mod consts;
mod decorator;
mod picker;
mod policy;
mod prelude;
mod range;
mod types;

#[cfg(test)]
mod test_utils;

pub use config::{
    ComponentConstraint, ConfigError, DisplayMode, FormatSetting, InputProps, PickerConfig,
    RangePickerOptions, TimeConstraints, ViewMode,
};
pub use consts::*;
pub use decorator::{CellClassification, CellTag, CellTags, DayCell, RenderedDay, classify_cell, render_day};
pub use picker::{DatetimeRangePicker, Listeners};
pub use policy::{Predicate, ValidityPolicy};
pub use range::{RangePair, RangeState};
pub use types::{DayToken, Inclusivity, Side, Unit};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::str::FromStr;

/// A calendar-aware point in time as seen by the pickers.
///
/// Wraps a wall-clock `NaiveDateTime`; timezone handling belongs to the
/// delegated single-date picker. Every comparison takes a [`Unit`] so the
/// range logic can ignore sub-day components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display(fmt = "{}", "_0.format(INSTANT_FORMAT)")]
pub struct Instant(NaiveDateTime);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid instant format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    #[display(fmt = "Invalid day token: {_0}")]
    InvalidDayToken(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl Instant {
    /// Current local wall-clock time
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Wraps a native chrono value
    pub const fn from_native(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Converts back to the native chrono value handed to listeners
    pub const fn to_native(self) -> NaiveDateTime {
        self.0
    }

    /// Builds an instant at midnight of the given calendar day.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` if the
    /// components do not name a real day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ParseError> {
        Ok(Self::from(calendar_day(year, month, day)?))
    }

    /// Builds an instant from calendar and time-of-day components.
    ///
    /// # Errors
    /// Returns a `ParseError` if the day does not exist or the time is out of range.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, ParseError> {
        let date = calendar_day(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            ParseError::InvalidFormat(format!("{hour:02}:{minute:02}:{second:02}"))
        })?;
        Ok(Self(date.and_time(time)))
    }

    /// Calendar day of this instant
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Time of day, down to the fractional second
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, starting at 1
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, the label a calendar cell shows
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Key of the calendar cell this instant falls on
    pub fn day_token(&self) -> DayToken {
        DayToken::from(self.date())
    }

    /// Strictly earlier than `other` once both are truncated to `unit`
    pub fn is_before(&self, other: &Self, unit: Unit) -> bool {
        unit.key(&self.0) < unit.key(&other.0)
    }

    /// Strictly later than `other` once both are truncated to `unit`
    pub fn is_after(&self, other: &Self, unit: Unit) -> bool {
        unit.key(&self.0) > unit.key(&other.0)
    }

    /// Same `unit` as `other`, e.g. the same calendar day for `Unit::Day`
    pub fn is_same(&self, other: &Self, unit: Unit) -> bool {
        unit.key(&self.0) == unit.key(&other.0)
    }

    /// Not later than `other` at `unit` granularity
    pub fn is_same_or_before(&self, other: &Self, unit: Unit) -> bool {
        unit.key(&self.0) <= unit.key(&other.0)
    }

    /// Not earlier than `other` at `unit` granularity
    pub fn is_same_or_after(&self, other: &Self, unit: Unit) -> bool {
        unit.key(&self.0) >= unit.key(&other.0)
    }

    /// Checks whether this instant lies between `from` and `to` at `unit` granularity.
    /// Bounds given in reverse order never contain anything.
    pub fn is_between(&self, from: &Self, to: &Self, unit: Unit, inclusivity: Inclusivity) -> bool {
        let after_from = if inclusivity.includes_start() {
            !self.is_before(from, unit)
        } else {
            self.is_after(from, unit)
        };
        let before_to = if inclusivity.includes_end() {
            !self.is_after(to, unit)
        } else {
            self.is_before(to, unit)
        };
        after_from && before_to
    }
}

fn calendar_day(year: i32, month: u32, day: u32) -> Result<NaiveDate, ParseError> {
    if month == 0 || month > MAX_MONTH {
        return Err(ParseError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDay { year, month, day })
}

impl From<NaiveDate> for Instant {
    fn from(date: NaiveDate) -> Self {
        // NaiveTime's default is midnight
        Self(date.and_time(NaiveTime::default()))
    }
}

impl FromStr for Instant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Seconds with optional fraction first, then minutes, then a bare calendar day
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, INSTANT_FORMAT) {
            return Ok(Self(value));
        }
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, INSTANT_FORMAT_MINUTES) {
            return Ok(Self(value));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self::from)
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))
    }
}

impl serde::Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Instant {
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
    use crate::test_utils::{at, day};

    #[test]
    fn test_parse_full_instant() {
        let instant = "2024-03-10T14:30:15".parse::<Instant>().unwrap();
        assert_eq!(instant, at(2024, 3, 10, 14, 30, 15));
        assert_eq!(instant.year(), 2024);
        assert_eq!(instant.month(), 3);
        assert_eq!(instant.day(), 10);
    }

    #[test]
    fn test_parse_minute_precision() {
        let instant = "2024-03-10T14:30".parse::<Instant>().unwrap();
        assert_eq!(instant, at(2024, 3, 10, 14, 30, 0));
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let instant = " 2024-03-10 ".parse::<Instant>().unwrap();
        assert_eq!(instant, day(2024, 3, 10));
        assert_eq!(instant.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Instant>(), Err(ParseError::EmptyInput)));
        assert!(matches!("   ".parse::<Instant>(), Err(ParseError::EmptyInput)));
        assert!(matches!(
            "03/10/2024".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-02-30".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(at(2024, 3, 10, 9, 5, 0).to_string(), "2024-03-10T09:05:00");
        assert_eq!(day(1991, 8, 15).to_string(), "1991-08-15T00:00:00");
    }

    #[test]
    fn test_from_ymd_validation() {
        assert!(Instant::from_ymd(2024, 2, 29).is_ok());
        assert!(matches!(
            Instant::from_ymd(2023, 2, 29),
            Err(ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        ));
        assert!(matches!(Instant::from_ymd(2024, 13, 1), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(Instant::from_ymd(2024, 0, 1), Err(ParseError::InvalidMonth(0))));
        assert!(Instant::from_ymd_hms(2024, 3, 10, 24, 0, 0).is_err());
    }

    #[test]
    fn test_native_conversion() {
        let native = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let instant = Instant::from_native(native);
        assert_eq!(instant.to_native(), native);

        let via_from: Instant = native.into();
        let back: NaiveDateTime = via_from.into();
        assert_eq!(back, native);
    }

    #[test]
    fn test_day_granularity_ignores_time() {
        let morning = at(2024, 3, 10, 6, 0, 0);
        let evening = at(2024, 3, 10, 22, 0, 0);

        assert!(morning.is_same(&evening, Unit::Day));
        assert!(evening.is_same_or_before(&morning, Unit::Day));
        assert!(!evening.is_before(&morning, Unit::Day));
        assert!(evening.is_after(&morning, Unit::Millisecond));
        assert!(!morning.is_same(&evening, Unit::Hour));
    }

    #[test]
    fn test_coarse_units() {
        let a = at(2024, 3, 1, 0, 0, 0);
        let b = at(2024, 3, 31, 23, 59, 59);
        let c = at(2024, 4, 1, 0, 0, 0);

        assert!(a.is_same(&b, Unit::Month));
        assert!(b.is_before(&c, Unit::Month));
        assert!(a.is_same(&c, Unit::Year));
        assert!(b.is_before(&c, Unit::Second));
    }

    #[test]
    fn test_is_between_inclusivity() {
        struct TestCase {
            inclusivity: Inclusivity,
            at_start:    bool,
            at_end:      bool,
        }

        let from = day(2024, 3, 10);
        let to = day(2024, 3, 15);
        let cases = [
            TestCase {
                inclusivity: Inclusivity::Exclusive,
                at_start:    false,
                at_end:      false,
            },
            TestCase {
                inclusivity: Inclusivity::IncludeStart,
                at_start:    true,
                at_end:      false,
            },
            TestCase {
                inclusivity: Inclusivity::IncludeEnd,
                at_start:    false,
                at_end:      true,
            },
            TestCase {
                inclusivity: Inclusivity::Inclusive,
                at_start:    true,
                at_end:      true,
            },
        ];

        for case in &cases {
            let mid = at(2024, 3, 12, 12, 0, 0);
            let start_evening = at(2024, 3, 10, 20, 0, 0);
            let end_morning = at(2024, 3, 15, 8, 0, 0);

            assert!(mid.is_between(&from, &to, Unit::Day, case.inclusivity));
            assert_eq!(
                start_evening.is_between(&from, &to, Unit::Day, case.inclusivity),
                case.at_start,
                "start boundary with {}",
                case.inclusivity
            );
            assert_eq!(
                end_morning.is_between(&from, &to, Unit::Day, case.inclusivity),
                case.at_end,
                "end boundary with {}",
                case.inclusivity
            );
        }
    }

    #[test]
    fn test_is_between_reversed_bounds() {
        let mid = day(2024, 3, 12);
        assert!(!mid.is_between(&day(2024, 3, 15), &day(2024, 3, 10), Unit::Day, Inclusivity::Exclusive));
        assert!(!mid.is_between(&day(2024, 3, 15), &day(2024, 3, 10), Unit::Day, Inclusivity::Inclusive));
    }

    #[test]
    fn test_day_token() {
        assert_eq!(day(2024, 3, 9).day_token().to_string(), "3_9");
        assert_eq!(day(2024, 12, 31).day_token().to_string(), "12_31");
    }

    #[test]
    fn test_now_is_ordered() {
        let before = Instant::now();
        let after = Instant::now();
        assert!(before <= after);
    }

    #[test]
    fn test_serde_string_format() {
        let instant = at(2024, 3, 10, 14, 30, 0);
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, r#""2024-03-10T14:30:00""#);
        let parsed: Instant = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, instant);

        let parsed: Instant = serde_json::from_str(r#""2024-03-10""#).unwrap();
        assert_eq!(parsed, day(2024, 3, 10));

        let result: Result<Instant, _> = serde_json::from_str(r#""not a date""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_fractional_seconds_survive() {
        let time = NaiveTime::from_hms_milli_opt(14, 30, 15, 250).unwrap();
        let instant = Instant::from_native(day(2024, 3, 10).date().and_time(time));

        assert_eq!(instant.to_string(), "2024-03-10T14:30:15.250");
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, r#""2024-03-10T14:30:15.250""#);
        let parsed: Instant = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, instant);

        let parsed: Instant = "2024-03-10T14:30:15.250".parse().unwrap();
        assert_eq!(parsed.time(), time);
        assert!(parsed.is_after(&at(2024, 3, 10, 14, 30, 15), Unit::Millisecond));
    }

    #[test]
    fn test_now_round_trips_through_serde() {
        let now = Instant::now();
        let parsed: Instant = serde_json::from_str(&serde_json::to_string(&now).unwrap()).unwrap();
        assert_eq!(parsed, now);
    }
}
