//! Shared helpers for unit tests.

use crate::Instant;

/// Midnight of the given day
pub fn day(year: i32, month: u32, day: u32) -> Instant {
    Instant::from_ymd(year, month, day).expect("test day should be valid")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Instant {
    Instant::from_ymd_hms(year, month, day, hour, minute, second).expect("test instant should be valid")
}
