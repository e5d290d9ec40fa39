use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Instant, prelude::*};

/// The authoritative start/end pair behind a range picker.
///
/// Both ends always hold a value. `start <= end` is kept by the end picker's
/// validity policy, not by this type: moving `start` past `end` is allowed and
/// leaves the pair reversed until a new end is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct RangeState {
    start: Instant,
    end:   Instant,
}

/// A range in native form, as handed to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangePair {
    pub start: NaiveDateTime,
    pub end:   NaiveDateTime,
}

impl RangeState {
    /// Both ends at the current local time
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Both ends at `now`
    pub const fn starting_at(now: Instant) -> Self {
        Self { start: now, end: now }
    }

    /// A state with explicit ends. No ordering check is made.
    pub const fn from_bounds(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Start of the range
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// End of the range. May precede the start after a start change.
    pub const fn end(&self) -> Instant {
        self.end
    }

    /// Replaces the start, returning the previous value
    pub(crate) fn set_start(&mut self, start: Instant) -> Instant {
        std::mem::replace(&mut self.start, start)
    }

    /// Replaces the end, returning the previous value
    pub(crate) fn set_end(&mut self, end: Instant) -> Instant {
        std::mem::replace(&mut self.end, end)
    }

    /// Whether `start` is on or before `end` (exact comparison)
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Native copy of both ends
    pub const fn pair(&self) -> RangePair {
        RangePair {
            start: self.start.to_native(),
            end:   self.end.to_native(),
        }
    }
}

impl Default for RangeState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RangeState> for RangePair {
    fn from(state: RangeState) -> Self {
        state.pair()
    }
}
