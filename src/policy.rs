use std::fmt;

use chrono::NaiveDate;
use log::trace;

use crate::{Instant, RangeState, Side, Unit};

/// Caller-supplied selectability rule for one picker
pub type Predicate = Box<dyn Fn(&Instant) -> bool>;

/// Decides which dates each delegated picker may offer.
///
/// The start picker only answers to its external predicate. The end picker
/// additionally refuses any day before the current start day; that rule is
/// applied before the external predicate and cannot be overridden by it.
pub struct ValidityPolicy {
    start: Predicate,
    end:   Predicate,
}

impl ValidityPolicy {
    /// A policy that accepts everything the structural rule allows
    pub fn new() -> Self {
        Self {
            start: Box::new(|_| true),
            end:   Box::new(|_| true),
        }
    }

    #[must_use]
    pub fn with_start_predicate(mut self, predicate: impl Fn(&Instant) -> bool + 'static) -> Self {
        self.start = Box::new(predicate);
        self
    }

    #[must_use]
    pub fn with_end_predicate(mut self, predicate: impl Fn(&Instant) -> bool + 'static) -> Self {
        self.end = Box::new(predicate);
        self
    }

    /// Whether the start picker may offer `date`. Only the external predicate decides.
    pub fn is_valid_date_for_start(&self, date: &Instant) -> bool {
        (self.start)(date)
    }

    /// Whether the end picker may offer `date`: on or after the start's day
    /// and accepted by the external predicate.
    pub fn is_valid_date_for_end(&self, state: &RangeState, date: &Instant) -> bool {
        if !state.start().is_same_or_before(date, Unit::Day) {
            trace!("POLICY: {date} precedes start day {}", state.start().date());
            return false;
        }
        (self.end)(date)
    }

    pub fn is_valid_date(&self, side: Side, state: &RangeState, date: &Instant) -> bool {
        match side {
            Side::Start => self.is_valid_date_for_start(date),
            Side::End => self.is_valid_date_for_end(state, date),
        }
    }

    /// Earliest calendar day the end picker may select
    pub fn min_end_day(state: &RangeState) -> NaiveDate {
        state.start().date()
    }
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidityPolicy").finish_non_exhaustive()
    }
}
