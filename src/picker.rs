//! The composite range picker.
//!
//! Owns the [`RangeState`] and wires the two delegated single-date pickers to
//! it: their change reports land in [`DatetimeRangePicker::on_change`], their
//! selectability questions go to the [`ValidityPolicy`], and their day cells
//! are drawn through [`DatetimeRangePicker::render_day`].

use std::fmt;

use chrono::NaiveDateTime;
use log::{debug, trace};

use crate::config::{ConfigError, PickerConfig, RangePickerOptions};
use crate::decorator::{self, CellTags, DayCell, RenderedDay};
use crate::{Instant, RangePair, RangeState, Side, ValidityPolicy};

type PairCallback = Box<dyn FnMut(RangePair)>;
type DateCallback = Box<dyn FnMut(NaiveDateTime)>;
type ValueCallback = Box<dyn FnMut(Instant)>;
type Hook = Box<dyn FnMut()>;

/// Callbacks notified by the range picker. Every one defaults to a no-op.
pub struct Listeners {
    on_change:            PairCallback,
    on_start_date_change: DateCallback,
    on_end_date_change:   DateCallback,
    on_focus:             Hook,
    on_blur:              PairCallback,
    on_start_date_focus:  Hook,
    on_end_date_focus:    Hook,
    on_start_date_blur:   ValueCallback,
    on_end_date_blur:     ValueCallback,
}

impl Listeners {
    pub fn new() -> Self {
        Self {
            on_change:            Box::new(|_| {}),
            on_start_date_change: Box::new(|_| {}),
            on_end_date_change:   Box::new(|_| {}),
            on_focus:             Box::new(|| {}),
            on_blur:              Box::new(|_| {}),
            on_start_date_focus:  Box::new(|| {}),
            on_end_date_focus:    Box::new(|| {}),
            on_start_date_blur:   Box::new(|_| {}),
            on_end_date_blur:     Box::new(|_| {}),
        }
    }

    /// Called with the whole pair after either end changes
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(RangePair) + 'static) -> Self {
        self.on_change = Box::new(callback);
        self
    }

    /// Called with the new start, after `on_change`
    #[must_use]
    pub fn on_start_date_change(mut self, callback: impl FnMut(NaiveDateTime) + 'static) -> Self {
        self.on_start_date_change = Box::new(callback);
        self
    }

    /// Called with the new end, after `on_change`
    #[must_use]
    pub fn on_end_date_change(mut self, callback: impl FnMut(NaiveDateTime) + 'static) -> Self {
        self.on_end_date_change = Box::new(callback);
        self
    }

    #[must_use]
    pub fn on_focus(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_focus = Box::new(callback);
        self
    }

    #[must_use]
    pub fn on_blur(mut self, callback: impl FnMut(RangePair) + 'static) -> Self {
        self.on_blur = Box::new(callback);
        self
    }

    #[must_use]
    pub fn on_start_date_focus(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_start_date_focus = Box::new(callback);
        self
    }

    #[must_use]
    pub fn on_end_date_focus(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_end_date_focus = Box::new(callback);
        self
    }

    #[must_use]
    pub fn on_start_date_blur(mut self, callback: impl FnMut(Instant) + 'static) -> Self {
        self.on_start_date_blur = Box::new(callback);
        self
    }

    #[must_use]
    pub fn on_end_date_blur(mut self, callback: impl FnMut(Instant) + 'static) -> Self {
        self.on_end_date_blur = Box::new(callback);
        self
    }
}

impl Default for Listeners {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").finish_non_exhaustive()
    }
}

/// A linked start/end date-time picker.
#[derive(Debug)]
pub struct DatetimeRangePicker {
    options:     RangePickerOptions,
    policy:      ValidityPolicy,
    listeners:   Listeners,
    state:       RangeState,
    constructed: Instant,
}

impl DatetimeRangePicker {
    /// Creates a picker whose range starts collapsed at the current time.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the options fail validation.
    pub fn new(
        options: RangePickerOptions,
        policy: ValidityPolicy,
        listeners: Listeners,
    ) -> Result<Self, ConfigError> {
        Self::starting_at(Instant::now(), options, policy, listeners)
    }

    /// Like [`new`](Self::new) with an explicit construction instant.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the options fail validation.
    pub fn starting_at(
        now: Instant,
        options: RangePickerOptions,
        policy: ValidityPolicy,
        listeners: Listeners,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        debug!("RANGE: picker created at {now}");
        Ok(Self {
            options,
            policy,
            listeners,
            state: RangeState::starting_at(now),
            constructed: now,
        })
    }

    /// The current start/end pair
    pub const fn state(&self) -> &RangeState {
        &self.state
    }

    /// The current pair as native values, as listeners receive it
    pub const fn pair(&self) -> RangePair {
        self.state.pair()
    }

    /// Options the picker was built with
    pub const fn options(&self) -> &RangePickerOptions {
        &self.options
    }

    /// Configuration for one delegated picker, derived afresh on every call
    pub fn picker_config(&self, side: Side) -> PickerConfig {
        self.options.picker_config(side, self.constructed)
    }

    pub fn start_config(&self) -> PickerConfig {
        self.picker_config(Side::Start)
    }

    pub fn end_config(&self) -> PickerConfig {
        self.picker_config(Side::End)
    }

    /// Class of the outer focus region
    pub fn class_name(&self) -> &str {
        &self.options.class_name
    }

    /// Replaces the start, then notifies `on_change` and `on_start_date_change`.
    /// The end is left alone even if it now precedes the start.
    pub fn on_start_change(&mut self, date: Instant) {
        let previous = self.state.set_start(date);
        debug!("RANGE: start {previous} -> {date}");
        if !self.state.is_ordered() {
            debug!("RANGE: end {} now precedes start", self.state.end());
        }

        let pair = self.state.pair();
        (self.listeners.on_change)(pair);
        (self.listeners.on_start_date_change)(pair.start);
    }

    /// Replaces the end, then notifies `on_change` and `on_end_date_change`
    pub fn on_end_change(&mut self, date: Instant) {
        let previous = self.state.set_end(date);
        debug!("RANGE: end {previous} -> {date}");

        let pair = self.state.pair();
        (self.listeners.on_change)(pair);
        (self.listeners.on_end_date_change)(pair.end);
    }

    pub fn on_change(&mut self, side: Side, date: Instant) {
        match side {
            Side::Start => self.on_start_change(date),
            Side::End => self.on_end_change(date),
        }
    }

    /// Start picker validity, see [`ValidityPolicy::is_valid_date_for_start`]
    pub fn is_valid_date_for_start(&self, date: &Instant) -> bool {
        self.policy.is_valid_date_for_start(date)
    }

    /// End picker validity against the current start
    pub fn is_valid_date_for_end(&self, date: &Instant) -> bool {
        self.policy.is_valid_date_for_end(&self.state, date)
    }

    pub fn is_valid_date(&self, side: Side, date: &Instant) -> bool {
        self.policy.is_valid_date(side, &self.state, date)
    }

    pub fn classify_cell(&self, cell: &Instant) -> CellTags {
        decorator::classify_cell(cell, &self.state)
    }

    /// Day-cell renderer shared by both delegated pickers
    pub fn render_day(&self, cell: &DayCell) -> RenderedDay {
        decorator::render_day(cell, &self.state)
    }

    /// Focus entered the outer region
    pub fn on_focus(&mut self) {
        trace!("RANGE: focus");
        (self.listeners.on_focus)();
    }

    /// Focus left the outer region; reports the current pair
    pub fn on_blur(&mut self) {
        trace!("RANGE: blur");
        let pair = self.state.pair();
        (self.listeners.on_blur)(pair);
    }

    /// One delegated picker gained focus
    pub fn on_picker_focus(&mut self, side: Side) {
        trace!("RANGE: {side} picker focus");
        match side {
            Side::Start => (self.listeners.on_start_date_focus)(),
            Side::End => (self.listeners.on_end_date_focus)(),
        }
    }

    /// One delegated picker lost focus holding `value`
    pub fn on_picker_blur(&mut self, side: Side, value: Instant) {
        trace!("RANGE: {side} picker blur at {value}");
        match side {
            Side::Start => (self.listeners.on_start_date_blur)(value),
            Side::End => (self.listeners.on_end_date_blur)(value),
        }
    }
}
