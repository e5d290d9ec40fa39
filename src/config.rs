//! Options accepted by the range picker and the per-picker configuration
//! derived from them.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HOUR, MAX_MILLISECOND, MAX_MINUTE, MAX_SECOND, READ_ONLY_STYLE};
use crate::prelude::*;
use crate::{Instant, ParseError, Side};

/// Error type for invalid picker options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A constraint's lower bound is above its upper bound.
    #[error("Invalid {side} {component} constraint: min ({min}) is greater than max ({max})")]
    InvertedBounds {
        side:      Side,
        component: &'static str,
        min:       u32,
        max:       u32,
    },

    /// A constraint steps by zero.
    #[error("Invalid {side} {component} constraint: step must be greater than zero")]
    ZeroStep { side: Side, component: &'static str },

    /// A bound lies outside the component's range.
    #[error("Invalid {side} {component} constraint: {value} exceeds {limit}")]
    OutOfRange {
        side:      Side,
        component: &'static str,
        value:     u32,
        limit:     u32,
    },

    /// A textual start or end date could not be read.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The calendar view a picker opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[display(fmt = "years")]
    Years,
    #[display(fmt = "months")]
    Months,
    #[default]
    #[display(fmt = "days")]
    Days,
    #[display(fmt = "time")]
    Time,
}

/// `dateFormat` / `timeFormat`: on, off, or an explicit pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatSetting {
    Enabled(bool),
    Pattern(String),
}

impl FormatSetting {
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Enabled(false))
    }

    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Pattern(pattern) => Some(pattern),
            Self::Enabled(_) => None,
        }
    }
}

impl Default for FormatSetting {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

/// How a delegated picker presents its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Text input the user may type into
    EditableInput,
    /// Input that only opens the calendar
    ReadOnlyTrigger,
    /// Calendar always open, no input
    Inline,
}

impl DisplayMode {
    pub const fn resolve(input: bool, inline: bool) -> Self {
        if inline {
            Self::Inline
        } else if input {
            Self::EditableInput
        } else {
            Self::ReadOnlyTrigger
        }
    }

    pub const fn shows_input(self) -> bool {
        !matches!(self, Self::Inline)
    }
}

/// Attributes forwarded to the picker's text input
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProps {
    pub read_only:   bool,
    pub placeholder: Option<String>,
    pub class_name:  Option<String>,
    pub style:       BTreeMap<String, String>,
}

impl InputProps {
    /// The caller's props with the read-only trigger look merged over them
    pub fn read_only_trigger(base: Option<&Self>) -> Self {
        let mut props = base.cloned().unwrap_or_default();
        props.read_only = true;
        for (key, value) in READ_ONLY_STYLE {
            props.style.insert(key.to_owned(), value.to_owned());
        }
        props
    }
}

/// Bounds and step for one time-of-day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentConstraint {
    pub min:  u32,
    pub max:  u32,
    pub step: u32,
}

impl ComponentConstraint {
    pub const fn new(min: u32, max: u32, step: u32) -> Self {
        Self { min, max, step }
    }

    fn validate(&self, side: Side, component: &'static str, limit: u32) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep { side, component });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedBounds {
                side,
                component,
                min: self.min,
                max: self.max,
            });
        }
        if self.max > limit {
            return Err(ConfigError::OutOfRange {
                side,
                component,
                value: self.max,
                limit,
            });
        }
        Ok(())
    }

    // Deserialized constraints skip validation, so a zero step allows nothing
    const fn allows(&self, value: u32) -> bool {
        self.step != 0 && value >= self.min && value <= self.max && (value - self.min) % self.step == 0
    }
}

/// Time-of-day limits handed to a delegated picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConstraints {
    pub hours:        Option<ComponentConstraint>,
    pub minutes:      Option<ComponentConstraint>,
    pub seconds:      Option<ComponentConstraint>,
    pub milliseconds: Option<ComponentConstraint>,
}

impl TimeConstraints {
    fn components(&self) -> [(&'static str, Option<&ComponentConstraint>, u32); 4] {
        [
            ("hours", self.hours.as_ref(), MAX_HOUR),
            ("minutes", self.minutes.as_ref(), MAX_MINUTE),
            ("seconds", self.seconds.as_ref(), MAX_SECOND),
            ("milliseconds", self.milliseconds.as_ref(), MAX_MILLISECOND),
        ]
    }

    /// # Errors
    /// Returns the first `ConfigError` found among the component constraints.
    pub fn validate(&self, side: Side) -> Result<(), ConfigError> {
        self.components()
            .into_iter()
            .filter_map(|(name, constraint, limit)| constraint.map(|c| (name, c, limit)))
            .try_for_each(|(name, constraint, limit)| constraint.validate(side, name, limit))
    }

    /// Whether every constrained component of `time` is within bounds and on a step
    pub fn allows(&self, time: NaiveTime) -> bool {
        let values = [
            time.hour(),
            time.minute(),
            time.second(),
            time.nanosecond() / 1_000_000,
        ];
        self.components()
            .into_iter()
            .zip(values)
            .all(|((_, constraint, _), value)| constraint.is_none_or(|c| c.allows(value)))
    }
}

/// Everything a host may configure on the range picker.
/// Every field is optional when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RangePickerOptions {
    /// Initial value shown by the start picker; construction time when unset
    pub start_date:             Option<Instant>,
    /// Initial value shown by the end picker; construction time when unset
    pub end_date:               Option<Instant>,
    pub input:                  bool,
    pub inline:                 bool,
    pub utc:                    bool,
    pub locale:                 Option<String>,
    pub view_mode:              ViewMode,
    pub date_format:            FormatSetting,
    pub time_format:            FormatSetting,
    pub close_on_tab:           bool,
    pub close_on_select:        bool,
    /// Class of the outer focus region
    pub class_name:             String,
    /// Class given to each delegated picker
    pub picker_class_name:      String,
    pub input_props:            Option<InputProps>,
    pub start_time_constraints: Option<TimeConstraints>,
    pub end_time_constraints:   Option<TimeConstraints>,
}

impl Default for RangePickerOptions {
    fn default() -> Self {
        Self {
            start_date:             None,
            end_date:               None,
            input:                  false,
            inline:                 false,
            utc:                    false,
            locale:                 None,
            view_mode:              ViewMode::default(),
            date_format:            FormatSetting::default(),
            time_format:            FormatSetting::default(),
            close_on_tab:           true,
            close_on_select:        false,
            class_name:             String::new(),
            picker_class_name:      String::new(),
            input_props:            None,
            start_time_constraints: None,
            end_time_constraints:   None,
        }
    }
}

impl RangePickerOptions {
    /// # Errors
    /// Returns a `ConfigError` if either side's time constraints are malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(constraints) = &self.start_time_constraints {
            constraints.validate(Side::Start)?;
        }
        if let Some(constraints) = &self.end_time_constraints {
            constraints.validate(Side::End)?;
        }
        Ok(())
    }

    /// Sets the initial value of one side from text such as `2024-03-10` or
    /// `2024-03-10T14:30`.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if `text` is not a recognised instant.
    pub fn with_initial_date(mut self, side: Side, text: &str) -> Result<Self, ConfigError> {
        let value = text.parse::<Instant>()?;
        match side {
            Side::Start => self.start_date = Some(value),
            Side::End => self.end_date = Some(value),
        }
        Ok(self)
    }

    pub const fn display_mode(&self) -> DisplayMode {
        DisplayMode::resolve(self.input, self.inline)
    }

    fn input_props_for(&self, mode: DisplayMode) -> Option<InputProps> {
        match mode {
            DisplayMode::EditableInput => self.input_props.clone(),
            DisplayMode::ReadOnlyTrigger => Some(InputProps::read_only_trigger(self.input_props.as_ref())),
            DisplayMode::Inline => None,
        }
    }

    /// Configuration for one delegated picker. `default_value` is used when
    /// the matching `start_date`/`end_date` option is unset.
    pub fn picker_config(&self, side: Side, default_value: Instant) -> PickerConfig {
        let (initial, time_constraints) = match side {
            Side::Start => (self.start_date, self.start_time_constraints),
            Side::End => (self.end_date, self.end_time_constraints),
        };
        let display_mode = self.display_mode();

        PickerConfig {
            side,
            display_mode,
            input_props: self.input_props_for(display_mode),
            utc: self.utc,
            locale: self.locale.clone(),
            view_mode: self.view_mode,
            date_format: self.date_format.clone(),
            time_format: self.time_format.clone(),
            close_on_tab: self.close_on_tab,
            close_on_select: self.close_on_select,
            class_name: self.picker_class_name.clone(),
            default_value: initial.unwrap_or(default_value),
            time_constraints,
        }
    }
}

/// Merged configuration handed to one delegated picker on each render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerConfig {
    pub side:             Side,
    pub display_mode:     DisplayMode,
    pub input_props:      Option<InputProps>,
    pub utc:              bool,
    pub locale:           Option<String>,
    pub view_mode:        ViewMode,
    pub date_format:      FormatSetting,
    pub time_format:      FormatSetting,
    pub close_on_tab:     bool,
    pub close_on_select:  bool,
    pub class_name:       String,
    pub default_value:    Instant,
    pub time_constraints: Option<TimeConstraints>,
}
