//! Range highlighting for calendar day cells.
//!
//! Both delegated pickers draw their day grid through [`render_day`], so the
//! in-range span and the start marker look the same in either calendar.

use serde::Serialize;

use crate::consts::{IN_SELECTING_RANGE_CLASS, RANGE_START_CLASS};
use crate::prelude::*;
use crate::{DayToken, Inclusivity, Instant, ParseError, RangeState, Unit};

/// A decoration the range adds to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CellTag {
    #[display(fmt = "in-selecting-range")]
    InSelectingRange,
    #[display(fmt = "range-start")]
    RangeStart,
}

impl CellTag {
    /// Class name appended to the cell for this tag
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::InSelectingRange => IN_SELECTING_RANGE_CLASS,
            Self::RangeStart => RANGE_START_CLASS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellClassification {
    #[default]
    Normal,
    InRange,
    RangeStart,
}

/// The set of tags a cell carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellTags {
    in_selecting_range: bool,
    range_start:        bool,
}

impl CellTags {
    pub const fn contains(self, tag: CellTag) -> bool {
        match tag {
            CellTag::InSelectingRange => self.in_selecting_range,
            CellTag::RangeStart => self.range_start,
        }
    }

    pub const fn is_empty(self) -> bool {
        !self.in_selecting_range && !self.range_start
    }

    pub fn iter(self) -> impl Iterator<Item = CellTag> {
        [
            (self.in_selecting_range, CellTag::InSelectingRange),
            (self.range_start, CellTag::RangeStart),
        ]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
    }

    /// Single-valued view of the tags. The exclusive span never covers the
    /// start day, so at most one tag is ever set.
    pub const fn classification(self) -> CellClassification {
        if self.range_start {
            CellClassification::RangeStart
        } else if self.in_selecting_range {
            CellClassification::InRange
        } else {
            CellClassification::Normal
        }
    }

    /// Appends the tags' classes to `base`, leaving every existing class in place
    pub fn apply_to(self, base: &str) -> String {
        let mut classes: Vec<&str> = base.split_whitespace().collect();
        for tag in self.iter() {
            let name = tag.class_name();
            if !classes.contains(&name) {
                classes.push(name);
            }
        }
        classes.join(" ")
    }
}

/// Tags for the cell showing `cell`'s day, given the current range.
///
/// Days strictly between start and end are in range; the start day is marked.
/// Both checks are at day granularity.
pub fn classify_cell(cell: &Instant, state: &RangeState) -> CellTags {
    let start = state.start();
    CellTags {
        in_selecting_range: cell.is_between(&start, &state.end(), Unit::Day, Inclusivity::Exclusive),
        range_start:        cell.is_same(&start, Unit::Day),
    }
}

/// A day cell as the delegated calendar hands it over for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date:       Instant,
    pub class_name: String,
}

impl DayCell {
    pub fn new(date: Instant, class_name: impl Into<String>) -> Self {
        Self {
            date,
            class_name: class_name.into(),
        }
    }

    /// Rebuilds a cell from its `M_D` key and the month the calendar displays.
    ///
    /// A month grid also shows trailing days of the previous month and leading
    /// days of the next one. A December key in a January view belongs to the
    /// year before, and a January key in a December view to the year after.
    ///
    /// # Errors
    /// Returns a `ParseError` if the key is malformed or names no day in its
    /// resolved year.
    pub fn from_key(
        key: &str,
        view_year: i32,
        view_month: u32,
        class_name: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let token = key.parse::<DayToken>()?;
        let year = match (token.month(), view_month) {
            (12, 1) => view_year - 1,
            (1, 12) => view_year + 1,
            _ => view_year,
        };
        Ok(Self::new(token.in_year(year)?, class_name))
    }
}

/// What the calendar draws for one day cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDay {
    pub key:        DayToken,
    pub class_name: String,
    pub label:      u32,
    pub tags:       CellTags,
}

pub fn render_day(cell: &DayCell, state: &RangeState) -> RenderedDay {
    let tags = classify_cell(&cell.date, state);
    RenderedDay {
        key: cell.date.day_token(),
        class_name: tags.apply_to(&cell.class_name),
        label: cell.date.day(),
        tags,
    }
}
