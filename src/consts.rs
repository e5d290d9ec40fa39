/// Class appended to calendar cells strictly inside the selected range
pub const IN_SELECTING_RANGE_CLASS: &str = "in-selecting-range";

/// Class appended to the cell on the start day (the calendar's "active" marker)
pub const RANGE_START_CLASS: &str = "rdtActive";

/// Separator between month and day in a calendar cell key (`M_D`)
pub const DAY_TOKEN_SEPARATOR: char = '_';

/// Textual format of an `Instant` (ISO 8601, fraction only when non-zero)
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// Date-only textual format accepted when parsing an `Instant`
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Minute-precision format accepted when parsing an `Instant`
pub const INSTANT_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";

/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// Inclusive upper limits of each time-of-day component
pub const MAX_HOUR: u32 = 23;
pub const MAX_MINUTE: u32 = 59;
pub const MAX_SECOND: u32 = 59;
pub const MAX_MILLISECOND: u32 = 999;

/// Style merged into the input props when the picker is a read-only trigger
pub const READ_ONLY_STYLE: [(&str, &str); 3] = [
    ("cursor", "pointer"),
    ("background-color", "white"),
    ("border", "1px solid #e2e2e2"),
];
