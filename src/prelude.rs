//! Prelude module for the datetime_range_picker crate.
//!
//! Re-exports the derive_more macros the value types are built with.

#[allow(unused_imports)]
pub use derive_more::{Display, From, Into};
