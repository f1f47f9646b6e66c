//! Interval model
//!
//! A duration has four equivalent representations: a millisecond count, a
//! sparse interval object, a dense interval array and a fixed-width
//! interval string (`WWWW:D:HH:MM:SS.mmm`). Everything here is pure.

pub mod convert;
pub mod fields;
pub mod grammar;
pub mod object;

// Re-export main types
pub use convert::{
    interval_string_to_array, interval_to_string, to_interval_array, to_interval_object,
    to_milliseconds, Interval, IntervalSpec, LabeledIntervalObject,
};
pub use fields::{
    Field, FIELD_COUNT, INTERVAL_STRING_LENGTH, MAX_INTERVAL_MILLIS_EXCLUSIVE, MAX_SAFE_MILLIS,
};
pub use grammar::{interval_grammar, is_interval_string};
pub use object::{IntervalArray, IntervalObject};
