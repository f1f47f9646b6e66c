//! Conversions between the interval representations

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fields::{Field, FIELD_COUNT};
use super::grammar::{is_interval_string, separator_before};
use super::object::{IntervalArray, IntervalObject};
use crate::error::{IntervalError, Result};

/// Any of the accepted interval shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Millis(i64),
    Object(IntervalObject),
    Array(IntervalArray),
}

impl Interval {
    /// Dense form from a slice, which must hold exactly one value per field
    pub fn from_slice(values: &[i64]) -> Result<Self> {
        to_array(values).map(Interval::Array)
    }

    /// Parse an interval string into its array form
    pub fn parse(s: &str) -> Result<Self> {
        interval_string_to_array(s).map(Interval::Array)
    }
}

impl From<i64> for Interval {
    fn from(millis: i64) -> Self {
        Interval::Millis(millis)
    }
}

impl From<IntervalObject> for Interval {
    fn from(object: IntervalObject) -> Self {
        Interval::Object(object)
    }
}

impl From<IntervalArray> for Interval {
    fn from(array: IntervalArray) -> Self {
        Interval::Array(array)
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self> {
        Interval::parse(s)
    }
}

/// Interval as it arrives over the wire: a number of milliseconds, an
/// interval string, an interval array or an interval object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntervalSpec {
    Millis(i64),
    Text(String),
    Array(Vec<i64>),
    Object(LabeledIntervalObject),
}

impl IntervalSpec {
    /// Timer name carried inside an object-shaped interval
    pub fn name(&self) -> Option<&str> {
        match self {
            IntervalSpec::Object(labeled) => labeled.name.as_deref(),
            _ => None,
        }
    }
}

/// Interval object that may also carry the timer's `name`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledIntervalObject {
    #[serde(flatten)]
    pub fields: IntervalObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<IntervalObject> for LabeledIntervalObject {
    fn from(fields: IntervalObject) -> Self {
        Self { fields, name: None }
    }
}

impl TryFrom<IntervalSpec> for Interval {
    type Error = IntervalError;

    fn try_from(spec: IntervalSpec) -> Result<Self> {
        match spec {
            IntervalSpec::Millis(millis) => Ok(Interval::Millis(millis)),
            IntervalSpec::Text(text) => Interval::parse(&text),
            IntervalSpec::Array(values) => Interval::from_slice(&values),
            IntervalSpec::Object(labeled) if labeled.fields.is_valid() => {
                Ok(Interval::Object(labeled.fields))
            }
            IntervalSpec::Object(_) => Err(no_recognized_keys()),
        }
    }
}

fn to_array(values: &[i64]) -> Result<IntervalArray> {
    values.try_into().map_err(|_| {
        IntervalError::InvalidShape(format!(
            "interval array must have {} elements, got {}",
            FIELD_COUNT,
            values.len()
        ))
    })
}

fn no_recognized_keys() -> IntervalError {
    IntervalError::InvalidShape("interval object has no recognized keys".to_string())
}

/// Normalize to an interval object.
///
/// Milliseconds are decomposed greedily, heaviest field first, truncating
/// toward zero at each step. Arrays map positionally. Objects pass through.
pub fn to_interval_object(interval: impl Into<Interval>) -> Result<IntervalObject> {
    let interval: Interval = interval.into();
    match interval {
        Interval::Millis(mut remaining) => {
            let mut object = IntervalObject::default();
            for field in Field::ALL {
                let unit = field.unit_millis();
                object.set(field, remaining / unit);
                remaining %= unit;
            }
            Ok(object)
        }
        Interval::Array(values) => Ok(IntervalObject::from_array(values)),
        Interval::Object(object) if object.is_valid() => Ok(object),
        Interval::Object(_) => Err(no_recognized_keys()),
    }
}

/// Total length in milliseconds. Fails if the sum does not fit in an `i64`.
pub fn to_milliseconds(interval: impl Into<Interval>) -> Result<i64> {
    let interval: Interval = interval.into();
    let object = match interval {
        Interval::Millis(millis) => return Ok(millis),
        other => to_interval_object(other)?,
    };

    Field::ALL.into_iter().try_fold(0i64, |total, field| {
        object
            .value_or_zero(field)
            .checked_mul(field.unit_millis())
            .and_then(|part| total.checked_add(part))
            .ok_or_else(|| {
                IntervalError::InvalidShape(format!("{} overflows the millisecond range", field.key()))
            })
    })
}

/// Dense form in canonical order, missing fields as zero
pub fn to_interval_array(interval: impl Into<Interval>) -> Result<IntervalArray> {
    let interval: Interval = interval.into();
    match interval {
        Interval::Array(values) => Ok(values),
        other => {
            let object = to_interval_object(other)?;
            Ok(Field::ALL.map(|field| object.value_or_zero(field)))
        }
    }
}

/// Format as `WWWW:D:HH:MM:SS.mmm`.
///
/// Values wider than their field overflow the layout instead of being cut.
pub fn interval_to_string(interval: impl Into<Interval>) -> Result<String> {
    let object = to_interval_object(interval)?;

    let mut out = String::with_capacity(super::fields::INTERVAL_STRING_LENGTH);
    for (index, field) in Field::ALL.into_iter().enumerate() {
        if let Some(separator) = separator_before(index) {
            out.push(separator);
        }
        out.push_str(&format!(
            "{:0width$}",
            object.value_or_zero(field),
            width = field.width()
        ));
    }
    Ok(out)
}

/// Parse an interval string into field values in canonical order
pub fn interval_string_to_array(s: &str) -> Result<IntervalArray> {
    if !is_interval_string(s) {
        return Err(IntervalError::InvalidShape(format!(
            "not an interval string: {:?}",
            s
        )));
    }

    let mut groups: Vec<&str> = s.split(':').collect();
    if let Some(last) = groups.pop() {
        groups.extend(last.split('.'));
    }

    let values = groups
        .into_iter()
        .map(|group| {
            group.parse::<i64>().map_err(|e| {
                IntervalError::InvalidShape(format!("bad digit group {:?}: {}", group, e))
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    to_array(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::fields::{MILLIS_PER_DAY, MILLIS_PER_WEEK};

    #[test]
    fn decomposes_milliseconds_greedily() {
        let object = to_interval_object(90_061_000i64).unwrap();
        assert_eq!(object.weeks, Some(0));
        assert_eq!(object.days, Some(1));
        assert_eq!(object.hours, Some(1));
        assert_eq!(object.minutes, Some(1));
        assert_eq!(object.seconds, Some(1));
        assert_eq!(object.milliseconds, Some(0));
    }

    #[test]
    fn formats_one_of_each() {
        assert_eq!(interval_to_string(90_061_000i64).unwrap(), "0000:1:01:01:01.000");
        assert_eq!(interval_to_string(0i64).unwrap(), "0000:0:00:00:00.000");
        assert_eq!(
            interval_to_string(3 * MILLIS_PER_WEEK + 6 * MILLIS_PER_DAY + 42).unwrap(),
            "0003:6:00:00:00.042"
        );
    }

    #[test]
    fn oversized_fields_overflow_the_layout() {
        let object = IntervalObject::default().with(Field::Seconds, 120);
        assert_eq!(interval_to_string(object).unwrap(), "0000:0:00:00:120.000");
        assert_eq!(to_milliseconds(object).unwrap(), 120_000);
    }

    #[test]
    fn sparse_objects_default_missing_fields_to_zero() {
        let object = IntervalObject::default()
            .with(Field::Minutes, 2)
            .with(Field::Milliseconds, 5);
        assert_eq!(to_milliseconds(object).unwrap(), 120_005);
        assert_eq!(to_interval_array(object).unwrap(), [0, 0, 0, 2, 0, 5]);
    }

    #[test]
    fn empty_object_is_an_invalid_shape() {
        let empty = Interval::Object(IntervalObject::default());
        assert!(matches!(to_interval_object(empty), Err(IntervalError::InvalidShape(_))));
        assert!(matches!(to_milliseconds(empty), Err(IntervalError::InvalidShape(_))));
        assert!(matches!(interval_to_string(empty), Err(IntervalError::InvalidShape(_))));
    }

    #[test]
    fn overflowing_sum_is_an_invalid_shape() {
        let huge = IntervalObject::default().with(Field::Weeks, i64::MAX / 2);
        assert!(matches!(to_milliseconds(huge), Err(IntervalError::InvalidShape(_))));
    }

    #[test]
    fn arrays_must_have_one_value_per_field() {
        assert!(Interval::from_slice(&[1, 2, 3]).is_err());
        assert!(Interval::from_slice(&[0; 7]).is_err());
        assert_eq!(
            Interval::from_slice(&[0, 0, 0, 0, 1, 500]).unwrap(),
            Interval::Array([0, 0, 0, 0, 1, 500])
        );
    }

    #[test]
    fn parses_interval_strings() {
        assert_eq!(
            interval_string_to_array("0002:3:04:05:06.007").unwrap(),
            [2, 3, 4, 5, 6, 7]
        );
        let interval: Interval = "0000:0:00:01:30.000".parse().unwrap();
        assert_eq!(to_milliseconds(interval).unwrap(), 90_000);
    }

    #[test]
    fn rejects_malformed_interval_strings() {
        for bad in ["0:0:0:0:0.0", "0000:0:00:00:00:000", "0000:0:00:00:00.000x", "1000"] {
            assert!(matches!(
                interval_string_to_array(bad),
                Err(IntervalError::InvalidShape(_))
            ));
        }
    }

    #[test]
    fn negative_durations_truncate_toward_zero() {
        let object = to_interval_object(-1_500i64).unwrap();
        assert_eq!(object.seconds, Some(-1));
        assert_eq!(object.milliseconds, Some(-500));
        assert_eq!(to_milliseconds(object).unwrap(), -1_500);
    }

    #[test]
    fn wire_spec_accepts_every_shape() {
        let cases = [
            (r#"5000"#, 5_000),
            (r#""0000:0:00:00:05.000""#, 5_000),
            (r#"[0, 0, 0, 0, 5, 0]"#, 5_000),
            (r#"{"seconds": 5}"#, 5_000),
        ];
        for (json, expected) in cases {
            let spec: IntervalSpec = serde_json::from_str(json).unwrap();
            let interval = Interval::try_from(spec).unwrap();
            assert_eq!(to_milliseconds(interval).unwrap(), expected, "{}", json);
        }
    }

    #[test]
    fn wire_spec_rejects_bad_shapes() {
        for json in [r#"{}"#, r#"[1, 2]"#, r#""5 seconds""#] {
            let spec: IntervalSpec = serde_json::from_str(json).unwrap();
            assert!(Interval::try_from(spec).is_err(), "{}", json);
        }
    }

    #[test]
    fn object_spec_carries_its_name() {
        let spec: IntervalSpec = serde_json::from_str(r#"{"seconds": 5, "name": "tea"}"#).unwrap();
        assert_eq!(spec.name(), Some("tea"));
        let interval = Interval::try_from(spec).unwrap();
        assert_eq!(to_milliseconds(interval).unwrap(), 5_000);

        let unnamed: IntervalSpec = serde_json::from_str(r#"{"minutes": 1}"#).unwrap();
        assert_eq!(unnamed.name(), None);
        let text: IntervalSpec = serde_json::from_str(r#""0000:0:00:00:05.000""#).unwrap();
        assert_eq!(text.name(), None);
    }

    #[test]
    fn name_alone_is_not_an_interval() {
        let spec: IntervalSpec = serde_json::from_str(r#"{"name": "tea"}"#).unwrap();
        assert!(matches!(Interval::try_from(spec), Err(IntervalError::InvalidShape(_))));
    }
}
