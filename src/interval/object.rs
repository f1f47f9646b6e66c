//! Sparse and dense interval representations

use serde::{Deserialize, Serialize};

use super::fields::{Field, FIELD_COUNT};

/// Dense field values in canonical order
pub type IntervalArray = [i64; FIELD_COUNT];

/// Sparse mapping of field name to value.
///
/// Valid when at least one field is present; absent fields count as zero.
/// Values may exceed their natural range (`seconds: 120` is fine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milliseconds: Option<i64>,
}

impl IntervalObject {
    pub fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::Weeks => self.weeks,
            Field::Days => self.days,
            Field::Hours => self.hours,
            Field::Minutes => self.minutes,
            Field::Seconds => self.seconds,
            Field::Milliseconds => self.milliseconds,
        }
    }

    pub fn set(&mut self, field: Field, value: i64) {
        let slot = match field {
            Field::Weeks => &mut self.weeks,
            Field::Days => &mut self.days,
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
            Field::Milliseconds => &mut self.milliseconds,
        };
        *slot = Some(value);
    }

    /// Builder-style setter
    pub fn with(mut self, field: Field, value: i64) -> Self {
        self.set(field, value);
        self
    }

    /// Value of `field`, zero when absent
    pub fn value_or_zero(&self, field: Field) -> i64 {
        self.get(field).unwrap_or(0)
    }

    /// At least one recognized field is present
    pub fn is_valid(&self) -> bool {
        Field::ALL.into_iter().any(|field| self.get(field).is_some())
    }

    /// Every field filled in from a dense array
    pub fn from_array(values: IntervalArray) -> Self {
        Field::ALL
            .into_iter()
            .zip(values)
            .fold(Self::default(), |object, (field, value)| object.with(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_invalid() {
        assert!(!IntervalObject::default().is_valid());
        assert!(IntervalObject::default().with(Field::Milliseconds, 0).is_valid());
    }

    #[test]
    fn deserializes_sparse_objects_and_ignores_unknown_keys() {
        let object: IntervalObject =
            serde_json::from_str(r#"{"minutes": 3, "name": "tea", "years": 2}"#).unwrap();
        assert_eq!(object.minutes, Some(3));
        assert_eq!(object.value_or_zero(Field::Hours), 0);
        assert!(object.is_valid());

        let json = serde_json::to_string(&object).unwrap();
        assert_eq!(json, r#"{"minutes":3}"#);
    }

    #[test]
    fn from_array_fills_fields_positionally() {
        let object = IntervalObject::from_array([1, 2, 3, 4, 5, 6]);
        assert_eq!(object.weeks, Some(1));
        assert_eq!(object.days, Some(2));
        assert_eq!(object.milliseconds, Some(6));
    }
}
