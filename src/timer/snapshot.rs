//! JSON snapshot of a timer's fields

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IntervalError, Result};

/// Keys a snapshot must carry, no more and no fewer
pub const SNAPSHOT_FIELDS: [&str; 4] = ["length", "end_time", "pause_start_time", "name"];

/// Flat copy of a timer's state. Instants are in the owning clock's units,
/// so a snapshot only means something against that same clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub length: i64,
    pub end_time: i64,
    pub pause_start_time: Option<i64>,
    pub name: String,
}

impl TimerSnapshot {
    /// Validate the key set of a raw JSON value and decode it
    pub fn from_value(value: Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(IntervalError::CorruptSnapshot(
                "snapshot must be a JSON object".to_string(),
            ));
        };

        let unexpected: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|key| !SNAPSHOT_FIELDS.contains(key))
            .collect();
        let missing: Vec<&str> = SNAPSHOT_FIELDS
            .into_iter()
            .filter(|key| !map.contains_key(*key))
            .collect();

        if !unexpected.is_empty() || !missing.is_empty() {
            return Err(IntervalError::CorruptSnapshot(format!(
                "unexpected keys {:?}, missing keys {:?}",
                unexpected, missing
            )));
        }

        let snapshot: TimerSnapshot = serde_json::from_value(value)
            .map_err(|e| IntervalError::CorruptSnapshot(e.to_string()))?;

        if snapshot.length <= 0 {
            return Err(IntervalError::CorruptSnapshot(format!(
                "length must be positive, got {}",
                snapshot.length
            )));
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "length": 5000,
            "end_time": 12000,
            "pause_start_time": null,
            "name": "tea",
        })
    }

    #[test]
    fn serialized_keys_are_the_snapshot_fields() {
        let snapshot = TimerSnapshot::from_value(sample()).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = SNAPSHOT_FIELDS.to_vec();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn rejects_extra_keys() {
        let mut value = sample();
        value["color"] = json!("red");
        assert!(matches!(
            TimerSnapshot::from_value(value),
            Err(IntervalError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn rejects_missing_keys() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("pause_start_time");
        assert!(matches!(
            TimerSnapshot::from_value(value),
            Err(IntervalError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn rejects_wrong_types_and_non_objects() {
        let mut value = sample();
        value["end_time"] = json!("soon");
        assert!(TimerSnapshot::from_value(value).is_err());
        assert!(TimerSnapshot::from_value(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn rejects_non_positive_length() {
        let mut value = sample();
        value["length"] = json!(0);
        assert!(TimerSnapshot::from_value(value).is_err());
    }
}
