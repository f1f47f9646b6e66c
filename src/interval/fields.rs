//! Field table shared by formatting, parsing and conversion

pub const MILLIS_PER_SECOND: i64 = 1000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// Largest integer a JSON consumer can hold without losing precision
pub const MAX_SAFE_MILLIS: i64 = (1 << 53) - 1;

/// One named, fixed-width, weighted component of a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl Field {
    /// Canonical order, decreasing weight. Conversions depend on this ordering.
    pub const ALL: [Field; 6] = [
        Field::Weeks,
        Field::Days,
        Field::Hours,
        Field::Minutes,
        Field::Seconds,
        Field::Milliseconds,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Field::Weeks => "weeks",
            Field::Days => "days",
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
            Field::Milliseconds => "milliseconds",
        }
    }

    /// Display width in digits
    pub const fn width(self) -> usize {
        match self {
            Field::Weeks => 4,
            Field::Days => 1,
            Field::Hours | Field::Minutes | Field::Seconds => 2,
            Field::Milliseconds => 3,
        }
    }

    pub const fn unit_millis(self) -> i64 {
        match self {
            Field::Weeks => MILLIS_PER_WEEK,
            Field::Days => MILLIS_PER_DAY,
            Field::Hours => MILLIS_PER_HOUR,
            Field::Minutes => MILLIS_PER_MINUTE,
            Field::Seconds => MILLIS_PER_SECOND,
            Field::Milliseconds => 1,
        }
    }

    /// Largest value the field takes in a normalized interval.
    /// Milliseconds carry no cap; the width is for display only.
    pub const fn max_value(self) -> Option<i64> {
        match self {
            Field::Weeks => Some(pow10(Field::Weeks.width()) - 1),
            Field::Days => Some(6),
            Field::Hours => Some(23),
            Field::Minutes | Field::Seconds => Some(59),
            Field::Milliseconds => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Position in canonical order
    pub const fn index(self) -> usize {
        self as usize
    }
}

pub const FIELD_COUNT: usize = Field::ALL.len();

/// Six digit groups plus five separators
pub const INTERVAL_STRING_LENGTH: usize = total_width() + FIELD_COUNT - 1;

pub const MAX_INTERVAL_MILLIS_EXCLUSIVE: i64 = pow10(Field::Weeks.width()) * MILLIS_PER_WEEK;

const _: () = assert!(
    MAX_INTERVAL_MILLIS_EXCLUSIVE < MAX_SAFE_MILLIS,
    "the largest interval must stay below the safe-integer ceiling"
);

const fn pow10(exponent: usize) -> i64 {
    let mut value = 1;
    let mut i = 0;
    while i < exponent {
        value *= 10;
        i += 1;
    }
    value
}

const fn total_width() -> usize {
    let mut sum = 0;
    let mut i = 0;
    while i < FIELD_COUNT {
        sum += Field::ALL[i].width();
        i += 1;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_length_matches_layout() {
        assert_eq!(INTERVAL_STRING_LENGTH, "0000:0:00:00:00.000".len());
    }

    #[test]
    fn weeks_cap_follows_width() {
        assert_eq!(Field::Weeks.max_value(), Some(9999));
        assert_eq!(MAX_INTERVAL_MILLIS_EXCLUSIVE, 10_000 * MILLIS_PER_WEEK);
    }

    #[test]
    fn keys_resolve_in_canonical_order() {
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("years"), None);
    }
}
