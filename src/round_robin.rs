//! Wrap-around id counter

use crate::interval::MAX_SAFE_MILLIS;

/// Yields `start, start + 1, ..., end - 1` and then starts over at `start`.
#[derive(Debug, Clone)]
pub struct RoundRobinRange {
    start: i64,
    end: i64,
    next: i64,
}

impl RoundRobinRange {
    /// Range over `[start, end)`. An empty range yields `start` forever.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            next: start,
        }
    }

    /// Number of distinct values before the sequence repeats
    pub fn span(&self) -> i64 {
        self.end.saturating_sub(self.start).max(1)
    }

    pub fn next_id(&mut self) -> i64 {
        let value = self.next;
        self.next = match value.checked_add(1) {
            Some(next) if next < self.end => next,
            _ => self.start,
        };
        value
    }
}

impl Default for RoundRobinRange {
    fn default() -> Self {
        Self::new(0, MAX_SAFE_MILLIS)
    }
}

impl Iterator for RoundRobinRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(self.next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_back_to_start() {
        let ids: Vec<i64> = RoundRobinRange::new(3, 6).take(7).collect();
        assert_eq!(ids, vec![3, 4, 5, 3, 4, 5, 3]);
    }

    #[test]
    fn default_starts_at_zero() {
        let mut ids = RoundRobinRange::default();
        assert_eq!(ids.next(), Some(0));
        assert_eq!(ids.next(), Some(1));
    }

    #[test]
    fn empty_range_repeats_start() {
        let ids: Vec<i64> = RoundRobinRange::new(5, 5).take(3).collect();
        assert_eq!(ids, vec![5, 5, 5]);
    }

    #[test]
    fn span_counts_distinct_ids() {
        let mut ids = RoundRobinRange::new(10, 13);
        assert_eq!(ids.span(), 3);
        assert_eq!((0..ids.span()).map(|_| ids.next_id()).collect::<Vec<_>>(), vec![10, 11, 12]);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(RoundRobinRange::new(5, 5).span(), 1);
    }
}
