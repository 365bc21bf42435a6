//! Append-only log with an optional retention bound.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// How many entries a log keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retention {
    /// Keep everything. Suitable for short-lived processes only.
    #[default]
    Unbounded,
    /// Keep the newest `n` entries; the oldest is evicted on overflow.
    Bounded(usize),
}

impl Retention {
    /// Map a capacity setting where `0` means "no limit".
    #[must_use]
    pub fn from_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            Self::Unbounded
        } else {
            Self::Bounded(capacity)
        }
    }
}

/// Ordered, append-only sequence of entries.
///
/// Entries are never edited once pushed. With [`Retention::Bounded`] the log
/// behaves like a ring buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog<T> {
    entries: VecDeque<T>,
    retention: Retention,
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self::new(Retention::Unbounded)
    }
}

impl<T> EventLog<T> {
    /// Create an empty log with the given retention policy.
    #[must_use]
    pub fn new(retention: Retention) -> Self {
        Self {
            entries: VecDeque::new(),
            retention,
        }
    }

    /// Append an entry, evicting the oldest one if the bound is exceeded.
    pub fn push(&mut self, entry: T) {
        if let Retention::Bounded(max) = self.retention {
            if max == 0 {
                return;
            }
            while self.entries.len() >= max {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Iterate entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<'a, T> IntoIterator for &'a EventLog<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Clone> EventLog<T> {
    /// Copy the entries out, oldest-first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_insertion_order_when_unbounded() {
        let mut log = EventLog::new(Retention::Unbounded);
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn should_evict_oldest_entry_when_bound_reached() {
        let mut log = EventLog::new(Retention::Bounded(3));
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn should_treat_zero_capacity_as_unbounded() {
        assert_eq!(Retention::from_capacity(0), Retention::Unbounded);
        assert_eq!(Retention::from_capacity(8), Retention::Bounded(8));
    }

    #[test]
    fn should_default_to_empty_unbounded_log() {
        let log: EventLog<String> = EventLog::default();
        assert!(log.is_empty());
        assert_eq!(log.retention(), Retention::Unbounded);
    }
}
