//! # Ring History
//!
//! Fixed-capacity circular log of timestamped values.
//!
//! The k-th push (1-indexed) lands in slot `(k - 1) mod capacity`; once the
//! buffer is full the oldest entry is overwritten. `count` is a monotonic push
//! counter and doubles as the write cursor.

use super::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// A value together with the time it was recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry<T> {
    /// Recorded value
    pub value: T,
    /// Time of the push
    pub recorded_at: Timestamp,
}

/// Bounded, oldest-overwritten append log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingHistory<T> {
    capacity: usize,
    count: u64,
    slots: Vec<HistoryEntry<T>>,
}

impl<T: Clone> RingHistory<T> {
    /// Create an empty history holding at most `capacity` entries.
    ///
    /// A zero capacity is raised to one; configs reject it before this point.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            count: 0,
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Append `value` recorded at `now`. O(1), never fails.
    pub fn push(&mut self, value: T, now: Timestamp) {
        let slot = self.slot_for(self.count);
        let entry = HistoryEntry {
            value,
            recorded_at: now,
        };

        if slot < self.slots.len() {
            self.slots[slot] = entry;
        } else {
            self.slots.push(entry);
        }
        self.count += 1;
    }

    /// The most recent `max_items` entries, newest first.
    ///
    /// # Errors
    /// `LimitExceeded` if `max_items` is larger than the capacity.
    pub fn last_n(&self, max_items: usize) -> RegistryResult<Vec<HistoryEntry<T>>> {
        if max_items > self.capacity {
            return Err(RegistryError::LimitExceeded {
                requested: max_items,
                limit: self.capacity,
            });
        }

        let take = max_items.min(self.len());
        if take == 0 {
            return Ok(Vec::new());
        }

        let newest = self.slot_for(self.count - 1);
        let entries = (0..take)
            .map(|step| {
                let slot = (newest + self.capacity - step) % self.capacity;
                self.slots[slot].clone()
            })
            .collect();

        Ok(entries)
    }

    /// Most recently pushed entry.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry<T>> {
        if self.count == 0 {
            return None;
        }
        self.slots.get(self.slot_for(self.count - 1))
    }

    /// Live entries: `min(count, capacity)`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True before the first push.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Maximum number of live entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total pushes since creation (the write cursor).
    #[must_use]
    pub fn total_pushed(&self) -> u64 {
        self.count
    }

    /// Structural consistency of a deserialized buffer.
    pub(crate) fn check_consistency(&self, expected_capacity: usize) -> Result<(), String> {
        if self.capacity != expected_capacity {
            return Err(format!(
                "history capacity {} does not match configured {}",
                self.capacity, expected_capacity
            ));
        }
        let live = self.count.min(self.capacity as u64) as usize;
        if self.slots.len() != live {
            return Err(format!(
                "history holds {} slots for {} pushes",
                self.slots.len(),
                self.count
            ));
        }
        Ok(())
    }

    fn slot_for(&self, push_index: u64) -> usize {
        (push_index % self.capacity as u64) as usize
    }
}
