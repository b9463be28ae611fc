//! Discarding stale responses.
//!
//! Overlapping requests complete in any order. A view that fetches detail for
//! row N and then row N+1 into the same panel must not let N's late response
//! overwrite N+1's. Each request takes a [`Ticket`] for its slot; only the
//! latest ticket issued for a slot is accepted on completion.
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket<K> {
    pub slot: K,
    pub seq: u64,
}

pub struct RequestSlots<K> {
    next_seq: AtomicU64,
    latest: Mutex<HashMap<K, u64>>,
}

impl<K> Default for RequestSlots<K> {
    fn default() -> Self {
        Self {
            next_seq: AtomicU64::new(1),
            latest: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone + Debug> RequestSlots<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request for `slot`, superseding any earlier one.
    pub fn issue(&self, slot: K) -> Ticket<K> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.latest.lock().insert(slot.clone(), seq);
        Ticket { slot, seq }
    }

    /// True if `ticket` is still the latest issued for its slot.
    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.latest.lock().get(&ticket.slot) == Some(&ticket.seq)
    }

    /// Hands `value` back only for the latest ticket of its slot. Settling
    /// the latest ticket frees the slot.
    pub fn settle<T>(&self, ticket: &Ticket<K>, value: T) -> Option<T> {
        let mut latest = self.latest.lock();
        if latest.get(&ticket.slot) == Some(&ticket.seq) {
            latest.remove(&ticket.slot);
            Some(value)
        } else {
            debug!(slot = ?ticket.slot, seq = ticket.seq, "discarding stale response");
            None
        }
    }

    /// Number of slots with a request still outstanding.
    pub fn pending(&self) -> usize {
        self.latest.lock().len()
    }

    /// Invalidates every outstanding ticket for `slot`.
    pub fn cancel(&self, slot: &K) {
        self.latest.lock().remove(slot);
    }
}
