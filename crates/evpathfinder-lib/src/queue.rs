//! Min-priority queue over frontier entries keyed by travel time.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::frontier::FrontierId;

/// Priority queue ordered by cumulative travel time, lowest first.
///
/// Entries with equal travel time come out in minting order. There is no
/// decrease-key: a node reached again is pushed again under a new id.
#[derive(Debug, Default)]
pub struct FrontierQueue {
    heap: BinaryHeap<QueueEntry>,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FrontierId, travel_time: f64) {
        self.heap.push(QueueEntry {
            id,
            cost: FloatOrd(travel_time),
        });
    }

    /// Remove the entry with the lowest travel time.
    ///
    /// Callers must check [`FrontierQueue::is_empty`] first; draining an
    /// empty queue is reported as [`Error::EmptyQueue`].
    pub fn extract_min(&mut self) -> Result<FrontierId> {
        self.heap.pop().map(|entry| entry.id).ok_or(Error::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    id: FrontierId,
    cost: FloatOrd,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.id.sequence().cmp(&self.id.sequence()))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
