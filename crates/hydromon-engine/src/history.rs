//! Bounded sample history.

use std::collections::VecDeque;

use hydromon_types::SensorSample;

/// Insertion-ordered sample buffer with a fixed capacity.
///
/// The engine owns the one instance; collaborators only ever see
/// copied-out windows of it, so eviction never invalidates a reader.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples: VecDeque<SensorSample>,
    capacity: usize,
}

impl SampleHistory {
    /// Creates an empty buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest at capacity.
    pub fn push(&mut self, sample: SensorSample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// The newest `limit` samples in chronological order.
    pub fn recent(&self, limit: usize) -> Vec<SensorSample> {
        let skip = self.samples.len().saturating_sub(limit);
        self.samples.iter().skip(skip).copied().collect()
    }

    /// All buffered samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SensorSample> {
        self.samples.iter()
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every buffered sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
