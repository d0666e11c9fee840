use fabwatch_core::Sample;
use std::collections::VecDeque;

/// Rolling window of the most recent samples, oldest first.
///
/// Appending past `capacity` evicts from the front, so the window always
/// holds the last `min(total_appended, capacity)` samples with no gaps.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl HistoryWindow {
    /// Default number of retained samples.
    pub const DEFAULT_CAPACITY: usize = 50;

    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest entries beyond capacity.
    pub fn append(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Copy of the last `limit` samples (all of them for `None`), oldest first.
    pub fn snapshot(&self, limit: Option<usize>) -> Vec<Sample> {
        let take = limit.map_or(self.samples.len(), |n| n.min(self.samples.len()));
        let skip = self.samples.len() - take;
        self.samples.iter().skip(skip).cloned().collect()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
