use crate::calculator::ComputationRecord;
use std::collections::VecDeque;
use std::collections::vec_deque;

/// Session history of calculations, newest first.
///
/// Records are only ever prepended or dropped all at once, so the order is
/// always reverse insertion order.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    records: VecDeque<ComputationRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record
    pub fn record(&mut self, entry: ComputationRecord) {
        self.records.push_front(entry);
    }

    /// Drop every record. Returns how many were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.records.len();
        self.records.clear();
        discarded
    }

    /// All records, newest first
    pub fn all(&self) -> vec_deque::Iter<'_, ComputationRecord> {
        self.records.iter()
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&ComputationRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all payouts currently held
    pub fn total_payout(&self) -> f64 {
        self.records.iter().map(|r| r.payout).sum()
    }
}

impl<'a> IntoIterator for &'a HistoryLedger {
    type Item = &'a ComputationRecord;
    type IntoIter = vec_deque::Iter<'a, ComputationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}
