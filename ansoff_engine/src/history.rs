/// Ansoff Engine — History Log
///
/// Append-only record of completed quarters, in quarter order.
/// Entries are never modified or removed once appended; only the
/// engine appends.

use serde::{Deserialize, Serialize};

use crate::domain::{Allocation, CapabilityState, KpiState, ShockCard};

/// Post-quarter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryEntry {
    pub quarter: u32,
    pub allocation: Allocation,
    pub kpis: KpiState,
    pub capabilities: CapabilityState,
    pub shock: ShockCard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Roll back an append whose quarter failed its invariant checks.
    pub(crate) fn discard_latest(&mut self) {
        self.entries.pop();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Most recently completed quarter.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entry for `quarter` (1-based).
    pub fn get(&self, quarter: u32) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.quarter == quarter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
