use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::report::Report;

/// Opaque report identity; assigned by the host, never interpreted here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: ReportId,
    pub owner: OwnerId,
    pub report: Report,
}

pub const DEFAULT_STORE_CAPACITY: usize = 50;

/// Append-only history of past reports, owned by the host rather than the
/// engine. Capacity is enforced by evicting the oldest entry first; stored
/// snapshots are never mutated.
#[derive(Clone, Debug)]
pub struct ReportStore {
    capacity: usize,
    entries: VecDeque<StoredReport>,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }
}

impl ReportStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), entries: VecDeque::new() }
    }

    /// Append a snapshot, evicting the oldest entry when full. Returns the
    /// evicted entry so the host can archive it elsewhere if it cares.
    pub fn append(&mut self, entry: StoredReport) -> Option<StoredReport> {
        let evicted =
            if self.entries.len() == self.capacity { self.entries.pop_front() } else { None };
        self.entries.push_back(entry);
        evicted
    }

    pub fn get(&self, id: &ReportId) -> Option<&StoredReport> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn for_owner<'a>(
        &'a self,
        owner: &'a OwnerId,
    ) -> impl Iterator<Item = &'a StoredReport> + 'a {
        self.entries.iter().filter(move |entry| &entry.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
