use std::collections::{BTreeMap, HashMap};

use crate::models::entry::Entry;

/// Reduces an entry sequence into grouped sums.
///
/// All three reductions are pure, deterministic, total functions; empty
/// input yields empty output. The map projections use `BTreeMap` so keys
/// come out sorted for display — a presentation convenience the callers
/// rely on but not something the snapshot format depends on.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Total quantity per item ID, summed across all groups.
    #[must_use]
    pub fn by_item_id(&self, entries: &[Entry]) -> BTreeMap<String, i64> {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for entry in entries {
            *totals.entry(entry.item_id.clone()).or_insert(0) += entry.quantity;
        }
        totals
    }

    /// Total quantity per item ID within each group.
    /// The `None` key holds entries with no group.
    #[must_use]
    pub fn by_group_and_item_id(
        &self,
        entries: &[Entry],
    ) -> BTreeMap<Option<String>, BTreeMap<String, i64>> {
        let mut groups: BTreeMap<Option<String>, BTreeMap<String, i64>> = BTreeMap::new();
        for entry in entries {
            *groups
                .entry(entry.group_id.clone())
                .or_default()
                .entry(entry.item_id.clone())
                .or_insert(0) += entry.quantity;
        }
        groups
    }

    /// Collapse the entry sequence into one entry per distinct
    /// `(group_id, item_id)` pair, quantity summed.
    ///
    /// Preserves first-seen key order so snapshot contents are reproducible.
    /// Lossless for totals: aggregating the merged result gives the same
    /// sums as aggregating the raw entries.
    #[must_use]
    pub fn merge_for_snapshot(&self, entries: &[Entry]) -> Vec<Entry> {
        let mut merged: Vec<Entry> = Vec::new();
        let mut index: HashMap<(Option<String>, String), usize> = HashMap::new();

        for entry in entries {
            let key = (entry.group_id.clone(), entry.item_id.clone());
            match index.get(&key) {
                Some(&i) => merged[i].quantity += entry.quantity,
                None => {
                    index.insert(key, merged.len());
                    merged.push(entry.clone());
                }
            }
        }
        merged
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
