use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One recorded (group, item, quantity) line item.
///
/// Entries carry no identity of their own: two entries are merged during
/// aggregation exactly when their `(group_id, item_id)` pair matches.
/// Within the workspace an entry is addressed by its list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Group the item belongs to. `None` means "no group".
    #[serde(default)]
    pub group_id: Option<String>,

    /// The item being counted. Never blank after validation.
    pub item_id: String,

    /// Recorded quantity (always positive after validation).
    pub quantity: i64,
}

impl Entry {
    pub fn new(group_id: Option<String>, item_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            group_id,
            item_id: item_id.into(),
            quantity,
        }
    }

    /// The structural key entries are merged on.
    #[must_use]
    pub fn key(&self) -> (Option<&str>, &str) {
        (self.group_id.as_deref(), &self.item_id)
    }
}

/// A timestamped, persisted copy of an aggregated entry set.
///
/// `saved_on` is a local datetime without offset. It serves as a display
/// and sort key but is NOT a primary key — two snapshots saved within the
/// same clock tick may share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkspace {
    /// Local save time, ISO-8601 without timezone offset.
    pub saved_on: NaiveDateTime,

    /// Aggregated entries: one per distinct `(group_id, item_id)` pair.
    pub entries: Vec<Entry>,
}
