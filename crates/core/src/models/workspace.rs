use super::entry::Entry;

/// Whether the current entry set has been committed to a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Entries differ from (or haven't been committed to) any snapshot.
    NotSaved,
    /// Current entries match the most recent save or load.
    Saved,
}

/// The Entry Store: the ordered, mutable entry set of one editing session.
///
/// Carries a monotonic version counter bumped on every mutation, so a
/// presentation layer can poll for changes without a callback hookup.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    entries: Vec<Entry>,
    version: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current mutation version. Incremented by every add/remove/replace.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.version += 1;
    }

    /// Remove the entry at `index`. Returns `None` if out of bounds,
    /// in which case the version is not bumped.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.version += 1;
        Some(entry)
    }

    /// Replace the whole entry set wholesale (workspace load).
    pub fn replace_all(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.version += 1;
    }
}
