use serde::{Deserialize, Serialize};

/// User-configurable limits for the aggregator session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum length of group and item IDs, in characters.
    pub max_id_length: usize,

    /// Maximum number of saved workspaces kept in history.
    pub max_saved_workspaces: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_id_length: 20,
            max_saved_workspaces: 10,
        }
    }
}
