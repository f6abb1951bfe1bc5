use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Saving,
    #[default]
    Saved,
    Error,
}

/// Where the debounced saver currently is: `Idle -> Pending -> Committing -> Idle`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SavePhase {
    #[default]
    Idle,
    Pending,
    Committing,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutosaveState {
    pub status: SaveStatus,
    pub phase: SavePhase,
    pub last_saved_at: Option<String>,
    /// Number of edits scheduled so far; a commit only reports `saved` for
    /// the latest one.
    pub revision: u64,
    pub commits: u64,
}
