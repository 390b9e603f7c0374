use serde::{Deserialize, Serialize};

/// Search lifecycle state.
///
/// `Idle -> Loading -> {Success, Error}`. Both terminal states return to
/// `Idle` on a reset or move back to `Loading` on a new submit. Filtering
/// never changes the status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl SearchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStatus::Idle => "idle",
            SearchStatus::Loading => "loading",
            SearchStatus::Success => "success",
            SearchStatus::Error => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchStatus::Loading)
    }
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
