/// Shared types used across the codebase

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A backend record with a stable identifier. List state keys selection on
/// this id.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;

    /// Short human label used in CLI tables and log lines
    fn label(&self) -> String {
        self.id().to_string()
    }
}

/// Sort direction, as sent in `order`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Accepts `asc`/`desc` in any case; anything else is not a direction
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
