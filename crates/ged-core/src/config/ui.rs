//! User-interface preferences.

use serde::{Deserialize, Serialize};

/// User-interface preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Language used when none has been persisted yet.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "pt".to_string()
}
