//! Persisted session configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where persisted session keys live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStorageKind {
    /// A JSON file on disk that survives between runs.
    #[default]
    File,
    /// Process memory only; everything is lost on exit.
    Memory,
}

impl fmt::Display for SessionStorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Persisted session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend.
    #[serde(default)]
    pub storage: SessionStorageKind,
    /// Path of the session file when `storage = "file"`.
    #[serde(default = "default_path")]
    pub path: String,
    /// Capacity of the context-change notification channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: SessionStorageKind::default(),
            path: default_path(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_path() -> String {
    "data/session.json".to_string()
}

fn default_event_buffer() -> usize {
    16
}
