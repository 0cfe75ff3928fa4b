//! In-process notifications broadcast when the session context changes.
//!
//! Views that are alive when the active company changes subscribe to the
//! [`EventBus`] and refresh themselves instead of reloading everything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::types::CompanyScope;

/// Events about the session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContextEvent {
    /// The active company changed (or the principal returned to their own space).
    CompanyChanged {
        /// The scope now active.
        scope: CompanyScope,
    },
    /// The session was cleared.
    LoggedOut,
}

/// A context event with the time it was published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextNotice {
    /// When the event was published.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub event: ContextEvent,
}

/// Broadcast channel for [`ContextEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ContextNotice>,
}

impl EventBus {
    /// Create a bus whose subscribers may lag by at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ContextNotice> {
        self.sender.subscribe()
    }

    /// Publish an event. Returns how many subscribers received it.
    pub fn publish(&self, event: ContextEvent) -> usize {
        let notice = ContextNotice {
            timestamp: Utc::now(),
            event,
        };
        match self.sender.send(notice) {
            Ok(count) => count,
            Err(_) => {
                debug!("Context event published with no subscribers");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
