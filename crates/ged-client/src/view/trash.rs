//! The trash screen: listing, search, and the guarded destructive actions.
//!
//! Restoring asks once. Permanent deletion and emptying ask twice, the
//! second time restating what will be lost. Declining any question sends
//! nothing. Results are shown in a blocking alert, and the listing is
//! reloaded only after a successful action.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use ged_core::error::AppError;
use ged_core::result::AppResult;
use ged_core::types::NodeId;
use ged_entity::trash::{EmptyTrashFilters, TrashEntry, TrashFilters};

use super::prompter::Prompter;
use crate::services::TrashService;

const EMPTY_MESSAGE: &str = "Trash is empty";

/// How a trash action ended.
#[derive(Debug)]
pub enum ActionOutcome {
    /// The user answered no; nothing was sent.
    Declined,
    /// There was nothing to empty; nothing was sent.
    AlreadyEmpty,
    /// The server accepted the action with this message.
    Completed(String),
    /// The request failed; the error was shown to the user.
    Failed(AppError),
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

#[derive(Debug, Default)]
struct TrashState {
    entries: Vec<TrashEntry>,
    search: String,
}

/// Holds the last trash listing and runs the trash actions.
pub struct TrashView {
    service: TrashService,
    prompter: Arc<dyn Prompter>,
    filters: Option<TrashFilters>,
    state: Mutex<TrashState>,
    busy: AtomicBool,
}

impl std::fmt::Debug for TrashView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrashView")
            .field("filters", &self.filters)
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .finish()
    }
}

/// Clears the in-flight flag when an action ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TrashView {
    pub fn new(service: TrashService, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            service,
            prompter,
            filters: None,
            state: Mutex::new(TrashState::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Restrict listings to `filters` instead of the session scope.
    pub fn with_filters(mut self, filters: TrashFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Reload the listing. Returns the number of entries.
    pub async fn refresh(&self, cancel: &CancellationToken) -> AppResult<usize> {
        let entries = self.service.list(self.filters, cancel).await?;
        let count = entries.len();
        self.state.lock().await.entries = entries;
        debug!(count, "Trash listing refreshed");
        Ok(count)
    }

    /// The whole last listing.
    pub async fn entries(&self) -> Vec<TrashEntry> {
        self.state.lock().await.entries.clone()
    }

    /// Set the name search term; blank shows everything.
    pub async fn set_search(&self, term: impl Into<String>) {
        self.state.lock().await.search = term.into();
    }

    /// Entries of the last listing matching the search term.
    pub async fn visible(&self) -> Vec<TrashEntry> {
        let state = self.state.lock().await;
        state
            .entries
            .iter()
            .filter(|e| e.matches_name(&state.search))
            .cloned()
            .collect()
    }

    /// Look an entry up in the last listing.
    pub async fn find(&self, id: NodeId) -> Option<TrashEntry> {
        self.state
            .lock()
            .await
            .entries
            .iter()
            .find(|e| e.id() == id)
            .cloned()
    }

    fn begin(&self) -> AppResult<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::conflict("Another trash operation is still running"))?;
        Ok(BusyGuard(&self.busy))
    }

    /// Whether an action is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Restore `entry`, to its original parent or to `destination`.
    pub async fn restore(
        &self,
        entry: &TrashEntry,
        destination: Option<NodeId>,
        cancel: &CancellationToken,
    ) -> AppResult<ActionOutcome> {
        let _guard = self.begin()?;
        if !self
            .prompter
            .confirm(&format!("Do you want to restore \"{}\"?", entry.name()))?
        {
            return Ok(ActionOutcome::Declined);
        }

        let result = self
            .service
            .restore(entry.id(), destination, cancel)
            .await
            .map(|r| r.message);
        Ok(self.conclude(result, cancel).await)
    }

    /// Permanently delete `entry` (and its subtree, for folders).
    pub async fn purge(
        &self,
        entry: &TrashEntry,
        cancel: &CancellationToken,
    ) -> AppResult<ActionOutcome> {
        let _guard = self.begin()?;

        let mut first = format!(
            "WARNING: Do you want to permanently delete \"{}\"?\n\nThis action CANNOT be undone!",
            entry.name()
        );
        if entry.is_folder() {
            first.push_str(&format!(
                "\n\nThis folder contains {} item(s) that will also be deleted.",
                entry.children_count
            ));
        }
        if !self.prompter.confirm(&first)? {
            return Ok(ActionOutcome::Declined);
        }
        let mut last = format!(
            "FINAL CONFIRMATION:\n\nAre you ABSOLUTELY SURE you want to permanently delete \"{}\"",
            entry.name()
        );
        if entry.is_folder() {
            last.push_str(&format!(" and its {} item(s)", entry.children_count));
        }
        last.push('?');
        if !self.prompter.confirm(&last)? {
            return Ok(ActionOutcome::Declined);
        }

        let result = self
            .service
            .purge(entry.id(), cancel)
            .await
            .map(|r| r.message);
        Ok(self.conclude(result, cancel).await)
    }

    /// Permanently delete everything in the listing's scope.
    ///
    /// Decided on the last listing: when it is empty the user is told so
    /// and nothing is sent.
    pub async fn empty_all(
        &self,
        older_than_days: Option<u32>,
        cancel: &CancellationToken,
    ) -> AppResult<ActionOutcome> {
        let _guard = self.begin()?;

        let count = self.state.lock().await.entries.len();
        if count == 0 {
            self.prompter.notify(EMPTY_MESSAGE);
            return Ok(ActionOutcome::AlreadyEmpty);
        }

        if !self.prompter.confirm(
            "WARNING: Do you want to permanently delete ALL items from the trash?\n\nThis action CANNOT be undone!",
        )? {
            return Ok(ActionOutcome::Declined);
        }
        let last = format!(
            "FINAL CONFIRMATION:\n\nAre you ABSOLUTELY SURE you want to permanently delete ALL {count} item(s)?"
        );
        if !self.prompter.confirm(&last)? {
            return Ok(ActionOutcome::Declined);
        }

        let filters = EmptyTrashFilters {
            scope: self.filters.unwrap_or_default(),
            older_than_days,
        };
        let result = self
            .service
            .empty_all(Some(filters), cancel)
            .await
            .map(|r| r.message);
        Ok(self.conclude(result, cancel).await)
    }

    async fn conclude(
        &self,
        result: AppResult<String>,
        cancel: &CancellationToken,
    ) -> ActionOutcome {
        match result {
            Ok(message) => {
                self.prompter.alert(&message);
                if let Err(e) = self.refresh(cancel).await {
                    warn!(error = %e, "Failed to reload trash after action");
                }
                ActionOutcome::Completed(message)
            }
            Err(e) => {
                self.prompter.alert(&e.message);
                ActionOutcome::Failed(e)
            }
        }
    }
}
