//! User dialog abstraction.

use std::collections::VecDeque;
use std::sync::Mutex;

use ged_core::error::AppError;
use ged_core::result::AppResult;

/// Blocking dialogs a view may raise.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. `Ok(false)` means the user declined.
    fn confirm(&self, message: &str) -> AppResult<bool>;

    /// Show an informational message.
    fn notify(&self, message: &str);

    /// Show a result the user must acknowledge.
    fn alert(&self, message: &str);
}

/// A prompter that answers from a script and records every dialog.
///
/// Running out of scripted answers is an error, so a test notices an
/// unexpected confirmation.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<bool>>,
    transcript: Mutex<Vec<Dialog>>,
}

/// One recorded dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Confirm(String),
    Notify(String),
    Alert(String),
}

impl ScriptedPrompter {
    /// Answer confirmations with `answers`, in order.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Every dialog raised so far.
    pub fn transcript(&self) -> Vec<Dialog> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Messages of the confirmations raised so far.
    pub fn confirmations(&self) -> Vec<String> {
        self.transcript()
            .into_iter()
            .filter_map(|d| match d {
                Dialog::Confirm(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    /// Messages of the alerts raised so far.
    pub fn alerts(&self) -> Vec<String> {
        self.transcript()
            .into_iter()
            .filter_map(|d| match d {
                Dialog::Alert(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn record(&self, dialog: Dialog) {
        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.push(dialog);
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> AppResult<bool> {
        self.record(Dialog::Confirm(message.to_string()));
        self.answers
            .lock()
            .map_err(|_| AppError::internal("Prompter script lock poisoned"))?
            .pop_front()
            .ok_or_else(|| AppError::internal(format!("Unscripted confirmation: {message}")))
    }

    fn notify(&self, message: &str) {
        self.record(Dialog::Notify(message.to_string()));
    }

    fn alert(&self, message: &str) {
        self.record(Dialog::Alert(message.to_string()));
    }
}
