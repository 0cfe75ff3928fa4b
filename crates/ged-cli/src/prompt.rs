//! Terminal dialogs for the views.

use dialoguer::Confirm;

use ged_client::view::Prompter;
use ged_core::error::AppError;
use ged_core::result::AppResult;

use crate::output;

/// Asks on the terminal. With `force` every confirmation is printed and
/// accepted without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter {
    force: bool,
}

impl TerminalPrompter {
    pub fn new(force: bool) -> Self {
        Self { force }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> AppResult<bool> {
        if self.force {
            output::print_warning(&format!("{message} (--force)"));
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))
    }

    fn notify(&self, message: &str) {
        output::print_info(message);
    }

    fn alert(&self, message: &str) {
        println!("{}", message);
    }
}

/// Ask for confirmation of a one-off destructive command.
pub fn confirm(message: &str, force: bool) -> AppResult<bool> {
    TerminalPrompter::new(force).confirm(message)
}
