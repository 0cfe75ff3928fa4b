//! Interaction workflows shared by every front end.
//!
//! A view owns the state a screen would show and drives the confirmation
//! dialogs through a [`Prompter`], so the same rules apply whether the user
//! sits at a terminal or a test script answers for them.

pub mod prompter;
pub mod trash;

pub use prompter::{Dialog, Prompter, ScriptedPrompter};
pub use trash::{ActionOutcome, TrashView};
