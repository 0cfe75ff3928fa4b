//! The persisted login payload stored under [`crate::keys::LOGIN_PAYLOAD`].

mod migrate;
mod schema;

pub use migrate::{migrate, needs_migration};
pub use schema::{CURRENT_VERSION, StoredLogin, StoredUser};
