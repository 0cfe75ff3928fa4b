//! # ged-session
//!
//! The persisted-session layer of the GED client: where the login payload
//! lives, how old payloads are upgraded, and how the active principal,
//! company context, and permissions are resolved from it.

pub mod keys;
pub mod payload;
pub mod resolver;
pub mod session;
pub mod storage;
pub mod store;

pub use payload::StoredLogin;
pub use resolver::{LinkContext, LoadOutcome, SessionResolver};
pub use session::{AccessRequirement, Session};
pub use store::SessionStore;
