//! Login request and response payloads.

pub mod login;

pub use login::{LoginRequest, LoginResponse};
