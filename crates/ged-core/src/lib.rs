//! # ged-core
//!
//! Core crate for the GED client. Contains the unified error system,
//! configuration schemas, typed identifiers, the company-context event bus,
//! and the key/value storage trait that session persistence is built on.
//!
//! This crate has **no** internal dependencies on other GED crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
