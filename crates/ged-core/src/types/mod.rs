//! Core type definitions used across the GED workspace.

pub mod id;
pub mod scope;
pub mod time;

pub use id::*;
pub use scope::CompanyScope;
