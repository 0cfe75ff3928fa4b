//! Companies a principal can act within, and the active context.

pub mod context;
pub mod model;

pub use context::SessionContext;
pub use model::{CompaniesResponse, CompanySummary, LinkedUser};
