//! Signed-in principal and account kinds.

pub mod kind;
pub mod model;

pub use kind::AccountKind;
pub use model::Principal;
