//! # ged-entity
//!
//! Domain entity models for the GED client. Every struct in this crate is
//! either a payload exchanged with the remote API or a value object the
//! session layer persists. All entities derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.

pub mod auth;
pub mod collaborator;
pub mod company;
pub mod link;
pub mod metrics;
pub mod node;
pub mod permission;
pub mod principal;
pub mod trash;
