//! # ged-client
//!
//! Talks to the GED REST API on behalf of the signed-in principal.
//!
//! - [`http`]: the shared HTTP client (bearer auth, error mapping,
//!   cancellation)
//! - [`services`]: one service per API area
//! - [`view`]: interaction workflows with confirmation gates

pub mod http;
pub mod services;
pub mod view;

pub use http::ApiClient;
