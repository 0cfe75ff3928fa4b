//! Links between user accounts (usually freelancers) and companies.

pub mod model;
pub mod status;

pub use model::{AddUserRequest, LinkUpdate, UserBusinessLink};
pub use status::LinkStatus;
