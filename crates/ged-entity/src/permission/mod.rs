//! Collaborator capability tags and permission sets.

pub mod set;
pub mod tag;

pub use set::PermissionSet;
pub use tag::PermissionTag;
