//! Company-scoped collaborator accounts.

pub mod model;

pub use model::{
    Collaborator, CollaboratorList, CreateCollaborator, PermissionCheck, UpdateCollaborator,
};
