//! Soft-deleted nodes and the trash listing contract.

pub mod filter;
pub mod model;

pub use filter::{EmptyTrashFilters, TrashFilters};
pub use model::{MessageResponse, RestoreResponse, RestoredNode, TrashEntry};
