//! Storage and document metrics.

pub mod model;

pub use model::{MetricsResponse, NodeTotals, StatusCount, StorageUsage};
