//! Core traits defined in `ged-core` and implemented by other crates.

pub mod storage;

pub use storage::KeyValueStore;
