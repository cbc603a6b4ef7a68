// metagraph-core/src/lib.rs
// Metagraph Dashboard - Core Library Definitions

pub mod config;
pub mod provider;
pub mod service;

// Re-export metagraph-common for convenience
pub use metagraph_common::{data, ranking};
