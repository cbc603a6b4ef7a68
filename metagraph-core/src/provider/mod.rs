// metagraph-core/src/provider/mod.rs

pub mod errors;
pub mod file;
pub mod http;
pub mod traits;
pub mod types;

pub use errors::ProviderError;
pub use file::FileSnapshotProvider;
pub use http::HttpSnapshotProvider;
pub use traits::SnapshotProvider;
pub use types::SnapshotPayload;
