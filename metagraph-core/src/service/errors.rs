use crate::provider::ProviderError;
use metagraph_common::DataError;
use thiserror::Error;

/// Service layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(String),
}
