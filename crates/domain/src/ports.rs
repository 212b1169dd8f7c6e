//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external
//! systems. Adapters implement these traits to connect to real
//! infrastructure: the persisted post store written by the retrieval layer,
//! and the fitted model artifacts on disk.

use async_trait::async_trait;
use thiserror::Error;

use crate::cluster::ModelArtifacts;
use crate::model::RawPost;

/// Error type for post source operations
#[derive(Debug, Error)]
pub enum PostSourceError {
    #[error("No stored posts for account '{0}'")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Malformed post data: {0}")]
    Malformed(String),
}

/// Port for reading the raw posts the retrieval layer persisted for an
/// account. Returns posts ordered by ID ascending.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self, account: &str) -> Result<Vec<RawPost>, PostSourceError>;
}

/// Error type for model artifact storage
#[derive(Debug, Error)]
pub enum ModelStoreError {
    #[error("Model artifact not found: {path}")]
    Missing { path: String },
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for loading the fitted scaler and partition model.
/// Loading is strictly read-only; fitting never happens at inference time.
pub trait ModelStore: Send + Sync {
    fn load(&self) -> Result<ModelArtifacts, ModelStoreError>;
}
