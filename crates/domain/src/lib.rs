//! engage-lens domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `normalize`: Metric normalizer (raw counters -> canonical records)
//! - `filter`: Post validity policy
//! - `features`: Engagement feature aggregation (per-post and aggregated)
//! - `cluster`: Fitted scaler + k-means cluster assignment
//! - `taxonomy`: Static engagement cluster taxonomy
//! - `summary`: Account-level summary statistics
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Application use cases / business logic

pub mod cluster;
pub mod features;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod ports;
pub mod summary;
pub mod taxonomy;
pub mod usecases;

pub use cluster::*;
pub use model::*;
pub use ports::*;
pub use taxonomy::*;

use sha2::{Digest, Sha256};

/// Compute a deterministic fingerprint over the serialized model artifacts.
/// Used to identify which scaler/model pair produced a report.
pub fn artifact_fingerprint(scaler_bytes: &[u8], kmeans_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(scaler_bytes);
    hasher.update(kmeans_bytes);
    format!("{:x}", hasher.finalize())
}
