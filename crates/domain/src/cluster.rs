//! Cluster assignment engine
//!
//! Applies a fitted feature-scaling transform and a fitted 4-cluster
//! partition model to engagement feature rows. Everything here is
//! inference: the artifacts are read-only and the transform is strictly
//! `transform`, never `fit`.

use std::sync::OnceLock;
use thiserror::Error;

use crate::model::{ClusterAssignment, FeatureSet, FeatureVector};
use crate::ports::{ModelStore, ModelStoreError};
use crate::taxonomy::EngagementTaxonomy;

/// The feature columns, in the exact order the artifacts were fitted with.
/// This is a contract with training time; artifacts that disagree are
/// rejected rather than silently mis-scored.
pub const FEATURE_COLUMNS: [&str; 3] =
    ["likes_per_views", "retweets_per_views", "replies_per_views"];

/// Fitted standard-scaler parameters
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScalerParams {
    /// Feature names in training order
    pub feature_names: Vec<String>,
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature scale (standard deviation)
    pub scale: Vec<f64>,
}

impl ScalerParams {
    /// Transform one row into scaled feature space
    pub fn transform(&self, row: &[f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for i in 0..3 {
            out[i] = (row[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// Fitted k-means parameters. Centroid row i corresponds to cluster ID i,
/// matching the row ordering of the companion `cluster_means.csv`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct KMeansParams {
    /// Cluster centroids in scaled feature space
    pub centroids: Vec<Vec<f64>>,
}

impl KMeansParams {
    /// Predict the nearest centroid by squared Euclidean distance.
    /// Ties resolve to the lowest cluster ID.
    pub fn predict(&self, row: &[f64; 3]) -> u32 {
        let mut best = 0usize;
        let mut best_dist = f64::INFINITY;

        for (i, centroid) in self.centroids.iter().enumerate() {
            let dist: f64 = centroid
                .iter()
                .zip(row.iter())
                .map(|(c, x)| (x - c) * (x - c))
                .sum();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }

        best as u32
    }
}

/// The loaded scaler/model pair
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub scaler: ScalerParams,
    pub kmeans: KMeansParams,
    /// SHA-256 fingerprint over the serialized artifact pair
    pub fingerprint: String,
}

/// Error type for cluster assignment
#[derive(Debug, Error)]
pub enum AssignError {
    /// The feature table was empty: nothing to analyze. Distinct from the
    /// artifact failures so callers can show the right message.
    #[error("No feature rows to assign")]
    NoData,
    #[error(transparent)]
    Model(#[from] ModelStoreError),
    #[error("Model schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Assigns engagement clusters using lazily loaded fitted artifacts.
///
/// Artifacts are loaded from the store once per predictor instance and
/// cached for its lifetime; repeated calls reuse the loaded pair. The cache
/// is write-once: concurrent first loads may each read the store, one value
/// wins, and every later read is lock-free.
pub struct ClusterPredictor<S> {
    store: S,
    taxonomy: EngagementTaxonomy,
    cache: OnceLock<ModelArtifacts>,
}

impl<S: ModelStore> ClusterPredictor<S> {
    pub fn new(store: S, taxonomy: EngagementTaxonomy) -> Self {
        Self {
            store,
            taxonomy,
            cache: OnceLock::new(),
        }
    }

    /// The taxonomy the predictor maps cluster IDs through
    pub fn taxonomy(&self) -> &EngagementTaxonomy {
        &self.taxonomy
    }

    /// Load-once access to the fitted artifacts
    pub fn artifacts(&self) -> Result<&ModelArtifacts, AssignError> {
        if let Some(artifacts) = self.cache.get() {
            return Ok(artifacts);
        }

        let loaded = self.store.load()?;
        self.validate_schema(&loaded)?;
        tracing::info!(fingerprint = %loaded.fingerprint, "Model artifacts loaded");

        Ok(self.cache.get_or_init(|| loaded))
    }

    /// Assign a cluster to every feature row.
    ///
    /// Fails with `NoData` on an empty feature table and with the
    /// underlying store error when artifacts cannot be loaded; no partial
    /// result is returned in either case.
    pub fn assign(&self, features: &FeatureSet) -> Result<Vec<ClusterAssignment>, AssignError> {
        if features.rows.is_empty() {
            return Err(AssignError::NoData);
        }

        let artifacts = self.artifacts()?;

        let assignments = features
            .rows
            .iter()
            .map(|row| {
                let scaled = artifacts.scaler.transform(&feature_row(row));
                let cluster = artifacts.kmeans.predict(&scaled);
                let cluster_label = self
                    .taxonomy
                    .label(cluster)
                    .unwrap_or("unknown")
                    .to_string();

                ClusterAssignment {
                    id: row.id.clone(),
                    features: row.clone(),
                    cluster,
                    cluster_label,
                }
            })
            .collect();

        Ok(assignments)
    }

    /// Fail fast when the artifacts disagree with the training-time schema.
    fn validate_schema(&self, artifacts: &ModelArtifacts) -> Result<(), AssignError> {
        let names = &artifacts.scaler.feature_names;
        if names.len() != FEATURE_COLUMNS.len()
            || names.iter().zip(FEATURE_COLUMNS.iter()).any(|(a, b)| a != b)
        {
            return Err(AssignError::SchemaMismatch(format!(
                "scaler feature names {:?} do not match expected {:?}",
                names, FEATURE_COLUMNS
            )));
        }

        if artifacts.scaler.mean.len() != FEATURE_COLUMNS.len()
            || artifacts.scaler.scale.len() != FEATURE_COLUMNS.len()
        {
            return Err(AssignError::SchemaMismatch(format!(
                "scaler parameter length {}/{} does not match {} features",
                artifacts.scaler.mean.len(),
                artifacts.scaler.scale.len(),
                FEATURE_COLUMNS.len()
            )));
        }

        if artifacts.kmeans.centroids.len() != self.taxonomy.len() {
            return Err(AssignError::SchemaMismatch(format!(
                "model has {} clusters but the taxonomy defines {}",
                artifacts.kmeans.centroids.len(),
                self.taxonomy.len()
            )));
        }

        if let Some(bad) = artifacts
            .kmeans
            .centroids
            .iter()
            .position(|c| c.len() != FEATURE_COLUMNS.len())
        {
            return Err(AssignError::SchemaMismatch(format!(
                "centroid {} has {} dimensions, expected {}",
                bad,
                artifacts.kmeans.centroids[bad].len(),
                FEATURE_COLUMNS.len()
            )));
        }

        Ok(())
    }
}

/// Feature values in column order, exactly [likes, retweets, replies] per view
fn feature_row(row: &FeatureVector) -> [f64; 3] {
    [
        row.likes_per_views,
        row.retweets_per_views,
        row.replies_per_views,
    ]
}
