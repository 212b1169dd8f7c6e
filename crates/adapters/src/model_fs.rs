//! Filesystem model-artifact store
//!
//! Loads the fitted scaler and k-means parameters from
//! `models/<model_name>/scaler.json` and `models/<model_name>/kmeans.json`.
//! The companion `cluster_means.csv` in the same directory belongs to the
//! presentation layer and is never touched here.

use engage_lens_domain::{
    KMeansParams, ModelArtifacts, ModelStore, ModelStoreError, ScalerParams, artifact_fingerprint,
};
use std::path::{Path, PathBuf};

pub const SCALER_FILE: &str = "scaler.json";
pub const KMEANS_FILE: &str = "kmeans.json";

/// Model store reading JSON artifacts from a conventional models directory
pub struct FsModelStore {
    model_dir: PathBuf,
}

impl FsModelStore {
    /// `models_dir` is the root (e.g. `./models`), `model_name` the
    /// subdirectory holding the artifact pair.
    pub fn new(models_dir: impl AsRef<Path>, model_name: &str) -> Self {
        Self {
            model_dir: models_dir.as_ref().join(model_name),
        }
    }

    /// The directory the artifacts are expected in
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    fn read_artifact(&self, file: &str) -> Result<Vec<u8>, ModelStoreError> {
        let path = self.model_dir.join(file);
        if !path.exists() {
            return Err(ModelStoreError::Missing {
                path: path.display().to_string(),
            });
        }
        Ok(std::fs::read(&path)?)
    }
}

impl ModelStore for FsModelStore {
    fn load(&self) -> Result<ModelArtifacts, ModelStoreError> {
        let scaler_bytes = self.read_artifact(SCALER_FILE)?;
        let kmeans_bytes = self.read_artifact(KMEANS_FILE)?;

        let scaler: ScalerParams =
            serde_json::from_slice(&scaler_bytes).map_err(|e| ModelStoreError::Parse {
                file: SCALER_FILE.to_string(),
                message: e.to_string(),
            })?;

        if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ModelStoreError::Parse {
                file: SCALER_FILE.to_string(),
                message: "scaler contains a zero or non-finite scale".to_string(),
            });
        }

        let kmeans: KMeansParams =
            serde_json::from_slice(&kmeans_bytes).map_err(|e| ModelStoreError::Parse {
                file: KMEANS_FILE.to_string(),
                message: e.to_string(),
            })?;

        let fingerprint = artifact_fingerprint(&scaler_bytes, &kmeans_bytes);

        tracing::debug!(
            model_dir = %self.model_dir.display(),
            %fingerprint,
            "Loaded model artifacts"
        );

        Ok(ModelArtifacts {
            scaler,
            kmeans,
            fingerprint,
        })
    }
}
