//! Analyze use case - orchestrates the engagement pipeline for one account
//!
//! fetch -> normalize -> filter -> aggregate -> assign -> summarize

use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    cluster::{AssignError, ClusterPredictor},
    features::compute_features,
    filter::filter_valid,
    model::{AnalysisReport, FeatureMode},
    normalize::normalize_all,
    ports::{ModelStore, PostSource, PostSourceError},
    summary::summarize,
};

/// Configuration for the analyze use case
#[derive(Debug, Clone, Default)]
pub struct AnalyzeConfig {
    /// Feature aggregation mode
    pub mode: FeatureMode,
}

/// Error type for the analyze use case. Variants map one-to-one onto the
/// user-facing failure messages: source trouble, no data, and model trouble
/// must stay distinguishable.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Source(#[from] PostSourceError),
    #[error("No posts stored for account '{0}'")]
    NoPosts(String),
    #[error("No valid posts for account '{0}' after filtering")]
    NoValidPosts(String),
    #[error(transparent)]
    Assign(#[from] AssignError),
}

/// Runs the full engagement analysis pipeline for one account
pub struct AnalyzeUseCase<P, S>
where
    P: PostSource + ?Sized,
    S: ModelStore,
{
    post_source: Arc<P>,
    predictor: ClusterPredictor<S>,
    config: AnalyzeConfig,
}

impl<P, S> AnalyzeUseCase<P, S>
where
    P: PostSource + ?Sized,
    S: ModelStore,
{
    pub fn new(post_source: Arc<P>, predictor: ClusterPredictor<S>, config: AnalyzeConfig) -> Self {
        Self {
            post_source,
            predictor,
            config,
        }
    }

    pub async fn analyze(&self, account: &str) -> Result<AnalysisReport, AnalyzeError> {
        let raw = self.post_source.fetch_posts(account).await?;
        if raw.is_empty() {
            return Err(AnalyzeError::NoPosts(account.to_string()));
        }

        tracing::info!(
            account = %account,
            posts = raw.len(),
            mode = %self.config.mode,
            "Analyzing account"
        );

        let normalized = normalize_all(&raw);
        let valid = filter_valid(normalized);
        if valid.is_empty() {
            return Err(AnalyzeError::NoValidPosts(account.to_string()));
        }

        let features = compute_features(account, &valid, self.config.mode);
        let assignments = self.predictor.assign(&features)?;
        let summary = summarize(&assignments);

        tracing::info!(
            account = %account,
            assignments = assignments.len(),
            dominant = ?summary.dominant_cluster,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            id: Uuid::new_v4(),
            account: account.to_string(),
            mode: self.config.mode,
            generated_at: OffsetDateTime::now_utc(),
            valid_posts: features.valid_posts,
            assignments,
            summary,
        })
    }
}
