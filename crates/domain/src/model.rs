//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// A raw engagement counter as persisted by the retrieval layer.
///
/// Upstream storage is not consistent about types: the same counter may
/// arrive as an integer, a float, a numeric string, an empty string, null,
/// or be absent entirely. The metric normalizer collapses all of these to a
/// non-negative count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Int(i64),
    Float(f64),
    Text(String),
    #[default]
    Missing,
}

/// One post's raw record as retrieved from storage. Immutable once read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    /// Platform-specific post ID (the key in the persisted mapping)
    #[serde(default)]
    pub id: String,
    /// Post text content
    #[serde(default)]
    pub full_text: String,
    /// Raw view counter
    #[serde(default)]
    pub views_count: RawCount,
    /// Raw like counter
    #[serde(default)]
    pub likes_count: RawCount,
    /// Raw reshare counter
    #[serde(default)]
    pub retweet_count: RawCount,
    /// Raw reply counter
    #[serde(default)]
    pub reply_count: RawCount,
    /// Raw comment texts, if captured
    #[serde(default)]
    pub comments: Vec<String>,
}

/// Convert the persisted `{post_id: record}` mapping into posts with their
/// IDs filled in, ordered by ID ascending (chronological for snowflake IDs).
pub fn posts_from_map(map: BTreeMap<String, RawPost>) -> Vec<RawPost> {
    map.into_iter()
        .map(|(id, mut post)| {
            post.id = id;
            post
        })
        .collect()
}

/// A post with all four counters coerced to non-negative integers.
/// Text and comments are preserved unchanged from the raw record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedPost {
    /// Platform-specific post ID
    pub id: String,
    /// Post text content, unchanged
    pub full_text: String,
    /// View count
    pub views: u64,
    /// Like count
    pub likes: u64,
    /// Reshare count
    pub retweets: u64,
    /// Reply count
    pub replies: u64,
    /// Comment texts, unchanged
    pub comments: Vec<String>,
}

/// Feature aggregation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMode {
    /// One feature row per valid post with views > 0
    #[default]
    PerPost,
    /// A single feature row over counters summed across all valid posts
    Aggregated,
}

impl std::str::FromStr for FeatureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_post" | "per-post" => Ok(Self::PerPost),
            "aggregated" => Ok(Self::Aggregated),
            other => Err(format!(
                "Unknown feature mode '{}' (expected per_post or aggregated)",
                other
            )),
        }
    }
}

impl std::fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerPost => write!(f, "per_post"),
            Self::Aggregated => write!(f, "aggregated"),
        }
    }
}

/// View-normalized engagement ratios for one row (a post or a whole
/// subject), with the raw totals carried alongside for reporting. The
/// totals are never fed to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Post ID in per-post mode, subject/account name in aggregated mode
    pub id: String,
    /// likes / views (0 when views == 0)
    pub likes_per_views: f64,
    /// retweets / views (0 when views == 0)
    pub retweets_per_views: f64,
    /// replies / views (0 when views == 0)
    pub replies_per_views: f64,
    /// Raw view total for this row
    pub views: u64,
    /// Raw like total for this row
    pub likes: u64,
    /// Raw reshare total for this row
    pub retweets: u64,
    /// Raw reply total for this row
    pub replies: u64,
}

/// The feature table produced by the aggregator for one subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Mode the rows were computed in
    pub mode: FeatureMode,
    /// Feature rows (one per qualifying post, or exactly one aggregated row)
    pub rows: Vec<FeatureVector>,
    /// Number of posts with views > 0 that contributed
    pub valid_posts: usize,
}

/// A feature row with its predicted cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Row ID (post ID or subject name)
    pub id: String,
    /// The features the prediction was made from
    pub features: FeatureVector,
    /// Cluster ID from the fitted partition model (0..=3); carries no
    /// severity ordering by itself
    pub cluster: u32,
    /// Human-readable label from the engagement taxonomy
    pub cluster_label: String,
}

/// Full analysis output for one subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique report ID
    pub id: Uuid,
    /// The analyzed account
    pub account: String,
    /// Feature aggregation mode used
    pub mode: FeatureMode,
    /// When the report was generated
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// Number of posts that survived the validity filter
    pub valid_posts: usize,
    /// Per-row cluster assignments
    pub assignments: Vec<ClusterAssignment>,
    /// Account-level aggregate statistics
    pub summary: crate::summary::EngagementSummary,
}
