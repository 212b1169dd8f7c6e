//! Account-level summary statistics over cluster assignments

use serde::{Deserialize, Serialize};

use crate::model::ClusterAssignment;

/// Occurrence count for one cluster label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterCount {
    pub label: String,
    pub count: u64,
}

/// Aggregate statistics for a set of assignments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementSummary {
    /// Number of assigned rows
    pub total_posts: usize,
    /// Sum of raw view counts
    pub total_views: u64,
    /// Sum of raw like counts
    pub total_likes: u64,
    /// Sum of raw reshare counts
    pub total_retweets: u64,
    /// Sum of raw reply counts
    pub total_replies: u64,
    /// Mean likes-per-views across rows
    pub avg_likes_per_views: f64,
    /// Mean retweets-per-views across rows
    pub avg_retweets_per_views: f64,
    /// Mean replies-per-views across rows
    pub avg_replies_per_views: f64,
    /// Label occurrence counts, in first-seen order
    pub cluster_distribution: Vec<ClusterCount>,
    /// Most frequent label. Ties resolve to the label seen first; the
    /// tie-break carries no semantics.
    pub dominant_cluster: Option<String>,
}

/// Summarize a set of assignments. Empty input yields a neutral summary
/// with an empty distribution and no dominant cluster.
pub fn summarize(assignments: &[ClusterAssignment]) -> EngagementSummary {
    if assignments.is_empty() {
        return EngagementSummary::default();
    }

    let mut summary = EngagementSummary {
        total_posts: assignments.len(),
        ..Default::default()
    };

    let mut distribution: Vec<ClusterCount> = Vec::new();

    for assignment in assignments {
        let f = &assignment.features;
        summary.total_views += f.views;
        summary.total_likes += f.likes;
        summary.total_retweets += f.retweets;
        summary.total_replies += f.replies;
        summary.avg_likes_per_views += f.likes_per_views;
        summary.avg_retweets_per_views += f.retweets_per_views;
        summary.avg_replies_per_views += f.replies_per_views;

        match distribution
            .iter_mut()
            .find(|c| c.label == assignment.cluster_label)
        {
            Some(entry) => entry.count += 1,
            None => distribution.push(ClusterCount {
                label: assignment.cluster_label.clone(),
                count: 1,
            }),
        }
    }

    let n = assignments.len() as f64;
    summary.avg_likes_per_views /= n;
    summary.avg_retweets_per_views /= n;
    summary.avg_replies_per_views /= n;

    // Strictly-greater comparison keeps the first-seen label on ties
    let mut dominant: Option<&ClusterCount> = None;
    for entry in &distribution {
        if dominant.is_none_or(|d| entry.count > d.count) {
            dominant = Some(entry);
        }
    }
    summary.dominant_cluster = dominant.map(|c| c.label.clone());
    summary.cluster_distribution = distribution;

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeatureVector;

    fn assignment(id: &str, label: &str, views: u64, likes: u64) -> ClusterAssignment {
        ClusterAssignment {
            id: id.to_string(),
            features: FeatureVector {
                id: id.to_string(),
                likes_per_views: likes as f64 / views as f64,
                retweets_per_views: 0.0,
                replies_per_views: 0.0,
                views,
                likes,
                retweets: 0,
                replies: 0,
            },
            cluster: 0,
            cluster_label: label.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_neutral_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_posts, 0);
        assert!(summary.cluster_distribution.is_empty());
        assert_eq!(summary.dominant_cluster, None);
    }

    #[test]
    fn totals_and_means_accumulate() {
        let assignments = vec![
            assignment("a", "Balanced Engagement", 100, 10),
            assignment("b", "Balanced Engagement", 50, 10),
        ];
        let summary = summarize(&assignments);

        assert_eq!(summary.total_posts, 2);
        assert_eq!(summary.total_views, 150);
        assert_eq!(summary.total_likes, 20);
        // Mean of per-row ratios (0.1 and 0.2), not the ratio of totals
        assert!((summary.avg_likes_per_views - 0.15).abs() < 1e-12);
    }

    #[test]
    fn dominant_cluster_is_the_mode() {
        let assignments = vec![
            assignment("a", "High Virality", 10, 1),
            assignment("b", "Low Engagement", 10, 1),
            assignment("c", "Low Engagement", 10, 1),
        ];
        let summary = summarize(&assignments);
        assert_eq!(summary.dominant_cluster.as_deref(), Some("Low Engagement"));
    }

    #[test]
    fn ties_resolve_to_first_seen_label() {
        let assignments = vec![
            assignment("a", "High Virality", 10, 1),
            assignment("b", "Low Engagement", 10, 1),
        ];
        let summary = summarize(&assignments);
        assert_eq!(summary.dominant_cluster.as_deref(), Some("High Virality"));
    }

    #[test]
    fn distribution_keeps_first_seen_order() {
        let assignments = vec![
            assignment("a", "Low Engagement", 10, 1),
            assignment("b", "High Virality", 10, 1),
            assignment("c", "Low Engagement", 10, 1),
        ];
        let summary = summarize(&assignments);
        let labels: Vec<&str> = summary
            .cluster_distribution
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Low Engagement", "High Virality"]);
        assert_eq!(summary.cluster_distribution[0].count, 2);
    }
}
