//! Engagement taxonomy
//!
//! The fixed human-readable interpretation of each cluster ID. Cluster IDs
//! come from the fitted partition model's internal ordering: ID 0 is not
//! "worst" and ID 3 is not "best". Each ID's meaning was determined
//! empirically at training time and is only meaningful through this table.

use serde::{Deserialize, Serialize};

/// One cluster's human-readable interpretation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterProfile {
    /// Cluster ID as produced by the fitted model
    pub id: u32,
    /// Short label
    pub label: String,
    /// Color marker for presentation
    pub color: String,
    /// One-paragraph description
    pub description: String,
}

/// Immutable mapping from cluster ID to profile, loaded at process start
#[derive(Debug, Clone)]
pub struct EngagementTaxonomy {
    profiles: Vec<ClusterProfile>,
}

impl EngagementTaxonomy {
    /// The standard four-cluster engagement taxonomy
    pub fn standard() -> Self {
        let entry = |id: u32, label: &str, color: &str, description: &str| ClusterProfile {
            id,
            label: label.to_string(),
            color: color.to_string(),
            description: description.to_string(),
        };

        Self {
            profiles: vec![
                entry(
                    0,
                    "Balanced Engagement",
                    "🟡",
                    "Moderate engagement spread evenly across likes, reshares and \
                     replies. Typically generalist accounts with a stable audience.",
                ),
                entry(
                    1,
                    "Strong Attraction",
                    "🟢",
                    "Many likes but few replies: popular content that invites little \
                     debate. Typically news or influencer accounts.",
                ),
                entry(
                    2,
                    "Low Engagement",
                    "🔴",
                    "The lowest engagement ratios on every indicator. Possibly dormant \
                     accounts, bots, or accounts with unengaging content.",
                ),
                entry(
                    3,
                    "High Virality",
                    "🔵",
                    "The highest engagement ratios, especially reshares. Typically \
                     analysis or news content widely shared by the community.",
                ),
            ],
        }
    }

    /// Get a profile by cluster ID
    pub fn get(&self, id: u32) -> Option<&ClusterProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Label for a cluster ID, if known
    pub fn label(&self, id: u32) -> Option<&str> {
        self.get(id).map(|p| p.label.as_str())
    }

    /// All profiles, in ID order
    pub fn profiles(&self) -> &[ClusterProfile] {
        &self.profiles
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for EngagementTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_taxonomy_has_four_entries() {
        let taxonomy = EngagementTaxonomy::standard();
        assert_eq!(taxonomy.len(), 4);
        for id in 0..4 {
            assert!(taxonomy.get(id).is_some(), "missing cluster {}", id);
        }
        assert!(taxonomy.get(4).is_none());
    }

    #[test]
    fn labels_resolve_by_id() {
        let taxonomy = EngagementTaxonomy::standard();
        assert_eq!(taxonomy.label(1), Some("Strong Attraction"));
        assert_eq!(taxonomy.label(3), Some("High Virality"));
        assert_eq!(taxonomy.label(9), None);
    }
}
