//! Post validity policy
//!
//! Filters normalized posts down to the ones that carry a trustworthy
//! engagement signal. Each rule is an independent exclusion; a post that
//! trips none of them passes through unmodified and in its original
//! position.

use crate::model::NormalizedPost;

/// Textual convention marking a repost of someone else's content.
/// Matched as a substring anywhere in the body, case-sensitive.
pub const RESHARE_MARKER: &str = "RT @";

/// Why a post was excluded by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Body contains the reshare marker; interaction data belongs to the
    /// original author, not this subject
    Reshare,
    /// Zero views but nonzero interactions: likely a corrupted or partial
    /// capture
    ZeroViewsWithInteractions,
    /// All four counters are zero: nothing to measure
    NoSignal,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reshare => write!(f, "reshare marker in body"),
            Self::ZeroViewsWithInteractions => write!(f, "zero views with interactions"),
            Self::NoSignal => write!(f, "all counters zero"),
        }
    }
}

/// Evaluate the validity policy for a single post.
/// Returns the first matching exclusion, or `None` if the post is valid.
pub fn check(post: &NormalizedPost) -> Option<RejectReason> {
    if post.full_text.contains(RESHARE_MARKER) {
        return Some(RejectReason::Reshare);
    }

    let interactions = post.likes > 0 || post.retweets > 0 || post.replies > 0;
    if post.views == 0 && interactions {
        return Some(RejectReason::ZeroViewsWithInteractions);
    }

    if post.views == 0 && !interactions {
        return Some(RejectReason::NoSignal);
    }

    None
}

/// Whether a normalized post passes the validity policy
pub fn is_valid(post: &NormalizedPost) -> bool {
    check(post).is_none()
}

/// Filter a batch down to valid posts, preserving input order.
/// Rejections are logged per post; they never abort the batch.
pub fn filter_valid(posts: Vec<NormalizedPost>) -> Vec<NormalizedPost> {
    let total = posts.len();

    let valid: Vec<NormalizedPost> = posts
        .into_iter()
        .filter(|post| match check(post) {
            Some(reason) => {
                tracing::debug!(post_id = %post.id, %reason, "Excluding post");
                false
            }
            None => true,
        })
        .collect();

    tracing::info!(
        total,
        valid = valid.len(),
        "Filtered posts down to valid posts"
    );

    valid
}
