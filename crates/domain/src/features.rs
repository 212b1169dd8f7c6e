//! Engagement feature aggregation
//!
//! Reduces a subject's valid posts to view-normalized feature rows. Two
//! modes share one entry point: per-post rows for fine-grained views (one
//! point per post), or a single aggregated row over summed counters so a
//! lone viral or dud post cannot dominate the account-level score.

use crate::model::{FeatureMode, FeatureSet, FeatureVector, NormalizedPost};

/// Compute the feature table for one subject from its valid posts.
pub fn compute_features(
    subject: &str,
    posts: &[NormalizedPost],
    mode: FeatureMode,
) -> FeatureSet {
    match mode {
        FeatureMode::PerPost => per_post_features(posts),
        FeatureMode::Aggregated => aggregated_features(subject, posts),
    }
}

fn ratio(count: u64, views: u64) -> f64 {
    if views == 0 {
        0.0
    } else {
        count as f64 / views as f64
    }
}

/// One feature row per post with views > 0. Posts with zero views are
/// skipped even if they reached this stage; a ratio over zero views has no
/// meaning.
fn per_post_features(posts: &[NormalizedPost]) -> FeatureSet {
    let rows: Vec<FeatureVector> = posts
        .iter()
        .filter(|post| post.views > 0)
        .map(|post| FeatureVector {
            id: post.id.clone(),
            likes_per_views: ratio(post.likes, post.views),
            retweets_per_views: ratio(post.retweets, post.views),
            replies_per_views: ratio(post.replies, post.views),
            views: post.views,
            likes: post.likes,
            retweets: post.retweets,
            replies: post.replies,
        })
        .collect();

    let valid_posts = rows.len();
    FeatureSet {
        mode: FeatureMode::PerPost,
        rows,
        valid_posts,
    }
}

/// A single row over counters summed across all valid posts. With zero
/// total views the ratios are defined as 0 and the contributing-post count
/// is 0; there is never a division error.
fn aggregated_features(subject: &str, posts: &[NormalizedPost]) -> FeatureSet {
    let mut views: u64 = 0;
    let mut likes: u64 = 0;
    let mut retweets: u64 = 0;
    let mut replies: u64 = 0;
    let mut valid_posts = 0usize;

    for post in posts {
        views += post.views;
        likes += post.likes;
        retweets += post.retweets;
        replies += post.replies;
        if post.views > 0 {
            valid_posts += 1;
        }
    }

    if views == 0 {
        valid_posts = 0;
    }

    let row = FeatureVector {
        id: subject.to_string(),
        likes_per_views: ratio(likes, views),
        retweets_per_views: ratio(retweets, views),
        replies_per_views: ratio(replies, views),
        views,
        likes,
        retweets,
        replies,
    };

    FeatureSet {
        mode: FeatureMode::Aggregated,
        rows: vec![row],
        valid_posts,
    }
}
