//! Metric normalizer: raw counters -> canonical numeric records
//!
//! Normalization never fails. Good data refines the signal; malformed data
//! degrades to zero and is left for the filter to judge. Rejection is not
//! this stage's job.

use crate::model::{NormalizedPost, RawCount, RawPost};

impl RawCount {
    /// Coerce a raw counter to a non-negative count.
    /// Missing, empty, unparseable, and negative values all become 0.
    pub fn as_count(&self) -> u64 {
        match self {
            RawCount::Int(n) => (*n).try_into().unwrap_or(0),
            RawCount::Float(f) if f.is_finite() && *f >= 0.0 => *f as u64,
            RawCount::Float(_) => 0,
            RawCount::Text(s) => s.trim().parse::<u64>().unwrap_or(0),
            RawCount::Missing => 0,
        }
    }
}

/// Normalize one raw post. Counters are coerced individually, so one
/// malformed field never poisons the others.
pub fn normalize(raw: &RawPost) -> NormalizedPost {
    NormalizedPost {
        id: raw.id.clone(),
        full_text: raw.full_text.clone(),
        views: raw.views_count.as_count(),
        likes: raw.likes_count.as_count(),
        retweets: raw.retweet_count.as_count(),
        replies: raw.reply_count.as_count(),
        comments: raw.comments.clone(),
    }
}

/// Normalize a batch, preserving order.
pub fn normalize_all(raw: &[RawPost]) -> Vec<NormalizedPost> {
    raw.iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(views: RawCount, likes: RawCount) -> RawPost {
        RawPost {
            id: "1".to_string(),
            full_text: "hello".to_string(),
            views_count: views,
            likes_count: likes,
            ..Default::default()
        }
    }

    #[test]
    fn numeric_string_is_parsed() {
        let post = normalize(&raw(RawCount::Text("1200".to_string()), RawCount::Int(34)));
        assert_eq!(post.views, 1200);
        assert_eq!(post.likes, 34);
    }

    #[test]
    fn non_numeric_string_degrades_to_zero() {
        let post = normalize(&raw(RawCount::Text("N/A".to_string()), RawCount::Int(5)));
        assert_eq!(post.views, 0);
        assert_eq!(post.likes, 5);
    }

    #[test]
    fn missing_and_empty_become_zero() {
        let post = normalize(&raw(RawCount::Missing, RawCount::Text(String::new())));
        assert_eq!(post.views, 0);
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let post = normalize(&raw(RawCount::Int(-3), RawCount::Float(-1.5)));
        assert_eq!(post.views, 0);
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn float_counter_truncates() {
        let post = normalize(&raw(RawCount::Float(99.9), RawCount::Float(f64::NAN)));
        assert_eq!(post.views, 99);
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn text_and_comments_are_preserved() {
        let mut input = raw(RawCount::Int(10), RawCount::Int(1));
        input.comments = vec!["nice".to_string(), "gm".to_string()];
        let post = normalize(&input);
        assert_eq!(post.full_text, "hello");
        assert_eq!(post.comments, vec!["nice", "gm"]);
    }

    #[test]
    fn untagged_counter_deserializes_all_shapes() {
        let json = r#"{
            "full_text": "post",
            "views_count": "150",
            "likes_count": 3,
            "retweet_count": null,
            "reply_count": 1.0
        }"#;
        let raw: RawPost = serde_json::from_str(json).unwrap();
        assert_eq!(raw.views_count, RawCount::Text("150".to_string()));
        assert_eq!(raw.likes_count, RawCount::Int(3));
        assert_eq!(raw.retweet_count, RawCount::Missing);
        assert_eq!(raw.reply_count, RawCount::Float(1.0));
    }
}
