//! Fixed in-memory post source for tests and offline smoke runs

use async_trait::async_trait;
use engage_lens_domain::{PostSource, PostSourceError, RawCount, RawPost};

/// Post source returning a fixed set of posts for any account
pub struct StubPostSource {
    posts: Vec<RawPost>,
}

impl StubPostSource {
    pub fn new(posts: Vec<RawPost>) -> Self {
        Self { posts }
    }

    /// A small sample timeline exercising every filter rule
    pub fn sample() -> Self {
        let post = |id: &str, text: &str, views: i64, likes: i64, retweets: i64, replies: i64| {
            RawPost {
                id: id.to_string(),
                full_text: text.to_string(),
                views_count: RawCount::Int(views),
                likes_count: RawCount::Int(likes),
                retweet_count: RawCount::Int(retweets),
                reply_count: RawCount::Int(replies),
                comments: vec![],
            }
        };

        Self::new(vec![
            post("1001", "shipping the new release today", 1200, 140, 22, 9),
            post("1002", "RT @friend: look at this", 900, 80, 10, 2),
            post("1003", "quiet thoughts", 300, 4, 0, 1),
            post("1004", "ghost entry", 0, 12, 0, 0),
            post("1005", "charts looking interesting", 2500, 310, 95, 40),
        ])
    }
}

#[async_trait]
impl PostSource for StubPostSource {
    async fn fetch_posts(&self, account: &str) -> Result<Vec<RawPost>, PostSourceError> {
        tracing::debug!(account = %account, count = self.posts.len(), "Serving stub posts");
        Ok(self.posts.clone())
    }
}
