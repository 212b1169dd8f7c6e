//! JSON-file post source
//!
//! Reads the Post Source contract mapping `{post_id: record}` from a JSON
//! file, e.g. a per-account dump exported from the retrieval layer.

use async_trait::async_trait;
use engage_lens_domain::{PostSource, PostSourceError, RawPost, posts_from_map};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Post source backed by a single JSON posts file
pub struct JsonPostSource {
    posts_file: PathBuf,
}

impl JsonPostSource {
    pub fn new(posts_file: impl AsRef<Path>) -> Self {
        Self {
            posts_file: posts_file.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PostSource for JsonPostSource {
    async fn fetch_posts(&self, account: &str) -> Result<Vec<RawPost>, PostSourceError> {
        let content = std::fs::read_to_string(&self.posts_file).map_err(|e| {
            PostSourceError::Storage(format!(
                "Failed to read {}: {}",
                self.posts_file.display(),
                e
            ))
        })?;

        let map: BTreeMap<String, RawPost> = serde_json::from_str(&content)
            .map_err(|e| PostSourceError::Malformed(e.to_string()))?;

        let posts = posts_from_map(map);
        tracing::info!(
            account = %account,
            file = %self.posts_file.display(),
            count = posts.len(),
            "Loaded posts from file"
        );

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_lens_domain::RawCount;
    use tempfile::TempDir;

    #[tokio::test]
    async fn parses_contract_mapping_sorted_by_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            r#"{
                "20002": {"full_text": "later", "views_count": "50", "likes_count": 1},
                "10001": {"full_text": "earlier", "views_count": 100, "likes_count": "7",
                          "retweet_count": null, "comments": ["gm"]}
            }"#,
        )
        .unwrap();

        let source = JsonPostSource::new(&path);
        let posts = source.fetch_posts("testaccount").await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "10001");
        assert_eq!(posts[0].full_text, "earlier");
        assert_eq!(posts[0].views_count, RawCount::Int(100));
        assert_eq!(posts[0].retweet_count, RawCount::Missing);
        assert_eq!(posts[0].comments, vec!["gm"]);
        assert_eq!(posts[1].id, "20002");
    }

    #[tokio::test]
    async fn missing_file_is_a_storage_error() {
        let source = JsonPostSource::new("/nonexistent/posts.json");
        let result = source.fetch_posts("x").await;
        assert!(matches!(result, Err(PostSourceError::Storage(_))));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let source = JsonPostSource::new(&path);
        let result = source.fetch_posts("x").await;
        assert!(matches!(result, Err(PostSourceError::Malformed(_))));
    }
}
