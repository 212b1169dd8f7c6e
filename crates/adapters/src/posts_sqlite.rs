//! SQLite post source
//!
//! Reads the raw JSON the retrieval layer persists per tracked account:
//! one row per account with the `{post_id: record}` mapping serialized in
//! the `posts` column.

use async_trait::async_trait;
use engage_lens_domain::{PostSource, PostSourceError, RawPost, posts_from_map};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::collections::BTreeMap;
use std::path::Path;

/// Post source backed by the retrieval layer's SQLite database
pub struct SqlitePostSource {
    pool: SqlitePool,
}

impl SqlitePostSource {
    /// Open an existing database written by the retrieval layer
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self, PostSourceError> {
        let db_path = db_path.as_ref();
        if !db_path.exists() {
            return Err(PostSourceError::Storage(format!(
                "Database file not found: {}",
                db_path.display()
            )));
        }

        let db_url = format!("sqlite:{}", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| PostSourceError::Storage(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Create an in-memory database with the expected schema (for testing)
    pub async fn in_memory() -> Result<Self, PostSourceError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| PostSourceError::Storage(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tracked_accounts (
                screen_name TEXT PRIMARY KEY,
                posts TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| PostSourceError::Storage(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Store the raw posts mapping for an account. In production the
    /// retrieval layer owns writes; this is used by tests and backfills.
    pub async fn upsert_posts(
        &self,
        account: &str,
        posts_json: &str,
    ) -> Result<(), PostSourceError> {
        sqlx::query(
            r#"
            INSERT INTO tracked_accounts (screen_name, posts) VALUES (?, ?)
            ON CONFLICT(screen_name) DO UPDATE SET posts = excluded.posts
            "#,
        )
        .bind(account)
        .bind(posts_json)
        .execute(&self.pool)
        .await
        .map_err(|e| PostSourceError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PostSource for SqlitePostSource {
    async fn fetch_posts(&self, account: &str) -> Result<Vec<RawPost>, PostSourceError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT posts FROM tracked_accounts WHERE screen_name = ? LIMIT 1")
                .bind(account)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PostSourceError::Storage(e.to_string()))?;

        let posts_json = match row {
            Some((Some(json),)) if !json.is_empty() => json,
            _ => return Err(PostSourceError::NotFound(account.to_string())),
        };

        let map: BTreeMap<String, RawPost> = serde_json::from_str(&posts_json)
            .map_err(|e| PostSourceError::Malformed(e.to_string()))?;

        let posts = posts_from_map(map);
        tracing::info!(account = %account, count = posts.len(), "Loaded posts from database");

        Ok(posts)
    }
}
