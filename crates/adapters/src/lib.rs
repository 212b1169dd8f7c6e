//! engage-lens adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `model_fs`: Filesystem model-artifact store (scaler + k-means JSON)
//! - `posts_json`: Post source reading a persisted JSON posts file
//! - `posts_sqlite`: Post source reading the retrieval layer's SQLite store
//! - `posts_stub`: Fixed in-memory post source for tests

mod model_fs;
mod posts_json;
mod posts_sqlite;
mod posts_stub;

/// Re-exports for model storage adapters
pub mod models {
    pub use crate::model_fs::FsModelStore;
}

/// Re-exports for post source adapters
pub mod posts {
    pub use crate::posts_json::JsonPostSource;
    pub use crate::posts_sqlite::SqlitePostSource;
    pub use crate::posts_stub::StubPostSource;
}
