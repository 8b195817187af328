//! Category storage: the query seam and its SQLite implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;

use crate::model::{CategoryNode, CategoryPlacement};
use crate::query::SelectQuery;

pub mod categories;

pub use categories::{NewCategory, SqliteCategoryStore};

/// Default name of the nested-set category table
pub const DEFAULT_TABLE: &str = "joomgallery_categories";

/// Executes category queries built by the options provider.
///
/// Result rows must expose the aliases `value`, `text`, `level`, `published`,
/// `hidden`, `in_hidden`, `lft` and `language` for [`fetch_nodes`], and
/// `parent_id` for [`fetch_placement`].
///
/// [`fetch_nodes`]: CategoryStore::fetch_nodes
/// [`fetch_placement`]: CategoryStore::fetch_placement
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn fetch_nodes(&self, query: &SelectQuery) -> Result<Vec<CategoryNode>>;

    async fn fetch_placement(&self, query: &SelectQuery) -> Result<Option<CategoryPlacement>>;
}

/// Connect to an existing SQLite database (read-only use)
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let database_url = format!("sqlite://{}?mode=ro", db_path.display());

    let pool = SqlitePool::connect(&database_url)
        .await
        .with_context(|| format!("Failed to connect to database: {}", db_path.display()))?;

    log::debug!("Connected to SQLite database: {}", db_path.display());
    Ok(pool)
}

/// Connect to in-memory database for testing
pub async fn connect_memory() -> Result<SqlitePool> {
    // Every connection to :memory: is a separate database, so keep exactly one
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("Failed to connect to in-memory database")?;

    log::debug!("Connected to in-memory SQLite database");
    Ok(pool)
}
