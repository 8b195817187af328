//! SQLite repository for the nested-set category table

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::CategoryStore;
use crate::model::{ALL_LANGUAGES, CategoryNode, CategoryPlacement, PublishedState};
use crate::query::{BoundValue, CompiledQuery, SelectQuery};

#[derive(Debug, Clone)]
pub struct SqliteCategoryStore {
    pool: SqlitePool,
}

impl SqliteCategoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(&self, compiled: &CompiledQuery) -> Result<Vec<SqliteRow>> {
        log::debug!(
            "Executing category query: {} ({} params)",
            compiled.sql,
            compiled.params.len()
        );

        let mut statement = sqlx::query(&compiled.sql);
        for param in &compiled.params {
            statement = match param {
                BoundValue::Integer(value) => statement.bind(*value),
                BoundValue::Text(value) => statement.bind(value.clone()),
            };
        }

        statement
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to execute category query: {}", compiled.sql))
    }
}

#[async_trait]
impl CategoryStore for SqliteCategoryStore {
    async fn fetch_nodes(&self, query: &SelectQuery) -> Result<Vec<CategoryNode>> {
        let rows = self.fetch_rows(&query.to_sql()).await?;
        let nodes = rows.iter().map(node_from_row).collect::<Result<Vec<_>>>()?;

        log::debug!("Loaded {} category rows", nodes.len());
        Ok(nodes)
    }

    async fn fetch_placement(&self, query: &SelectQuery) -> Result<Option<CategoryPlacement>> {
        let rows = self.fetch_rows(&query.to_sql()).await?;

        rows.first()
            .map(|row| -> Result<CategoryPlacement> {
                Ok(CategoryPlacement {
                    parent_id: row.try_get("parent_id")?,
                })
            })
            .transpose()
    }
}

fn node_from_row(row: &SqliteRow) -> Result<CategoryNode> {
    Ok(CategoryNode {
        id: row.try_get("value")?,
        title: row.try_get("text")?,
        level: row.try_get("level")?,
        published: PublishedState::from_code(row.try_get("published")?),
        hidden: row.try_get::<i64, _>("hidden")? != 0,
        in_hidden: row.try_get::<i64, _>("in_hidden")? != 0,
        lft: row.try_get("lft")?,
        language: row.try_get("language")?,
    })
}

/// Create the category table if it does not exist yet
pub async fn migrate(pool: &SqlitePool, table: &str) -> Result<()> {
    log::debug!("Ensuring category table {} exists", table);

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY NOT NULL,
            parent_id INTEGER NOT NULL DEFAULT 0,
            lft INTEGER NOT NULL DEFAULT 0,
            rgt INTEGER NOT NULL DEFAULT 0,
            level INTEGER NOT NULL DEFAULT 0,
            title TEXT NOT NULL,
            published INTEGER NOT NULL DEFAULT 1,
            hidden INTEGER NOT NULL DEFAULT 0,
            in_hidden INTEGER NOT NULL DEFAULT 0,
            access INTEGER NOT NULL DEFAULT 1,
            language TEXT NOT NULL DEFAULT '*'
        )
        "#
    ))
    .execute(pool)
    .await
    .with_context(|| format!("Failed to create table {}", table))?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_lft ON {table} (lft)"
    ))
    .execute(pool)
    .await
    .with_context(|| format!("Failed to create lft index on {}", table))?;

    Ok(())
}

/// A category row to seed into the table
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub id: i64,
    pub parent_id: i64,
    pub lft: i64,
    pub rgt: i64,
    pub level: i64,
    pub title: String,
    pub published: PublishedState,
    pub hidden: bool,
    pub in_hidden: bool,
    pub access: i64,
    pub language: String,
}

impl NewCategory {
    /// Published, visible, public access level, all languages
    pub fn new(
        id: i64,
        parent_id: i64,
        level: i64,
        bounds: (i64, i64),
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            parent_id,
            lft: bounds.0,
            rgt: bounds.1,
            level,
            title: title.into(),
            published: PublishedState::Published,
            hidden: false,
            in_hidden: false,
            access: 1,
            language: ALL_LANGUAGES.to_string(),
        }
    }
}

/// Insert or replace a category row
pub async fn insert(pool: &SqlitePool, table: &str, category: &NewCategory) -> Result<()> {
    sqlx::query(&format!(
        r#"
        INSERT OR REPLACE INTO {table}
            (id, parent_id, lft, rgt, level, title, published, hidden, in_hidden, access, language)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(category.id)
    .bind(category.parent_id)
    .bind(category.lft)
    .bind(category.rgt)
    .bind(category.level)
    .bind(&category.title)
    .bind(category.published.code())
    .bind(category.hidden as i64)
    .bind(category.in_hidden as i64)
    .bind(category.access)
    .bind(&category.language)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to insert category {} ('{}')", category.id, category.title))?;

    log::debug!("Inserted category {} into {}", category.id, table);
    Ok(())
}
