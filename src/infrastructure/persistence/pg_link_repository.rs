//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{InsertOutcome, Link, NewLink, UniqueField};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Unique constraint on `urls.short_id`, see `migrations/`.
const SHORT_ID_CONSTRAINT: &str = "urls_short_id_key";
/// Unique constraint on `urls.target_url`, see `migrations/`.
const TARGET_URL_CONSTRAINT: &str = "urls_target_url_key";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_id: String,
    target_url: String,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.short_id, row.target_url)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of both columns is enforced by table constraints. Each insert
/// runs in its own transaction which is rolled back when a constraint
/// rejects the row.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Maps a unique violation on `urls` to the column it protects.
///
/// Returns `None` for any other error, including violations of constraints
/// this repository does not know about.
fn unique_violation_field(e: &sqlx::Error) -> Option<UniqueField> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(SHORT_ID_CONSTRAINT) => Some(UniqueField::ShortId),
        Some(TARGET_URL_CONSTRAINT) => Some(UniqueField::TargetUrl),
        _ => None,
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_target(&self, target_url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_id, target_url
            FROM urls
            WHERE target_url = $1
            "#,
        )
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_id, target_url
            FROM urls
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert_or_conflict(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO urls (short_id, target_url)
            VALUES ($1, $2)
            RETURNING id, short_id, target_url
            "#,
        )
        .bind(&new_link.short_id)
        .bind(&new_link.target_url)
        .fetch_one(&mut *tx)
        .await;

        match result {
            Ok(row) => {
                tx.commit().await?;
                Ok(InsertOutcome::Inserted(row.into()))
            }
            Err(e) => match unique_violation_field(&e) {
                Some(field) => {
                    debug!(short_id = %new_link.short_id, ?field, "Insert rejected by unique constraint");
                    tx.rollback().await?;
                    Ok(InsertOutcome::Conflict(field))
                }
                None => Err(e.into()),
            },
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
