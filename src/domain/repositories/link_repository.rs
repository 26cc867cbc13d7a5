//! Repository trait for short link data access.

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// The store is the only authority on uniqueness: both `short_id` and
/// `target_url` must be enforced atomically by the backend at insert time.
/// Lookups are best-effort reads and may be stale by the time a caller acts
/// on them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its exact target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on storage errors.
    async fn find_by_target(&self, target_url: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its exact short id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on storage errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a link unless a uniqueness constraint rejects it.
    ///
    /// A rejected insert leaves no partial state behind and is reported as
    /// [`InsertOutcome::Conflict`] naming the violated column.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] for every failure other than a
    /// unique constraint violation.
    async fn insert_or_conflict(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
