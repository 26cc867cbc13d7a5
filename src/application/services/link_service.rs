//! Link creation and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::entities::{InsertOutcome, Link, NewLink, UniqueField};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::short_id::ShortIdGenerator;
use crate::utils::url_validator::validate_target_url;

/// Maximum number of candidate short ids tried per shorten request.
pub const MAX_ATTEMPTS: usize = 10;

/// Service for creating and resolving shortened links.
///
/// Allocation is optimistic: candidates are pre-checked with a plain read and
/// then inserted under the store's uniqueness constraints. No lock is held
/// across the read and the write; a lost race surfaces as
/// [`InsertOutcome::Conflict`] and costs one attempt.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
    generator: Arc<dyn ShortIdGenerator>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the prefix of every short URL handed out, e.g.
    /// `http://127.0.0.1:8080`.
    pub fn new(
        link_repository: Arc<L>,
        generator: Arc<dyn ShortIdGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_repository,
            generator,
            base_url: base_url.into(),
        }
    }

    /// Returns the link for `target_url`, creating it if needed.
    ///
    /// # Idempotence
    ///
    /// If the exact same target URL was shortened before, the existing link is
    /// returned and nothing is written. URLs with non-ASCII characters are
    /// matched and stored in their ASCII serialization, see
    /// [`validate_target_url`].
    ///
    /// # Allocation
    ///
    /// Otherwise up to [`MAX_ATTEMPTS`] candidates are drawn. A candidate is
    /// skipped when the pre-check finds it taken or when the insert is
    /// rejected on `short_id`. If the insert is rejected on `target_url`, a
    /// concurrent request shortened the same URL first and its link is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `target_url` is not an absolute HTTP(S) URL
    /// - [`AppError::AllocationExhausted`] if every attempt collided
    /// - [`AppError::StoreUnavailable`] on any other store failure
    pub async fn shorten(&self, target_url: &str) -> Result<Link, AppError> {
        let stored = validate_target_url(target_url).map_err(|e| {
            AppError::validation(
                "Invalid URL format",
                json!({ "url": target_url, "reason": e.to_string() }),
            )
        })?;
        let target_url: &str = &stored;

        if let Some(existing) = self.link_repository.find_by_target(target_url).await? {
            info!(short_id = %existing.short_id, "URL already shortened");
            return Ok(existing);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = self.generator.generate();

            if self
                .link_repository
                .find_by_short_id(&candidate)
                .await?
                .is_some()
            {
                debug!(attempt, short_id = %candidate, "Short id already taken");
                continue;
            }

            let new_link = NewLink::new(candidate.clone(), target_url);

            match self.link_repository.insert_or_conflict(new_link).await? {
                InsertOutcome::Inserted(link) => {
                    info!(short_id = %link.short_id, attempt, "Short link created");
                    return Ok(link);
                }
                InsertOutcome::Conflict(UniqueField::ShortId) => {
                    debug!(attempt, short_id = %candidate, "Lost short id race");
                }
                InsertOutcome::Conflict(UniqueField::TargetUrl) => {
                    if let Some(existing) =
                        self.link_repository.find_by_target(target_url).await?
                    {
                        info!(short_id = %existing.short_id, "URL shortened concurrently");
                        return Ok(existing);
                    }
                    debug!(attempt, "Target conflict without a visible row");
                }
            }
        }

        error!(
            target_url,
            attempts = MAX_ATTEMPTS,
            "Failed to allocate a unique short id"
        );

        Err(AppError::AllocationExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Looks up the link for `short_id`.
    ///
    /// `Ok(None)` is a normal outcome for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn resolve(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        self.link_repository.find_by_short_id(short_id).await
    }

    /// Constructs the full short URL for a link.
    pub fn short_url(&self, link: &Link) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), link.short_id)
    }

    /// Total number of stored links.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Checks that the backing store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}
