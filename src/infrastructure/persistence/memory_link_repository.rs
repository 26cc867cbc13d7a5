//! In-process implementation of link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{InsertOutcome, Link, NewLink, UniqueField};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    by_short_id: HashMap<String, Link>,
    /// target_url -> short_id
    by_target: HashMap<String, String>,
    last_id: i64,
}

/// In-memory repository backed by two indexes behind a single lock.
///
/// The write lock covers the uniqueness check on both columns and the insert,
/// so the constraints hold for any number of concurrent writers. Contents are
/// lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    tables: RwLock<Tables>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn find_by_target(&self, target_url: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_target
            .get(target_url)
            .and_then(|short_id| tables.by_short_id.get(short_id))
            .cloned())
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.tables.read().await.by_short_id.get(short_id).cloned())
    }

    async fn insert_or_conflict(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let mut tables = self.tables.write().await;

        if tables.by_short_id.contains_key(&new_link.short_id) {
            return Ok(InsertOutcome::Conflict(UniqueField::ShortId));
        }
        if tables.by_target.contains_key(&new_link.target_url) {
            return Ok(InsertOutcome::Conflict(UniqueField::TargetUrl));
        }

        tables.last_id += 1;
        let link = Link::new(tables.last_id, new_link.short_id, new_link.target_url);

        tables
            .by_target
            .insert(link.target_url.clone(), link.short_id.clone());
        tables.by_short_id.insert(link.short_id.clone(), link.clone());

        Ok(InsertOutcome::Inserted(link))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.by_short_id.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
