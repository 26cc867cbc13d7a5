#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use std::sync::Arc;
use urlsnip::prelude::*;
use urlsnip::routes::{app_router, router};

pub const BASE_URL: &str = "http://127.0.0.1:8080";

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    create_test_state_with(Arc::new(RandomShortIdGenerator::default()))
}

pub fn create_test_state_with(
    generator: Arc<dyn ShortIdGenerator>,
) -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let service = create_service(repo.clone(), generator);

    (AppState::new(Arc::new(service)), repo)
}

pub fn create_service(
    repo: Arc<dyn LinkRepository>,
    generator: Arc<dyn ShortIdGenerator>,
) -> LinkService {
    LinkService::new(repo, generator, BASE_URL)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Server over the full service stack, including path normalization.
pub fn create_app_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

pub async fn create_test_link(repo: &MemoryLinkRepository, short_id: &str, url: &str) -> Link {
    repo.insert_or_conflict(NewLink::new(short_id, url))
        .await
        .unwrap()
        .into_link()
        .unwrap()
}

/// Store whose every call fails, as if the database were down.
pub struct UnavailableRepository;

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn find_by_target(&self, _target_url: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn find_by_short_id(&self, _short_id: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn insert_or_conflict(&self, _new_link: NewLink) -> Result<InsertOutcome, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::StoreUnavailable("connection refused (10.0.0.5:5432)".to_string())
}

/// Store whose short id lookups never see existing rows, so that every
/// collision is caught by the insert constraint instead of the pre-check.
pub struct BlindLookupRepository {
    pub inner: Arc<MemoryLinkRepository>,
}

#[async_trait]
impl LinkRepository for BlindLookupRepository {
    async fn find_by_target(&self, target_url: &str) -> Result<Option<Link>, AppError> {
        self.inner.find_by_target(target_url).await
    }

    async fn find_by_short_id(&self, _short_id: &str) -> Result<Option<Link>, AppError> {
        Ok(None)
    }

    async fn insert_or_conflict(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        self.inner.insert_or_conflict(new_link).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.inner.count().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }
}

pub fn create_unavailable_state() -> AppState {
    let service = create_service(
        Arc::new(UnavailableRepository),
        Arc::new(RandomShortIdGenerator::default()),
    );
    AppState::new(Arc::new(service))
}
