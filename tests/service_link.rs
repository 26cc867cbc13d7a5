mod common;

use std::collections::HashSet;
use std::sync::Arc;
use urlsnip::prelude::*;

fn memory_service(generator: Arc<dyn ShortIdGenerator>) -> (LinkService, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    (common::create_service(repo.clone(), generator), repo)
}

fn random_service() -> (LinkService, Arc<MemoryLinkRepository>) {
    memory_service(Arc::new(RandomShortIdGenerator::default()))
}

#[tokio::test]
async fn test_shorten_twice_yields_same_link() {
    let (service, repo) = random_service();

    let first = service.shorten("https://example.com/a").await.unwrap();
    let second = service.shorten("https://example.com/a").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_target_match_is_exact() {
    let (service, repo) = random_service();

    let plain = service.shorten("https://example.com").await.unwrap();
    let slashed = service.shorten("https://example.com/").await.unwrap();

    assert_ne!(plain.short_id, slashed.short_id);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_internationalized_url_round_trip() {
    let (service, repo) = random_service();

    let unicode = service.shorten("https://bücher.example/").await.unwrap();
    let punycode = service.shorten("https://xn--bcher-kva.example/").await.unwrap();

    assert_eq!(unicode.target_url, "https://xn--bcher-kva.example/");
    assert_eq!(unicode, punycode);
    assert_eq!(repo.count().await.unwrap(), 1);

    let resolved = service.resolve(&unicode.short_id).await.unwrap().unwrap();
    assert_eq!(resolved.target_url, "https://xn--bcher-kva.example/");
}

#[tokio::test]
async fn test_distinct_urls_get_distinct_ids() {
    let (service, _repo) = random_service();
    let mut ids = HashSet::new();

    for i in 0..200 {
        let link = service
            .shorten(&format!("https://example.com/page/{i}"))
            .await
            .unwrap();
        assert_eq!(link.short_id.len(), 8);
        ids.insert(link.short_id);
    }

    assert_eq!(ids.len(), 200);
}

#[tokio::test]
async fn test_round_trip() {
    let (service, _repo) = random_service();

    let link = service.shorten("https://rust-lang.org/learn").await.unwrap();
    let resolved = service.resolve(&link.short_id).await.unwrap().unwrap();

    assert_eq!(resolved.target_url, "https://rust-lang.org/learn");
    assert_eq!(resolved, link);
}

#[tokio::test]
async fn test_resolve_unknown_is_none() {
    let (service, _repo) = random_service();
    service.shorten("https://example.com").await.unwrap();

    assert!(service.resolve("zzzzzzzz").await.unwrap().is_none());
    assert!(service.resolve("").await.unwrap().is_none());
}

#[tokio::test]
async fn test_collision_is_retried() {
    let generator = Arc::new(SequenceShortIdGenerator::new(["A", "A", "B"]));
    let (service, repo) = memory_service(generator.clone());

    let first = service.shorten("https://example.com/1").await.unwrap();
    let second = service.shorten("https://example.com/2").await.unwrap();

    assert_eq!(first.short_id, "A");
    assert_eq!(second.short_id, "B");
    assert_eq!(generator.remaining(), 0);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_collision_caught_by_store_constraint() {
    let inner = Arc::new(MemoryLinkRepository::new());
    let repo = Arc::new(common::BlindLookupRepository {
        inner: inner.clone(),
    });
    let generator = Arc::new(SequenceShortIdGenerator::new(["A", "A", "B"]));
    let service = common::create_service(repo, generator);

    let first = service.shorten("https://example.com/1").await.unwrap();
    let second = service.shorten("https://example.com/2").await.unwrap();

    assert_eq!(first.short_id, "A");
    assert_eq!(second.short_id, "B");
    assert_eq!(inner.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_exhaustion_creates_nothing() {
    let generator = Arc::new(SequenceShortIdGenerator::new(vec!["TAKEN000"; MAX_ATTEMPTS + 5]));
    let (service, repo) = memory_service(generator.clone());
    common::create_test_link(&repo, "TAKEN000", "https://taken.example").await;

    let result = service.shorten("https://example.com").await;

    assert!(matches!(
        result,
        Err(AppError::AllocationExhausted { attempts }) if attempts == MAX_ATTEMPTS
    ));
    assert_eq!(generator.remaining(), 5);
    assert_eq!(repo.count().await.unwrap(), 1);
    assert!(
        repo.find_by_target("https://example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_exhaustion_through_store_constraint() {
    let inner = Arc::new(MemoryLinkRepository::new());
    common::create_test_link(&inner, "TAKEN000", "https://taken.example").await;
    let repo = Arc::new(common::BlindLookupRepository {
        inner: inner.clone(),
    });
    let service = common::create_service(repo, Arc::new(SequenceShortIdGenerator::new(["TAKEN000"])));

    let result = service.shorten("https://example.com").await;

    assert!(matches!(result, Err(AppError::AllocationExhausted { .. })));
    assert_eq!(inner.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let (service, repo) = random_service();

    for input in ["", "example.com", "mailto:a@b.c", "https://exa mple.com"] {
        let result = service.shorten(input).await;
        assert!(matches!(result, Err(AppError::Validation { .. })), "{input}");
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_distinct_urls() {
    let (service, repo) = random_service();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .shorten(&format!("https://example.com/concurrent/{i}"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().short_id);
    }

    assert_eq!(ids.len(), 64);
    assert_eq!(repo.count().await.unwrap(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_url() {
    let (service, repo) = random_service();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.shorten("https://example.com/hot").await.unwrap() })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().short_id);
    }

    assert_eq!(ids.len(), 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_racing_candidates() {
    // Every writer draws the same first candidate and skips the pre-check,
    // so all but one lose the race at insert time.
    let inner = Arc::new(MemoryLinkRepository::new());
    let repo: Arc<dyn LinkRepository> = Arc::new(common::BlindLookupRepository {
        inner: inner.clone(),
    });

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let generator = Arc::new(SequenceShortIdGenerator::new([
                "SHARED00".to_string(),
                format!("UNIQUE0{i}"),
            ]));
            let service = common::create_service(repo.clone(), generator);
            tokio::spawn(async move {
                service
                    .shorten(&format!("https://example.com/race/{i}"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().short_id);
    }

    assert_eq!(ids.len(), 8);
    assert!(ids.contains("SHARED00"));
    assert_eq!(inner.count().await.unwrap(), 8);
}
