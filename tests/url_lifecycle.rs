//! Mapping lifecycle through the service and the in-memory store.

use kv_shortener::application::services::UrlService;
use kv_shortener::error::AppError;
use kv_shortener::infrastructure::store::MemoryMappingStore;
use kv_shortener::utils::code_generator::derive_short_code;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(30);

fn service() -> UrlService<MemoryMappingStore> {
    UrlService::new(
        Arc::new(MemoryMappingStore::with_ttl(TTL)),
        "http://localhost:9808/",
    )
}

#[tokio::test(start_paused = true)]
async fn test_round_trip_until_ttl() {
    let service = service();

    let code = service
        .create_short_url("https://example.com/a", "user1")
        .await
        .unwrap();
    assert_eq!(code, derive_short_code("https://example.com/a", "user1"));
    assert_eq!(service.resolve(&code).await.unwrap(), "https://example.com/a");

    tokio::time::advance(TTL - Duration::from_secs(1)).await;
    assert_eq!(service.resolve(&code).await.unwrap(), "https://example.com/a");

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(matches!(
        service.resolve(&code).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_exists_after_save() {
    let service = service();

    let code = service
        .create_short_url("https://example.com/a", "user1")
        .await
        .unwrap();

    assert!(service.exists(&code).await);
    assert!(!service.exists("neverset").await);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let service = service();

    let result = service.resolve("unknown1").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_recreate_resets_expiry() {
    let service = service();

    let code = service
        .create_short_url("https://example.com/a", "user1")
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(20)).await;
    service
        .create_short_url("https://example.com/a", "user1")
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(20)).await;
    assert!(service.exists(&code).await);
}

#[tokio::test]
async fn test_users_do_not_share_codes() {
    let service = service();

    let user1 = service
        .create_short_url("https://example.com/a", "user1")
        .await
        .unwrap();
    let user2 = service
        .create_short_url("https://example.com/a", "user2")
        .await
        .unwrap();

    assert_ne!(user1, user2);
    assert_eq!(service.resolve(&user1).await.unwrap(), "https://example.com/a");
    assert_eq!(service.resolve(&user2).await.unwrap(), "https://example.com/a");
}
