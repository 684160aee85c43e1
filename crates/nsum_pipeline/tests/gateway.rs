mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{english_text, french_text, gateway, raw, Calls};
use nsum_core::{ArticleStore, Error, LanguageCode, UnsupportedReason};
use nsum_pipeline::CacheStatus;
use nsum_storage::{MemoryStorage, SQLiteStorage};

const INFERENCE_DELAY: Duration = Duration::from_millis(150);

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let store = Arc::new(MemoryStorage::new());
    let (gateway, calls) = gateway(store.clone(), INFERENCE_DELAY);
    let article = raw("https://example.com/a", english_text(500));
    // 100 words
    let max_tokens = 133;

    let first = gateway.get_or_process(&article, false, max_tokens).await.unwrap();
    assert_eq!(first.cache, CacheStatus::Miss);
    assert!(first.persisted);
    assert_eq!(first.article.language, LanguageCode::English);
    assert_eq!(first.article.language.code(), "en");
    assert!(!first.article.summary.is_empty());
    assert_eq!(first.article.english_text, article.text);
    assert_eq!(first.article.published, "2025-01-28");

    let second = gateway.get_or_process(&article, false, max_tokens).await.unwrap();
    assert_eq!(second.cache, CacheStatus::Hit);
    assert_eq!(second.article, first.article);
    assert!(second.elapsed < first.elapsed);
    assert!(first.elapsed >= INFERENCE_DELAY);

    assert_eq!(Calls::get(&calls.summaries), 1);
    assert_eq!(Calls::get(&calls.translator_loads), 0);
    assert_eq!(store.stats().await.unwrap().total, 1);
}

#[tokio::test]
async fn test_force_refresh_recomputes_but_keeps_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SQLiteStorage::new_with_path(&dir.path().join("cache.db")).await.unwrap());
    let (gateway, calls) = gateway(store.clone(), Duration::ZERO);
    let article = raw("https://example.com/a", english_text(300));

    let first = gateway.get_or_process(&article, false, 150).await.unwrap();
    let refreshed = gateway.get_or_process(&article, true, 150).await.unwrap();

    assert_eq!(refreshed.cache, CacheStatus::Refreshed);
    assert!(!refreshed.persisted);
    assert!(refreshed.article.same_content(&first.article));
    assert_eq!(Calls::get(&calls.summaries), 2);
    // Model handles are built once and reused across articles
    assert_eq!(Calls::get(&calls.summarizer_loads), 1);

    assert_eq!(store.stats().await.unwrap().total, 1);
    assert_eq!(store.get(&article.url).await.unwrap(), Some(first.article));
}

#[tokio::test]
async fn test_short_text_aborts_without_models() {
    let store = Arc::new(MemoryStorage::new());
    let (gateway, calls) = gateway(store.clone(), Duration::ZERO);
    let article = raw("https://example.com/short", "Too short".to_string());

    let err = gateway.get_or_process(&article, false, 150).await.unwrap_err();
    assert!(matches!(
        err,
        Error::LanguageDetection(UnsupportedReason::TooShort { chars: 9, minimum: 10 })
    ));

    assert_eq!(Calls::get(&calls.translator_loads), 0);
    assert_eq!(Calls::get(&calls.summarizer_loads), 0);
    assert_eq!(Calls::get(&calls.translations), 0);
    assert_eq!(Calls::get(&calls.summaries), 0);
    assert!(!store.exists(&article.url).await.unwrap());
}

#[tokio::test]
async fn test_french_article_is_translated_chunk_by_chunk() {
    let (gateway, calls) = gateway(Arc::new(MemoryStorage::new()), Duration::ZERO);
    let article = raw("https://example.com/fr", french_text(200));
    let chunks = article.text.chars().count().div_ceil(500);
    assert!(chunks > 1);

    let response = gateway.get_or_process(&article, false, 150).await.unwrap();

    assert_eq!(response.article.language, LanguageCode::French);
    assert_eq!(response.article.original_text, article.text);
    assert!(response.article.english_text.starts_with("[en] Le gouvernement"));
    assert_eq!(response.article.english_text.matches("[en] ").count(), chunks);
    assert_eq!(Calls::get(&calls.translations), chunks);
    assert_eq!(Calls::get(&calls.translator_loads), 1);
}

#[tokio::test]
async fn test_concurrent_misses_store_one_row() {
    let store = Arc::new(MemoryStorage::new());
    let (gateway, _calls) = gateway(store.clone(), Duration::from_millis(20));
    let article = raw("https://example.com/race", english_text(300));

    let (a, b) = tokio::join!(
        gateway.get_or_process(&article, false, 150),
        gateway.get_or_process(&article, false, 150),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(
        [a.persisted, b.persisted].iter().filter(|p| **p).count(),
        1,
        "exactly one writer wins"
    );
    assert!(a.article.same_content(&b.article));
    assert_eq!(store.stats().await.unwrap().total, 1);
}
