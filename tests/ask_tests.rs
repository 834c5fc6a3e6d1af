//! End-to-end tests through AppState and an on-disk dataset

mod common;

use common::{snapshot, video, StubTranslator};
use std::sync::Arc;
use tempfile::TempDir;
use vidask::infrastructure::config::Config;
use vidask::infrastructure::storage::db::{batch_insert_videos, init_dataset, open_session};
use vidask::state::AppState;
use vidask::{ask, AnswerSource, FailureKind, Scalar};

async fn dataset_config(dir: &TempDir) -> Config {
    let path = dir.path().join("videos.db");
    let db = init_dataset(&path).await.unwrap();
    batch_insert_videos(
        &db,
        vec![
            (
                video("v1", "c1", 10),
                vec![snapshot("s1", "v1", 5, "2025-11-01 11:00:00")],
            ),
            (video("v2", "c1", 25), Vec::new()),
            (video("v3", "c2", 7), Vec::new()),
        ],
        "2025-11-02 00:00:00".to_string(),
        None,
    )
    .await
    .unwrap();
    db.close().await.unwrap();

    let mut config = Config::default();
    config.database.path = Some(path.display().to_string());
    config
}

#[tokio::test]
async fn test_ask_count_videos() {
    let dir = TempDir::new().unwrap();
    let config = dataset_config(&dir).await;
    let translator = StubTranslator::new().with("Сколько всего видео?", "SELECT COUNT(*) FROM videos;");
    let state = AppState::with_translator(config, Arc::new(translator));

    let answer = ask(&state, "Сколько всего видео?", false).await.unwrap();
    assert_eq!(answer.value, Scalar::Integer(3));
    assert_eq!(answer.source, AnswerSource::Database);
}

#[tokio::test]
async fn test_ask_uses_cache_unless_bypassed() {
    let dir = TempDir::new().unwrap();
    let config = dataset_config(&dir).await;
    let state = AppState::with_translator(
        config,
        Arc::new(StubTranslator::always(
            "SELECT SUM(likes_count) FROM videos WHERE creator_id = 'c1'",
        )),
    );

    let first = ask(&state, "лайки c1", false).await.unwrap();
    assert_eq!(first.value, Scalar::Integer(35));

    let cached = ask(&state, "лайки c1", false).await.unwrap();
    assert_eq!(cached.source, AnswerSource::Cache);

    let fresh = ask(&state, "лайки c1", true).await.unwrap();
    assert_eq!(fresh.source, AnswerSource::Database);
    assert_eq!(fresh.value, Scalar::Integer(35));
}

#[tokio::test]
async fn test_ask_cache_disabled() {
    let dir = TempDir::new().unwrap();
    let mut config = dataset_config(&dir).await;
    config.cache.enable = false;
    let state = AppState::with_translator(
        config,
        Arc::new(StubTranslator::always("SELECT COUNT(*) FROM videos")),
    );
    assert!(state.cache.is_none());
    assert!(!state.config.cache.enable);

    ask(&state, "q", false).await.unwrap();
    let again = ask(&state, "q", false).await.unwrap();
    assert_eq!(again.source, AnswerSource::Database);
}

#[tokio::test]
async fn test_ask_without_dataset() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.database.path = Some(dir.path().join("absent.db").display().to_string());
    let state = AppState::with_translator(
        config,
        Arc::new(StubTranslator::always("SELECT COUNT(*) FROM videos")),
    );

    let err = ask(&state, "q", false).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Execution);
    assert!(err.message.contains("Dataset not found"));
}

#[tokio::test]
async fn test_ask_rejects_unsafe_sql() {
    let dir = TempDir::new().unwrap();
    let config = dataset_config(&dir).await;
    let state = AppState::with_translator(
        config,
        Arc::new(StubTranslator::always("DELETE FROM videos")),
    );

    let err = ask(&state, "удали всё", false).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::UnsafeQuery);
}

#[tokio::test]
async fn test_session_is_read_only() {
    let dir = TempDir::new().unwrap();
    let config = dataset_config(&dir).await;
    let path = std::path::PathBuf::from(config.database.path.unwrap());

    let session = open_session(&path).await.unwrap();
    let result = session
        .call(|conn| -> rusqlite::Result<usize> { conn.execute("DELETE FROM videos", []) })
        .await;
    assert!(result.is_err());
    session.close().await.unwrap();
}
