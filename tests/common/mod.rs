//! Shared fixtures: stub translator and a seeded in-memory dataset.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_rusqlite::Connection;
use vidask::domain::model::{Video, VideoSnapshot};
use vidask::infrastructure::storage::db::{batch_insert_videos, create_schema};
use vidask::{AskError, Translator};

/// Translator that answers from a fixed question -> SQL table.
pub struct StubTranslator {
    answers: HashMap<String, String>,
    fallback: Option<String>,
    pub calls: AtomicUsize,
}

impl StubTranslator {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every question maps to the same SQL.
    pub fn always(sql: &str) -> Self {
        let mut stub = Self::new();
        stub.fallback = Some(sql.to_string());
        stub
    }

    pub fn with(mut self, question: &str, sql: &str) -> Self {
        self.answers.insert(question.to_string(), sql.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, question: &str) -> Result<String, AskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(question)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| AskError::Api(format!("no completion for {:?}", question)))
    }
}

/// Translator whose service is always down.
pub struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _question: &str) -> Result<String, AskError> {
        Err(AskError::Api("LLM HTTP 503 Service Unavailable: overloaded".to_string()))
    }
}

pub fn video(id: &str, creator: &str, likes: i64) -> Video {
    Video {
        id: id.to_string(),
        creator_id: creator.to_string(),
        video_created_at: "2025-11-01 10:00:00".to_string(),
        views_count: likes * 10,
        likes_count: likes,
        comments_count: 1,
        reports_count: 0,
    }
}

pub fn snapshot(id: &str, video_id: &str, delta_views: i64, created_at: &str) -> VideoSnapshot {
    VideoSnapshot {
        id: id.to_string(),
        video_id: video_id.to_string(),
        views_count: delta_views,
        likes_count: 0,
        comments_count: 0,
        reports_count: 0,
        delta_views_count: delta_views,
        delta_likes_count: 0,
        delta_comments_count: 0,
        delta_reports_count: 0,
        created_at: created_at.to_string(),
    }
}

/// Three videos: creator `c1` owns v1 (10 likes) and v2 (25 likes), `c2` owns v3 (7 likes).
pub async fn seeded_db() -> Connection {
    let db = Connection::open_in_memory().await.unwrap();
    create_schema(&db).await.unwrap();

    let items = vec![
        (
            video("v1", "c1", 10),
            vec![
                snapshot("s1", "v1", 100, "2025-11-01 11:00:00"),
                snapshot("s2", "v1", 50, "2025-11-01 12:00:00"),
            ],
        ),
        (
            video("v2", "c1", 25),
            vec![snapshot("s3", "v2", 20, "2025-11-01 11:00:00")],
        ),
        (video("v3", "c2", 7), Vec::new()),
    ];
    batch_insert_videos(&db, items, "2025-11-02 00:00:00".to_string(), None)
        .await
        .unwrap();

    db
}
