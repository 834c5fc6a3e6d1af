//! Translator tests: prompt content and completion clean-up

use async_trait::async_trait;
use std::sync::Mutex;
use vidask::application::translate::{clean_sql_response, SqlTranslator, SYSTEM_PROMPT};
use vidask::{AskError, LanguageModel, Translator};

/// Model stub that records what it was sent and replies with a fixed text.
struct RecordingModel {
    reply: Result<String, String>,
    seen: Mutex<Vec<(String, String)>>,
}

impl RecordingModel {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LanguageModel for RecordingModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AskError> {
        self.seen
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        self.reply.clone().map_err(AskError::Api)
    }
}

#[test]
fn test_clean_plain_response() {
    assert_eq!(
        clean_sql_response("  SELECT COUNT(*) FROM videos;\n"),
        "SELECT COUNT(*) FROM videos;"
    );
}

#[test]
fn test_clean_fenced_response() {
    assert_eq!(
        clean_sql_response("```sql\nSELECT COUNT(*) FROM videos;\n```"),
        "SELECT COUNT(*) FROM videos;"
    );
    assert_eq!(
        clean_sql_response("```\nSELECT SUM(likes_count)\nFROM videos\n```\n"),
        "SELECT SUM(likes_count)\nFROM videos"
    );
    assert_eq!(
        clean_sql_response("```sql\nSELECT 1```"),
        "SELECT 1"
    );
}

#[test]
fn test_clean_single_line_fence() {
    assert_eq!(clean_sql_response("```sql SELECT 1 ```"), "SELECT 1");
}

#[test]
fn test_clean_fence_tag_any_case() {
    assert_eq!(clean_sql_response("```SQL SELECT 1```"), "SELECT 1");
    assert_eq!(
        clean_sql_response("```Sql\nSELECT COUNT(*) FROM videos\n```"),
        "SELECT COUNT(*) FROM videos"
    );
    assert_eq!(clean_sql_response("```sqlite SELECT 1```"), "SELECT 1");
}

#[test]
fn test_clean_bare_fence_keeps_statement() {
    assert_eq!(clean_sql_response("```SELECT 1```"), "SELECT 1");
    assert_eq!(clean_sql_response("```select 1```"), "select 1");
}

#[test]
fn test_prompt_describes_schema() {
    let prompt: &str = &SYSTEM_PROMPT;
    for needle in [
        "videos",
        "video_snapshots",
        "creator_id",
        "video_created_at",
        "delta_views_count",
        "delta_reports_count",
        "SUM()",
        "COUNT()",
    ] {
        assert!(prompt.contains(needle), "prompt is missing {}", needle);
    }
}

#[test]
fn test_prompt_has_worked_examples() {
    assert!(SYSTEM_PROMPT.contains("\"Сколько всего видео?\" -> SELECT COUNT(*) FROM videos;"));
    assert!(SYSTEM_PROMPT
        .contains("SELECT SUM(likes_count) FROM videos WHERE creator_id = 'abc123';"));
    assert!(SYSTEM_PROMPT.contains("datetime('now', '-1 hour')"));
}

#[tokio::test]
async fn test_translate_sends_prompt_and_question() {
    let translator =
        SqlTranslator::new(RecordingModel::replying("```sql\nSELECT COUNT(*) FROM videos;\n```"));

    let sql = translator.translate("Сколько всего видео?").await.unwrap();
    assert_eq!(sql, "SELECT COUNT(*) FROM videos;");
}

#[tokio::test]
async fn test_translate_passes_messages_through() {
    let translator = SqlTranslator::new(RecordingModel::replying("SELECT 1"));
    translator.translate("Какой прирост лайков?").await.unwrap();

    let seen = translator.model().seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, *SYSTEM_PROMPT);
    assert_eq!(seen[0].1, "Какой прирост лайков?");
}

#[tokio::test]
async fn test_translate_empty_completion_fails() {
    let translator = SqlTranslator::new(RecordingModel::replying("```sql\n```"));
    let err = translator.translate("q").await.unwrap_err();
    assert!(matches!(err, AskError::Api(_)));
}

#[tokio::test]
async fn test_translate_service_error_propagates() {
    let translator = SqlTranslator::new(RecordingModel::failing("invalid api key"));
    match translator.translate("q").await {
        Err(AskError::Api(msg)) => assert_eq!(msg, "invalid api key"),
        other => panic!("unexpected: {:?}", other),
    }
}
