use crate::domain::error::AskError;
use async_trait::async_trait;

/// Trait for text-generation services
///
/// One system instruction plus one user message in, one free-text
/// completion out. Implementations can be swapped without touching the
/// prompt logic.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AskError>;
}

/// Trait for question-to-SQL translation
///
/// Returns a best-effort single SQL statement; correctness is checked
/// downstream.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, question: &str) -> Result<String, AskError>;
}
