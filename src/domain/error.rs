use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AskError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API Error: {0}")]
    Api(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Date parsing error: {0}")]
    DateParse(String),
}

/// Which step of the question pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Translation,
    UnsafeQuery,
    Execution,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Translation => "translation",
            FailureKind::UnsafeQuery => "unsafe query",
            FailureKind::Execution => "execution",
        };
        f.write_str(name)
    }
}

/// The single failure a caller of the question pipeline ever sees.
///
/// The message is uniform regardless of the failing step; `kind` keeps the
/// origin for logs and tests.
#[derive(Error, Debug)]
#[error("Error executing query: {message}")]
pub struct QueryError {
    pub kind: FailureKind,
    pub message: String,
}

impl QueryError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn translation(err: AskError) -> Self {
        Self::new(FailureKind::Translation, err.to_string())
    }

    pub fn execution(err: AskError) -> Self {
        Self::new(FailureKind::Execution, err.to_string())
    }
}
