//! Keyword gate applied to generated SQL before it reaches the database.
//!
//! This is a coarse denylist over tokens, not a parser: it catches the
//! obvious destructive statements and nothing more. Sessions are opened
//! read-only underneath it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::warn;

pub const FORBIDDEN_KEYWORDS: [&str; 9] = [
    "DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "CREATE", "TRUNCATE", "EXEC", "EXECUTE",
];

static FORBIDDEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"(?i)\b({})\b", FORBIDDEN_KEYWORDS.join("|"));
    Regex::new(&pattern).expect("forbidden keyword pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotSelect,
    ForbiddenKeyword(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotSelect => f.write_str("query does not start with SELECT"),
            Rejection::ForbiddenKeyword(kw) => write!(f, "forbidden keyword {}", kw),
        }
    }
}

pub fn validate_sql(sql: &str) -> Result<(), Rejection> {
    let normalized = sql.trim().to_uppercase();

    if !normalized.starts_with("SELECT") {
        let head: String = normalized.chars().take(50).collect();
        warn!("Query does not start with SELECT: {}", head);
        return Err(Rejection::NotSelect);
    }

    if let Some(found) = FORBIDDEN_PATTERN.find(&normalized) {
        let keyword = found.as_str().to_string();
        warn!("Dangerous keyword found: {}", keyword);
        return Err(Rejection::ForbiddenKeyword(keyword));
    }

    Ok(())
}

pub fn is_safe(sql: &str) -> bool {
    validate_sql(sql).is_ok()
}
