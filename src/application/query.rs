use crate::application::normalize::normalize;
use crate::application::safety::validate_sql;
use crate::domain::error::{FailureKind, QueryError};
use crate::domain::model::{Answer, AnswerSource, Scalar};
use crate::domain::traits::Translator;
use crate::infrastructure::config::get_database_path;
use crate::infrastructure::storage::cache::AnswerCache;
use crate::infrastructure::storage::db::{fetch_first_value, open_session};
use crate::state::AppState;
use chrono::Utc;
use tokio_rusqlite::Connection;
use tracing::{debug, error, info, warn};

/// Translate, validate, execute and normalize one question.
///
/// Every failure comes back as a `QueryError`; its `kind` records the step.
pub async fn answer_question(
    db: &Connection,
    translator: &dyn Translator,
    cache: Option<&AnswerCache>,
    question: &str,
) -> Result<Answer, QueryError> {
    // 1. Translate
    let sql = translator
        .translate(question)
        .await
        .map_err(QueryError::translation)?;
    info!("Generated SQL query: \n{}", sql);

    // 2. Safety gate, before anything touches the database
    if let Err(rejection) = validate_sql(&sql) {
        return Err(QueryError::new(
            FailureKind::UnsafeQuery,
            format!("Generated query is not safe or incorrect: {}", rejection),
        ));
    }

    // 3. Cached answer for the same SQL, if still fresh
    if let Some(cache) = cache {
        if let Some(value) = cache.get(&sql) {
            debug!("Answer for {:?} served from cache", sql);
            return Ok(Answer {
                question: question.to_string(),
                sql,
                value,
                source: AnswerSource::Cache,
                answered_at: Utc::now().timestamp(),
            });
        }
    }

    // 4. Execute and normalize
    let raw = fetch_first_value(db, &sql)
        .await
        .map_err(QueryError::execution)?;
    let value = normalize(raw);

    if let Some(cache) = cache {
        cache.insert(sql.clone(), value.clone());
    }

    Ok(Answer {
        question: question.to_string(),
        sql,
        value,
        source: AnswerSource::Database,
        answered_at: Utc::now().timestamp(),
    })
}

/// Scalar-only entry point: one question in, one value out.
pub async fn execute_natural_language_query(
    db: &Connection,
    translator: &dyn Translator,
    question: &str,
) -> Result<Scalar, QueryError> {
    answer_question(db, translator, None, question)
        .await
        .map(|answer| answer.value)
}

/// Answer a question against the configured dataset.
///
/// A read-only session is opened for this question only and closed on
/// every exit path.
pub async fn ask(state: &AppState, question: &str, no_cache: bool) -> Result<Answer, QueryError> {
    let db_path = get_database_path(&state.config);

    let session = open_session(&db_path)
        .await
        .map_err(QueryError::execution)?;

    let cache = if no_cache {
        None
    } else {
        state.cache.as_deref()
    };
    let outcome = answer_question(&session, state.translator.as_ref(), cache, question).await;

    if let Err(e) = session.close().await {
        warn!("Failed to close database session: {}", e);
    }

    match &outcome {
        Ok(answer) => info!("Answered {:?} with {}", question, answer.value),
        Err(e) => error!("Question {:?} failed at {} step: {}", question, e.kind, e.message),
    }

    outcome
}
