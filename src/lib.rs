//! Natural-language analytics over a video-metrics dataset.
//!
//! A question is translated to one SQL statement by a language model,
//! checked by a keyword gate, run read-only against SQLite, and the single
//! resulting value is normalized into a [`domain::model::Scalar`].

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ingest;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::query::{answer_question, ask, execute_natural_language_query};
pub use domain::error::{AskError, FailureKind, QueryError};
pub use domain::model::{Answer, AnswerSource, Scalar};
pub use domain::traits::{LanguageModel, Translator};
