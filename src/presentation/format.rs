use crate::domain::error::QueryError;
use crate::domain::model::{Answer, AnswerSource};
use crate::presentation::theme::Theme;
use std::fmt::Write;

/// Format an answer for the terminal
pub fn format_answer(answer: &Answer, theme: &Theme, show_sql: bool, enable_emoji: bool) -> String {
    let mut output = String::new();

    let source_indicator = match answer.source {
        AnswerSource::Database => {
            if enable_emoji {
                "🗄 [db]"
            } else {
                "[db]"
            }
        }
        AnswerSource::Cache => {
            if enable_emoji {
                "💾 [cache]"
            } else {
                "[cache]"
            }
        }
    };

    writeln!(
        output,
        "{} {}",
        (theme.question)(&answer.question),
        (theme.label)(source_indicator)
    )
    .ok();
    writeln!(output, "  {}", (theme.value)(&answer.value.to_string())).ok();

    if show_sql {
        writeln!(output, "  {}", (theme.line)(&"⸺".repeat(40))).ok();
        for line in answer.sql.lines() {
            writeln!(output, "  {}", (theme.sql)(line)).ok();
        }
    }

    output
}

/// Format a failed question. The cause is shown, the step is not.
pub fn format_failure(err: &QueryError, theme: &Theme, enable_emoji: bool) -> String {
    let mark = if enable_emoji { "❌" } else { "[error]" };
    format!(
        "{} {}\n\n  {}\n\n{}\n",
        mark,
        (theme.error)("Error processing query."),
        err.message,
        (theme.hint)("Try rephrasing the question, or run with --help for examples.")
    )
}

/// Message for anything that is not a `QueryError`; no details leak out.
pub fn format_unexpected(enable_emoji: bool) -> String {
    let mark = if enable_emoji { "❌" } else { "[error]" };
    format!("{} Error processing query. Try again later.\n", mark)
}
