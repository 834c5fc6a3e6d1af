use clap::Parser;
use std::path::PathBuf;

/// Sample questions, grouped the way users usually ask them.
pub const EXAMPLE_QUESTIONS: &str = "\
Examples:
  Statistics:
    vidask Сколько всего видео?
    vidask Сколько просмотров у всех видео?
    vidask Среднее количество лайков?
  By creator:
    vidask Сколько видео у креатора с id abc123?
    vidask Сколько просмотров у креатора abc123?
  Growth:
    vidask Какой прирост просмотров за последний час?
    vidask Сколько новых лайков за сегодня?";

#[derive(Parser)]
#[command(name = "vidask")]
#[command(about = "Ask analytics questions about video metrics in plain language.")]
#[command(after_help = EXAMPLE_QUESTIONS)]
#[command(version)]
pub struct Cli {
    /// Read questions from stdin, one per line
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Print the generated SQL
    #[arg(long)]
    pub show_sql: bool,

    /// Don't use cached answers
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Load a JSON dataset into the store
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Question text
    #[arg(num_args = 1..)]
    pub question: Vec<String>,
}
