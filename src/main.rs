// Main entry point
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use vidask::application;
use vidask::infrastructure::config::{self, load_config, Config};
use vidask::infrastructure::storage::db;
use vidask::interfaces::cli::{Cli, EXAMPLE_QUESTIONS};
use vidask::presentation::format::{format_answer, format_failure, format_unexpected};
use vidask::presentation::theme::Theme;
use vidask::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    let db_path = config::get_database_path(&config);
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            let config_path_clone = config_path.clone();
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor)
                    .arg(&config_path_clone)
                    .status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }
    if let Some(file) = &cli.load {
        let conn = db::init_dataset(&db_path).await?;
        tokio::select! {
            result = application::load::load_dataset(&conn, file, true) => {
                let report = result?;
                println!(
                    "{} {} videos, {} snapshots -> {}",
                    "Loaded".green().bold(),
                    report.videos,
                    report.snapshots,
                    db_path.display()
                );
            }
            _ = shutdown_rx => {
                eprintln!("Load interrupted");
            }
        }
        return Ok(());
    }

    let state = AppState::new(config.clone())?;

    if cli.status {
        print_status(&state).await?;
        return Ok(());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    if cli.interactive {
        tokio::select! {
            result = run_interactive(&state, &cli, &theme, &config) => result?,
            _ = shutdown_rx => {}
        }
        return Ok(());
    }

    let question = cli.question.join(" ");
    if question.trim().is_empty() {
        eprintln!("{}", "Please ask a question about the videos".red());
        std::process::exit(1);
    }

    if !answer_and_print(&state, &cli, &theme, &config, question.trim()).await {
        std::process::exit(1);
    }

    Ok(())
}

/// Answer one question and print the outcome. Returns false on failure.
async fn answer_and_print(
    state: &AppState,
    cli: &Cli,
    theme: &Theme,
    config: &Config,
    question: &str,
) -> bool {
    match application::query::ask(state, question, cli.nocache).await {
        Ok(answer) => {
            if cli.json {
                match serde_json::to_string_pretty(&answer) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        tracing::error!("Failed to serialize answer: {}", e);
                        eprint!("{}", format_unexpected(config.enable_emoji));
                        return false;
                    }
                }
            } else {
                print!(
                    "{}",
                    format_answer(&answer, theme, cli.show_sql, config.enable_emoji)
                );
            }
            true
        }
        Err(e) => {
            eprint!("{}", format_failure(&e, theme, config.enable_emoji));
            false
        }
    }
}

async fn run_interactive(
    state: &AppState,
    cli: &Cli,
    theme: &Theme,
    config: &Config,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", EXAMPLE_QUESTIONS.bright_black());
    println!("{}", "Ask a question (empty line skips, `exit` quits):".cyan());

    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            println!("{}", "Please ask a question about the videos".yellow());
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }
        answer_and_print(state, cli, theme, config, question).await;
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn print_status(state: &AppState) -> anyhow::Result<()> {
    println!("{}", "vidask Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = &state.config;
    let db_path = config::get_database_path(config);

    if db_path.exists() {
        let session = db::open_session(&db_path).await?;
        let counts = db::count_rows(&session).await;
        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close database session: {}", e);
        }
        let (videos, snapshots) = counts?;
        println!(
            "Dataset: {} ({} videos, {} snapshots)",
            db_path.display(),
            videos,
            snapshots
        );
    } else {
        println!("Dataset: Not loaded");
    }

    match &state.cache {
        Some(cache) => println!(
            "Answer Cache: {} entries (ttl {}s)",
            cache.len(),
            cache.ttl().as_secs()
        ),
        None => println!("Answer Cache: Disabled"),
    }

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );

    if config.llm.api_key.is_some() {
        println!("LLM API: Configured ({})", config.llm.model);
    } else {
        println!("LLM API: Not configured");
    }

    Ok(())
}
