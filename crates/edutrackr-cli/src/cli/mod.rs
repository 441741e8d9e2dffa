//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use edutrackr_core::config::{self, Config};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "edutrackr")]
#[command(version)]
#[command(about = "Role-based education portal with AI study tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate a study plan for today
    Plan {
        /// Comma-separated subject list
        #[arg(long, value_delimiter = ',', default_values_t = [
            "Mathematics".to_string(),
            "Computer Science".to_string(),
            "History".to_string(),
        ])]
        subjects: Vec<String>,

        /// Hours available today
        #[arg(long, default_value_t = 3)]
        hours: u32,
    },

    /// Generate flashcards for a topic
    Flashcards {
        /// Topic to generate cards for
        #[arg(long)]
        topic: String,

        /// Number of cards
        #[arg(long, default_value_t = 5)]
        count: usize,
    },

    /// Generate a multiple-choice quiz from text
    Quiz {
        /// Source text
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read source text from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Reveal the correct answers
        #[arg(long)]
        answers: bool,
    },

    /// Ask the AI tutor a question
    Tutor {
        /// The question to ask
        #[arg(long)]
        question: String,

        /// Subject context for the tutor
        #[arg(long, default_value = "General")]
        subject: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the resolved configuration (credentials redacted)
    Show,
    /// Print the config file path
    Path,
}

/// Parses arguments, loads config, and dispatches.
///
/// # Errors
/// Returns an error when config loading or the command itself fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let _guard = init_logging(&config, cli.command.is_some())?;
    tracing::debug!(path = %config::paths::config_path().display(), "config loaded");

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(dispatch(cli, config))
}

async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        None => commands::chat::run(config).await,
        Some(Commands::Plan { subjects, hours }) => {
            commands::study::plan(&config, &subjects, hours).await
        }
        Some(Commands::Flashcards { topic, count }) => {
            commands::study::flashcards(&config, &topic, count).await
        }
        Some(Commands::Quiz {
            text,
            file,
            answers,
        }) => commands::study::quiz(&config, text, file, answers).await,
        Some(Commands::Tutor { question, subject }) => {
            commands::study::tutor(&config, &question, &subject).await
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => commands::config::show(&config),
            ConfigCommands::Path => commands::config::path(),
        },
    }
}

/// Initializes tracing.
///
/// Headless commands log to stderr; the TUI writes to a daily-rolling
/// file under `${EDUTRACKR_HOME}/logs` because stdout belongs to the UI.
/// The returned guard must stay alive for the file writer to flush.
fn init_logging(
    config: &Config,
    headless: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = std::env::var("EDUTRACKR_LOG")
        .ok()
        .or_else(|| config.log_filter.clone())
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("Invalid log filter: {filter}"))?;

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let logs_dir = config::paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory: {}", logs_dir.display()))?;
    let appender = tracing_appender::rolling::daily(logs_dir, "edutrackr.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
