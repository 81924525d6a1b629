mod commands;
mod config;
mod tui;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use taskdesk_core::{HttpTaskApi, TaskClient};
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::{AppConfig, GlobalArgs};

#[derive(Parser)]
#[command(name = "taskdesk")]
#[command(version, about = "A terminal client for a task REST API", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the Terminal User Interface (default)
    Tui,
    /// List all tasks
    List,
    /// Show one task
    Show { id: u64 },
    /// Create a task (usage: add Buy milk pri:low due:fri desc:2_litres)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Edit a task; only the given fields change (usage: edit 42 st:done)
    Edit {
        id: u64,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Render the task list as HTML
    Render {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that the API is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.global)?;

    // Logs go to a file; the TUI owns the terminal.
    let _log_guard = init_logging(&cli.global.log_level, cli.global.log_file.as_deref());
    tracing::info!(api_url = %config.api_url, "taskdesk starting");

    let api = HttpTaskApi::with_config(config.http())?;
    let mut client = TaskClient::with_messages(api, config.messages());

    let result = match cli.command {
        Some(Commands::List) => commands::list(&mut client).await,
        Some(Commands::Show { id }) => commands::show(&client, id).await,
        Some(Commands::Add { args }) => commands::add(&mut client, &args).await,
        Some(Commands::Edit { id, args }) => commands::edit(&mut client, id, &args).await,
        Some(Commands::Delete { id, yes }) => commands::delete(&mut client, id, yes).await,
        Some(Commands::Render { output }) => commands::render(&mut client, output.as_deref()).await,
        Some(Commands::Health) => commands::health(&client).await,
        Some(Commands::Tui) | None => tui::run(client, &config).await,
    };

    tracing::info!("taskdesk exiting");
    result
}

fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdesk.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
