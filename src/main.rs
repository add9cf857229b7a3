use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use terraform_provider_wavefront::plugin;
use terraform_provider_wavefront::provider::Provider;
use terraform_provider_wavefront::VERSION;
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Terraform provider for Wavefront
#[derive(Parser, Debug)]
#[command(name = "terraform-provider-wavefront", version = VERSION, about, long_about = None)]
struct Args {
    /// Log level for debugging (logs go to a file, stdout carries the protocol)
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer plugin requests on stdin/stdout (default)
    Serve,
    /// Print the provider and resource schemas as JSON
    Schema,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(
        "terraform-provider-wavefront {} started with log level: {:?}",
        VERSION,
        level
    );
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    let file = "terraform-provider-wavefront.log";
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("terraform-provider-wavefront").join(file);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".terraform-provider-wavefront").join(file);
    }
    PathBuf::from(file)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut provider = Provider::new();

    match args.command.unwrap_or(Command::Serve) {
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&provider.schema())
                .context("failed to encode schema")?;
            println!("{}", schema);
        }
        Command::Serve => {
            let stdin = BufReader::new(tokio::io::stdin());
            let stdout = tokio::io::stdout();
            plugin::serve(&mut provider, stdin, stdout).await?;
        }
    }

    Ok(())
}
