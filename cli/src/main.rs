//! CLI entrypoint for lumin
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use lumin_application::{
    ConsensusOrchestrator, ConsensusProgressNotifier, NoProgress, SessionManager, SessionStore,
};
use lumin_domain::{ConfigIssue, OutputFormat, SessionKey};
use lumin_infrastructure::{
    ConfigLoader, FileConfig, InMemorySessionStore, JsonFileSessionStore,
    JsonlConversationLogger, OpenAiGateway,
};
use lumin_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, ProgressMode, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_issues(&issues));
    }
    if issues.iter().any(ConfigIssue::is_error) {
        bail!("Invalid configuration");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    let progress = progress_mode(cli.quiet, &config, format);

    info!("Starting lumin");

    // === Dependency Injection ===
    let manager = Arc::new(build_manager(&config, cli.ephemeral)?);

    let command = cli.command.unwrap_or(Command::Chat { key: None });
    debug!("Running command {:?}", command);

    match command {
        Command::New(args) => {
            let session_config = args.apply(config.consensus.clone());
            let key = manager
                .create_named_session(session_config, args.name.clone())
                .await?;
            match format {
                OutputFormat::Text => println!("{}", key),
                OutputFormat::Json => println!(
                    "{}",
                    ConsoleFormatter::format_json(&serde_json::json!({ "key": key }))
                ),
            }
        }
        Command::Send { key, prompt } => {
            let key = SessionKey::parse(&key)?;
            let notifier = notifier(progress);
            let outcome = manager
                .send_with_progress(&key, &prompt, notifier.as_ref())
                .await?;
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_outcome(&outcome)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&outcome)),
            }
        }
        Command::History { key } => {
            let turns = manager.history(&SessionKey::parse(&key)?).await?;
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_history(&turns)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&turns)),
            }
        }
        Command::List => {
            let keys = manager.list_sessions().await?;
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_session_list(&keys)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&keys)),
            }
        }
        Command::Info { key } => {
            let info = manager.describe(&SessionKey::parse(&key)?).await?;
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_info(&info)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&info)),
            }
        }
        Command::Delete { key } => {
            let key = SessionKey::parse(&key)?;
            if !manager.delete_session(&key).await? {
                bail!("Session not found: {}", key);
            }
            match format {
                OutputFormat::Text => println!("Deleted {}", key),
                OutputFormat::Json => println!(
                    "{}",
                    ConsoleFormatter::format_json(&serde_json::json!({ "key": key, "deleted": true }))
                ),
            }
        }
        Command::Chat { key } => {
            let key = match key {
                Some(key) => {
                    let key = SessionKey::parse(&key)?;
                    // Fail early on unknown keys
                    manager.describe(&key).await?;
                    key
                }
                None => manager.create_session(config.consensus.clone()).await?,
            };

            let repl = ChatRepl::new(Arc::clone(&manager), key)
                .with_progress(progress)
                .with_format(format)
                .with_history_file(config.repl.resolve_history_file());
            repl.run().await?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn build_manager(config: &FileConfig, ephemeral: bool) -> Result<SessionManager> {
    let gateway = Arc::new(
        OpenAiGateway::new(config.gateway.to_settings())
            .context("Failed to create the generation gateway")?,
    );

    let store: Arc<dyn SessionStore> = if ephemeral {
        Arc::new(InMemorySessionStore::new())
    } else {
        let dir = config.sessions.resolve_dir();
        debug!("Session directory: {}", dir.display());
        Arc::new(JsonFileSessionStore::new(dir))
    };

    let mut orchestrator = ConsensusOrchestrator::new();
    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::open(path)
    {
        info!("Conversation log: {}", path.display());
        orchestrator = orchestrator.with_logger(Arc::new(logger));
    }

    Ok(SessionManager::new(gateway, store)
        .with_orchestrator(orchestrator)
        .with_limits(config.sessions.to_limits()))
}

/// Bars on a terminal, plain lines when piped, nothing for JSON or `--quiet`
fn progress_mode(quiet: bool, config: &FileConfig, format: OutputFormat) -> ProgressMode {
    if quiet || !config.output.show_progress || format == OutputFormat::Json {
        ProgressMode::Off
    } else if std::io::stderr().is_terminal() {
        ProgressMode::Bars
    } else {
        ProgressMode::Lines
    }
}

fn notifier(mode: ProgressMode) -> Box<dyn ConsensusProgressNotifier> {
    match mode {
        ProgressMode::Bars => Box::new(ProgressReporter::new()),
        ProgressMode::Lines => Box::new(SimpleProgress),
        ProgressMode::Off => Box::new(NoProgress),
    }
}
