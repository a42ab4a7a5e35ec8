//! CLI entrypoint for Agent Tutor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tutor_application::{
    AgentLogger, NoAgentLogger, OrchestrationFactory, TutorTurnUseCase,
};
use tutor_domain::{OrchestrationKind, TutoringMode};
use tutor_infrastructure::{
    AgentLogSink, ConfigLoader, FileConfig, FileLoggingConfig, InMemorySessionStore,
    JsonConversationStore, JsonlAgentLogger, OllamaLlmGateway, TracingAgentLogger,
};
use tutor_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, ProgressReporter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Agent Tutor");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli)?;
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }
    let show_progress = config.output.show_progress && !cli.quiet;

    // === Dependency Injection ===
    let gateway = Arc::new(OllamaLlmGateway::new(
        config.model.name.clone(),
        config.model.base_url.clone(),
        config.model.temperature,
        Duration::from_secs(config.model.timeout_seconds),
    )?);
    info!("Using model {} at {}", config.model.name, gateway.base_url());

    let factory = OrchestrationFactory::new(gateway)
        .with_logger(agent_logger(&config.logging))
        .with_options(config.orchestration_options());

    let store = Arc::new(JsonConversationStore::new(
        config.conversations.directory.clone(),
    ));
    let use_case = Arc::new(TutorTurnUseCase::new(
        factory,
        Arc::new(InMemorySessionStore::new()),
        store,
    ));

    if cli.list_conversations {
        let summaries = use_case.list().await?;
        println!("{}", ConsoleFormatter::format_conversation_list(&summaries));
        return Ok(());
    }

    let mut conversation = match &cli.conversation {
        Some(id) => use_case
            .resume(id)
            .await
            .with_context(|| format!("Could not resume conversation {}", id))?,
        None => use_case.start(config.tutor_config()).await?,
    };

    // Chat mode
    if cli.chat {
        ChatRepl::new(Arc::clone(&use_case), conversation)
            .with_progress(show_progress)
            .with_output(cli.output)
            .run()
            .await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    if !cli.quiet && cli.output != OutputFormat::Json {
        let tutor = &conversation.config;
        println!();
        println!("+============================================================+");
        println!("|                      Agent Tutor                           |");
        println!("+============================================================+");
        println!();
        println!("Question: {}", question);
        println!(
            "Language: {} | Mode: {} | Orchestration: {}",
            tutor.language, tutor.mode, tutor.orchestration
        );
        println!();
    }

    let output = if show_progress {
        let progress = ProgressReporter::new();
        use_case
            .execute_with_progress(&mut conversation, &question, &progress)
            .await?
    } else {
        use_case.execute(&mut conversation, &question).await?
    };
    use_case.end(&conversation.id);

    let text = match cli.output {
        OutputFormat::Response => ConsoleFormatter::format_response_only(&output),
        OutputFormat::Full => ConsoleFormatter::format(&question, &output),
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    println!("{}", text);

    if !cli.quiet && cli.output != OutputFormat::Json {
        println!();
        println!("Conversation saved as {}", conversation.id);
    }

    Ok(())
}

/// Initialize logging based on verbosity level, optionally teeing to a file
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// CLI flags take precedence over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) -> Result<()> {
    if let Some(language) = &cli.language {
        config.tutor.language = language.clone();
    }
    if let Some(mode) = &cli.mode {
        config.tutor.mode = TutoringMode::parse_lenient(mode);
    }
    if let Some(orchestration) = &cli.orchestration {
        config.tutor.orchestration = orchestration.parse::<OrchestrationKind>()?;
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.orchestration.max_rounds = max_rounds;
    }
    if cli.no_revision {
        config.orchestration.revision_enabled = false;
    }
    if cli.debug_agents {
        config.tutor.debug_mode = true;
    }
    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.model.base_url = base_url.clone();
    }
    Ok(())
}

fn agent_logger(config: &FileLoggingConfig) -> Arc<dyn AgentLogger> {
    match config.agent_log {
        AgentLogSink::Off => Arc::new(NoAgentLogger),
        AgentLogSink::Tracing => Arc::new(TracingAgentLogger::new()),
        AgentLogSink::Jsonl => {
            match config.jsonl_path.as_ref().and_then(|p| JsonlAgentLogger::new(p)) {
                Some(logger) => {
                    info!("Writing agent log to {}", logger.path().display());
                    Arc::new(logger)
                }
                None => {
                    warn!("JSONL agent log unavailable, falling back to tracing");
                    Arc::new(TracingAgentLogger::new())
                }
            }
        }
    }
}
