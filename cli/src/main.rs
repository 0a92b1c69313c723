//! CLI entrypoint for duet
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod settings;

use anyhow::{Result, anyhow};
use clap::Parser;
use duet_application::{
    ConversationLogger, LlmGateway, NoConversationLogger, NoProgress, NoRunStore,
    ProgressNotifier, RunDebateUseCase, RunOutcome, RunStore,
};
use duet_domain::OutputFormat;
use duet_infrastructure::{ConfigLoader, HttpRunStore, JsonlConversationLogger, OllamaGateway};
use duet_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use settings::{Settings, build_input};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize diagnostics on stderr, plus a daily log file when requested.
///
/// The returned guard must live until exit so buffered lines are flushed.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    let stderr = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "duet.log"));
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    info!("Starting duet");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow!(e))?
    };
    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    let settings = Settings::resolve(&cli, &config);
    if !settings.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OllamaGateway::new(&settings.ollama_url));
    let store: Arc<dyn RunStore> = match &settings.history_url {
        Some(url) => Arc::new(HttpRunStore::new(url)),
        None => Arc::new(NoRunStore),
    };

    if cli.list_models {
        let models = gateway.available_models().await?;
        print!("{}", ConsoleFormatter::format_models(&models));
        return Ok(());
    }

    if cli.list_runs {
        let runs = store.list_runs().await?;
        print!("{}", ConsoleFormatter::format_run_list(&runs));
        return Ok(());
    }

    if let Some(id) = cli.show_run {
        let run = store.get_run(id).await?;
        print!("{}", ConsoleFormatter::format_stored_run(&run));
        return Ok(());
    }

    let input = build_input(&cli, &config)?;

    let logger: Arc<dyn ConversationLogger> = match settings
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::new)
    {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NoConversationLogger),
    };

    let use_case = RunDebateUseCase::new(gateway)
        .with_store(store)
        .with_conversation_logger(logger);

    // Ctrl-C supersedes the active run; the loop winds down at its next checkpoint.
    let tokens = use_case.token_source().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tokens.stop();
        }
    });

    let progress: Box<dyn ProgressNotifier> =
        if cli.quiet || settings.output == OutputFormat::Json {
            Box::new(NoProgress)
        } else if std::io::stdout().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };

    let output = use_case
        .execute_with_progress(input.clone(), progress.as_ref())
        .await?;

    if let (Some(writer), Some(export)) = (&settings.export, &output.export) {
        match writer.write(export) {
            Ok(path) => info!("Export written to {}", path.display()),
            Err(e) => warn!("Could not write run export: {}", e),
        }
    }

    println!("{}", ConsoleFormatter::render(settings.output, &input, &output));

    if let RunOutcome::Failed(e) = output.outcome {
        return Err(e.into());
    }

    Ok(())
}
