//! Merges configuration files with command-line flags.
//!
//! Flags win over files. The result is a validated [`RunDebateInput`] plus
//! the adapter settings the binary needs to wire the run.

use anyhow::{Result, bail};
use duet_application::RunDebateInput;
use duet_domain::{InteractionMode, OutputFormat};
use duet_infrastructure::{FileAgentConfig, FileAgentsConfig, FileConfig, RunExportWriter};
use duet_presentation::Cli;
use std::path::PathBuf;

/// Everything resolved from config and flags, apart from the run itself
#[derive(Debug, Clone)]
pub struct Settings {
    pub ollama_url: String,
    /// Base URL of the run-history service, `None` when disabled
    pub history_url: Option<String>,
    pub output: OutputFormat,
    pub color: bool,
    pub export: Option<RunExportWriter>,
    pub conversation_log: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &FileConfig) -> Self {
        let history_url = (config.persistence.enabled && !cli.no_history)
            .then(|| config.persistence.base_url.clone());

        let export = match (&cli.export, &config.output.export_dir) {
            (Some(path), _) => Some(RunExportWriter::at_path(path)),
            (None, Some(dir)) => Some(RunExportWriter::in_dir(dir)),
            (None, None) => None,
        };

        Self {
            ollama_url: cli
                .ollama_url
                .clone()
                .unwrap_or_else(|| config.ollama.base_url.clone()),
            history_url,
            output: cli
                .output
                .map(OutputFormat::from)
                .or(config.output.format)
                .unwrap_or_default(),
            color: config.output.color,
            export,
            conversation_log: cli
                .conversation_log
                .clone()
                .or_else(|| config.logging.conversation_log.clone()),
        }
    }
}

/// Build the run input. Fails without a theme or with invalid agents.
pub fn build_input(cli: &Cli, config: &FileConfig) -> Result<RunDebateInput> {
    let Some(theme) = cli.theme.as_deref().filter(|t| !t.trim().is_empty()) else {
        bail!("A theme is required, e.g. duet \"Should cities ban cars downtown?\"");
    };

    let agents = merged_agents(cli, &config.agents);
    let debate = &config.debate;

    let mut input = RunDebateInput::new(theme, agents.left_agent(), agents.right_agent())
        .with_mode(cli.mode.map(InteractionMode::from).unwrap_or(debate.interaction_mode))
        .with_initial_turns(cli.turns.unwrap_or(debate.initial_turns))
        .with_max_extensions(cli.max_extensions.unwrap_or(debate.max_extensions))
        .with_review(agents.review_agent());

    if cli.no_review || !debate.review_enabled {
        input = input.without_review();
    }

    input.validate()?;
    Ok(input)
}

fn merged_agents(cli: &Cli, agents: &FileAgentsConfig) -> FileAgentsConfig {
    let mut merged = agents.clone();
    apply_flags(&mut merged.left, &cli.left_name, &cli.left_model, &cli.left_prompt);
    apply_flags(&mut merged.right, &cli.right_name, &cli.right_model, &cli.right_prompt);
    apply_flags(
        &mut merged.review,
        &cli.review_name,
        &cli.review_model,
        &cli.review_prompt,
    );
    merged
}

fn apply_flags(
    agent: &mut FileAgentConfig,
    name: &Option<String>,
    model: &Option<String>,
    prompt: &Option<String>,
) {
    if let Some(name) = name {
        agent.name = Some(name.clone());
    }
    if let Some(model) = model {
        agent.model = Some(model.clone());
    }
    if let Some(prompt) = prompt {
        agent.prompt = prompt.clone();
    }
}
