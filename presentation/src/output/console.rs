//! Console output formatting for runs, run history and the model list

use colored::Colorize;
use duet_application::{MessageKind, RunDebateInput, RunDebateOutput, RunSummary, StoredRun};
use duet_domain::{AgentConfig, ModelId, OutputFormat, RunExport};

/// Hint shown when Ollama reports no installed models.
pub const NO_MODELS_HINT: &str =
    "No Ollama models found. Download at least one model with: ollama pull gemma3:1b";

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a finished run in the requested format
    pub fn render(format: OutputFormat, input: &RunDebateInput, output: &RunDebateOutput) -> String {
        match format {
            OutputFormat::Full => Self::format(input, output),
            OutputFormat::Review => Self::format_review_only(output),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// Format the complete run
    pub fn format(input: &RunDebateInput, output: &RunDebateOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("Duet Results"));
        out.push('\n');
        out.push_str(&format!("{} {}\n", "Theme:".cyan().bold(), input.theme));
        out.push_str(&format!("{} {}\n", "Mode:".cyan().bold(), input.interaction_mode));
        out.push_str(&format!(
            "{} {} vs {}\n\n",
            "Agents:".cyan().bold(),
            Self::agent_label(&input.left),
            Self::agent_label(&input.right)
        ));

        out.push_str(&Self::section_header("Transcript"));
        if output.transcript.is_empty() {
            out.push_str(&format!("\n{}\n", "(no turns)".dimmed()));
        }
        for (index, entry) in output.transcript.entries().iter().enumerate() {
            out.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} (turn {}) ──", entry.author, index + 1).yellow().bold(),
                entry.text
            ));
        }

        out.push_str(&Self::section_header("Outcome"));
        out.push_str(&format!(
            "\n{} {}\n{} {} ({} of {} extensions used)\n{} {}\n",
            "Status:".bold(),
            output.outcome.status(),
            "Turns:".bold(),
            output.state.total_turns(),
            output.state.extensions_used(),
            output.state.max_extensions(),
            "Last vote:".bold(),
            RunExport::outcome_label(output.last_outcome.as_ref())
        ));

        if let Some(review) = &output.final_review {
            out.push_str(&Self::section_header("Final Review"));
            out.push_str(&format!(
                "\n{}\n\n{}\n",
                format!("Reviewer: {}", input.review.name).yellow().bold(),
                review.clean_text
            ));
        }

        if let Some(id) = output.run_id {
            out.push_str(&format!("\n{} {}\n", "Recorded as run".dimmed(), id));
        }

        out.push_str(&Self::footer());
        out
    }

    /// Format the final review only
    pub fn format_review_only(output: &RunDebateOutput) -> String {
        match &output.final_review {
            Some(review) => format!("{}\n", review.clean_text),
            None => format!("{}\n", "(no final review)".dimmed()),
        }
    }

    /// Format the run export as JSON
    pub fn format_json(output: &RunDebateOutput) -> String {
        output
            .export
            .as_ref()
            .and_then(|export| export.to_json_pretty().ok())
            .unwrap_or_else(|| "{}".to_string())
    }

    /// Format installed models, one per line
    pub fn format_models(models: &[ModelId]) -> String {
        if models.is_empty() {
            return format!("{}\n", NO_MODELS_HINT.yellow());
        }
        let mut out = format!("{}\n", "Installed models:".cyan().bold());
        for model in models {
            out.push_str(&format!("  * {}\n", model));
        }
        out
    }

    /// Format the run history table
    pub fn format_run_list(runs: &[RunSummary]) -> String {
        if runs.is_empty() {
            return format!("{}\n", "No recorded runs.".dimmed());
        }
        let mut out = format!(
            "{}\n",
            format!("{:>5}  {:<24}  {:<13}  {:>5}  {}", "ID", "Exported", "Mode", "Turns", "Theme")
                .bold()
        );
        for run in runs {
            let done = if run.completed { "" } else { " (incomplete)" };
            out.push_str(&format!(
                "{:>5}  {:<24}  {:<13}  {:>5}  {}{}\n",
                run.id,
                run.exported_at,
                run.interaction_mode,
                run.total_turns,
                run.theme,
                done.dimmed()
            ));
        }
        out
    }

    /// Format one stored run with its transcript
    pub fn format_stored_run(run: &StoredRun) -> String {
        let mut out = String::new();

        out.push_str(&Self::header(&format!("Run {}", run.id)));
        out.push('\n');
        out.push_str(&format!("{} {}\n", "Theme:".cyan().bold(), run.theme));
        out.push_str(&format!("{} {}\n", "Mode:".cyan().bold(), run.interaction_mode));
        out.push_str(&format!(
            "{} {} vs {}\n",
            "Agents:".cyan().bold(),
            Self::agent_label(&run.left_agent),
            Self::agent_label(&run.right_agent)
        ));
        out.push_str(&format!(
            "{} {} turns, {}/{} extensions, last vote {}{}\n",
            "Progress:".cyan().bold(),
            run.total_turns,
            run.extensions_used,
            run.max_extensions,
            run.last_outcome.as_deref().unwrap_or("-"),
            if run.completed { "" } else { " (incomplete)" }
        ));

        out.push_str(&Self::section_header("Transcript"));
        for message in &run.transcript {
            let title = match message.message_type {
                MessageKind::Agent => format!("── {} (turn {}) ──", message.author, message.turn_index),
                MessageKind::Review => format!("── {} (review) ──", message.author),
            };
            out.push_str(&format!("\n{}\n{}\n", title.yellow().bold(), message.text));
            if !message.thinking_text.is_empty() {
                out.push_str(&format!(
                    "{}\n",
                    Self::indent(&message.thinking_text, "  | ").dimmed()
                ));
            }
        }

        out.push_str(&Self::footer());
        out
    }

    fn agent_label(agent: &AgentConfig) -> String {
        format!("{} ({})", agent.name, agent.model_id)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
