//! CLI command definitions

use clap::{Parser, ValueEnum};
use duet_domain::InteractionMode;
use std::path::PathBuf;

/// What to print once the run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Header, transcript, outcome and review
    Full,
    /// Only the final review
    Review,
    /// The run export as JSON
    Json,
}

impl From<OutputFormat> for duet_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Review => Self::Review,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// How the two agents engage with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Challenge assumptions and compare alternatives
    Debate,
    /// Combine ideas and converge on next steps
    Collaboration,
    /// Free exploration
    Open,
}

impl From<ModeArg> for InteractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Debate => Self::Debate,
            ModeArg::Collaboration => Self::Collaboration,
            ModeArg::Open => Self::Open,
        }
    }
}

/// CLI arguments for duet
#[derive(Parser, Debug)]
#[command(name = "duet")]
#[command(author, version, about = "Two local Ollama models discuss a theme")]
#[command(long_about = r#"
Duet lets two locally hosted models talk about a theme, turn by turn.

A run proceeds in blocks:
1. The left and right agents alternate, streaming each turn
2. Weak turns (too short, repetitive, off-topic) are retried up to twice
3. At the end of a block both agents vote on how many more turns are needed
4. An optional reviewer summarizes the discussion

Press Ctrl-C to stop a run; the partial transcript is still exported.

Configuration files are loaded from (in priority order):
1. --config <path>                 Explicit config file
2. ./duet.toml or ./.duet.toml     Project-level config
3. ~/.config/duet/config.toml      Global config
4. DUET_<SECTION>__<KEY>           Environment variables

Example:
  duet "Should cities ban cars from downtown?"
  duet --mode collaboration --turns 6 --left-model qwen3:4b "Designing a reading habit"
  duet --list-models
"#)]
pub struct Cli {
    /// Theme the agents discuss
    pub theme: Option<String>,

    /// Interaction mode
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Turns in the first block
    #[arg(short, long, value_name = "N")]
    pub turns: Option<usize>,

    /// Maximum number of extension blocks
    #[arg(long, value_name = "N")]
    pub max_extensions: Option<usize>,

    /// Skip the final review
    #[arg(long)]
    pub no_review: bool,

    // ==================== Agents ====================
    /// Name of the left agent
    #[arg(long, value_name = "NAME")]
    pub left_name: Option<String>,

    /// Model of the left agent
    #[arg(long, value_name = "MODEL")]
    pub left_model: Option<String>,

    /// Prompt tags of the left agent (separated by `;`, `,` or newlines)
    #[arg(long, value_name = "PROMPT")]
    pub left_prompt: Option<String>,

    /// Name of the right agent
    #[arg(long, value_name = "NAME")]
    pub right_name: Option<String>,

    /// Model of the right agent
    #[arg(long, value_name = "MODEL")]
    pub right_model: Option<String>,

    /// Prompt tags of the right agent
    #[arg(long, value_name = "PROMPT")]
    pub right_prompt: Option<String>,

    /// Name of the review agent
    #[arg(long, value_name = "NAME")]
    pub review_name: Option<String>,

    /// Model of the review agent (defaults to the left model)
    #[arg(long, value_name = "MODEL")]
    pub review_model: Option<String>,

    /// Prompt tags of the review agent
    #[arg(long, value_name = "PROMPT")]
    pub review_prompt: Option<String>,

    // ==================== Services ====================
    /// Base URL of the Ollama API
    #[arg(long, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Do not record the run in the run-history service
    #[arg(long)]
    pub no_history: bool,

    /// List installed Ollama models and exit
    #[arg(long)]
    pub list_models: bool,

    /// List recorded runs and exit
    #[arg(long)]
    pub list_runs: bool,

    /// Show a recorded run and exit
    #[arg(long, value_name = "ID")]
    pub show_run: Option<i64>,

    // ==================== Output ====================
    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write the run export to this file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Append run events as JSONL to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress streaming output and progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write diagnostic logs to a daily file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    // ==================== Configuration ====================
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
