//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use lumin_domain::{ExhaustionPolicy, SessionConfig};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for lumin_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => lumin_domain::OutputFormat::Text,
            OutputFormat::Json => lumin_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for lumin
#[derive(Parser, Debug)]
#[command(name = "lumin")]
#[command(author, version, about = "Consensus engine - Responders answer, Reviewers judge and vote")]
#[command(long_about = r#"
Lumin answers each prompt with a panel of model participants.

Every round:
1. Generate: each Responder drafts an answer in parallel
2. Judge:    each Reviewer approves or rejects every draft
3. Refine:   if nothing is unanimously approved, Responders retry
             with the Reviewers' reasons (up to --max-rounds times)
4. Vote:     if several drafts are approved, Reviewers vote for the best

Configuration files are loaded from (in priority order):
1. LUMIN_* environment variables (e.g. LUMIN_CONSENSUS__MAX_ROUNDS=3)
2. --config <path>     Explicit config file
3. ./lumin.toml        Project-level config
4. ~/.config/lumin/config.toml   Global config

Example:
  lumin new -r 3 -s 2 --name rust-questions
  lumin send <KEY> "What's the best way to handle errors in Rust?"
  lumin chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output].format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Keep sessions in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a session and print its key
    New(NewSessionArgs),

    /// Answer one prompt in a session
    Send {
        /// Session key
        key: String,
        /// The prompt to answer
        prompt: String,
    },

    /// Show the conversation history of a session
    History {
        /// Session key
        key: String,
    },

    /// List known sessions
    List,

    /// Show a session's configuration summary
    Info {
        /// Session key
        key: String,
    },

    /// Delete a session
    Delete {
        /// Session key
        key: String,
    },

    /// Interactive chat (creates a session when no key is given)
    Chat {
        /// Session key to resume
        key: Option<String>,
    },
}

/// Overrides applied on top of the configured `[consensus]` defaults
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSessionArgs {
    /// Number of Responders
    #[arg(short = 'r', long, value_name = "N")]
    pub responders: Option<usize>,

    /// Number of Reviewers
    #[arg(short = 's', long = "reviewers", value_name = "N")]
    pub reviewers: Option<usize>,

    /// Refinement rounds before the budget is exhausted
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Exchanges of memory each Responder sees
    #[arg(long, value_name = "N")]
    pub memory_window: Option<usize>,

    /// Fail instead of accepting unapproved answers when the budget runs out
    #[arg(long)]
    pub strict: bool,

    /// Display name for the session
    #[arg(long)]
    pub name: Option<String>,
}

impl NewSessionArgs {
    /// Apply these overrides to a base configuration
    pub fn apply(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(n) = self.responders {
            config.responders = n;
        }
        if let Some(n) = self.reviewers {
            config.reviewers = n;
        }
        if let Some(n) = self.max_rounds {
            config = config.with_max_rounds(n);
        }
        if let Some(n) = self.memory_window {
            config = config.with_memory_window(n);
        }
        if self.strict {
            config = config.with_exhaustion_policy(ExhaustionPolicy::Reject);
        }
        config
    }
}
