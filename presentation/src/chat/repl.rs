//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::{ProgressReporter, SimpleProgress};
use lumin_application::{ConsensusProgressNotifier, NoProgress, SessionError, SessionManager};
use lumin_domain::{ConsensusOutcome, OutputFormat, SessionKey};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// How progress is shown while a prompt is being answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// indicatif bars
    Bars,
    /// Plain text lines
    Lines,
    Off,
}

/// Slash commands understood by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplCommand {
    Quit,
    Help,
    History,
    Info,
    Reset,
    Unknown,
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        match line {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            "/info" => ReplCommand::Info,
            "/reset" => ReplCommand::Reset,
            _ => ReplCommand::Unknown,
        }
    }
}

/// Interactive chat REPL bound to one session
pub struct ChatRepl {
    manager: Arc<SessionManager>,
    key: SessionKey,
    progress: ProgressMode,
    format: OutputFormat,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(manager: Arc<SessionManager>, key: SessionKey) -> Self {
        Self {
            manager,
            key,
            progress: ProgressMode::Bars,
            format: OutputFormat::Text,
            history_file: None,
        }
    }

    /// Set how progress is shown
    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Persist line history to this file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_prompt(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Lumin - Chat Mode              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Session: {}", self.key);
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show the conversation so far");
        println!("  /info             - Show the session configuration");
        println!("  /reset            - Rebuild responder memories from the history");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, cmd: &str) -> bool {
        match ReplCommand::parse(cmd) {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::History => match self.manager.history(&self.key).await {
                Ok(turns) => print!("{}", ConsoleFormatter::format_history(&turns)),
                Err(e) => eprintln!("Error: {}", e),
            },
            ReplCommand::Info => match self.manager.describe(&self.key).await {
                Ok(info) => print!("{}", ConsoleFormatter::format_info(&info)),
                Err(e) => eprintln!("Error: {}", e),
            },
            ReplCommand::Reset => match self.manager.reset_memories(&self.key).await {
                Ok(()) => println!("Responder memories reset to the shared history"),
                Err(e) => eprintln!("Error: {}", e),
            },
            ReplCommand::Unknown => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_prompt(&self, prompt: &str) {
        println!();

        let result = match self.progress {
            ProgressMode::Bars => self.send(prompt, &ProgressReporter::new()).await,
            ProgressMode::Lines => self.send(prompt, &SimpleProgress).await,
            ProgressMode::Off => self.send(prompt, &NoProgress).await,
        };

        match result {
            Ok(outcome) => match self.format {
                OutputFormat::Text => println!("{}", ConsoleFormatter::format_outcome(&outcome)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&outcome)),
            },
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }

    async fn send(
        &self,
        prompt: &str,
        progress: &dyn ConsensusProgressNotifier,
    ) -> Result<ConsensusOutcome, SessionError> {
        self.manager
            .send_with_progress(&self.key, prompt, progress)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/info"), ReplCommand::Info);
        assert_eq!(ReplCommand::parse("/reset"), ReplCommand::Reset);
        assert_eq!(ReplCommand::parse("/models"), ReplCommand::Unknown);
    }
}
