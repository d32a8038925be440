//! Console formatting for command results

use colored::Colorize;
use lumin_application::SessionInfo;
use lumin_domain::{ConfigIssue, ConsensusOutcome, ConversationTurn, SessionKey, Speaker};
use serde::Serialize;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Final answer followed by a one-line run summary
    pub fn format_outcome(outcome: &ConsensusOutcome) -> String {
        let mut output = String::new();
        output.push_str(&outcome.answer);
        output.push_str("\n\n");
        output.push_str(&Self::outcome_summary(outcome).dimmed().to_string());
        output.push('\n');
        output
    }

    /// e.g. `2 rounds, candidate 1 chosen by vote [2, 1]`
    pub fn outcome_summary(outcome: &ConsensusOutcome) -> String {
        let rounds = outcome.round_count();
        let mut summary = format!(
            "{} round{}, candidate {}",
            rounds,
            if rounds == 1 { "" } else { "s" },
            outcome.winner
        );
        if let Some(tally) = &outcome.tally {
            summary.push_str(&format!(" chosen by vote {:?}", tally.counts()));
            if tally.is_tie() {
                summary.push_str(" (tie, lowest index wins)");
            }
        }
        if outcome.forced_accept {
            summary.push_str(" (accepted without approval)");
        }
        summary
    }

    pub fn format_history(turns: &[ConversationTurn]) -> String {
        if turns.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }

        let mut output = String::new();
        for turn in turns {
            let speaker = match turn.speaker {
                Speaker::User => "User:".cyan().bold(),
                Speaker::Bot => "Bot:".green().bold(),
            };
            output.push_str(&format!("{}\n{}\n\n", speaker, Self::indent(&turn.text, "  ")));
        }
        output
    }

    pub fn format_info(info: &SessionInfo) -> String {
        let mut output = Self::header("Session");
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Key:".cyan().bold(), info.key));
        if let Some(name) = &info.name {
            output.push_str(&format!("{} {}\n", "Name:".cyan().bold(), name));
        }
        output.push_str(&format!("{} {}\n", "Responders:".cyan().bold(), info.responders));
        output.push_str(&format!("{} {}\n", "Reviewers:".cyan().bold(), info.reviewers));
        output.push_str(&format!("{} {}\n", "Max rounds:".cyan().bold(), info.max_rounds));
        output.push_str(&format!("{} {}\n", "Turns:".cyan().bold(), info.turns));
        output
    }

    pub fn format_session_list(keys: &[SessionKey]) -> String {
        if keys.is_empty() {
            return format!("{}\n", "No sessions".dimmed());
        }
        keys.iter().map(|k| format!("{}\n", k)).collect()
    }

    /// Configuration problems, errors first
    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        let mut sorted: Vec<&ConfigIssue> = issues.iter().collect();
        sorted.sort_by_key(|i| !i.is_error());

        sorted
            .into_iter()
            .map(|issue| {
                if issue.is_error() {
                    format!("{} {}\n", "error:".red().bold(), issue.message)
                } else {
                    format!("{} {}\n", "warning:".yellow().bold(), issue.message)
                }
            })
            .collect()
    }

    /// Format any serializable result as pretty JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(40);
        format!("{}\n{:^40}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
