//! Progress reporting for consensus runs

use colored::{ColoredString, Colorize};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use lumin_application::ConsensusProgressNotifier;
use lumin_domain::{Round, Verdict, VoteTally};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a consensus run with progress bars
///
/// One bar per round counts every generation and every verdict:
/// `responders + responders * reviewers` steps.
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
    vote_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
            vote_spinner: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_round_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.round_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: usize, responders: usize, reviewers: usize) {
        let steps = responders + responders * reviewers;
        let pb = self.multi.add(ProgressBar::new(steps as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(round_label(round));
        pb.set_message("Generating...");

        if let Ok(mut guard) = self.round_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_candidate_generated(&self, _round: usize, responder: &str) {
        self.with_round_bar(|pb| {
            pb.set_message(format!("{} {}", "+".green(), responder));
            pb.inc(1);
        });
    }

    fn on_verdict(&self, _round: usize, candidate: usize, reviewer: &str, verdict: &Verdict) {
        self.with_round_bar(|pb| {
            pb.set_message(format!("{} {} on #{}", verdict_mark(verdict), reviewer, candidate));
            pb.inc(1);
        });
    }

    fn on_round_complete(&self, round: &Round) {
        let summary = (0..round.candidate_count())
            .map(|i| round.verdict_summary(i))
            .collect::<Vec<_>>()
            .join(" ");
        let approved = round.approved_indices().len();

        if let Ok(mut guard) = self.round_bar.lock()
            && let Some(pb) = guard.take()
        {
            let status = if approved > 0 {
                format!("{} approved", approved).green()
            } else {
                "all rejected".yellow()
            };
            pb.finish_with_message(format!("{} {}", summary, status));
        }
    }

    fn on_budget_exhausted(&self, rounds: usize, forced_accept: bool) {
        let message = if forced_accept {
            format!("No approval after {} rounds, accepting the last drafts", rounds)
        } else {
            format!("No approval after {} rounds", rounds)
        };
        let _ = self.multi.println(format!("{} {}", "!".yellow().bold(), message.yellow()));
    }

    fn on_vote_start(&self, candidates: usize) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Vote");
        spinner.set_message(format!("{} approved candidates", candidates));
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.vote_spinner.lock() {
            *guard = Some(spinner);
        }
    }

    fn on_vote_complete(&self, tally: &VoteTally, winner: usize) {
        if let Ok(mut guard) = self.vote_spinner.lock()
            && let Some(spinner) = guard.take()
        {
            spinner.finish_with_message(format!(
                "{} {:?} -> candidate {}",
                "done".green(),
                tally.counts(),
                winner
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ConsensusProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: usize, responders: usize, reviewers: usize) {
        println!(
            "{} {} ({} responders, {} reviewers)",
            "->".cyan(),
            round_label(round).bold(),
            responders,
            reviewers
        );
    }

    fn on_round_complete(&self, round: &Round) {
        for i in 0..round.candidate_count() {
            let mark = if round.is_approved(i) {
                "v".green()
            } else {
                "x".red()
            };
            println!("  {} candidate {} {}", mark, i, round.verdict_summary(i));
        }
    }

    fn on_budget_exhausted(&self, rounds: usize, forced_accept: bool) {
        let action = if forced_accept { "accepting" } else { "giving up" };
        println!(
            "  {} budget exhausted after {} rounds, {}",
            "!".yellow(),
            rounds,
            action
        );
    }

    fn on_vote_complete(&self, tally: &VoteTally, winner: usize) {
        println!(
            "  {} vote {:?} ({} abstained) -> candidate {}",
            "*".cyan(),
            tally.counts(),
            tally.abstentions(),
            winner
        );
    }
}

/// `v` approve, `x` reject, `?` unparseable review
fn verdict_mark(verdict: &Verdict) -> ColoredString {
    if verdict.correct {
        "v".green()
    } else if verdict.is_supervisor_failure() {
        "?".yellow()
    } else {
        "x".red()
    }
}

fn round_label(round: usize) -> String {
    format!("Round {}", round + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_label_is_one_based() {
        assert_eq!(round_label(0), "Round 1");
        assert_eq!(round_label(6), "Round 7");
    }

    #[test]
    fn test_verdict_marks() {
        colored::control::set_override(false);
        assert_eq!(verdict_mark(&Verdict::approve()).to_string(), "v");
        assert_eq!(verdict_mark(&Verdict::reject("no")).to_string(), "x");
        assert_eq!(verdict_mark(&Verdict::supervisor_failed()).to_string(), "?");
    }

    #[test]
    fn test_reporter_tracks_round_bar() {
        let reporter = ProgressReporter::new();
        reporter.on_round_start(0, 2, 1);
        assert!(reporter.round_bar.lock().unwrap().is_some());

        let round = Round::new(
            0,
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Verdict::approve()], vec![Verdict::reject("no")]],
        );
        reporter.on_round_complete(&round);
        assert!(reporter.round_bar.lock().unwrap().is_none());
    }
}
