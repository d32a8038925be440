//! Result of one consensus invocation

use super::ballot::VoteTally;
use super::round::Round;
use serde::{Deserialize, Serialize};

/// Everything that happened while answering one prompt
///
/// Only `answer` is appended to the shared history; the rest is a report
/// for callers, progress display and conversation logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    /// The selected final answer
    pub answer: String,
    /// Index of the selected candidate in the final round
    pub winner: usize,
    /// Every round, in order; the last one is terminal
    pub rounds: Vec<Round>,
    /// Candidate indices that qualified for selection in the final round
    pub approved: Vec<usize>,
    /// Whether the budget ran out and the last round was accepted wholesale
    pub forced_accept: bool,
    /// Vote tally over the approved list, when a vote was held
    pub tally: Option<VoteTally>,
}

impl ConsensusOutcome {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn voted(&self) -> bool {
        self.tally.is_some()
    }
}
