//! Progress notification port
//!
//! Defines the interface for reporting progress while a prompt moves
//! through the consensus protocol.

use lumin_domain::{Round, Verdict, VoteTally};

/// Callback for progress updates during a consensus run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.). Every method has a
/// no-op default so implementations only override what they display.
pub trait ConsensusProgressNotifier: Send + Sync {
    /// Called when a round starts generating
    fn on_round_start(&self, _round: usize, _responders: usize, _reviewers: usize) {}

    /// Called when one Responder produced its candidate
    fn on_candidate_generated(&self, _round: usize, _responder: &str) {}

    /// Called when one Reviewer judged one candidate
    fn on_verdict(&self, _round: usize, _candidate: usize, _reviewer: &str, _verdict: &Verdict) {}

    /// Called when every candidate of a round has been judged
    fn on_round_complete(&self, _round: &Round) {}

    /// Called when the retry budget ran out with nothing approved
    fn on_budget_exhausted(&self, _rounds: usize, _forced_accept: bool) {}

    /// Called when several approved candidates go to a vote
    fn on_vote_start(&self, _candidates: usize) {}

    /// Called when the vote is tallied
    fn on_vote_complete(&self, _tally: &VoteTally, _winner: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConsensusProgressNotifier for NoProgress {}
