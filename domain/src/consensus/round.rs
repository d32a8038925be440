//! Consensus rounds
//!
//! A round is one GENERATE + JUDGE pass: one candidate per Responder and
//! one [`Verdict`] per (candidate, Reviewer) pair.

use super::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// A single generate/judge round
///
/// # Example
///
/// ```
/// use lumin_domain::consensus::{Round, Verdict};
///
/// let round = Round::new(
///     0,
///     vec!["Paris".to_string(), "Lyon".to_string()],
///     vec![
///         vec![Verdict::approve(), Verdict::approve()],
///         vec![Verdict::approve(), Verdict::reject("Lyon is not the capital")],
///     ],
/// );
///
/// assert_eq!(round.approved_indices(), vec![0]);
/// assert_eq!(round.rejection_feedback(1), "Lyon is not the capital");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round number (0-indexed)
    pub number: usize,
    /// Candidate texts, one per Responder
    pub candidates: Vec<String>,
    /// Verdict matrix: `verdicts[candidate][reviewer]`
    pub verdicts: Vec<Vec<Verdict>>,
}

impl Round {
    /// Build a round from a fully judged verdict matrix.
    ///
    /// `verdicts` must hold one row per candidate.
    pub fn new(number: usize, candidates: Vec<String>, verdicts: Vec<Vec<Verdict>>) -> Self {
        debug_assert_eq!(candidates.len(), verdicts.len());
        Self {
            number,
            candidates,
            verdicts,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Verdicts recorded for candidate `index`
    pub fn verdicts_for(&self, index: usize) -> &[Verdict] {
        self.verdicts.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A candidate is approved iff every one of its verdicts is correct.
    ///
    /// With no Reviewers this holds vacuously.
    pub fn is_approved(&self, index: usize) -> bool {
        index < self.candidates.len() && self.verdicts_for(index).iter().all(|v| v.correct)
    }

    /// Indices of unanimously approved candidates, ascending
    pub fn approved_indices(&self) -> Vec<usize> {
        (0..self.candidates.len())
            .filter(|i| self.is_approved(*i))
            .collect()
    }

    pub fn has_approval(&self) -> bool {
        (0..self.candidates.len()).any(|i| self.is_approved(i))
    }

    /// Rejection reasons from candidate `index`'s own panel, one per line
    pub fn rejection_feedback(&self, index: usize) -> String {
        self.verdicts_for(index)
            .iter()
            .filter(|v| !v.correct)
            .map(|v| v.reason.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Compact per-candidate marker string, e.g. `●●○`
    pub fn verdict_summary(&self, index: usize) -> String {
        self.verdicts_for(index)
            .iter()
            .map(|v| if v.correct { '●' } else { '○' })
            .collect()
    }

    /// Total rejecting verdicts across all candidates
    pub fn rejection_count(&self) -> usize {
        self.verdicts
            .iter()
            .flatten()
            .filter(|v| !v.correct)
            .count()
    }
}
