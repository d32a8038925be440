//! Vote ballots and tallying

use serde::{Deserialize, Serialize};

/// A Reviewer's vote for the best of several approved candidates
///
/// `chosen_index` is an index into the densely re-indexed approved list.
/// `-1` is the abstain sentinel; it never indexes anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub chosen_index: i64,
}

impl Ballot {
    pub const ABSTAIN: i64 = -1;

    pub fn chosen(index: usize) -> Self {
        Self {
            chosen_index: index as i64,
        }
    }

    pub fn abstain() -> Self {
        Self {
            chosen_index: Self::ABSTAIN,
        }
    }

    pub fn is_abstain(&self) -> bool {
        self.chosen_index < 0
    }

    /// The chosen index if it is a valid position among `candidates` entries.
    pub fn index_within(&self, candidates: usize) -> Option<usize> {
        usize::try_from(self.chosen_index)
            .ok()
            .filter(|i| *i < candidates)
    }
}

/// Result of counting ballots over a candidate list
///
/// Abstentions and out-of-range choices are counted separately and never
/// contribute to any candidate. The winner is the candidate with the most
/// votes; ties (including "no valid votes at all") go to the lowest index.
///
/// # Example
///
/// ```
/// use lumin_domain::consensus::{Ballot, VoteTally};
///
/// let ballots = [Ballot::chosen(0), Ballot::chosen(1), Ballot::chosen(0), Ballot::chosen(0)];
/// let tally = VoteTally::count(3, &ballots);
/// assert_eq!(tally.winner(), 0);
/// assert_eq!(tally.counts(), &[3, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    counts: Vec<usize>,
    abstentions: usize,
}

impl VoteTally {
    /// Count ballots for `candidates` candidates.
    pub fn count(candidates: usize, ballots: &[Ballot]) -> Self {
        let mut counts = vec![0; candidates];
        let mut abstentions = 0;

        for ballot in ballots {
            match ballot.index_within(candidates) {
                Some(i) => counts[i] += 1,
                None => abstentions += 1,
            }
        }

        Self {
            counts,
            abstentions,
        }
    }

    /// Votes per candidate, indexed like the candidate list
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Ballots that did not count toward any candidate
    pub fn abstentions(&self) -> usize {
        self.abstentions
    }

    pub fn valid_votes(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Winning candidate index; lowest index wins ties.
    pub fn winner(&self) -> usize {
        let mut best = 0;
        for (i, count) in self.counts.iter().enumerate() {
            if *count > self.counts[best] {
                best = i;
            }
        }
        best
    }

    /// Whether the winner shares its vote count with another candidate
    pub fn is_tie(&self) -> bool {
        let Some(top) = self.counts.get(self.winner()) else {
            return false;
        };
        self.counts.iter().filter(|c| *c == top).count() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_wins() {
        let ballots = vec![
            Ballot::chosen(0),
            Ballot::chosen(1),
            Ballot::chosen(0),
            Ballot::chosen(0),
        ];
        let tally = VoteTally::count(3, &ballots);

        assert_eq!(tally.winner(), 0);
        assert_eq!(tally.counts(), &[3, 1, 0]);
        assert_eq!(tally.abstentions(), 0);
        assert!(!tally.is_tie());
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let ballots = vec![Ballot::chosen(2), Ballot::chosen(1)];
        let tally = VoteTally::count(3, &ballots);

        assert_eq!(tally.winner(), 1);
        assert!(tally.is_tie());
    }

    #[test]
    fn test_abstentions_excluded() {
        let ballots = vec![Ballot::abstain(), Ballot::abstain(), Ballot::chosen(1)];
        let tally = VoteTally::count(2, &ballots);

        assert_eq!(tally.winner(), 1);
        assert_eq!(tally.abstentions(), 2);
        assert_eq!(tally.valid_votes(), 1);
    }

    #[test]
    fn test_out_of_range_counts_as_abstention() {
        let ballots = vec![Ballot::chosen(7), Ballot { chosen_index: -42 }];
        let tally = VoteTally::count(2, &ballots);

        assert_eq!(tally.abstentions(), 2);
        assert_eq!(tally.counts(), &[0, 0]);
    }

    #[test]
    fn test_all_abstain_falls_back_to_first() {
        let tally = VoteTally::count(3, &[Ballot::abstain()]);
        assert_eq!(tally.winner(), 0);

        let empty = VoteTally::count(2, &[]);
        assert_eq!(empty.winner(), 0);
        assert!(empty.is_tie());
    }

    #[test]
    fn test_ballot_index_within() {
        assert_eq!(Ballot::chosen(1).index_within(2), Some(1));
        assert_eq!(Ballot::chosen(2).index_within(2), None);
        assert_eq!(Ballot::abstain().index_within(2), None);
        assert!(Ballot::abstain().is_abstain());
    }
}
