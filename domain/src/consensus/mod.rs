//! Consensus domain
//!
//! Core concepts of the generate → judge → refine → vote protocol.
//!
//! # Protocol
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌─────────┐  none approved,   ┌──────────┐
//! │ GENERATE │──▶│  JUDGE  │──▶│  CHECK  │── budget left ───▶│  REFINE  │──┐
//! └──────────┘   └─────────┘   └─────────┘                   └──────────┘  │
//!                     ▲             │ ≥1 approved (or forced accept)       │
//!                     │             ▼                                      │
//!                     │        ┌─────────┐  >1 approved  ┌────────┐        │
//!                     │        │ SELECT  │──────────────▶│  VOTE  │        │
//!                     │        └─────────┘               └────────┘        │
//!                     └────────────────────────────────────────────────────┘
//! ```
//!
//! - [`Verdict`]: one Reviewer's judgment of one candidate (fail-closed)
//! - [`Ballot`] / [`VoteTally`]: one Reviewer's pick among approved
//!   candidates, and the deterministic count over all ballots
//! - [`Round`]: candidates plus the candidate × reviewer verdict matrix
//! - [`ExhaustionPolicy`]: what happens when the retry budget runs out

pub mod ballot;
pub mod outcome;
pub mod parsing;
pub mod policy;
pub mod round;
pub mod verdict;

pub use ballot::{Ballot, VoteTally};
pub use outcome::ConsensusOutcome;
pub use parsing::{parse_ballot, parse_verdict, parse_verdict_or_reject};
pub use policy::{DEFAULT_MAX_ROUNDS, ExhaustionPolicy};
pub use round::Round;
pub use verdict::{SUPERVISOR_FAILED_REASON, Verdict};
