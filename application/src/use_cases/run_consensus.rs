//! Run Consensus use case
//!
//! Drives one prompt through generate → judge → refine → vote and appends
//! the chosen answer to the session's shared history.

use crate::participants::{Responder, Reviewer};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::GatewayError;
use crate::ports::progress::{ConsensusProgressNotifier, NoProgress};
use crate::session::ConsensusSession;
use futures::future::try_join_all;
use lumin_domain::{
    Ballot, ConsensusOutcome, Prompt, PromptTemplate, Round, Verdict, VoteTally,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a consensus run
#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("Session has no responders")]
    NoResponders,

    #[error("No candidate was approved within {rounds} rounds")]
    NoApproval { rounds: usize },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for answering one prompt by consensus
pub struct ConsensusOrchestrator {
    logger: Arc<dyn ConversationLogger>,
}

impl Default for ConsensusOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusOrchestrator {
    pub fn new() -> Self {
        Self {
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute with default (no-op) progress
    pub async fn execute(
        &self,
        session: &mut ConsensusSession,
        prompt: &Prompt,
    ) -> Result<ConsensusOutcome, ConsensusError> {
        self.execute_with_progress(session, prompt, &NoProgress)
            .await
    }

    /// Execute with progress callbacks
    ///
    /// On success exactly one User/Bot exchange is appended to the session
    /// history. On error the history is unchanged, although Responders keep
    /// the drafts they already produced.
    pub async fn execute_with_progress(
        &self,
        session: &mut ConsensusSession,
        prompt: &Prompt,
        progress: &dyn ConsensusProgressNotifier,
    ) -> Result<ConsensusOutcome, ConsensusError> {
        let responder_count = session.responders.len();
        if responder_count == 0 {
            return Err(ConsensusError::NoResponders);
        }

        let max_rounds = session.config().max_rounds;
        let strict = session.config().on_exhaustion.is_strict();
        let key = session.key().to_string();
        let question = prompt.content();

        info!(
            "Starting consensus with {} responders and {} reviewers",
            responder_count,
            session.reviewers.len()
        );

        let mut rounds: Vec<Round> = Vec::new();
        let mut prompts = vec![question.to_string(); responder_count];

        let (approved, forced_accept) = loop {
            let number = rounds.len();
            progress.on_round_start(number, responder_count, session.reviewers.len());

            let candidates = Self::generate(&mut session.responders, &prompts, number, progress)
                .await?;
            let contexts: Vec<String> = session.responders.iter().map(|r| r.context()).collect();
            let verdicts = Self::judge(
                &session.reviewers,
                question,
                &candidates,
                &contexts,
                number,
                progress,
            )
            .await?;

            let round = Round::new(number, candidates, verdicts);
            let approved = round.approved_indices();

            info!(
                "Round {}: {}/{} candidates approved, {} rejecting verdicts",
                number,
                approved.len(),
                responder_count,
                round.rejection_count()
            );
            progress.on_round_complete(&round);
            self.logger.log(ConversationEvent::new(
                "round_complete",
                serde_json::json!({
                    "session": key,
                    "round": number,
                    "candidates": round.candidates,
                    "verdicts": round.verdicts,
                    "approved": approved,
                }),
            ));

            if round.has_approval() {
                rounds.push(round);
                break (approved, false);
            }

            if number >= max_rounds {
                rounds.push(round);
                warn!(
                    "No candidate approved after {} rounds, {}",
                    rounds.len(),
                    if strict { "giving up" } else { "accepting all" }
                );
                progress.on_budget_exhausted(rounds.len(), !strict);
                self.logger.log(ConversationEvent::new(
                    "consensus_forced",
                    serde_json::json!({
                        "session": key,
                        "rounds": rounds.len(),
                        "accepted": !strict,
                    }),
                ));

                if strict {
                    return Err(ConsensusError::NoApproval {
                        rounds: rounds.len(),
                    });
                }
                break ((0..responder_count).collect(), true);
            }

            prompts = (0..responder_count)
                .map(|i| PromptTemplate::refinement_prompt(question, &round.rejection_feedback(i)))
                .collect();
            rounds.push(round);
        };

        let final_candidates = rounds
            .last()
            .map(|r| r.candidates.clone())
            .unwrap_or_default();

        let (winner, tally) = if approved.len() == 1 {
            debug!("Single approved candidate {}, skipping vote", approved[0]);
            (approved[0], None)
        } else {
            let answers: Vec<String> = approved
                .iter()
                .map(|i| final_candidates[*i].clone())
                .collect();

            progress.on_vote_start(answers.len());
            let ballots = Self::vote(&session.reviewers, question, &answers).await?;
            let tally = VoteTally::count(answers.len(), &ballots);
            let winner = approved[tally.winner()];

            info!(
                "Vote: {:?} ({} abstained), winner candidate {}",
                tally.counts(),
                tally.abstentions(),
                winner
            );
            progress.on_vote_complete(&tally, winner);
            self.logger.log(ConversationEvent::new(
                "vote_tally",
                serde_json::json!({
                    "session": key,
                    "approved": approved,
                    "counts": tally.counts(),
                    "valid_votes": tally.valid_votes(),
                    "abstentions": tally.abstentions(),
                    "tie": tally.is_tie(),
                    "winner": winner,
                }),
            ));

            (winner, Some(tally))
        };

        let answer = final_candidates[winner].clone();
        session.history.append_exchange(question, answer.clone());

        self.logger.log(ConversationEvent::new(
            "consensus_result",
            serde_json::json!({
                "session": key,
                "prompt": question,
                "answer": answer,
                "rounds": rounds.len(),
                "forced_accept": forced_accept,
            }),
        ));

        Ok(ConsensusOutcome {
            answer,
            winner,
            rounds,
            approved,
            forced_accept,
            tally,
        })
    }

    /// GENERATE: every Responder on its prompt, concurrently
    async fn generate(
        responders: &mut [Box<dyn Responder>],
        prompts: &[String],
        round: usize,
        progress: &dyn ConsensusProgressNotifier,
    ) -> Result<Vec<String>, GatewayError> {
        try_join_all(
            responders
                .iter_mut()
                .zip(prompts)
                .map(|(responder, prompt)| async move {
                    let answer = responder.generate(prompt).await?;
                    progress.on_candidate_generated(round, responder.id());
                    Ok::<_, GatewayError>(answer)
                }),
        )
        .await
    }

    /// JUDGE: every candidate × every Reviewer, concurrently
    ///
    /// Returns the verdict matrix indexed `[candidate][reviewer]`.
    async fn judge(
        reviewers: &[Box<dyn Reviewer>],
        prompt: &str,
        candidates: &[String],
        contexts: &[String],
        round: usize,
        progress: &dyn ConsensusProgressNotifier,
    ) -> Result<Vec<Vec<Verdict>>, GatewayError> {
        let pairs: Vec<(usize, &dyn Reviewer)> = (0..candidates.len())
            .flat_map(|i| reviewers.iter().map(move |r| (i, &**r)))
            .collect();

        let flat = try_join_all(pairs.iter().map(|(i, reviewer)| {
            let (i, reviewer) = (*i, *reviewer);
            async move {
                let verdict = reviewer
                    .review(prompt, &candidates[i], &contexts[i])
                    .await?;
                progress.on_verdict(round, i, reviewer.id(), &verdict);
                Ok::<_, GatewayError>(verdict)
            }
        }))
        .await?;

        let mut matrix: Vec<Vec<Verdict>> =
            vec![Vec::with_capacity(reviewers.len()); candidates.len()];
        for ((i, _), verdict) in pairs.iter().zip(flat) {
            matrix[*i].push(verdict);
        }
        Ok(matrix)
    }

    /// VOTE: one ballot per Reviewer over the approved list
    async fn vote(
        reviewers: &[Box<dyn Reviewer>],
        prompt: &str,
        answers: &[String],
    ) -> Result<Vec<Ballot>, GatewayError> {
        try_join_all(reviewers.iter().map(|r| r.vote(prompt, answers))).await
    }
}
