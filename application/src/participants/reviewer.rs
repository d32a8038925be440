//! Gateway-backed Reviewer

use super::Reviewer;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use lumin_domain::core::string::preview;
use lumin_domain::{
    Ballot, DomainError, OutputPattern, ParticipantSpec, PromptTemplate, Verdict, parse_ballot,
    parse_verdict_or_reject,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless Reviewer that asks an [`LlmGateway`] for verdicts and ballots
pub struct GatewayReviewer {
    id: String,
    spec: ParticipantSpec,
    pattern: Option<OutputPattern>,
    gateway: Arc<dyn LlmGateway>,
}

impl GatewayReviewer {
    /// Build the `index`-th Reviewer from `spec`.
    pub fn new(
        spec: ParticipantSpec,
        index: usize,
        gateway: Arc<dyn LlmGateway>,
    ) -> Result<Self, DomainError> {
        let pattern = spec.compile_pattern()?;
        Ok(Self {
            id: spec.participant_id(index),
            spec,
            pattern,
            gateway,
        })
    }

    async fn ask(&self, built: &str) -> Result<String, GatewayError> {
        let raw = self.gateway.ask(&self.spec.render(built)).await?;
        Ok(match &self.pattern {
            Some(pattern) => pattern.extract(&raw).to_string(),
            None => raw,
        })
    }
}

#[async_trait]
impl Reviewer for GatewayReviewer {
    fn id(&self) -> &str {
        &self.id
    }

    async fn review(
        &self,
        prompt: &str,
        candidate: &str,
        context: &str,
    ) -> Result<Verdict, GatewayError> {
        let reply = self
            .ask(&PromptTemplate::review_prompt(context, prompt, candidate))
            .await?;

        let verdict = parse_verdict_or_reject(&reply);
        if verdict.is_supervisor_failure() {
            warn!(
                "Reviewer {} returned an unparseable verdict, rejecting: {}",
                self.id,
                preview(&reply, 120)
            );
        } else {
            debug!("Reviewer {} verdict: correct={}", self.id, verdict.correct);
        }
        Ok(verdict)
    }

    async fn vote(&self, prompt: &str, candidates: &[String]) -> Result<Ballot, GatewayError> {
        let answers: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let reply = self.ask(&PromptTemplate::vote_prompt(prompt, &answers)).await?;

        let ballot = parse_ballot(&reply);
        if ballot.index_within(candidates.len()).is_none() {
            warn!(
                "Reviewer {} abstained (choice {} of {} candidates)",
                self.id,
                ballot.chosen_index,
                candidates.len()
            );
        }
        Ok(ballot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedGateway {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn ask(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
        }
    }

    fn reviewer(gateway: Arc<ScriptedGateway>) -> GatewayReviewer {
        GatewayReviewer::new(ParticipantSpec::new("reviewer"), 1, gateway).unwrap()
    }

    #[tokio::test]
    async fn test_review_parses_verdict() {
        let gateway = ScriptedGateway::new(&[r#"{"correct": false, "reason": "Wrong city"}"#]);
        let r = reviewer(gateway.clone());

        let verdict = r.review("Capital?", "Lyon", "ctx").await.unwrap();
        assert_eq!(verdict, Verdict::reject("Wrong city"));
        assert_eq!(r.id(), "reviewer-1");

        let prompt = &gateway.prompts.lock().unwrap()[0];
        assert!(prompt.contains("##CHAT HISTORY\nctx\n##PROMPT\nCapital?\n##ANSWER\nLyon"));
    }

    #[tokio::test]
    async fn test_review_fails_closed() {
        let gateway = ScriptedGateway::new(&["Looks good to me!"]);
        let verdict = reviewer(gateway).review("q", "a", "").await.unwrap();

        assert!(!verdict.correct);
        assert_eq!(verdict.reason, "Supervisor failed");
    }

    #[tokio::test]
    async fn test_vote_lists_candidates() {
        let gateway = ScriptedGateway::new(&[r#"{"chosen": 1}"#]);
        let r = reviewer(gateway.clone());

        let ballot = r
            .vote("q", &["first".to_string(), "second".to_string()])
            .await
            .unwrap();
        assert_eq!(ballot, Ballot::chosen(1));

        let prompt = &gateway.prompts.lock().unwrap()[0];
        assert!(prompt.contains("ANSWER 0:\nfirst"));
        assert!(prompt.contains("ANSWER 1:\nsecond"));
    }

    #[tokio::test]
    async fn test_vote_abstains_on_garbage() {
        let gateway = ScriptedGateway::new(&["the first one"]);
        let ballot = reviewer(gateway)
            .vote("q", &["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert!(ballot.is_abstain());
    }

    #[tokio::test]
    async fn test_pattern_applied_before_parsing() {
        let gateway = ScriptedGateway::new(&["{\"note\": 1} VERDICT {\"correct\": true}"]);
        let spec = ParticipantSpec::new("reviewer").with_output_pattern(r"VERDICT \{.*\}");
        let r = GatewayReviewer::new(spec, 0, gateway).unwrap();

        let verdict = r.review("q", "a", "").await.unwrap();
        assert!(verdict.correct);
    }
}
