//! Prompt templates for the consensus flow

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Responder prompt: recent memory followed by the new prompt
    pub fn responder_prompt(history: &str, prompt: &str) -> String {
        format!(
            r#"## CHAT HISTORY
{history}
## NEW PROMPT FROM USER
{prompt}

ONLY ANSWER THE LATEST PROMPT:
"#
        )
    }

    /// Refinement prompt sent to a Responder whose draft was rejected
    pub fn refinement_prompt(prompt: &str, reasons: &str) -> String {
        format!(
            r#"A supervisor has concluded that your previous prompt did not match the requirements of the prompt '{prompt}' for the following reasons: 
{reasons}
Provide a new better answer to following prompt: 
{prompt}
DO NOT APOLOGIZE FOR YOUR PREVIOUS ANSWER
"#
        )
    }

    /// Reviewer prompt asking for a `{"correct": bool, "reason": "..."}` verdict
    pub fn review_prompt(history: &str, prompt: &str, answer: &str) -> String {
        format!(
            r#"You are a supervisor. DECIDE WHETHER THE ANSWER IS CORRECT AND APPROPRIATE OR NOT, considering the chat history and the prompt.
ANSWER ONLY IN THE FOLLOWING JSON FORMAT: {{"correct": true or false, "reason": "why the answer is not correct, empty if it is"}}
UNDER NO CIRCUMSTANCES ANSWER IN ANY DIFFERENT WAY

##CHAT HISTORY
{history}
##PROMPT
{prompt}
##ANSWER
{answer}
"#
        )
    }

    /// Reviewer prompt asking for a `{"chosen": index}` ballot
    pub fn vote_prompt(prompt: &str, answers: &[&str]) -> String {
        let mut out = format!(
            r#"You are a supervisor. Several answers to the same prompt were all judged correct. CHOOSE THE BEST ONE.

##PROMPT
{prompt}

"#
        );

        for (i, answer) in answers.iter().enumerate() {
            out.push_str(&format!("ANSWER {i}:\n{answer}\n\n"));
        }

        out.push_str(
            r#"ANSWER ONLY IN THE FOLLOWING JSON FORMAT: {"chosen": index of the best answer}
UNDER NO CIRCUMSTANCES ANSWER IN ANY DIFFERENT WAY
"#,
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_responder_prompt() {
        let prompt = PromptTemplate::responder_prompt("[Prompt] hi [/Prompt]", "What now?");
        assert!(prompt.starts_with("## CHAT HISTORY\n[Prompt] hi [/Prompt]\n"));
        assert!(prompt.contains("## NEW PROMPT FROM USER\nWhat now?"));
        assert!(prompt.ends_with("ONLY ANSWER THE LATEST PROMPT:\n"));
    }

    #[test]
    fn test_refinement_prompt_embeds_reasons() {
        let prompt = PromptTemplate::refinement_prompt("Capital of France?", "too vague\nno city");
        assert!(prompt.contains("the prompt 'Capital of France?'"));
        assert!(prompt.contains("\ntoo vague\nno city\n"));
        assert!(prompt.contains("DO NOT APOLOGIZE"));
    }

    #[test]
    fn test_review_prompt_sections() {
        let prompt = PromptTemplate::review_prompt("ctx", "Q", "A");
        assert!(prompt.contains(r#""correct": true or false"#));
        assert!(prompt.contains("##CHAT HISTORY\nctx\n##PROMPT\nQ\n##ANSWER\nA\n"));
    }

    #[test]
    fn test_vote_prompt_indexes_answers() {
        let prompt = PromptTemplate::vote_prompt("Q", &["first", "second"]);
        assert!(prompt.contains("ANSWER 0:\nfirst\n"));
        assert!(prompt.contains("ANSWER 1:\nsecond\n"));
        assert!(prompt.contains(r#"{"chosen": index of the best answer}"#));
    }
}
