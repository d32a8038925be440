//! Reviewer reply parsing
//!
//! Reviewers are asked for small JSON objects. Models often wrap those in
//! prose or code fences, so the object is located between the first `{` and
//! the last `}` before decoding.
//!
//! | Function | Reply shape | On failure |
//! |----------|-------------|------------|
//! | [`parse_verdict`] | `{"correct": bool, "reason": "..."}` | `None` |
//! | [`parse_verdict_or_reject`] | same | `Verdict { correct: false, reason: "Supervisor failed" }` |
//! | [`parse_ballot`] | `{"chosen": int}` | abstain (`-1`) |

use super::ballot::Ballot;
use super::verdict::Verdict;
use serde_json::Value;

fn extract_json_object(response: &str) -> Option<serde_json::Map<String, Value>> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&response[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Parse a review reply.
///
/// `correct` must be a JSON boolean. A missing or non-string `reason` is
/// read as empty.
///
/// ```
/// use lumin_domain::consensus::parse_verdict;
///
/// let v = parse_verdict(r#"{"correct": false, "reason": "Wrong year"}"#).unwrap();
/// assert!(!v.correct);
/// assert_eq!(v.reason, "Wrong year");
///
/// assert!(parse_verdict("Looks fine to me").is_none());
/// ```
pub fn parse_verdict(response: &str) -> Option<Verdict> {
    let object = extract_json_object(response)?;
    let correct = object.get("correct")?.as_bool()?;
    let reason = object
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(Verdict::new(correct, reason))
}

/// Parse a review reply, failing closed on anything unparseable.
pub fn parse_verdict_or_reject(response: &str) -> Verdict {
    parse_verdict(response).unwrap_or_else(Verdict::supervisor_failed)
}

/// Parse a vote reply.
///
/// `chosen` must be a non-negative JSON integer; anything else abstains.
/// Range checking against the candidate list happens at tally time.
///
/// ```
/// use lumin_domain::consensus::parse_ballot;
///
/// assert_eq!(parse_ballot(r#"{"chosen": 2}"#).chosen_index, 2);
/// assert!(parse_ballot(r#"{"chosen": "two"}"#).is_abstain());
/// ```
pub fn parse_ballot(response: &str) -> Ballot {
    extract_json_object(response)
        .and_then(|object| object.get("chosen").and_then(Value::as_u64))
        .and_then(|index| usize::try_from(index).ok())
        .map(Ballot::chosen)
        .unwrap_or_else(Ballot::abstain)
}
