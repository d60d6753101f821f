//! Parser for the reviewer's free-text response.
//!
//! Grammar:
//!
//! - `VERDICT: YES` anywhere in the response, in any letter case, means the
//!   answer passed.
//! - Otherwise the answer failed. The feedback is whatever follows the last
//!   uppercase `FEEDBACK` token, with leading colons and whitespace stripped.
//!   Only when no uppercase token exists is the first `feedback` in any letter
//!   case used instead.
//! - With no such token, or nothing after it, the feedback is the whole raw
//!   response, verbatim. An empty response gets a fixed re-check note.
//!
//! A response that matches none of this is a failing verdict, never an error.

/// Marker the reviewer emits for a perfect answer.
pub const PASS_MARKER: &str = "VERDICT: YES";
/// Marker the reviewer emits for an imperfect answer.
pub const FAIL_MARKER: &str = "VERDICT: NO";
/// Token preceding the critique on failure.
pub const FEEDBACK_MARKER: &str = "FEEDBACK";

/// Stand-in critique for a failing response with no text at all.
const EMPTY_RESPONSE_FEEDBACK: &str =
    "The reviewer gave no explanation. Re-check the answer against every constraint in the question.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    /// Empty on pass, non-empty on fail.
    pub feedback: String,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            feedback: String::new(),
        }
    }

    pub fn fail(feedback: impl Into<String>) -> Self {
        Self {
            passed: false,
            feedback: feedback.into(),
        }
    }
}

pub fn parse_verdict(raw: &str) -> Verdict {
    // ASCII uppercasing keeps byte offsets aligned with `raw`.
    let upper = raw.to_ascii_uppercase();

    if upper.contains(PASS_MARKER) {
        return Verdict::pass();
    }

    // An uppercase token is the marker proper; a lowercase "feedback" may just
    // be a word inside the critique.
    let marker_at = raw
        .rfind(FEEDBACK_MARKER)
        .or_else(|| upper.find(FEEDBACK_MARKER));

    let extracted = marker_at
        .map(|idx| {
            raw[idx + FEEDBACK_MARKER.len()..]
                .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
                .trim_end()
        })
        .filter(|feedback| !feedback.is_empty());

    match extracted {
        Some(feedback) => Verdict::fail(feedback),
        None if raw.is_empty() => Verdict::fail(EMPTY_RESPONSE_FEEDBACK),
        None => Verdict::fail(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_marker_any_case() {
        for raw in ["VERDICT: YES", "verdict: yes", "Verdict: Yes, the answer is perfect."] {
            assert_eq!(parse_verdict(raw), Verdict::pass(), "{raw}");
        }
    }

    #[test]
    fn pass_marker_anywhere_wins_over_feedback() {
        let verdict = parse_verdict("Looked closely.\nFEEDBACK: none\nVERDICT: YES");
        assert!(verdict.passed);
        assert!(verdict.feedback.is_empty());
    }

    #[test]
    fn feedback_after_marker_is_trimmed() {
        let verdict = parse_verdict("VERDICT: NO FEEDBACK: only 4 items found, need exactly 5");
        assert!(!verdict.passed);
        assert_eq!(verdict.feedback, "only 4 items found, need exactly 5");
    }

    #[test]
    fn feedback_strips_colons_and_newlines() {
        let verdict = parse_verdict("VERDICT: NO\nFEEDBACK ::\n\n  The answer has 7 words, not 5.\n");
        assert_eq!(verdict.feedback, "The answer has 7 words, not 5.");
    }

    #[test]
    fn feedback_marker_case_insensitive() {
        let verdict = parse_verdict("Verdict: No\nFeedback: Paris is the capital, not Lyon.");
        assert_eq!(verdict.feedback, "Paris is the capital, not Lyon.");
    }

    #[test]
    fn last_feedback_marker_is_used() {
        let verdict = parse_verdict("FEEDBACK: draft\nVERDICT: NO\nFEEDBACK: final critique");
        assert_eq!(verdict.feedback, "final critique");
    }

    #[test]
    fn missing_marker_falls_back_to_raw_response() {
        let raw = "  The answer is wrong: Canberra is the capital.\n";
        let verdict = parse_verdict(raw);
        assert!(!verdict.passed);
        assert_eq!(verdict.feedback, raw);
    }

    #[test]
    fn empty_feedback_after_marker_falls_back_to_raw_response() {
        let raw = "VERDICT: NO FEEDBACK:";
        let verdict = parse_verdict(raw);
        assert!(!verdict.passed);
        assert_eq!(verdict.feedback, raw);
    }

    #[test]
    fn whitespace_response_is_kept_verbatim() {
        let verdict = parse_verdict("   ");
        assert!(!verdict.passed);
        assert_eq!(verdict.feedback, "   ");
    }

    #[test]
    fn empty_response_still_fails_with_feedback() {
        let verdict = parse_verdict("");
        assert!(!verdict.passed);
        assert_eq!(verdict.feedback, EMPTY_RESPONSE_FEEDBACK);
    }

    #[test]
    fn lowercase_word_in_critique_is_not_a_marker() {
        let critique = "Only 4 fruits are listed; the question asks for 5. Ignoring earlier feedback is not acceptable.";
        let verdict = parse_verdict(&format!("VERDICT: NO\nFEEDBACK: {critique}"));
        assert_eq!(verdict.feedback, critique);
    }

    #[test]
    fn mixed_case_marker_uses_first_occurrence() {
        let verdict = parse_verdict("Verdict: no\nFeedback: list 5 items; my earlier feedback still applies.");
        assert_eq!(verdict.feedback, "list 5 items; my earlier feedback still applies.");
    }

    #[test]
    fn negative_marker_alone_is_failure() {
        let verdict = parse_verdict(FAIL_MARKER);
        assert!(!verdict.passed);
        assert_eq!(verdict.feedback, FAIL_MARKER);
    }

    #[test]
    fn non_ascii_text_keeps_offsets() {
        let verdict = parse_verdict("VERDICT: NO FEEDBACK: « Paris » est correct, ajoutez l'accent é");
        assert_eq!(verdict.feedback, "« Paris » est correct, ajoutez l'accent é");
    }
}
