use ai_client::util::truncate_to_char_boundary;
use ai_client::TextService;
use anyhow::Result;
use tracing::debug;

use crate::verdict::{parse_verdict, Verdict, FAIL_MARKER, FEEDBACK_MARKER, PASS_MARKER};

/// Audits an answer against its question through the text service.
pub struct AnswerEvaluator<'a> {
    service: &'a dyn TextService,
}

impl<'a> AnswerEvaluator<'a> {
    pub fn new(service: &'a dyn TextService) -> Self {
        Self { service }
    }

    /// Ask the reviewer for a verdict. An unparseable response is a failing
    /// verdict; only a service failure is an error.
    pub async fn evaluate(&self, question: &str, answer: &str) -> Result<Verdict> {
        let prompt = build_audit_prompt(question, answer);
        let raw = self.service.invoke(&prompt).await?;

        debug!(
            response = truncate_to_char_boundary(&raw, 200),
            "Reviewer response"
        );

        Ok(parse_verdict(&raw))
    }
}

pub fn build_audit_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"### ROLE
You are a meticulous quality assurance reviewer.

### TASK
Review the Generated Answer against the User Question.
If it is perfect, output '{PASS_MARKER}'.
If it is imperfect, output '{FAIL_MARKER}' followed by '{FEEDBACK_MARKER}:' and an explanation of exactly what is wrong.

- **User Question:** {question}
- **Generated Answer:** {answer}

### INSTRUCTIONS
- Be pedantic. Check facts, word counts, formatting and every explicit constraint in the question.
- If a word or item count is wrong, state the count you found and the count required.
- If a fact is wrong, state the correct fact."#
    )
}
