use ai_client::TextService;
use anyhow::Result;
use tracing::debug;

/// Produces a first answer, or a revision that addresses reviewer feedback.
///
/// Does not count attempts; the orchestrator does that once per call.
pub struct AnswerGenerator<'a> {
    service: &'a dyn TextService,
}

impl<'a> AnswerGenerator<'a> {
    pub fn new(service: &'a dyn TextService) -> Self {
        Self { service }
    }

    pub async fn generate(
        &self,
        question: &str,
        previous_answer: &str,
        feedback: &str,
    ) -> Result<String> {
        let prompt = if feedback.is_empty() {
            build_initial_prompt(question)
        } else {
            build_revision_prompt(question, previous_answer, feedback)
        };

        debug!(revision = !feedback.is_empty(), "Requesting answer");

        let response = self.service.invoke(&prompt).await?;
        Ok(response.trim().to_string())
    }
}

pub fn build_initial_prompt(question: &str) -> String {
    format!(
        r#"You are a helpful AI assistant.
Answer the following question clearly and accurately.

Question: {question}"#
    )
}

pub fn build_revision_prompt(question: &str, previous_answer: &str, feedback: &str) -> String {
    format!(
        r#"Your previous answer to this question was rejected by a reviewer.

QUESTION: {question}
PREVIOUS ATTEMPT: {previous_answer}
CRITIQUE FROM REVIEWER: {feedback}

Write a new answer that fixes every point in the critique and satisfies all constraints of the question exactly."#
    )
}
