use crate::verdict::Verdict;

/// One generation and the verdict it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub answer: String,
    pub verdict: Option<Verdict>,
}

/// Mutable state threaded through one question's refine loop.
///
/// Owned by the [`Orchestrator`](crate::Orchestrator) for the whole run and
/// dropped when the run ends. Mutation goes through `record_answer` and
/// `record_verdict` only, so `attempts` can never skip or go backwards.
#[derive(Debug, Clone)]
pub struct Session {
    question: String,
    answer: String,
    verdict_passed: bool,
    attempts: u32,
    feedback: String,
    history: Vec<AttemptRecord>,
}

impl Session {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: String::new(),
            verdict_passed: false,
            attempts: 0,
            feedback: String::new(),
            history: Vec::new(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn verdict_passed(&self) -> bool {
        self.verdict_passed
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Critique of the current answer. Empty until the first failing verdict.
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    /// Store a freshly generated answer, counting it as one attempt.
    pub(crate) fn record_answer(&mut self, answer: String) {
        self.attempts += 1;
        self.answer = answer.clone();
        self.history.push(AttemptRecord {
            attempt: self.attempts,
            answer,
            verdict: None,
        });
    }

    /// Store the verdict on the current answer, replacing any older feedback.
    pub(crate) fn record_verdict(&mut self, verdict: Verdict) {
        self.verdict_passed = verdict.passed;
        self.feedback = verdict.feedback.clone();
        if let Some(last) = self.history.last_mut() {
            last.verdict = Some(verdict);
        }
    }
}
