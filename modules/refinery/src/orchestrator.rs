use ai_client::util::truncate_to_char_boundary;
use ai_client::TextService;
use tracing::{info, warn};

use crate::controller::{Controller, Decision, LoopEvent, LoopState};
use crate::error::{RefineryError, Result};
use crate::evaluator::AnswerEvaluator;
use crate::generator::AnswerGenerator;
use crate::session::{AttemptRecord, Session};

const LOG_PREVIEW_BYTES: usize = 200;

/// What a finished run hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub final_answer: String,
    pub attempts_used: u32,
    /// False when the loop stopped on an exhausted budget: best effort, not
    /// certified by the reviewer.
    pub passed: bool,
    pub history: Vec<AttemptRecord>,
}

/// Runs generate → evaluate → decide until the controller says stop.
pub struct Orchestrator<'a> {
    generator: AnswerGenerator<'a>,
    evaluator: AnswerEvaluator<'a>,
    controller: Controller,
}

impl<'a> Orchestrator<'a> {
    /// Generator and evaluator share one service handle.
    pub fn new(service: &'a dyn TextService, controller: Controller) -> Self {
        Self::with_services(service, service, controller)
    }

    pub fn with_services(
        generation: &'a dyn TextService,
        evaluation: &'a dyn TextService,
        controller: Controller,
    ) -> Self {
        Self {
            generator: AnswerGenerator::new(generation),
            evaluator: AnswerEvaluator::new(evaluation),
            controller,
        }
    }

    pub async fn run(&self, question: impl Into<String>) -> Result<Outcome> {
        let mut session = Session::new(question);
        let mut state = LoopState::INITIAL;

        while !state.is_terminal() {
            let event = match state {
                LoopState::Generating => {
                    let attempt = session.attempts() + 1;
                    info!(attempt, "Generating answer");

                    let answer = self
                        .generator
                        .generate(session.question(), session.answer(), session.feedback())
                        .await
                        .map_err(|source| RefineryError::Generation { attempt, source })?;
                    session.record_answer(answer);
                    LoopEvent::Generated
                }
                LoopState::Evaluating => {
                    let attempt = session.attempts();
                    info!(attempt, "Evaluating answer");

                    let verdict = self
                        .evaluator
                        .evaluate(session.question(), session.answer())
                        .await
                        .map_err(|source| RefineryError::Evaluation { attempt, source })?;

                    info!(
                        attempt,
                        passed = verdict.passed,
                        answer = truncate_to_char_boundary(session.answer(), LOG_PREVIEW_BYTES),
                        feedback = truncate_to_char_boundary(&verdict.feedback, LOG_PREVIEW_BYTES),
                        "Verdict"
                    );
                    session.record_verdict(verdict);

                    let decision = self.controller.decide(&session);
                    match decision {
                        Decision::Retry => info!(attempt, "Retrying"),
                        Decision::End if !session.verdict_passed() => warn!(
                            attempt,
                            max_attempts = self.controller.max_attempts(),
                            "Max attempts reached, stopping"
                        ),
                        Decision::End => {}
                    }
                    LoopEvent::Decided(decision)
                }
                LoopState::Done => break,
            };

            state = state
                .next(event)
                .ok_or(RefineryError::InvalidTransition { from: state, event })?;
        }

        info!(
            attempts = session.attempts(),
            passed = session.verdict_passed(),
            "Refine loop finished"
        );

        Ok(Outcome {
            final_answer: session.answer().to_string(),
            attempts_used: session.attempts(),
            passed: session.verdict_passed(),
            history: session.history().to_vec(),
        })
    }
}
