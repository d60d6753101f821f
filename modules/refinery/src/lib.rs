pub mod config;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod orchestrator;
pub mod session;
pub mod verdict;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{Config, Provider};
pub use controller::{Controller, Decision, LoopEvent, LoopState, MAX_ATTEMPTS};
pub use error::{RefineryError, Result};
pub use evaluator::AnswerEvaluator;
pub use generator::AnswerGenerator;
pub use orchestrator::{Orchestrator, Outcome};
pub use session::{AttemptRecord, Session};
pub use verdict::{parse_verdict, Verdict};
