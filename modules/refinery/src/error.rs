use thiserror::Error;

use crate::controller::{LoopEvent, LoopState};

pub type Result<T> = std::result::Result<T, RefineryError>;

#[derive(Error, Debug)]
pub enum RefineryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation failed on attempt {attempt}: {source:#}")]
    Generation {
        attempt: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("Evaluation failed on attempt {attempt}: {source:#}")]
    Evaluation {
        attempt: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("No transition from {from:?} on {event:?}")]
    InvalidTransition { from: LoopState, event: LoopEvent },
}
