//! Analysis error types

use chess_core::{Game, NotationError};
use thiserror::Error;

use crate::analysis::EvaluationRecord;

/// Failures talking to the engine process.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to spawn engine: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine closed its output before {0}")]
    Closed(&'static str),

    #[error("Engine gave no bestmove within {0:?}")]
    Timeout(std::time::Duration),

    #[error("Engine output is out of step after an unrecovered timeout")]
    Desynced,

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("Search depth must be positive, got {0}")]
    InvalidDepth(u32),

    #[error("Engine unavailable at move {index}: {source}")]
    EngineUnavailable {
        index: usize,
        #[source]
        source: EngineError,
    },
}

/// An analysis that stopped early, with whatever was computed before it did.
///
/// Notation failures carry zero records. Engine failures carry the records
/// classified before the engine went away.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct AnalysisFailure {
    #[source]
    pub error: AnalysisError,
    pub game: Option<Game>,
    pub fens: Vec<String>,
    pub records: Vec<EvaluationRecord>,
}

impl AnalysisFailure {
    /// Index of the move the analysis stopped at, if any.
    pub fn move_index(&self) -> Option<usize> {
        match &self.error {
            AnalysisError::Notation(e) => e.move_index(),
            AnalysisError::InvalidDepth(_) => None,
            AnalysisError::EngineUnavailable { index, .. } => Some(*index),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
