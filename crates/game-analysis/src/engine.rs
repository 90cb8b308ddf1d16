//! Position-in / score-out engine contract.
//!
//! The pipeline only ever sees this blocking trait. Transport lives in the
//! implementation (see [`crate::stockfish::StockfishSession`]).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_DEPTH: u32 = 18;

/// Raw engine score, always from the perspective of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawScore {
    Centipawns(i32),
    /// Mate in N; positive when the side to move delivers it.
    Mate(i32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineResponse {
    /// `None` when the engine produced no evaluation.
    pub score: Option<RawScore>,
    /// Principal variation in coordinate notation.
    pub pv: Vec<String>,
    /// `None` when the engine had no suggestion.
    pub best_move: Option<String>,
}

pub trait Engine {
    /// Evaluate one FEN position, blocking until the engine answers.
    fn evaluate(&mut self, fen: &str, depth: u32) -> Result<EngineResponse, EngineError>;

    /// Reset engine state before a new game's positions.
    fn new_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

impl<E: Engine + ?Sized> Engine for &mut E {
    fn evaluate(&mut self, fen: &str, depth: u32) -> Result<EngineResponse, EngineError> {
        (**self).evaluate(fen, depth)
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        (**self).new_game()
    }
}

/// Replays canned responses in order. Once the script runs out it reports
/// the engine as closed.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    responses: VecDeque<EngineResponse>,
    /// Every `(fen, depth)` request received, in order.
    pub requests: Vec<(String, u32)>,
    pub new_games: u32,
}

impl ScriptedEngine {
    pub fn new(responses: impl IntoIterator<Item = EngineResponse>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }

    /// One centipawn response per entry, with no PV or best move.
    pub fn from_centipawns(scores: &[i32]) -> Self {
        Self::new(scores.iter().map(|&cp| EngineResponse {
            score: Some(RawScore::Centipawns(cp)),
            ..EngineResponse::default()
        }))
    }
}

impl Engine for ScriptedEngine {
    fn evaluate(&mut self, fen: &str, depth: u32) -> Result<EngineResponse, EngineError> {
        self.requests.push((fen.to_string(), depth));
        self.responses
            .pop_front()
            .ok_or(EngineError::Closed("bestmove"))
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        self.new_games += 1;
        Ok(())
    }
}
