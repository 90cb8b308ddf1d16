//! Drive one [`Position`] through a game's move tokens, capturing the FEN
//! after every move.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::NotationError;
use crate::game_data::Game;
use crate::position::{AppliedMove, Position};
use crate::types::Side;

/// The position created by playing one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ply {
    pub index: usize,
    pub san: String,
    pub side: Side,
    pub played: AppliedMove,
    pub fen: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub plies: Vec<Ply>,
}

impl Replay {
    pub fn fens(&self) -> Vec<&str> {
        self.plies.iter().map(|p| p.fen.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }
}

/// A replay aborted at a bad token, with everything captured before it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct ReplayFailure {
    #[source]
    pub error: NotationError,
    pub partial: Replay,
}

/// Replay `game` from the standard starting position.
pub fn replay(game: &Game) -> Result<Replay, ReplayFailure> {
    let mut position = Position::starting();
    let mut replay = Replay {
        plies: Vec::with_capacity(game.moves.len()),
    };

    for (index, token) in game.moves.iter().enumerate() {
        let played = match position.apply_san(&token.san) {
            Ok(played) => played,
            Err(e) => {
                warn!(index, san = %token.san, error = %e, "Replay aborted");
                return Err(ReplayFailure {
                    error: NotationError::at_move(e, index, &token.san),
                    partial: replay,
                });
            }
        };
        let fen = position.to_fen();
        debug!(index, san = %token.san, uci = %played.uci(), fen = %fen, "Applied move");
        replay.plies.push(Ply {
            index,
            san: token.san.clone(),
            side: token.side,
            played,
            fen,
        });
    }

    Ok(replay)
}

/// Parse PGN text and replay it, returning only the FEN sequence.
pub fn fen_sequence(pgn: &str) -> Result<Vec<String>, ReplayFailure> {
    let game = Game::parse(pgn).map_err(|error| ReplayFailure {
        error,
        partial: Replay::default(),
    })?;
    let replay = replay(&game)?;
    Ok(replay.plies.into_iter().map(|p| p.fen).collect())
}
