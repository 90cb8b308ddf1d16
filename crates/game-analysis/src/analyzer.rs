//! Core game analysis logic
//!
//! PGN text is parsed and replayed. Each resulting position is then sent to
//! the engine in order: one request goes out and its answer arrives before
//! the next is sent. The normalized scores are classified and reduced to an
//! accuracy figure.

use chess_core::{replay, Game, Replay};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{self, Classifications, EvaluationRecord, ScoredMove};
use crate::engine::Engine;
use crate::error::{AnalysisError, AnalysisFailure};

/// Per-side classification output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideClassifications {
    pub white: Classifications,
    pub black: Classifications,
}

/// Full result handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub game: Game,
    pub evals: Vec<EvaluationRecord>,
    pub accuracy: u8,
    pub classifications: SideClassifications,
}

/// Runs games through an owned engine; pass `&mut E` to lend one instead.
pub struct Analyzer<E> {
    engine: E,
    depth: u32,
}

impl<E: Engine> Analyzer<E> {
    pub fn new(engine: E, depth: u32) -> Self {
        Self { engine, depth }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Analyze one PGN game. A zero depth is rejected before the engine is
    /// contacted.
    pub fn analyze(&mut self, pgn: &str) -> Result<AnalysisReport, AnalysisFailure> {
        if self.depth == 0 {
            return Err(AnalysisFailure {
                error: AnalysisError::InvalidDepth(self.depth),
                game: None,
                fens: Vec::new(),
                records: Vec::new(),
            });
        }

        let game = Game::parse(pgn).map_err(|e| AnalysisFailure {
            error: AnalysisError::Notation(e),
            game: None,
            fens: Vec::new(),
            records: Vec::new(),
        })?;

        let replay = match replay(&game) {
            Ok(replay) => replay,
            Err(failure) => {
                let fens = failure.partial.plies.into_iter().map(|p| p.fen).collect();
                return Err(AnalysisFailure {
                    error: AnalysisError::Notation(failure.error),
                    game: Some(game),
                    fens,
                    records: Vec::new(),
                });
            }
        };
        info!(move_count = replay.len(), depth = self.depth, "Replayed game");

        let (scored, engine_error) = self.evaluate_positions(&replay);
        let evals = analysis::classify_moves(scored);
        let fens = replay.plies.into_iter().map(|p| p.fen).collect();

        if let Some(error) = engine_error {
            return Err(AnalysisFailure {
                error,
                game: Some(game),
                fens,
                records: evals,
            });
        }

        let accuracy = analysis::compute_accuracy(evals.iter().map(|r| &r.tag));
        let classifications = SideClassifications {
            white: Classifications::for_side(&evals, chess_core::Side::White),
            black: Classifications::for_side(&evals, chess_core::Side::Black),
        };
        info!(accuracy, "Analysis complete");

        Ok(AnalysisReport {
            game,
            evals,
            accuracy,
            classifications,
        })
    }

    /// Evaluate every replayed position, stopping at the first engine failure.
    fn evaluate_positions(&mut self, replay: &Replay) -> (Vec<ScoredMove>, Option<AnalysisError>) {
        let mut scored = Vec::with_capacity(replay.len());

        if let Err(source) = self.engine.new_game() {
            warn!(error = %source, "Engine failed to start a new game");
            return (scored, Some(AnalysisError::EngineUnavailable { index: 0, source }));
        }

        for ply in &replay.plies {
            let response = match self.engine.evaluate(&ply.fen, self.depth) {
                Ok(response) => response,
                Err(source) => {
                    warn!(index = ply.index, error = %source, "Engine evaluation failed");
                    let error = AnalysisError::EngineUnavailable {
                        index: ply.index,
                        source,
                    };
                    return (scored, Some(error));
                }
            };

            // The engine reports from the side to move in the evaluated
            // position, which is the opponent of the player who just moved.
            let score = analysis::normalize_score(response.score, ply.side.opposite());
            scored.push(ScoredMove {
                move_index: ply.index,
                fen: ply.fen.clone(),
                score,
                pv: response.pv.join(" "),
                best_move: response.best_move,
                san: ply.san.clone(),
                move_uci: ply.played.uci(),
                side: ply.side,
            });
        }

        (scored, None)
    }
}

/// One-shot convenience around [`Analyzer`].
pub fn analyze_pgn<E: Engine>(
    engine: &mut E,
    pgn: &str,
    depth: u32,
) -> Result<AnalysisReport, AnalysisFailure> {
    Analyzer::new(engine, depth).analyze(pgn)
}
