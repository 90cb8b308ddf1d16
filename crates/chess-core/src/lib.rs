//! PGN tokenizing and simplified position reconstruction.

pub mod error;
pub mod fen;
pub mod game_data;
pub mod pgn;
pub mod position;
pub mod replay;
pub mod resolver;
pub mod types;

pub use error::{NotationError, SanError};
pub use game_data::{Game, SanToken};
pub use position::{AppliedMove, Position};
pub use replay::{fen_sequence, replay, Ply, Replay, ReplayFailure};
pub use types::{CastlingRights, Piece, PieceKind, Side, Square};
