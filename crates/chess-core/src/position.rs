//! Single mutable board state, advanced one SAN token at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SanError;
use crate::fen;
use crate::resolver::{self, CastleSide, ParsedSan, SanMove};
use crate::types::{CastlingRights, Piece, PieceKind, Side, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A move the tracker executed, in coordinate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub capture: bool,
}

impl AppliedMove {
    /// Coordinate notation, e.g. `e2e4`, `e7e8q`, `e1g1`.
    pub fn uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            s.push(promo.letter().to_ascii_lowercase());
        }
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [[Option<Piece>; 8]; 8],
    pub side_to_move: Side,
    pub castling: CastlingRights,
    /// Always `None` after a move: double pawn pushes are not recorded.
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    /// The standard starting array, White to move.
    pub fn starting() -> Position {
        let mut board = [[None; 8]; 8];
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board[0][col] = Some(Piece::new(*kind, Side::Black));
            board[1][col] = Some(Piece::new(PieceKind::Pawn, Side::Black));
            board[6][col] = Some(Piece::new(PieceKind::Pawn, Side::White));
            board[7][col] = Some(Piece::new(*kind, Side::White));
        }
        Position {
            board,
            side_to_move: Side::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// An empty board, White to move, no castling rights.
    pub fn empty() -> Position {
        Position {
            board: [[None; 8]; 8],
            side_to_move: Side::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row() as usize][square.col() as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row() as usize][square.col() as usize] = piece;
    }

    /// Rows of the grid, rank 8 first.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; 8]> {
        self.board.iter()
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    /// Apply one SAN token for the side to move, mutating the position.
    ///
    /// On error the position is left untouched.
    pub fn apply_san(&mut self, san: &str) -> Result<AppliedMove, SanError> {
        let applied = match resolver::parse_san(san)? {
            ParsedSan::Castle(side) => self.castle(side),
            ParsedSan::Move(mv) => {
                let from = resolver::find_origin(self, &mv)?;
                self.execute(from, &mv)
            }
        };
        self.finish_turn();
        Ok(applied)
    }

    fn castle(&mut self, castle: CastleSide) -> AppliedMove {
        let side = self.side_to_move;
        let row = side.back_row();
        let (king_to, rook_from, rook_to) = match castle {
            CastleSide::King => (6, 7, 5),
            CastleSide::Queen => (2, 0, 3),
        };
        let at = |col: u8| Square::on_board(row, col);

        self.set_piece(at(4), None);
        self.set_piece(at(rook_from), None);
        self.set_piece(at(king_to), Some(Piece::new(PieceKind::King, side)));
        self.set_piece(at(rook_to), Some(Piece::new(PieceKind::Rook, side)));
        self.castling.clear_side(side);
        self.halfmove_clock += 1;

        AppliedMove {
            piece: PieceKind::King,
            from: at(4),
            to: at(king_to),
            promotion: None,
            capture: false,
        }
    }

    fn execute(&mut self, from: Square, mv: &SanMove) -> AppliedMove {
        let side = self.side_to_move;
        let target = self.piece_at(mv.dest);
        let mut capture = target.is_some();

        // A diagonal pawn capture onto an empty square takes the pawn it passed.
        if mv.piece == PieceKind::Pawn && mv.capture && target.is_none() {
            if let Some(passed) = Square::new(from.row(), mv.dest.col()) {
                let is_enemy_pawn = self
                    .piece_at(passed)
                    .is_some_and(|p| p.kind == PieceKind::Pawn && p.side != side);
                if is_enemy_pawn {
                    self.set_piece(passed, None);
                    capture = true;
                }
            }
        }

        let promotion = mv.promotion.filter(|_| mv.piece == PieceKind::Pawn);
        let placed = Piece::new(promotion.unwrap_or(mv.piece), side);
        self.set_piece(from, None);
        self.set_piece(mv.dest, Some(placed));

        if mv.piece == PieceKind::King {
            self.castling.clear_side(side);
        }
        self.castling.clear_corner(from);
        self.castling.clear_corner(mv.dest);

        if mv.piece == PieceKind::Pawn || capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        AppliedMove {
            piece: mv.piece,
            from,
            to: mv.dest,
            promotion,
            capture,
        }
    }

    fn finish_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        if self.side_to_move == Side::White {
            self.fullmove_number += 1;
        }
        self.en_passant = None;
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fen::to_fen(self))
    }
}
