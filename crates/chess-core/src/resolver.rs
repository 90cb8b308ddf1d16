//! SAN decomposition and origin-square search.
//!
//! Movement geometry is deliberately simplified: sliding pieces are not
//! checked for blockers and no move is tested for leaving the king in check.
//! The tracker reconstructs positions for evaluation, it does not validate
//! games.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SanError;
use crate::position::Position;
use crate::types::{file_to_col, rank_to_row, PieceKind, Side, Square};

static SAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([KQRBN])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=?([QRBN]))?$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

/// A non-castling SAN token broken into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanMove {
    pub piece: PieceKind,
    pub dest: Square,
    pub capture: bool,
    pub promotion: Option<PieceKind>,
    /// Disambiguation column, from a file letter before the destination.
    pub file_hint: Option<u8>,
    /// Disambiguation row, from a rank digit before the destination.
    pub rank_hint: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedSan {
    Castle(CastleSide),
    Move(SanMove),
}

/// Strip check, mate and annotation glyphs from the end of a token.
fn strip_decorations(san: &str) -> &str {
    san.trim_end_matches(['+', '#', '!', '?'])
}

pub fn parse_san(san: &str) -> Result<ParsedSan, SanError> {
    let core = strip_decorations(san.trim());
    match core {
        "O-O" | "0-0" => return Ok(ParsedSan::Castle(CastleSide::King)),
        "O-O-O" | "0-0-0" => return Ok(ParsedSan::Castle(CastleSide::Queen)),
        _ => {}
    }

    let cap = SAN_RE.captures(core).ok_or(SanError::Unparsable)?;
    let letter = |i: usize| cap.get(i).and_then(|m| m.as_str().chars().next());

    let piece = match letter(1) {
        Some(l) => PieceKind::from_san_letter(l).ok_or(SanError::Unparsable)?,
        None => PieceKind::Pawn,
    };
    let dest = cap
        .get(5)
        .and_then(|m| Square::from_algebraic(m.as_str()))
        .ok_or(SanError::Unparsable)?;
    let promotion = match letter(6) {
        Some(l) => Some(PieceKind::from_san_letter(l).ok_or(SanError::Unparsable)?),
        None => None,
    };

    Ok(ParsedSan::Move(SanMove {
        piece,
        dest,
        capture: cap.get(4).is_some(),
        promotion,
        file_hint: letter(2).and_then(file_to_col),
        rank_hint: letter(3).and_then(rank_to_row),
    }))
}

/// Whether a piece of `kind` on `from` could move to `to` under the
/// simplified geometry. `dest_empty` only matters for pawn pushes.
pub fn can_reach(
    kind: PieceKind,
    side: Side,
    from: Square,
    to: Square,
    capture: bool,
    dest_empty: bool,
) -> bool {
    let dr = to.row() as i32 - from.row() as i32;
    let dc = to.col() as i32 - from.col() as i32;
    if dr == 0 && dc == 0 {
        return false;
    }

    match kind {
        PieceKind::Pawn => {
            let (dir, start_row) = match side {
                Side::White => (-1, 6),
                Side::Black => (1, 1),
            };
            if capture {
                dc.abs() == 1 && dr == dir
            } else {
                dc == 0
                    && dest_empty
                    && (dr == dir || (from.row() == start_row && dr == 2 * dir))
            }
        }
        PieceKind::Knight => dr * dr + dc * dc == 5,
        PieceKind::Bishop => dr.abs() == dc.abs(),
        PieceKind::Rook => dr == 0 || dc == 0,
        PieceKind::Queen => dr == 0 || dc == 0 || dr.abs() == dc.abs(),
        PieceKind::King => dr.abs().max(dc.abs()) == 1,
    }
}

/// Every square holding a piece of the mover's side and the SAN's piece kind
/// that can reach the destination, in row-major scan order.
pub fn candidates(position: &Position, mv: &SanMove) -> Vec<Square> {
    let side = position.side_to_move;
    let dest_empty = position.piece_at(mv.dest).is_none();
    Square::all()
        .filter(|&sq| {
            position
                .piece_at(sq)
                .is_some_and(|p| p.side == side && p.kind == mv.piece)
        })
        .filter(|&sq| can_reach(mv.piece, side, sq, mv.dest, mv.capture, dest_empty))
        .collect()
}

/// Pick the origin square for `mv`.
///
/// The file hint is tried first, then the rank hint. If neither narrows the
/// set, the first candidate in scan order is taken.
pub fn find_origin(position: &Position, mv: &SanMove) -> Result<Square, SanError> {
    let found = candidates(position, mv);

    let by_file = mv
        .file_hint
        .and_then(|col| found.iter().copied().find(|sq| sq.col() == col));
    let by_rank = || {
        mv.rank_hint
            .and_then(|row| found.iter().copied().find(|sq| sq.row() == row))
    };

    by_file
        .or_else(by_rank)
        .or_else(|| found.first().copied())
        .ok_or(SanError::NoOriginFound {
            piece: mv.piece,
            dest: mv.dest,
        })
}
