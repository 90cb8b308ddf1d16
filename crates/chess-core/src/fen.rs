//! Forsyth–Edwards serialization of a [`Position`].

use crate::position::Position;

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Render all six FEN fields.
pub fn to_fen(position: &Position) -> String {
    let en_passant = position
        .en_passant
        .map_or_else(|| "-".to_string(), |sq| sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        placement(position),
        position.side_to_move.fen_char(),
        castling(position),
        en_passant,
        position.halfmove_clock,
        position.fullmove_number,
    )
}

/// Piece placement field, rank 8 first.
pub fn placement(position: &Position) -> String {
    let mut out = String::with_capacity(64);
    for (i, row) in position.rows().enumerate() {
        if i > 0 {
            out.push('/');
        }
        let mut empty = 0u8;
        for cell in row {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
    }
    out
}

fn castling(position: &Position) -> String {
    let rights = position.castling;
    let s: String = [
        (rights.white_king_side, 'K'),
        (rights.white_queen_side, 'Q'),
        (rights.black_king_side, 'k'),
        (rights.black_queen_side, 'q'),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, c)| *c)
    .collect();

    if s.is_empty() {
        "-".to_string()
    } else {
        s
    }
}
