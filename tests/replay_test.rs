//! Integration tests: replay real games and compare every emitted FEN with
//! a full-rules board from shakmaty.
//!
//! The en-passant field is left out of the comparison since the tracker
//! never records a target square.

mod common;

use chess_core::{fen_sequence, replay, Game, NotationError, Side};
use shakmaty::{fen::Fen, san::San, Chess, EnPassantMode, Position};

use common::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn reference_fens(game: &Game) -> Vec<String> {
    let mut pos = Chess::default();
    game.moves
        .iter()
        .map(|token| {
            let san: San = token
                .san
                .trim_end_matches(['+', '#'])
                .parse()
                .unwrap_or_else(|_| panic!("bad SAN {}", token.san));
            let mv = san
                .to_move(&pos)
                .unwrap_or_else(|_| panic!("illegal move {}", token.san));
            pos.play_unchecked(&mv);
            Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
        })
        .collect()
}

fn without_en_passant(fen: &str) -> Vec<String> {
    fen.split(' ')
        .enumerate()
        .filter(|(i, _)| *i != 3)
        .map(|(_, field)| field.to_string())
        .collect()
}

fn assert_matches_reference(pgn: &str) {
    let game = Game::parse(pgn).unwrap();
    let ours = fen_sequence(pgn).unwrap();
    let theirs = reference_fens(&game);
    assert_eq!(ours.len(), theirs.len());
    for (i, (a, b)) in ours.iter().zip(&theirs).enumerate() {
        assert_eq!(
            without_en_passant(a),
            without_en_passant(b),
            "FEN mismatch after ply {} ({})",
            i,
            game.moves[i].san
        );
    }
}

// ---------------------------------------------------------------------------
// Cross-checks
// ---------------------------------------------------------------------------

#[test]
fn test_opera_game_matches_reference() {
    assert_matches_reference(OPERA_GAME);
}

#[test]
fn test_promotion_game_matches_reference() {
    assert_matches_reference(PROMOTION_GAME);
}

#[test]
fn test_en_passant_game_matches_reference() {
    assert_matches_reference(EN_PASSANT_GAME);
}

#[test]
fn test_short_opening_matches_reference() {
    assert_matches_reference(SHORT_OPENING);
}

// ---------------------------------------------------------------------------
// Replay properties
// ---------------------------------------------------------------------------

#[test]
fn test_opera_final_position() {
    let fens = fen_sequence(OPERA_GAME).unwrap();
    assert_eq!(fens.len(), OPERA_PLIES);
    assert_eq!(fens.last().map(String::as_str), Some(OPERA_FINAL_FEN));
}

#[test]
fn test_opera_headers_and_sides() {
    let game = Game::parse(OPERA_GAME).unwrap();
    assert_eq!(game.header("White"), Some("Paul Morphy"));
    assert_eq!(game.header("Result"), Some("1-0"));
    assert_eq!(game.len(), OPERA_PLIES);
    for (i, token) in game.moves.iter().enumerate() {
        let expected = if i % 2 == 0 { Side::White } else { Side::Black };
        assert_eq!(token.side, expected);
    }
    assert_eq!(game.moves[22].san, "O-O-O");
    assert_eq!(game.moves[32].san, "Rd8#");
}

#[test]
fn test_side_to_move_alternates() {
    let replayed = replay(&Game::parse(OPERA_GAME).unwrap()).unwrap();
    for ply in &replayed.plies {
        let to_move = ply.fen.split(' ').nth(1).unwrap();
        let expected = if ply.side == Side::White { "b" } else { "w" };
        assert_eq!(to_move, expected, "ply {}", ply.index);
    }
}

#[test]
fn test_every_fen_has_six_fields_and_no_en_passant() {
    for fen in fen_sequence(OPERA_GAME).unwrap() {
        let fields: Vec<&str> = fen.split(' ').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[3], "-");
        assert_eq!(fields[0].split('/').count(), 8);
    }
}

#[test]
fn test_played_moves_in_coordinates() {
    let replayed = replay(&Game::parse(OPERA_GAME).unwrap()).unwrap();
    let uci: Vec<String> = replayed.plies.iter().map(|p| p.played.uci()).collect();
    assert_eq!(uci[0], "e2e4");
    assert_eq!(uci[22], "e1c1");
    assert_eq!(uci[32], "d1d8");

    let promo = replay(&Game::parse(PROMOTION_GAME).unwrap()).unwrap();
    assert_eq!(promo.plies.last().unwrap().played.uci(), "g7h8q");
}

#[test]
fn test_unresolvable_move_reports_index() {
    let failure = fen_sequence("1. e4 e5 2. Ke3 *").unwrap_err();
    assert!(matches!(
        failure.error,
        NotationError::NoOriginFound { index: 2, .. }
    ));
    assert_eq!(failure.partial.len(), 2);
}

#[test]
fn test_garbage_token_is_unparsable() {
    let failure = fen_sequence("1. e4 hello *").unwrap_err();
    assert!(matches!(
        failure.error,
        NotationError::UnparsableToken { index: 1, .. }
    ));
    assert_eq!(failure.partial.len(), 1);
}

#[test]
fn test_empty_movetext() {
    let failure = fen_sequence("[Event \"Casual\"]\n\n*").unwrap_err();
    assert!(matches!(failure.error, NotationError::NoMovetext));
    assert!(failure.partial.is_empty());
}
