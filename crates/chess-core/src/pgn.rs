//! Lightweight regex-based PGN tokenizer.
//!
//! Splits a game into header tags and mainline SAN tokens. Tokens are not
//! validated here; malformed SAN surfaces when the tracker applies it.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::NotationError;
use crate::game_data::{Game, SanToken};
use crate::types::Side;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).unwrap());
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());
static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r";[^\n]*").unwrap());
static NAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\d+").unwrap());
static MOVE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.+\s?").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

impl Game {
    /// Parse PGN text into headers and move tokens.
    ///
    /// Fails with [`NotationError::NoMovetext`] when no move token survives.
    pub fn parse(pgn: &str) -> Result<Game, NotationError> {
        let game = Game {
            headers: parse_headers(pgn),
            moves: extract_moves(pgn),
        };
        if game.moves.is_empty() {
            return Err(NotationError::NoMovetext);
        }
        Ok(game)
    }
}

/// Collect `[Key "Value"]` tags. Later duplicates overwrite earlier ones.
pub fn parse_headers(pgn: &str) -> HashMap<String, String> {
    HEADER_RE
        .captures_iter(pgn)
        .map(|cap| (cap[1].to_string(), cap[2].to_string()))
        .collect()
}

/// Extract mainline SAN tokens, alternating sides from White.
pub fn extract_moves(pgn: &str) -> Vec<SanToken> {
    let text = COMMENT_RE.replace_all(pgn, "");
    let text = BRACKET_RE.replace_all(&text, "");
    let text = LINE_COMMENT_RE.replace_all(&text, "");
    let text = NAG_RE.replace_all(&text, "");
    let text = MOVE_NUMBER_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    let mut moves = Vec::new();
    let mut side = Side::White;
    for token in text.trim().split(' ') {
        if token.is_empty() || RESULT_TOKENS.contains(&token) {
            break;
        }
        moves.push(SanToken {
            san: token.to_string(),
            side,
        });
        side = side.opposite();
    }
    moves
}
