use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Side;

/// One movetext token as it appeared in the PGN, with the side that played it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanToken {
    pub san: String,
    pub side: Side,
}

/// A parsed game: header tags plus the mainline move tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub headers: HashMap<String, String>,
    pub moves: Vec<SanToken>,
}

impl Game {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
