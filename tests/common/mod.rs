#![allow(dead_code)]

use game_analysis::{EngineResponse, RawScore, ScriptedEngine};

/// Morphy vs Duke of Brunswick and Count Isouard, Paris 1858.
pub const OPERA_GAME: &str = r#"[Event "Paris"]
[Site "Paris FRA"]
[Date "1858.??.??"]
[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 {This is a weak move already.} 4. dxe5 Bxf3
5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5
11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7
16. Qb8+ Nxb8 17. Rd8# 1-0
"#;

pub const OPERA_FINAL_FEN: &str = "1n1Rkb1r/p4ppp/4q3/4p1B1/4P3/8/PPP2PPP/2K5 b k - 1 17";

pub const PROMOTION_GAME: &str =
    "1. h4 g5 2. hxg5 h6 3. gxh6 Bg7 4. hxg7 Nf6 5. gxh8=Q+ *";

pub const EN_PASSANT_GAME: &str = "1. e4 a6 2. e5 d5 3. exd6 *";

pub const SHORT_OPENING: &str = "1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 *";

/// Number of plies in [`OPERA_GAME`].
pub const OPERA_PLIES: usize = 33;

/// Engine that answers every request with the same centipawn score.
pub fn flat_engine(plies: usize, cp: i32) -> ScriptedEngine {
    ScriptedEngine::from_centipawns(&vec![cp; plies])
}

/// Turn White-relative scores into what the engine would report from the
/// side to move after each ply of a game starting with White.
pub fn engine_for_white_scores(scores: &[i32]) -> ScriptedEngine {
    let raw: Vec<i32> = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| if i % 2 == 0 { -s } else { s })
        .collect();
    ScriptedEngine::from_centipawns(&raw)
}

pub fn mate_response(n: i32) -> EngineResponse {
    EngineResponse {
        score: Some(RawScore::Mate(n)),
        ..EngineResponse::default()
    }
}
