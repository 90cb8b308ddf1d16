//! Score normalization, move classification and accuracy.
//!
//! Pure functions only; no engine or board access.

use chess_core::Side;
use serde::{Deserialize, Serialize};

use crate::engine::RawScore;

/// Centipawn magnitude a mate score maps to.
pub const MATE_SCORE: i32 = 10_000;

/// Classification thresholds (signed White-relative delta)
const THRESHOLD_BLUNDER: i32 = -300;
const THRESHOLD_MISTAKE: i32 = -150;
const THRESHOLD_INACCURACY: i32 = -60;

/// Accuracy penalties per tag
const PENALTY_INACCURACY: i32 = 2;
const PENALTY_MISTAKE: i32 = 6;
const PENALTY_BLUNDER: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTag {
    #[serde(rename = "OK")]
    Ok,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl QualityTag {
    pub fn penalty(self) -> i32 {
        match self {
            QualityTag::Ok => 0,
            QualityTag::Inaccuracy => PENALTY_INACCURACY,
            QualityTag::Mistake => PENALTY_MISTAKE,
            QualityTag::Blunder => PENALTY_BLUNDER,
        }
    }
}

/// A move with its normalized evaluation, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub move_index: usize,
    pub fen: String,
    pub score: i32,
    pub pv: String,
    pub best_move: Option<String>,
    pub san: String,
    pub move_uci: String,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub move_index: usize,
    /// FEN of the position this move created.
    pub fen: String,
    /// White-relative centipawns; `|score| >= MATE_SCORE` means forced mate.
    pub score: i32,
    pub pv: String,
    pub best_move: Option<String>,
    pub san: String,
    #[serde(rename = "move")]
    pub move_uci: String,
    pub side: Side,
    pub delta: i32,
    pub tag: QualityTag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classifications {
    pub ok: u32,
    pub inaccuracy: u32,
    pub mistake: u32,
    pub blunder: u32,
}

impl Classifications {
    pub fn record(&mut self, tag: QualityTag) {
        match tag {
            QualityTag::Ok => self.ok += 1,
            QualityTag::Inaccuracy => self.inaccuracy += 1,
            QualityTag::Mistake => self.mistake += 1,
            QualityTag::Blunder => self.blunder += 1,
        }
    }

    /// Tally the records played by `side`.
    pub fn for_side(records: &[EvaluationRecord], side: Side) -> Self {
        let mut out = Self::default();
        for record in records.iter().filter(|r| r.side == side) {
            out.record(record.tag);
        }
        out
    }
}

/// Convert a raw engine score into White-relative centipawns.
///
/// `side_to_move` is the side to move in the evaluated position, which is
/// the perspective the engine reports from. Mate scores collapse to
/// `±MATE_SCORE`; mate 0 means the side to move is already mated. Centipawn
/// values are clamped to `±(MATE_SCORE - 1)`.
pub fn normalize_score(score: Option<RawScore>, side_to_move: Side) -> i32 {
    let mover_cp = match score {
        None => return 0,
        // Centipawns stay strictly inside the mate band.
        Some(RawScore::Centipawns(cp)) => cp.clamp(-(MATE_SCORE - 1), MATE_SCORE - 1),
        Some(RawScore::Mate(n)) if n > 0 => MATE_SCORE,
        Some(RawScore::Mate(_)) => -MATE_SCORE,
    };
    mover_cp * side_to_move.sign()
}

pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE
}

pub fn classify_delta(delta: i32) -> QualityTag {
    if delta <= THRESHOLD_BLUNDER {
        QualityTag::Blunder
    } else if delta <= THRESHOLD_MISTAKE {
        QualityTag::Mistake
    } else if delta <= THRESHOLD_INACCURACY {
        QualityTag::Inaccuracy
    } else {
        QualityTag::Ok
    }
}

/// Tag each move by the change from the previous score. The first move is
/// compared against 0.
pub fn classify_moves(scored: Vec<ScoredMove>) -> Vec<EvaluationRecord> {
    let mut prev = 0;
    scored
        .into_iter()
        .map(|m| {
            let delta = m.score.saturating_sub(prev);
            prev = m.score;
            EvaluationRecord {
                move_index: m.move_index,
                fen: m.fen,
                score: m.score,
                pv: m.pv,
                best_move: m.best_move,
                san: m.san,
                move_uci: m.move_uci,
                side: m.side,
                delta,
                tag: classify_delta(delta),
            }
        })
        .collect()
}

pub fn compute_accuracy<'a>(tags: impl IntoIterator<Item = &'a QualityTag>) -> u8 {
    let total: i32 = tags.into_iter().map(|t| t.penalty()).sum();
    (100 - total).clamp(0, 100) as u8
}

/// Human-readable score: pawns with sign, or `#+` / `#-` for forced mates.
pub fn format_score(score: i32) -> String {
    if is_mate_score(score) {
        if score > 0 { "#+".to_string() } else { "#-".to_string() }
    } else {
        format!("{:+.2}", score as f64 / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(scores: &[i32]) -> Vec<ScoredMove> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoredMove {
                move_index: i,
                fen: String::new(),
                score,
                pv: String::new(),
                best_move: None,
                san: format!("m{i}"),
                move_uci: String::new(),
                side: if i % 2 == 0 { Side::White } else { Side::Black },
            })
            .collect()
    }

    #[test]
    fn test_normalize_centipawns() {
        assert_eq!(normalize_score(Some(RawScore::Centipawns(35)), Side::White), 35);
        assert_eq!(normalize_score(Some(RawScore::Centipawns(35)), Side::Black), -35);
        assert_eq!(normalize_score(Some(RawScore::Centipawns(-80)), Side::Black), 80);
    }

    #[test]
    fn test_normalize_mate() {
        assert_eq!(normalize_score(Some(RawScore::Mate(-2)), Side::Black), 10_000);
        assert_eq!(normalize_score(Some(RawScore::Mate(3)), Side::Black), -10_000);
        assert_eq!(normalize_score(Some(RawScore::Mate(1)), Side::White), 10_000);
        assert_eq!(normalize_score(Some(RawScore::Mate(0)), Side::White), -10_000);
        assert!(is_mate_score(normalize_score(Some(RawScore::Mate(5)), Side::White)));
    }

    #[test]
    fn test_normalize_extreme_centipawns() {
        assert_eq!(normalize_score(Some(RawScore::Centipawns(i32::MIN)), Side::Black), 9_999);
        assert_eq!(normalize_score(Some(RawScore::Centipawns(i32::MAX)), Side::Black), -9_999);
        assert_eq!(normalize_score(Some(RawScore::Centipawns(25_000)), Side::White), 9_999);
        assert!(!is_mate_score(normalize_score(Some(RawScore::Centipawns(i32::MIN)), Side::White)));
    }

    #[test]
    fn test_classify_moves_extreme_scores() {
        let records = classify_moves(scored(&[i32::MAX, i32::MIN]));
        assert_eq!(records[1].delta, i32::MIN);
        assert_eq!(records[1].tag, QualityTag::Blunder);
    }

    #[test]
    fn test_normalize_missing_score() {
        assert_eq!(normalize_score(None, Side::White), 0);
        assert_eq!(normalize_score(None, Side::Black), 0);
    }

    #[test]
    fn test_classification_ladder() {
        assert_eq!(classify_delta(-300), QualityTag::Blunder);
        assert_eq!(classify_delta(-299), QualityTag::Mistake);
        assert_eq!(classify_delta(-150), QualityTag::Mistake);
        assert_eq!(classify_delta(-149), QualityTag::Inaccuracy);
        assert_eq!(classify_delta(-60), QualityTag::Inaccuracy);
        assert_eq!(classify_delta(-59), QualityTag::Ok);
        assert_eq!(classify_delta(500), QualityTag::Ok);
    }

    #[test]
    fn test_classify_moves_deltas() {
        let records = classify_moves(scored(&[30, -50, 400, 20]));
        let deltas: Vec<i32> = records.iter().map(|r| r.delta).collect();
        assert_eq!(deltas, vec![30, -80, 450, -380]);
        let tags: Vec<QualityTag> = records.iter().map(|r| r.tag).collect();
        assert_eq!(
            tags,
            vec![QualityTag::Ok, QualityTag::Inaccuracy, QualityTag::Ok, QualityTag::Blunder]
        );
    }

    #[test]
    fn test_calculate_accuracy() {
        assert_eq!(compute_accuracy(&[QualityTag::Ok; 40]), 100);
        assert_eq!(compute_accuracy(&[] as &[QualityTag]), 100);
        assert_eq!(
            compute_accuracy(&[QualityTag::Inaccuracy, QualityTag::Mistake, QualityTag::Blunder]),
            77
        );
        assert_eq!(compute_accuracy(&[QualityTag::Blunder; 6]), 10);
        assert_eq!(compute_accuracy(&[QualityTag::Blunder; 7]), 0);
        assert_eq!(compute_accuracy(&[QualityTag::Blunder; 30]), 0);
    }

    #[test]
    fn test_classifications_per_side() {
        let records = classify_moves(scored(&[0, -400, -400, -600]));
        let white = Classifications::for_side(&records, Side::White);
        let black = Classifications::for_side(&records, Side::Black);
        assert_eq!(white, Classifications { ok: 2, inaccuracy: 0, mistake: 0, blunder: 0 });
        assert_eq!(black, Classifications { ok: 0, inaccuracy: 0, mistake: 1, blunder: 1 });
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(35), "+0.35");
        assert_eq!(format_score(-120), "-1.20");
        assert_eq!(format_score(0), "+0.00");
        assert_eq!(format_score(10_000), "#+");
        assert_eq!(format_score(-10_000), "#-");
    }

    #[test]
    fn test_tag_serialization() {
        assert_eq!(serde_json::to_string(&QualityTag::Ok).unwrap(), r#""OK""#);
        assert_eq!(serde_json::to_string(&QualityTag::Blunder).unwrap(), r#""Blunder""#);
    }
}
