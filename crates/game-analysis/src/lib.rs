pub use chess_core;

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod stockfish;

pub use analyzer::{analyze_pgn, AnalysisReport, Analyzer};
pub use engine::{Engine, EngineResponse, RawScore, ScriptedEngine};
pub use error::{AnalysisError, AnalysisFailure, EngineError};
