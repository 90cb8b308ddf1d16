//! Analysis configuration from environment variables

use std::env;
use std::time::Duration;

use crate::engine::DEFAULT_DEPTH;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Path to Stockfish binary
    pub stockfish_path: String,

    /// Search depth per position
    pub depth: u32,

    pub engine_threads: u32,

    /// Transposition table size in MB
    pub engine_hash_mb: u32,

    /// Per-position limit; `None` waits for `bestmove` indefinitely
    pub engine_timeout: Option<Duration>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stockfish_path: "/usr/local/bin/stockfish".to_string(),
            depth: DEFAULT_DEPTH,
            engine_threads: 1,
            engine_hash_mb: 256,
            engine_timeout: None,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let number = |name: &'static str, default: u32| -> Result<u32, ConfigError> {
            match lookup(name) {
                None => Ok(default),
                Some(value) => parse_positive(name, &value),
            }
        };

        let engine_timeout = match lookup("ENGINE_TIMEOUT_SECS") {
            None => None,
            Some(value) => Some(Duration::from_secs(
                parse_positive("ENGINE_TIMEOUT_SECS", &value)?.into(),
            )),
        };

        Ok(Self {
            stockfish_path: lookup("STOCKFISH_PATH").unwrap_or(defaults.stockfish_path),
            depth: number("ANALYSIS_DEPTH", defaults.depth)?,
            engine_threads: number("ENGINE_THREADS", defaults.engine_threads)?,
            engine_hash_mb: number("ENGINE_HASH_MB", defaults.engine_hash_mb)?,
            engine_timeout,
        })
    }
}

pub fn parse_positive(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
