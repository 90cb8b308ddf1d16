//! Stockfish engine wrapper using UCI protocol (async I/O)
//!
//! [`UciEngine`] speaks UCI over tokio process pipes. [`StockfishSession`]
//! owns a current-thread runtime and exposes it through the blocking
//! [`Engine`] trait, one position at a time.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::runtime::Runtime;

use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::engine::{Engine, EngineResponse, RawScore};
use crate::error::EngineError;

/// Stockfish engine instance
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Spawn a new engine process and initialize UCI
    pub async fn spawn(path: &str, threads: u32, hash_mb: u32) -> Result<Self, EngineError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(EngineError::Spawn)?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| EngineError::Spawn(std::io::Error::other("no stdin pipe")))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| EngineError::Spawn(std::io::Error::other("no stdout pipe")))?;

        let mut engine = Self {
            process,
            stdin,
            stdout: BufReader::new(stdout),
        };

        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        // Configure for analysis
        engine
            .send(&format!("setoption name Threads value {threads}"))
            .await?;
        engine
            .send(&format!("setoption name Hash value {hash_mb}"))
            .await?;
        engine.send("setoption name UCI_AnalyseMode value true").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    async fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        debug!(cmd, "SF <");
        self.stdin.write_all(format!("{cmd}\n").as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Read one line; EOF means the engine is gone.
    async fn read_line(
        &mut self,
        line: &mut String,
        waiting_for: &'static str,
    ) -> Result<(), EngineError> {
        line.clear();
        if self.stdout.read_line(line).await? == 0 {
            return Err(EngineError::Closed(waiting_for));
        }
        Ok(())
    }

    async fn wait_for(&mut self, expected: &'static str) -> Result<(), EngineError> {
        let mut line = String::new();
        loop {
            self.read_line(&mut line, expected).await?;
            let trimmed = line.trim();
            debug!(line = trimmed, "SF >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    pub async fn new_game(&mut self) -> Result<(), EngineError> {
        self.send("ucinewgame").await?;
        self.send("isready").await?;
        self.wait_for("readyok").await
    }

    /// Search a position to `depth` and report the last score and PV seen.
    pub async fn evaluate(&mut self, fen: &str, depth: u32) -> Result<EngineResponse, EngineError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go depth {depth}")).await?;

        let mut result = EngineResponse::default();
        let mut line = String::new();
        loop {
            self.read_line(&mut line, "bestmove").await?;
            let trimmed = line.trim();

            if trimmed.starts_with("info") && !trimmed.starts_with("info string") {
                // Terminal positions report `score mate 0` with no PV.
                if let Some(score) = parse_score(trimmed) {
                    result.score = Some(score);
                }
                if trimmed.contains(" pv ") {
                    result.pv = parse_pv(trimmed);
                }
            } else if trimmed.starts_with("bestmove") {
                debug!(line = trimmed, "SF >");
                result.best_move = parse_bestmove(trimmed);
                break;
            }
        }

        Ok(result)
    }

    /// Stop a search in progress and discard its output up to `bestmove`.
    pub async fn stop(&mut self) -> Result<(), EngineError> {
        self.send("stop").await?;
        let mut line = String::new();
        loop {
            self.read_line(&mut line, "bestmove").await?;
            if line.trim().starts_with("bestmove") {
                return Ok(());
            }
        }
    }

    /// Send quit command and wait for process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

const STOP_GRACE: Duration = Duration::from_secs(5);

/// Blocking engine session backed by a private tokio runtime.
pub struct StockfishSession {
    // Declared before `runtime` so the process is killed first on drop.
    engine: UciEngine,
    runtime: Runtime,
    timeout: Option<Duration>,
    /// How long to wait for `bestmove` after stopping a timed-out search.
    stop_grace: Duration,
    /// Set when a timed-out search could not be drained; the pipe may still
    /// hold its output.
    desynced: bool,
}

impl StockfishSession {
    pub fn start(config: &AnalysisConfig) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;
        let engine = runtime.block_on(UciEngine::spawn(
            &config.stockfish_path,
            config.engine_threads,
            config.engine_hash_mb,
        ))?;
        info!(path = %config.stockfish_path, "Stockfish engine ready");

        Ok(Self {
            engine,
            runtime,
            timeout: config.engine_timeout,
            stop_grace: STOP_GRACE,
            desynced: false,
        })
    }

    /// Bring the engine back in step after a timeout, or mark the session
    /// unusable if it does not answer in time.
    fn recover(&mut self) {
        let grace = self.stop_grace;
        let stop = self.engine.stop();
        let drained = self
            .runtime
            .block_on(async { tokio::time::timeout(grace, stop).await });
        match drained {
            Ok(Ok(())) => debug!("Discarded timed-out search"),
            Ok(Err(e)) => {
                warn!(error = %e, "Engine failed while stopping search");
                self.desynced = true;
            }
            Err(_) => {
                warn!(grace = ?grace, "Engine ignored stop");
                self.desynced = true;
            }
        }
    }

    pub fn quit(mut self) {
        self.runtime.block_on(self.engine.quit());
    }
}

impl Engine for StockfishSession {
    fn evaluate(&mut self, fen: &str, depth: u32) -> Result<EngineResponse, EngineError> {
        if self.desynced {
            return Err(EngineError::Desynced);
        }
        let Some(limit) = self.timeout else {
            return self.runtime.block_on(self.engine.evaluate(fen, depth));
        };

        let search = self.engine.evaluate(fen, depth);
        match self
            .runtime
            .block_on(async { tokio::time::timeout(limit, search).await })
        {
            Ok(result) => result,
            Err(_) => {
                self.recover();
                Err(EngineError::Timeout(limit))
            }
        }
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        if self.desynced {
            return Err(EngineError::Desynced);
        }
        self.runtime.block_on(self.engine.new_game())
    }
}

/// Parse `score cp N` or `score mate N` from an info line
fn parse_score(line: &str) -> Option<RawScore> {
    let mut parts = line
        .split_whitespace()
        .skip_while(|part| *part != "score")
        .skip(1);
    let kind = parts.next()?;
    let value = parts.next()?.parse().ok()?;
    match kind {
        "cp" => Some(RawScore::Centipawns(value)),
        "mate" => Some(RawScore::Mate(value)),
        _ => None,
    }
}

/// Parse PV moves from info line
fn parse_pv(line: &str) -> Vec<String> {
    let mut in_pv = false;
    let mut moves = Vec::new();

    for part in line.split_whitespace() {
        if part == "pv" {
            in_pv = true;
            continue;
        }
        if in_pv {
            // PV ends at next keyword or end of line
            if part.starts_with("bmc") || part == "string" {
                break;
            }
            moves.push(part.to_string());
        }
    }

    moves
}

fn parse_bestmove(line: &str) -> Option<String> {
    line.split_whitespace()
        .nth(1)
        .filter(|mv| *mv != "(none)")
        .map(String::from)
}
