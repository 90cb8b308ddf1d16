//! PGN review CLI
//!
//! Reads one PGN game from a file (or stdin), evaluates every position with a
//! local Stockfish and prints the report as JSON.
//!
//! Usage: analyze-pgn [--depth N] [--summary] [PATH]

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use serde_json::json;
use tracing::{error, info};

use game_analysis::analysis::{format_score, QualityTag};
use game_analysis::config::{parse_positive, AnalysisConfig};
use game_analysis::stockfish::StockfishSession;
use game_analysis::{AnalysisReport, Analyzer};

struct CliArgs {
    depth: Option<u32>,
    summary: bool,
    path: Option<String>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = CliArgs {
        depth: None,
        summary: false,
        path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--depth" => {
                let value = iter.next().context("--depth needs a value")?;
                args.depth = Some(parse_positive("--depth", &value)?);
            }
            "--summary" => args.summary = true,
            "-" => args.path = None,
            _ => args.path = Some(arg),
        }
    }
    Ok(args)
}

fn read_pgn(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}")),
        None => {
            let mut pgn = String::new();
            std::io::stdin()
                .read_to_string(&mut pgn)
                .context("reading PGN from stdin")?;
            Ok(pgn)
        }
    }
}

fn print_summary(report: &AnalysisReport) {
    for record in &report.evals {
        let marker = match record.tag {
            QualityTag::Ok => "",
            QualityTag::Inaccuracy => "?!",
            QualityTag::Mistake => "?",
            QualityTag::Blunder => "??",
        };
        println!(
            "{:>3}. {:<5} {:<8} {:>7}  best {:<6} {:?}{}",
            record.move_index / 2 + 1,
            record.side.to_string(),
            record.san,
            format_score(record.score),
            record.best_move.as_deref().unwrap_or("-"),
            record.tag,
            marker,
        );
    }
    let w = report.classifications.white;
    let b = report.classifications.black;
    println!(
        "white: {} inaccuracies, {} mistakes, {} blunders",
        w.inaccuracy, w.mistake, w.blunder
    );
    println!(
        "black: {} inaccuracies, {} mistakes, {} blunders",
        b.inaccuracy, b.mistake, b.blunder
    );
    println!("accuracy: {}", report.accuracy);
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let args = parse_args()?;
    let mut config = AnalysisConfig::from_env()?;
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    info!(
        stockfish_path = %config.stockfish_path,
        depth = config.depth,
        "Config loaded"
    );

    let pgn = read_pgn(args.path.as_deref())?;
    let session = StockfishSession::start(&config).context("starting engine")?;
    let mut analyzer = Analyzer::new(session, config.depth);
    let outcome = analyzer.analyze(&pgn);
    analyzer.into_engine().quit();

    match outcome {
        Ok(report) => {
            if args.summary {
                print_summary(&report);
            } else {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            error!(error = %failure, move_index = ?failure.move_index(), "Analysis failed");
            let body = json!({
                "ok": false,
                "error": failure.to_string(),
                "move_index": failure.move_index(),
                "game": failure.game,
                "fens": failure.fens,
                "evals": failure.records,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
