//! chess-replay - replays recorded chess games and reports how each ended.
//!
//! Every file is imported and replayed on its own. A game that fails is
//! logged with the file and the offending move token, and the remaining
//! files are still processed unless `--fail-fast` is given.

mod config;
mod json_output;

use clap::Parser;
use config::ReplayConfig;
use json_output::GameSummary;
use replay_engine::{
    import_file, replay, Board, Frame, ImportError, ReplayAbort, ReplaySettings, Renderer,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Replays recorded chess games.
#[derive(Parser)]
#[command(name = "chess-replay")]
#[command(about = "Replays recorded chess games and reports their results")]
struct Args {
    /// Game files to replay
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to the replay configuration (defaults to replay.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON object per game instead of text
    #[arg(long)]
    json: bool,

    /// Stop at the first game that fails
    #[arg(long)]
    fail_fast: bool,
}

/// Why a single game could not be replayed.
#[derive(Debug, Error)]
enum GameFailure {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Replay(#[from] ReplayAbort),
}

impl GameFailure {
    fn token(&self) -> Option<&str> {
        match self {
            GameFailure::Import(e) => e.token(),
            GameFailure::Replay(e) => e.token(),
        }
    }
}

/// Collects screenshot requests; the other frames need no output here.
#[derive(Default)]
struct ScreenshotLog {
    tags: Vec<String>,
}

impl Renderer for ScreenshotLog {
    fn render(&mut self, board: &Board, frame: &Frame<'_>) {
        if let Frame::Screenshot(tag) = frame {
            debug!(tag, notation = %board.notation(), "screenshot requested");
            self.tags.push(tag.to_string());
        }
    }
}

fn replay_file(path: &Path, settings: &ReplaySettings) -> Result<GameSummary, GameFailure> {
    let record = import_file(path)?;
    let mut screenshots = ScreenshotLog::default();
    let replayed = replay(&record, settings, &mut screenshots)?;
    Ok(GameSummary::new(&record, &replayed, screenshots.tags))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config = ReplayConfig::load(args.config.as_deref())?;
    let settings = config.settings();

    let mut failed = 0;
    for path in &args.files {
        match replay_file(path, &settings) {
            Ok(summary) if args.json => println!("{}", summary.to_json()?),
            Ok(summary) => println!("{summary}"),
            Err(e) => {
                failed += 1;
                error!(
                    file = %path.display(),
                    token = e.token().unwrap_or("-"),
                    "replay failed: {e}"
                );
                if args.fail_fast {
                    break;
                }
            }
        }
    }

    info!(games = args.files.len(), failed, "done");
    if failed > 0 {
        anyhow::bail!("{failed} of {} games failed", args.files.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_game(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_replay_file_summarizes_the_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_game(
            dir.path(),
            "scholar.pgn",
            "[Result \"1-0\"]\n1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7#[mate] 1-0\n",
        );

        let summary = replay_file(&path, &ReplaySettings::default()).unwrap();

        assert_eq!(summary.name, "scholar");
        assert_eq!(summary.moves, 7);
        assert_eq!(summary.result, "Checkmate");
        assert_eq!(summary.screenshots, vec!["mate".to_string()]);
    }

    #[test]
    fn test_import_failure_names_the_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_game(dir.path(), "bad.pgn", "1. e4 zz99 *\n");

        let err = replay_file(&path, &ReplaySettings::default()).unwrap_err();

        assert!(matches!(err, GameFailure::Import(_)));
        assert_eq!(err.token(), Some("zz99"));
    }

    #[test]
    fn test_replay_failure_names_the_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_game(dir.path(), "impossible.pgn", "1. e4 e5 2. Bb6 *\n");

        let err = replay_file(&path, &ReplaySettings::default()).unwrap_err();

        assert!(matches!(err, GameFailure::Replay(_)));
        assert_eq!(err.token(), Some("Bb6"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = replay_file(&dir.path().join("nope.pgn"), &ReplaySettings::default()).unwrap_err();
        assert_eq!(err.token(), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["chess-replay", "--json", "--config", "r.toml", "a.pgn", "b.pgn"]);
        assert!(args.json);
        assert!(!args.fail_fast);
        assert_eq!(args.config, Some(PathBuf::from("r.toml")));
        assert_eq!(args.files.len(), 2);
    }
}
