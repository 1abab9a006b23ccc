use std::path::PathBuf;

use draughts_core::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("game {game} failed: {source}")]
    Game { game: u32, source: GameError },
}
