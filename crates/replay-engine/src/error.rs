//! Errors raised while building or replaying a game.

use replay_core::{FenError, NotationError, UnknownPieceCode};
use thiserror::Error;

/// Failure that aborts the replay of the current game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("cannot resolve move '{token}': {reason}")]
    OriginResolution { token: String, reason: String },

    #[error(transparent)]
    UnknownPieceCode(#[from] UnknownPieceCode),

    #[error("unsupported variant configuration: {0}")]
    VariantConfiguration(String),

    #[error(transparent)]
    Fen(#[from] FenError),
}

impl ReplayError {
    pub(crate) fn origin(token: &str, reason: impl Into<String>) -> Self {
        ReplayError::OriginResolution {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
