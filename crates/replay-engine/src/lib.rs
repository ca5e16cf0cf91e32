//! Variant-aware board state machine for replaying recorded chess games.
//!
//! This crate provides:
//! - [`GameRecord`] and the [`import`] functions that read PGN-like game files
//! - [`Board`] - the replay position with its start/step/commit move lifecycle
//! - [`resolve_origin`] - completes a move's origin square from the board
//! - [`starting_board`] - builds the initial position for a variant or FEN tag
//! - [`Notation`] and result text derived from the current position
//! - [`replay`] - runs a whole game against a [`Renderer`]
//!
//! The engine does not check legality. It trusts the recorded game and only
//! reconstructs the positions needed to animate it.
//!
//! # Example
//!
//! ```
//! use replay_engine::{import_str, replay, Board, Frame, ReplaySettings};
//!
//! let game = import_str("example", "1. e4 e5 2. Nf3 Nc6 *").unwrap();
//! let mut frames = 0;
//! let mut count = |_: &Board, _: &Frame<'_>| frames += 1;
//! let summary = replay(&game, &ReplaySettings::default(), &mut count).unwrap();
//! assert_eq!(
//!     summary.placement(),
//!     "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"
//! );
//! ```

mod board;
mod error;
mod game;
pub mod import;
mod layout;
mod notation;
mod replay;
mod resolve;
mod rules;
mod setup;

pub use board::{Board, BoardPiece, BoardSettings, ICE_AGE_INTERVAL, MOVE_STEPS};
pub use error::ReplayError;
pub use game::{GameRecord, Outcome};
pub use import::{import_file, import_str, ImportError};
pub use layout::{Animation, Canvas, Layout, Point};
pub use notation::Notation;
pub use replay::{
    replay, Frame, ReplayAbort, ReplaySettings, ReplaySummary, Renderer, FRAMES_AFTER_LAST_MOVE,
    FRAMES_BETWEEN_MOVES, FRAMES_TO_SHOW_TARGET,
};
pub use resolve::resolve_origin;
pub use rules::derive_result;
pub use setup::{initial_board, starting_board};
