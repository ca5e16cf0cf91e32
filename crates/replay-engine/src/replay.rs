//! The replay loop: drives a [`Board`] through a recorded game and hands
//! every frame to a [`Renderer`].

use crate::board::{Board, BoardSettings};
use crate::error::ReplayError;
use crate::game::GameRecord;
use crate::setup;
use replay_core::Move;
use thiserror::Error;
use tracing::debug;

/// Pause after each move.
pub const FRAMES_BETWEEN_MOVES: u32 = 15;
/// How long an ambiguous move's target is shown before it is played.
pub const FRAMES_TO_SHOW_TARGET: u32 = 25;
/// Hold on the final position.
pub const FRAMES_AFTER_LAST_MOVE: u32 = 150;

/// Frame pacing for a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySettings {
    pub board: BoardSettings,
    pub frames_between_moves: u32,
    pub frames_to_show_target: u32,
    pub frames_after_last_move: u32,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        ReplaySettings {
            board: BoardSettings::default(),
            frames_between_moves: FRAMES_BETWEEN_MOVES,
            frames_to_show_target: FRAMES_TO_SHOW_TARGET,
            frames_after_last_move: FRAMES_AFTER_LAST_MOVE,
        }
    }
}

/// What a rendered frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// An ambiguous move's destination is highlighted.
    Target,
    /// Pieces are mid-animation.
    Step,
    /// The position after a move, held still.
    Pause,
    /// A still image was requested with this tag.
    Screenshot(&'a str),
    /// The finished game.
    Final,
}

/// Consumer of replay frames. It can look at the board but never change it.
pub trait Renderer {
    fn render(&mut self, board: &Board, frame: &Frame<'_>);
}

impl<F> Renderer for F
where
    F: FnMut(&Board, &Frame<'_>),
{
    fn render(&mut self, board: &Board, frame: &Frame<'_>) {
        self(board, frame)
    }
}

/// Why a replay stopped early.
#[derive(Debug, Error)]
pub enum ReplayAbort {
    #[error("cannot set up the starting position: {0}")]
    Setup(#[source] ReplayError),

    #[error("move {number} '{token}': {source}")]
    Move {
        number: u32,
        token: String,
        #[source]
        source: ReplayError,
    },
}

impl ReplayAbort {
    /// The move token that stopped the replay, if a move did.
    pub fn token(&self) -> Option<&str> {
        match self {
            ReplayAbort::Move { token, .. } => Some(token),
            ReplayAbort::Setup(_) => None,
        }
    }
}

/// A completed replay.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub board: Board,
    pub moves: usize,
    pub frames: u64,
}

impl ReplaySummary {
    pub fn result(&self) -> String {
        self.board.result()
    }

    pub fn placement(&self) -> String {
        self.board.placement()
    }
}

struct Output<'r, R: ?Sized> {
    renderer: &'r mut R,
    frames: u64,
}

impl<R: Renderer + ?Sized> Output<'_, R> {
    fn emit(&mut self, board: &Board, frame: Frame<'_>, count: u32) {
        for _ in 0..count {
            self.renderer.render(board, &frame);
            self.frames += 1;
        }
    }
}

/// Replays a game from its starting position to the end.
///
/// # Errors
///
/// Returns [`ReplayAbort`] at the first move that cannot be played. The
/// board the renderer last saw reflects every move committed before it.
pub fn replay<R>(
    record: &GameRecord,
    settings: &ReplaySettings,
    renderer: &mut R,
) -> Result<ReplaySummary, ReplayAbort>
where
    R: Renderer + ?Sized,
{
    let mut board = setup::starting_board(record, &settings.board).map_err(ReplayAbort::Setup)?;
    let mut out = Output {
        renderer,
        frames: 0,
    };
    debug!(game = record.name(), moves = record.moves().len(), "replaying");

    let start = Move::empty();
    for mv in std::iter::once(&start).chain(record.moves()) {
        let abort = |source| ReplayAbort::Move {
            number: mv.number,
            token: mv.code.clone(),
            source,
        };
        if mv.is_ambiguous() {
            board.mark_target(mv);
            out.emit(&board, Frame::Target, settings.frames_to_show_target);
        }
        board.start_move(mv).map_err(abort)?;
        while board.is_animating() {
            board.step();
            out.emit(&board, Frame::Step, 1);
        }
        board.commit().map_err(abort)?;
        if let Some(tag) = mv.screenshot.as_deref() {
            out.emit(&board, Frame::Screenshot(tag), 1);
        }
        out.emit(&board, Frame::Pause, settings.frames_between_moves);
    }

    board.finish();
    out.emit(&board, Frame::Final, settings.frames_after_last_move);
    let frames = out.frames;
    Ok(ReplaySummary {
        board,
        moves: record.moves().len(),
        frames,
    })
}
