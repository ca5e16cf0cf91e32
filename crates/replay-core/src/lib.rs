//! Core types for replaying recorded chess games.
//!
//! This crate provides the I/O-free building blocks shared by the engine:
//! - [`Color`], [`Piece`] and the [`PieceKind`] catalog with movement geometry
//! - [`Square`] and [`Dimensions`] for boards up to 10×10
//! - [`Variant`] for the supported rule-sets
//! - [`Move`] and its notation parser
//! - FEN-like placement decoding and encoding

mod color;
mod fen;
mod mov;
mod piece;
mod square;
mod variant;

pub use color::Color;
pub use fen::{decode_placement, encode_placement, FenError, STARTPOS};
pub use mov::{Move, MoveFlags, NotationError, ParseContext};
pub use piece::{
    Delta, Movement, Piece, PieceKind, UnknownPieceCode, BISHOP_DELTAS, KING_DELTAS,
    KNIGHT_DELTAS, ROOK_DELTAS, SLIDE_DISTANCE,
};
pub use square::{column_index, row_index, Dimensions, Square, COLUMN_CODES, MAX_SIDE, ROW_CODES};
pub use variant::Variant;
