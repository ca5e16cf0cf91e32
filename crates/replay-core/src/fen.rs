//! FEN-like piece placement for boards of any supported size.
//!
//! Only the placement field is meaningful to a replay; side to move,
//! castling rights and clocks are ignored when present.

use crate::{Dimensions, Piece, Square, UnknownPieceCode, Variant};
use thiserror::Error;

/// Errors that can occur when decoding a placement string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error(transparent)]
    UnknownPieceCode(#[from] UnknownPieceCode),

    #[error("placement does not fit a {expected} board: {detail}")]
    DimensionMismatch { expected: Dimensions, detail: String },
}

/// Maps the Embassy letters (M = marshal, C = cardinal) onto catalog codes.
fn remap(variant: Variant, c: char) -> char {
    if variant != Variant::Embassy {
        return c;
    }
    match c {
        'M' => 'C',
        'm' => 'c',
        'C' => 'A',
        'c' => 'a',
        other => other,
    }
}

/// Decodes the placement field of `fen` into occupied squares.
///
/// Ranks are listed from the top row down. A run of digits counts empty
/// squares, so `10` is a single run of ten on wide boards.
pub fn decode_placement(
    fen: &str,
    dims: Dimensions,
    variant: Variant,
) -> Result<Vec<(Square, Piece)>, FenError> {
    let placement = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| FenError::InvalidPiecePlacement("empty FEN".to_string()))?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != dims.height() as usize {
        return Err(FenError::DimensionMismatch {
            expected: dims,
            detail: format!("{} ranks", ranks.len()),
        });
    }

    let mut pieces = Vec::new();
    for (i, rank) in ranks.iter().enumerate() {
        let row = dims.height() as usize - 1 - i;
        let mut column = 0usize;
        let mut run = 0usize;
        for c in rank.chars() {
            if let Some(digit) = c.to_digit(10) {
                run = run * 10 + digit as usize;
                continue;
            }
            column += run;
            run = 0;
            let piece = Piece::from_fen_char(remap(variant, c))?;
            let square = dims.square(row as i32, column as i32).ok_or_else(|| {
                FenError::DimensionMismatch {
                    expected: dims,
                    detail: format!("rank '{rank}' is too long"),
                }
            })?;
            pieces.push((square, piece));
            column += 1;
        }
        column += run;
        if column != dims.width() as usize {
            return Err(FenError::DimensionMismatch {
                expected: dims,
                detail: format!("rank '{rank}' has {column} squares"),
            });
        }
    }
    Ok(pieces)
}

/// Encodes a grid as a placement string, top row first.
pub fn encode_placement<F>(dims: Dimensions, piece_at: F) -> String
where
    F: Fn(Square) -> Option<Piece>,
{
    let mut out = String::new();
    for row in (0..dims.height()).rev() {
        let mut empty = 0;
        for column in 0..dims.width() {
            let piece = Square::new(row, column).and_then(&piece_at);
            match piece {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if row > 0 {
            out.push('/');
        }
    }
    out
}

/// Standard starting placement.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
