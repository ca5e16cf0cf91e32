//! Origin resolution: completing a move's starting square from the board.
//!
//! Notation usually names only the destination. Pawns are traced back along
//! their file (or Legan's diagonal); every other piece is found by walking
//! outward from the destination along the mover's directions until the ray
//! hits something.

use crate::board::Board;
use crate::error::ReplayError;
use replay_core::{
    Color, Delta, Move, Piece, PieceKind, Square, Variant, KING_DELTAS, KNIGHT_DELTAS,
    SLIDE_DISTANCE,
};
use tracing::debug;

/// Fills in the origin of `mv` against the current position.
///
/// # Errors
///
/// Returns [`ReplayError::OriginResolution`] if no piece of the mover's kind
/// and color can have made the move.
pub fn resolve_origin(board: &Board, mv: &mut Move) -> Result<(), ReplayError> {
    let to = mv
        .to
        .ok_or_else(|| ReplayError::origin(&mv.code, "move has no destination"))?;
    let kind = mv
        .kind
        .ok_or_else(|| ReplayError::origin(&mv.code, "move names no piece"))?;

    if mv.is_castling() && board.variant().has_random_castling() {
        let row = mv
            .from_row
            .ok_or_else(|| ReplayError::origin(&mv.code, "castling has no home row"))?;
        mv.from_column = find_in_row(board, row, Piece::new(mv.color, kind));
    }

    if mv.from().is_none() {
        if kind == PieceKind::Pawn && board.variant() == Variant::Legan {
            legan_pawn(mv, to)?;
        } else if kind == PieceKind::Pawn && !mv.is_relayed() {
            pawn(board, mv, to)?;
        } else {
            let from = search(board, mv, to, kind)?;
            mv.set_from(from);
        }
    }

    let from = mv
        .from()
        .filter(|&sq| board.dimensions().contains(sq))
        .ok_or_else(|| ReplayError::origin(&mv.code, "origin is off the board"))?;
    match board.piece_at(from) {
        Some(piece) if piece.is(mv.color, kind) => Ok(()),
        Some(piece) => Err(ReplayError::origin(
            &mv.code,
            format!("{} holds a {} instead", from, piece.kind),
        )),
        None => Err(ReplayError::origin(
            &mv.code,
            format!("no {} on {}", kind, from),
        )),
    }
}

fn find_in_row(board: &Board, row: u8, piece: Piece) -> Option<u8> {
    (0..board.dimensions().width())
        .find(|&column| Square::new(row, column).and_then(|sq| board.piece_at(sq)) == Some(piece))
}

fn step_back(to: Square, rows: i32, mv: &Move) -> Result<u8, ReplayError> {
    let row = to.row() as i32 - rows;
    u8::try_from(row).map_err(|_| ReplayError::origin(&mv.code, "pawn origin is off the board"))
}

/// Pawns move straight ahead and capture diagonally.
fn pawn(board: &Board, mv: &mut Move, to: Square) -> Result<(), ReplayError> {
    let dir = mv.color.pawn_direction();
    match mv.from_column {
        Some(column) if column != to.column() => {
            mv.from_row = Some(step_back(to, dir, mv)?);
        }
        _ if mv.is_capture() => {
            return Err(ReplayError::origin(
                &mv.code,
                "pawn capture without an origin column",
            ));
        }
        _ => {
            mv.from_column = Some(to.column());
            let one = step_back(to, dir, mv)?;
            let passable = Square::new(one, to.column())
                .and_then(|sq| board.piece_at(sq))
                .map_or(true, |p| p.kind == PieceKind::Hole);
            mv.from_row = Some(if passable {
                step_back(to, 2 * dir, mv)?
            } else {
                one
            });
        }
    }
    Ok(())
}

/// Legan pawns move diagonally toward the opposite corner and capture
/// orthogonally.
fn legan_pawn(mv: &mut Move, to: Square) -> Result<(), ReplayError> {
    let dir = mv.color.pawn_direction();
    if mv.is_capture() {
        let column = mv.from_column.ok_or_else(|| {
            ReplayError::origin(&mv.code, "pawn capture without an origin column")
        })?;
        mv.from_row = Some(if column == to.column() {
            step_back(to, dir, mv)?
        } else {
            to.row()
        });
    } else {
        mv.from_row = Some(step_back(to, dir, mv)?);
        let column = to.column() as i32 + dir;
        mv.from_column = Some(
            u8::try_from(column)
                .map_err(|_| ReplayError::origin(&mv.code, "pawn origin is off the board"))?,
        );
    }
    Ok(())
}

fn relayed_by_knight(board: &Board, square: Square, color: Color) -> bool {
    KNIGHT_DELTAS.iter().any(|d| {
        square
            .offset(d.row as i32, d.column as i32, board.dimensions())
            .and_then(|sq| board.piece_at(sq))
            .is_some_and(|p| p.is(color, PieceKind::Knight))
    })
}

/// Walks rays out of the destination looking for the mover.
fn search(board: &Board, mv: &Move, to: Square, kind: PieceKind) -> Result<Square, ReplayError> {
    let cheshire_flight = board.variant() == Variant::CheshireCat
        && kind == PieceKind::King
        && !board.has_king_moved(mv.color);
    let directions: &[Delta] = if mv.is_relayed() {
        &KNIGHT_DELTAS
    } else if cheshire_flight {
        &KING_DELTAS
    } else {
        kind.movement().directions
    };
    let distance = |delta: Delta| {
        if mv.is_relayed() {
            1
        } else if cheshire_flight {
            SLIDE_DISTANCE
        } else {
            kind.distance_along(delta)
        }
    };

    let target = Piece::new(mv.color, kind);
    let mut candidates = Vec::new();
    for &delta in directions {
        for n in 1..=distance(delta) as i32 {
            let Some(square) = to.offset(
                delta.row as i32 * n,
                delta.column as i32 * n,
                board.dimensions(),
            ) else {
                break;
            };
            let Some(piece) = board.piece_at(square) else {
                continue;
            };
            if piece.kind == PieceKind::Hole {
                continue;
            }
            let fits = mv.from_row.map_or(true, |r| r == square.row())
                && mv.from_column.map_or(true, |c| c == square.column());
            if piece == target
                && fits
                && (!mv.is_relayed() || relayed_by_knight(board, square, mv.color))
            {
                candidates.push(square);
            }
            break;
        }
    }

    match candidates.as_slice() {
        [] => Err(ReplayError::origin(
            &mv.code,
            format!("no {} can reach {}", kind, to),
        )),
        [only] => Ok(*only),
        [first, ..] => {
            debug!(token = %mv.code, ?candidates, "several origins fit, taking the first");
            Ok(*first)
        }
    }
}
