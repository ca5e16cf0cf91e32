//! Result text derived from the final position.
//!
//! Variants with their own win condition are checked first, in a fixed
//! order; when none applies the recorded move and outcome decide.

use crate::board::Board;
use crate::game::Outcome;
use replay_core::{Color, PieceKind, Variant};

/// A win condition that may describe the position.
type Rule = fn(&Board) -> Option<String>;

/// Variant-specific win conditions, consulted in table order.
const VARIANT_RULES: [(Variant, Rule); 7] = [
    (Variant::Extinction, extinction),
    (Variant::ThreeChecks, third_check),
    (Variant::Anti, all_pieces_lost),
    (Variant::Atomic, king_exploded),
    (Variant::Dark, king_captured),
    (Variant::RacingKings, last_row_reached),
    (Variant::Massacre, no_more_moves),
];

/// Result text for the board, or an empty string if nothing has been decided.
pub fn derive_result(board: &Board) -> String {
    VARIANT_RULES
        .iter()
        .filter(|(variant, _)| *variant == board.variant())
        .find_map(|(_, rule)| rule(board))
        .or_else(|| recorded(board))
        .unwrap_or_default()
}

fn count(board: &Board, color: Color, kind: Option<PieceKind>) -> usize {
    board
        .pieces()
        .filter(|(_, bp)| {
            let piece = bp.piece();
            piece.has_color(color) && kind.map_or(true, |k| piece.kind == k)
        })
        .count()
}

/// Black is checked before White throughout: a simultaneous loss counts
/// against Black.
const LOSER_ORDER: [Color; 2] = [Color::Black, Color::White];

fn side(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn extinction(board: &Board) -> Option<String> {
    PieceKind::ORTHODOX.iter().find_map(|&kind| {
        LOSER_ORDER
            .iter()
            .find(|&&color| count(board, color, Some(kind)) == 0)
            .map(|&color| format!("{} lost all {}s", side(color), kind.name()))
    })
}

fn third_check(board: &Board) -> Option<String> {
    Color::ALL
        .iter()
        .any(|&color| board.checks(color) >= 3)
        .then(|| "Third check".to_string())
}

fn all_pieces_lost(board: &Board) -> Option<String> {
    LOSER_ORDER
        .iter()
        .find(|&&color| count(board, color, None) == 0)
        .map(|&color| format!("{} lost all pieces", side(color)))
}

fn king_gone(board: &Board, how: &str) -> Option<String> {
    LOSER_ORDER
        .iter()
        .find(|&&color| count(board, color, Some(PieceKind::King)) == 0)
        .map(|&color| format!("{} king {}", side(color), how))
}

fn king_exploded(board: &Board) -> Option<String> {
    king_gone(board, "exploded")
}

fn king_captured(board: &Board) -> Option<String> {
    king_gone(board, "captured")
}

fn last_row_reached(board: &Board) -> Option<String> {
    let last = board.dimensions().height() - 1;
    let arrived: Vec<Color> = Color::ALL
        .into_iter()
        .filter(|&color| {
            board.pieces().any(|(square, bp)| {
                bp.piece().is(color, PieceKind::King) && square.row() == last
            })
        })
        .collect();
    match arrived.as_slice() {
        [] => None,
        [color] => Some(format!("{} king reached the last row", side(*color))),
        _ => Some("Both kings reached the last row".to_string()),
    }
}

fn no_more_moves(_board: &Board) -> Option<String> {
    Some("No more moves".to_string())
}

/// Falls back to the last move's checkmate flag, then the recorded result.
fn recorded(board: &Board) -> Option<String> {
    if board.current_move().is_some_and(|mv| mv.is_checkmate()) {
        return Some("Checkmate".to_string());
    }
    match board.outcome() {
        Outcome::WhiteWon => Some("Black resigned".to_string()),
        Outcome::BlackWon => Some("White resigned".to_string()),
        Outcome::Draw => Some("Draw".to_string()),
        Outcome::Unknown => None,
    }
}
