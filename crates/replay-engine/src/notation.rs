//! Display text for the move currently on the board.

use crate::board::Board;
use replay_core::{Color, PieceKind, Variant};
use std::fmt;

/// The current move split into the parts a renderer draws separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notation {
    pub code: String,
    /// Set only for White's moves.
    pub move_number: Option<u32>,
    /// `"12. "` before a White move, `"12... "` before a Black one.
    pub prefix: String,
    pub symbol: String,
    pub suffix: String,
    /// `" (result)"` once the game is finished.
    pub result: String,
}

impl Notation {
    pub fn from_board(board: &Board) -> Self {
        let Some(mv) = board.current_move() else {
            return Notation::default();
        };
        let white = mv.color == Color::White;
        let prefix = if white {
            format!("{}. ", mv.number)
        } else {
            format!("{}... ", mv.number)
        };

        // Dark hides the opponent's moves only while the game is running;
        // the finished board shows the full record, unlike live play.
        let hidden = board.variant() == Variant::Dark
            && !board.is_finished()
            && mv.color != board.orientation();
        let (symbol, suffix) = if hidden {
            (String::new(), "?".to_string())
        } else {
            let mut chars = mv.code.chars();
            let symbol = chars
                .next()
                .filter(char::is_ascii_uppercase)
                .and_then(|c| PieceKind::from_code(c).ok())
                .and_then(|kind| kind.symbol(mv.color));
            match symbol {
                Some(symbol) => (symbol.to_string(), chars.as_str().to_string()),
                None => (String::new(), mv.code.clone()),
            }
        };

        let result = if board.is_finished() {
            let text = board.result();
            if text.is_empty() {
                String::new()
            } else {
                format!(" ({text})")
            }
        } else {
            String::new()
        };

        Notation {
            code: mv.code.clone(),
            move_number: white.then_some(mv.number),
            prefix,
            symbol,
            suffix,
            result,
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.prefix, self.symbol, self.suffix, self.result)
    }
}
