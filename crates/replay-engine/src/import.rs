//! PGN-like game import.
//!
//! A game file is a block of `[Key "Value"]` tag lines followed by move text.
//! Move numbers (`12.`, `12...`, or glued to the move as `12.e4`) set the
//! number and side of the following token; `{...}` comments are skipped and
//! a result token ends the move text.

use crate::error::ReplayError;
use crate::game::GameRecord;
use lazy_static::lazy_static;
use regex::Regex;
use replay_core::{Color, Move, NotationError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r#"^\[([^\s\]]+)\s+"(.*)"\]$"#).unwrap();
    static ref COMMENT_RE: Regex = Regex::new(r"\{[^}]*\}").unwrap();
    static ref MOVE_NUMBER_RE: Regex = Regex::new(r"^(\d+)(\.+)(.*)$").unwrap();
}

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Errors that can occur while importing a game.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("move {number} '{token}': {source}")]
    Move {
        number: u32,
        token: String,
        #[source]
        source: ReplayError,
    },
}

impl ImportError {
    /// The move token that caused the failure, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            ImportError::Move { token, .. } => Some(token),
            ImportError::Io { .. } => None,
        }
    }
}

/// Reads and imports a game file. The game is named after the file stem.
pub fn import_file(path: &Path) -> Result<GameRecord, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    import_str(&name, &text)
}

/// Imports a game from its text.
pub fn import_str(name: &str, text: &str) -> Result<GameRecord, ImportError> {
    let mut game = GameRecord::new(name);
    game.set_text(text);

    let mut move_text = String::new();
    for line in text.lines() {
        let line = line.trim();
        if let Some(caps) = TAG_RE.captures(line) {
            game.add_metadata(&caps[1], &caps[2]);
        } else if !line.is_empty() {
            move_text.push_str(line);
            move_text.push(' ');
        }
    }

    if let Some(tag) = game.variant_tag() {
        if replay_core::Variant::from_name(tag).is_none() {
            warn!(game = name, variant = tag, "unrecognized variant, using standard rules");
        }
    }

    let ctx = game.parse_context();
    let move_text = COMMENT_RE.replace_all(&move_text, " ");
    let mut number = 1;
    let mut color = Color::White;
    for raw in move_text.split_whitespace() {
        if RESULT_TOKENS.contains(&raw) {
            break;
        }
        let token = match MOVE_NUMBER_RE.captures(raw) {
            Some(caps) => {
                number = caps[1].parse().map_err(|_| ImportError::Move {
                    number,
                    token: raw.to_string(),
                    source: NotationError::Malformed {
                        token: raw.to_string(),
                        reason: "move number is out of range",
                    }
                    .into(),
                })?;
                color = if caps[2].len() >= 3 {
                    Color::Black
                } else {
                    Color::White
                };
                match caps.get(3).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
                    Some(rest) => rest,
                    None => continue,
                }
            }
            None => raw,
        };
        let mv = Move::parse(token, number, color, &ctx).map_err(|e| ImportError::Move {
            number,
            token: token.to_string(),
            source: e.into(),
        })?;
        game.push_move(mv);
        if color == Color::Black {
            number += 1;
        }
        color = color.opposite();
    }

    debug!(
        game = name,
        variant = %game.variant(),
        moves = game.moves().len(),
        "imported game"
    );
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_core::{PieceKind, Square, Variant};

    const SAMPLE: &str = r#"[Event "Casual game"]
[Site "BrainKing.com"]
[Date "2006.03.07"]
[White "alice"]
[Black "bob"]
[Result "0-1"]

1. e4 e5 2. Nf3 {a comment} Nc6 3. Bb5 a6
4. O-O Nf6 0-1
"#;

    #[test]
    fn tags_and_moves() {
        let game = import_str("sample", SAMPLE).unwrap();
        assert_eq!(game.name(), "sample");
        assert_eq!(game.white(), Some("alice"));
        assert_eq!(game.site(), Some("BrainKing.com"));
        assert_eq!(game.result(), Some("0-1"));
        assert_eq!(game.orientation(), Color::Black);
        assert_eq!(game.moves().len(), 8);

        let moves = game.moves();
        assert_eq!(moves[0].code, "e4");
        assert_eq!(moves[0].color, Color::White);
        assert_eq!(moves[1].color, Color::Black);
        assert_eq!(moves[1].number, 1);
        assert_eq!(moves[3].code, "Nc6");
        assert_eq!(moves[3].number, 2);
        assert!(moves[6].is_castling_short());
        assert_eq!(moves[7].number, 4);
        assert_eq!(moves[7].kind, Some(PieceKind::Knight));
    }

    #[test]
    fn glued_and_black_move_numbers() {
        let game = import_str("g", "12.e4 12...d5 13.exd5 *").unwrap();
        let moves = game.moves();
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].number, 12);
        assert_eq!(moves[1].color, Color::Black);
        assert_eq!(moves[1].number, 12);
        assert_eq!(moves[2].number, 13);
        assert_eq!(moves[2].color, Color::White);
    }

    #[test]
    fn castling_and_ambiguous_tokens_are_not_results() {
        let text = "[Variant \"Ambiguous\"]\n1. ?-e4 0-0-0 2. O-O ?-d5 1/2-1/2";
        let game = import_str("g", text).unwrap();
        assert_eq!(game.variant(), Variant::Ambiguous);
        assert_eq!(game.moves().len(), 4);
        assert!(game.moves()[0].is_ambiguous());
        assert!(game.moves()[1].is_castling_long());
        assert_eq!(game.moves()[3].to, Square::from_algebraic("d5"));
    }

    #[test]
    fn moves_use_variant_dimensions() {
        let text = "[Variant \"Grand\"]\n1. e5 e6 2. Cj10 *";
        let game = import_str("g", text).unwrap();
        assert_eq!(game.moves()[2].to, Square::from_algebraic("j10"));
    }

    #[test]
    fn malformed_token_names_the_token() {
        let err = import_str("g", "1. e4 zz99 2. Nf3").unwrap_err();
        assert_eq!(err.token(), Some("zz99"));
        assert!(matches!(
            err,
            ImportError::Move {
                number: 1,
                source: ReplayError::Notation(_),
                ..
            }
        ));
    }

    #[test]
    fn oversized_move_number_is_rejected() {
        let err = import_str("g", "1. e4 e5 99999999999. Nf3 *").unwrap_err();
        assert_eq!(err.token(), Some("99999999999."));
        assert!(matches!(
            err,
            ImportError::Move {
                number: 2,
                source: ReplayError::Notation(NotationError::Malformed { .. }),
                ..
            }
        ));
    }

    #[test]
    fn screenshot_tags_survive_import() {
        let game = import_str("g", "1. e4[opening] e5").unwrap();
        assert_eq!(game.moves()[0].screenshot.as_deref(), Some("opening"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = import_file(Path::new("/nonexistent/game.pgn")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
        assert_eq!(err.token(), None);
    }
}
