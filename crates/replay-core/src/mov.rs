//! Recorded moves and the notation parser that produces them.
//!
//! Notation is read right to left: suffixes and the destination square are
//! unambiguous, while origin information to their left may be partial or
//! missing entirely. Whatever the token leaves open is completed later by
//! the engine against the current board.

use crate::square::column_index;
use crate::{Color, Dimensions, PieceKind, Square, Variant};
use std::fmt;
use thiserror::Error;

/// Errors produced while reading a notation token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("malformed move '{token}': {reason}")]
    Malformed { token: String, reason: &'static str },

    #[error("move '{token}' names unknown piece code '{code}'")]
    UnknownPieceCode { token: String, code: char },
}

/// Boolean markers carried by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags(u16);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const CHECK: u16 = 0b0000_0001;
    pub const CHECKMATE: u16 = 0b0000_0010;
    pub const CASTLE_SHORT: u16 = 0b0000_0100;
    pub const CASTLE_LONG: u16 = 0b0000_1000;
    pub const CAPTURE: u16 = 0b0001_0000;
    pub const RELAYED: u16 = 0b0010_0000;
    pub const AMBIGUOUS: u16 = 0b0100_0000;
    pub const PLACE: u16 = 0b1000_0000;

    #[inline]
    pub const fn new(flags: u16) -> Self {
        MoveFlags(flags & 0xFF)
    }

    #[inline]
    pub const fn contains(self, flag: u16) -> bool {
        (self.0 & flag) == flag
    }

    #[inline]
    pub fn insert(&mut self, flag: u16) {
        self.0 |= flag;
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Board context a token is read against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    pub variant: Variant,
    pub dims: Dimensions,
}

impl ParseContext {
    /// Context for a variant on its own board size.
    pub const fn new(variant: Variant) -> Self {
        ParseContext {
            variant,
            dims: variant.dimensions(),
        }
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(Variant::Standard)
    }
}

/// One recorded move.
///
/// Origin coordinates start out as whatever the notation spelled out and are
/// completed by the engine; after the move has been applied its squares are
/// cleared again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Full-move number the move was recorded under.
    pub number: u32,
    /// Notation with any screenshot tag removed. Empty for the placeholder move.
    pub code: String,
    pub color: Color,
    /// Moving (or dropped) piece kind; unknown for ambiguous-chess moves.
    pub kind: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub from_row: Option<u8>,
    pub from_column: Option<u8>,
    pub to: Option<Square>,
    pub flags: MoveFlags,
    /// Tag of a screenshot requested after this move (`e4[shot1]`).
    pub screenshot: Option<String>,
}

impl Move {
    /// The placeholder that shows the starting position before the first move.
    pub fn empty() -> Self {
        Move {
            number: 0,
            code: String::new(),
            color: Color::White,
            kind: None,
            promotion: None,
            from_row: None,
            from_column: None,
            to: None,
            flags: MoveFlags::NONE,
            screenshot: None,
        }
    }

    /// Reads one notation token.
    ///
    /// # Errors
    ///
    /// Returns [`NotationError`] if the token matches no recognized shape or
    /// names an unknown piece.
    pub fn parse(
        token: &str,
        number: u32,
        color: Color,
        ctx: &ParseContext,
    ) -> Result<Self, NotationError> {
        Parser::new(token, ctx).parse(number, color)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.to.is_none()
    }

    /// The origin square, once both coordinates are known.
    #[inline]
    pub fn from(&self) -> Option<Square> {
        Square::new(self.from_row?, self.from_column?)
    }

    #[inline]
    pub fn set_from(&mut self, square: Square) {
        self.from_row = Some(square.row());
        self.from_column = Some(square.column());
    }

    /// Forgets every square once the move has been applied.
    pub fn clear_squares(&mut self) {
        self.from_row = None;
        self.from_column = None;
        self.to = None;
    }

    #[inline]
    pub fn is_pawn(&self) -> bool {
        self.kind == Some(PieceKind::Pawn)
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.flags.contains(MoveFlags::CHECK)
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.flags.contains(MoveFlags::CHECKMATE)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub fn is_castling_short(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLE_SHORT)
    }

    #[inline]
    pub fn is_castling_long(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLE_LONG)
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.is_castling_short() || self.is_castling_long()
    }

    #[inline]
    pub fn is_relayed(&self) -> bool {
        self.flags.contains(MoveFlags::RELAYED)
    }

    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        self.flags.contains(MoveFlags::AMBIGUOUS)
    }

    #[inline]
    pub fn is_place(&self) -> bool {
        self.flags.contains(MoveFlags::PLACE)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(start)");
        }
        let dots = match self.color {
            Color::White => ".",
            Color::Black => "...",
        };
        write!(f, "{}{} {}", self.number, dots, self.code)
    }
}

/// Splits a trailing `[tag]` off a token.
fn split_screenshot(token: &str) -> Option<(&str, Option<String>)> {
    if !token.ends_with(']') {
        return Some((token, None));
    }
    let open = token.rfind('[')?;
    let tag = &token[open + 1..token.len() - 1];
    Some((&token[..open], Some(tag.to_string())))
}

/// Right-to-left reader over one token.
struct Parser<'a> {
    token: &'a str,
    ctx: &'a ParseContext,
}

impl<'a> Parser<'a> {
    fn new(token: &'a str, ctx: &'a ParseContext) -> Self {
        Parser {
            token: token.trim(),
            ctx,
        }
    }

    fn malformed(&self, reason: &'static str) -> NotationError {
        NotationError::Malformed {
            token: self.token.to_string(),
            reason,
        }
    }

    fn piece(&self, code: char) -> Result<PieceKind, NotationError> {
        PieceKind::from_code(code).map_err(|e| NotationError::UnknownPieceCode {
            token: self.token.to_string(),
            code: e.0,
        })
    }

    fn parse(&self, number: u32, color: Color) -> Result<Move, NotationError> {
        let (code, screenshot) = split_screenshot(self.token)
            .ok_or_else(|| self.malformed("unterminated screenshot tag"))?;
        let mut mv = Move {
            number,
            code: code.to_string(),
            color,
            screenshot,
            ..Move::empty()
        };

        let chars: Vec<char> = code.chars().collect();
        let mut end = chars.len();
        match chars.last() {
            None => return Err(self.malformed("empty move")),
            Some('#') => {
                mv.flags.insert(MoveFlags::CHECK | MoveFlags::CHECKMATE);
                end -= 1;
            }
            Some('+') => {
                mv.flags.insert(MoveFlags::CHECK);
                end -= 1;
            }
            Some(_) => {}
        }

        let body: String = chars[..end].iter().collect();
        if let Some(destination) = body.strip_prefix("?-") {
            mv.flags.insert(MoveFlags::AMBIGUOUS);
            mv.to = Some(self.square(destination)?);
            return Ok(mv);
        }
        match body.as_str() {
            "O-O-O" | "0-0-0" => return self.castle(mv, true),
            "O-O" | "0-0" => return self.castle(mv, false),
            _ => {}
        }

        self.parse_piece_move(mv, &chars[..end])
    }

    fn castle(&self, mut mv: Move, long: bool) -> Result<Move, NotationError> {
        let variant = self.ctx.variant;
        let row = mv.color.back_row(self.ctx.dims.height());
        let to_column = match (variant, long) {
            (Variant::Janus, true) => 8,
            (Variant::Embassy, true) => 7,
            (_, true) => 2,
            (Variant::Embassy | Variant::Janus, false) => 1,
            (_, false) => 6,
        };
        mv.flags.insert(if long {
            MoveFlags::CASTLE_LONG
        } else {
            MoveFlags::CASTLE_SHORT
        });
        mv.kind = Some(variant.royal_kind());
        mv.from_row = Some(row);
        mv.from_column = Some(4);
        mv.to = Some(
            self.ctx
                .dims
                .square(row as i32, to_column)
                .ok_or_else(|| self.malformed("castling does not fit the board"))?,
        );
        Ok(mv)
    }

    fn parse_piece_move(&self, mut mv: Move, chars: &[char]) -> Result<Move, NotationError> {
        let mut end = chars.len();

        if let Some(promotion) = self.promotion(chars, &mut end)? {
            mv.promotion = Some(promotion);
        }
        if end > 0 && chars[end - 1] == 'R' {
            mv.flags.insert(MoveFlags::RELAYED);
            end -= 1;
            if mv.promotion.is_none() {
                mv.promotion = self.promotion(chars, &mut end)?;
            }
        }

        let row = self
            .row_before(chars, &mut end)
            .ok_or_else(|| self.malformed("missing destination row"))?;
        let column = end
            .checked_sub(1)
            .and_then(|i| column_index(chars[i]))
            .ok_or_else(|| self.malformed("missing destination column"))?;
        end -= 1;
        mv.to = Some(
            self.ctx
                .dims
                .square(row as i32, column as i32)
                .ok_or_else(|| self.malformed("destination is off the board"))?,
        );

        let prefix = &chars[..end];
        match prefix.last() {
            Some('@') => {
                mv.flags.insert(MoveFlags::PLACE);
                mv.kind = Some(match &prefix[..prefix.len() - 1] {
                    [] => PieceKind::Pawn,
                    [code] if code.is_ascii_uppercase() => self.piece(*code)?,
                    _ => return Err(self.malformed("unexpected characters before drop")),
                });
            }
            Some('x') => {
                mv.flags.insert(MoveFlags::CAPTURE);
                self.disambiguate(&mut mv, &prefix[..prefix.len() - 1])?;
            }
            _ => self.disambiguate(&mut mv, prefix)?,
        }
        Ok(mv)
    }

    /// Consumes a trailing `=<code>` suffix.
    fn promotion(&self, chars: &[char], end: &mut usize) -> Result<Option<PieceKind>, NotationError> {
        if *end >= 2 && chars[*end - 2] == '=' {
            let kind = self.piece(chars[*end - 1])?;
            *end -= 2;
            return Ok(Some(kind));
        }
        Ok(None)
    }

    /// Consumes a one- or two-digit row code ending at `end`.
    fn row_before(&self, chars: &[char], end: &mut usize) -> Option<u8> {
        if *end >= 2 && chars[*end - 2] == '1' && chars[*end - 1] == '0' {
            *end -= 2;
            return Some(9);
        }
        let digit = chars.get(end.checked_sub(1)?)?.to_digit(10)?;
        if digit == 0 {
            return None;
        }
        *end -= 1;
        Some(digit as u8 - 1)
    }

    /// Reads origin hints and the piece letter from what precedes the destination.
    fn disambiguate(&self, mv: &mut Move, chars: &[char]) -> Result<(), NotationError> {
        let dims = self.ctx.dims;
        let mut end = chars.len();
        if let Some(row) = self.row_before(chars, &mut end) {
            if row >= dims.height() {
                return Err(self.malformed("origin row is off the board"));
            }
            mv.from_row = Some(row);
        }
        if let Some(column) = end.checked_sub(1).and_then(|i| column_index(chars[i])) {
            if column >= dims.width() {
                return Err(self.malformed("origin column is off the board"));
            }
            mv.from_column = Some(column);
            end -= 1;
        }
        mv.kind = Some(match &chars[..end] {
            [] => PieceKind::Pawn,
            [code] if code.is_ascii_uppercase() => self.piece(*code)?,
            _ => return Err(self.malformed("unrecognized piece or origin")),
        });
        Ok(())
    }

    fn square(&self, s: &str) -> Result<Square, NotationError> {
        Square::from_algebraic(s)
            .filter(|&sq| self.ctx.dims.contains(sq))
            .ok_or_else(|| self.malformed("invalid destination square"))
    }
}
