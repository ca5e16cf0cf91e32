//! Piece catalog: kinds, movement geometry, and single-letter codes.

use crate::square::MAX_SIDE;
use crate::Color;
use thiserror::Error;

/// A piece code that maps to no known piece kind.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unknown piece code '{0}'")]
pub struct UnknownPieceCode(pub char);

/// One step of a movement ray, in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delta {
    pub row: i8,
    pub column: i8,
}

impl Delta {
    #[inline]
    pub const fn new(row: i8, column: i8) -> Self {
        Delta { row, column }
    }

    /// True for the (1,2)/(2,1) leaps of a knight.
    #[inline]
    pub const fn is_knight_jump(self) -> bool {
        self.row.abs() == 2 || self.column.abs() == 2
    }

    /// True for single-axis steps.
    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        self.row == 0 || self.column == 0
    }
}

pub const KING_DELTAS: [Delta; 8] = [
    Delta::new(1, 1),
    Delta::new(1, 0),
    Delta::new(1, -1),
    Delta::new(0, 1),
    Delta::new(0, -1),
    Delta::new(-1, 1),
    Delta::new(-1, 0),
    Delta::new(-1, -1),
];

pub const ROOK_DELTAS: [Delta; 4] = [
    Delta::new(1, 0),
    Delta::new(0, 1),
    Delta::new(0, -1),
    Delta::new(-1, 0),
];

pub const BISHOP_DELTAS: [Delta; 4] = [
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, 1),
    Delta::new(-1, -1),
];

pub const KNIGHT_DELTAS: [Delta; 8] = [
    Delta::new(1, 2),
    Delta::new(1, -2),
    Delta::new(-1, 2),
    Delta::new(-1, -2),
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(-2, 1),
    Delta::new(-2, -1),
];

const ARCHBISHOP_DELTAS: [Delta; 12] = [
    Delta::new(1, 2),
    Delta::new(1, -2),
    Delta::new(-1, 2),
    Delta::new(-1, -2),
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(-2, 1),
    Delta::new(-2, -1),
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, 1),
    Delta::new(-1, -1),
];

const CHANCELLOR_DELTAS: [Delta; 12] = [
    Delta::new(1, 2),
    Delta::new(1, -2),
    Delta::new(-1, 2),
    Delta::new(-1, -2),
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(-2, 1),
    Delta::new(-2, -1),
    Delta::new(1, 0),
    Delta::new(0, 1),
    Delta::new(0, -1),
    Delta::new(-1, 0),
];

/// Longest slide any piece can make on the largest supported board.
pub const SLIDE_DISTANCE: u8 = MAX_SIDE - 1;

/// Direction vectors plus the furthest a piece may travel along each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub directions: &'static [Delta],
    pub max_distance: u8,
}

impl Movement {
    const NONE: Movement = Movement {
        directions: &[],
        max_distance: 0,
    };
}

/// Every kind of piece that can appear on a board, including neutral blockers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
    Archbishop = 6,
    Chancellor = 7,
    Janus = 8,
    Hole = 9,
    IceCube = 10,
}

impl PieceKind {
    /// All piece kinds in catalog order.
    pub const ALL: [PieceKind; 11] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
        PieceKind::Archbishop,
        PieceKind::Chancellor,
        PieceKind::Janus,
        PieceKind::Hole,
        PieceKind::IceCube,
    ];

    /// The six kinds of orthodox chess, in catalog order.
    pub const ORTHODOX: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Returns the uppercase single-letter code.
    pub const fn code(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
            PieceKind::Archbishop => 'A',
            PieceKind::Chancellor => 'C',
            PieceKind::Janus => 'J',
            PieceKind::Hole => 'H',
            PieceKind::IceCube => 'I',
        }
    }

    /// Looks up a kind by its code, ignoring case.
    pub const fn from_code(code: char) -> Result<Self, UnknownPieceCode> {
        let kind = match code.to_ascii_uppercase() {
            'K' => PieceKind::King,
            'Q' => PieceKind::Queen,
            'R' => PieceKind::Rook,
            'B' => PieceKind::Bishop,
            'N' => PieceKind::Knight,
            'P' => PieceKind::Pawn,
            'A' => PieceKind::Archbishop,
            'C' => PieceKind::Chancellor,
            'J' => PieceKind::Janus,
            'H' => PieceKind::Hole,
            'I' => PieceKind::IceCube,
            _ => return Err(UnknownPieceCode(code)),
        };
        Ok(kind)
    }

    /// Returns the movement geometry.
    ///
    /// Pawns, holes and ice cubes have no geometry; pawn movement is handled
    /// by dedicated rules in the engine.
    pub const fn movement(self) -> Movement {
        match self {
            PieceKind::King => Movement {
                directions: &KING_DELTAS,
                max_distance: 1,
            },
            PieceKind::Queen => Movement {
                directions: &KING_DELTAS,
                max_distance: SLIDE_DISTANCE,
            },
            PieceKind::Rook => Movement {
                directions: &ROOK_DELTAS,
                max_distance: SLIDE_DISTANCE,
            },
            PieceKind::Bishop => Movement {
                directions: &BISHOP_DELTAS,
                max_distance: SLIDE_DISTANCE,
            },
            PieceKind::Knight => Movement {
                directions: &KNIGHT_DELTAS,
                max_distance: 1,
            },
            PieceKind::Archbishop | PieceKind::Janus => Movement {
                directions: &ARCHBISHOP_DELTAS,
                max_distance: SLIDE_DISTANCE,
            },
            PieceKind::Chancellor => Movement {
                directions: &CHANCELLOR_DELTAS,
                max_distance: SLIDE_DISTANCE,
            },
            PieceKind::Pawn | PieceKind::Hole | PieceKind::IceCube => Movement::NONE,
        }
    }

    /// How far this kind may travel along one of its directions.
    ///
    /// Knight-like kinds leap exactly once along knight offsets and slide
    /// their normal distance along the others.
    #[inline]
    pub const fn distance_along(self, delta: Delta) -> u8 {
        if self.is_knight_like() && delta.is_knight_jump() {
            1
        } else {
            self.movement().max_distance
        }
    }

    /// Kinds that combine a knight leap with another movement.
    #[inline]
    pub const fn is_knight_like(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Archbishop | PieceKind::Chancellor | PieceKind::Janus
        )
    }

    /// Whether the kind takes part in play (blocks rays, can be captured normally).
    #[inline]
    pub const fn is_playable(self) -> bool {
        !matches!(self, PieceKind::Hole | PieceKind::IceCube)
    }

    /// Whether the kind is drawn at all. Holes are rendered as empty gaps.
    #[inline]
    pub const fn is_visible(self) -> bool {
        !matches!(self, PieceKind::Hole)
    }

    /// Lowercase English name.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
            PieceKind::Archbishop => "archbishop",
            PieceKind::Chancellor => "chancellor",
            PieceKind::Janus => "janus",
            PieceKind::Hole => "hole",
            PieceKind::IceCube => "ice cube",
        }
    }

    /// Chess glyph for notation display, if the kind has one.
    pub const fn symbol(self, color: Color) -> Option<&'static str> {
        let white = matches!(color, Color::White);
        match self {
            PieceKind::King => Some(if white { "♔" } else { "♚" }),
            PieceKind::Queen => Some(if white { "♕" } else { "♛" }),
            PieceKind::Rook => Some(if white { "♖" } else { "♜" }),
            PieceKind::Bishop => Some(if white { "♗" } else { "♝" }),
            PieceKind::Knight => Some(if white { "♘" } else { "♞" }),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A piece identity: kind plus owning side. Holes and ice cubes have no side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Option<Color>,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece {
            color: Some(color),
            kind,
        }
    }

    /// A piece belonging to neither side.
    #[inline]
    pub const fn neutral(kind: PieceKind) -> Self {
        Piece { color: None, kind }
    }

    #[inline]
    pub fn has_color(self, color: Color) -> bool {
        self.color == Some(color)
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.kind == kind && self.has_color(color)
    }

    #[inline]
    pub const fn is_playable(self) -> bool {
        self.kind.is_playable()
    }

    /// Returns the FEN character: uppercase for White, lowercase otherwise.
    pub const fn to_fen_char(self) -> char {
        let c = self.kind.code();
        match self.color {
            Some(Color::White) => c,
            _ => c.to_ascii_lowercase(),
        }
    }

    /// Parses a FEN character. Letter case selects the side; neutral kinds
    /// never get one.
    pub fn from_fen_char(c: char) -> Result<Self, UnknownPieceCode> {
        let kind = PieceKind::from_code(c)?;
        if !kind.is_playable() {
            return Ok(Piece::neutral(kind));
        }
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(color, kind))
    }
}
