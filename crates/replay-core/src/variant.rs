//! Named chess variants.

use crate::{Dimensions, PieceKind};
use std::fmt;

/// A rule-set recognized by the replayer. `Standard` covers games without a
/// `Variant` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Standard,
    Extinction,
    ThreeChecks,
    Anti,
    KnightRelay,
    Atomic,
    CheshireCat,
    RacingKings,
    Knightmate,
    Corner,
    Fortress,
    Horde,
    FischerRandom,
    IceAge,
    Ambiguous,
    LosAlamos,
    Legan,
    Screen,
    CrazyScreen,
    Loop,
    Embassy,
    Grand,
    Massacre,
    Janus,
    CapablancaRandom,
    Dark,
}

impl Variant {
    /// Every named variant (excluding `Standard`).
    pub const NAMED: [Variant; 25] = [
        Variant::Extinction,
        Variant::ThreeChecks,
        Variant::Anti,
        Variant::KnightRelay,
        Variant::Atomic,
        Variant::CheshireCat,
        Variant::RacingKings,
        Variant::Knightmate,
        Variant::Corner,
        Variant::Fortress,
        Variant::Horde,
        Variant::FischerRandom,
        Variant::IceAge,
        Variant::Ambiguous,
        Variant::LosAlamos,
        Variant::Legan,
        Variant::Screen,
        Variant::CrazyScreen,
        Variant::Loop,
        Variant::Embassy,
        Variant::Grand,
        Variant::Massacre,
        Variant::Janus,
        Variant::CapablancaRandom,
        Variant::Dark,
    ];

    /// The name used in `Variant` tags.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Standard => "Standard",
            Variant::Extinction => "Extinction",
            Variant::ThreeChecks => "Three Checks",
            Variant::Anti => "Anti",
            Variant::KnightRelay => "Knight Relay",
            Variant::Atomic => "Atomic",
            Variant::CheshireCat => "Cheshire Cat",
            Variant::RacingKings => "Racing Kings",
            Variant::Knightmate => "Knightmate",
            Variant::Corner => "Corner",
            Variant::Fortress => "Fortress",
            Variant::Horde => "Horde",
            Variant::FischerRandom => "Fischer Random",
            Variant::IceAge => "Ice Age",
            Variant::Ambiguous => "Ambiguous",
            Variant::LosAlamos => "Los Alamos",
            Variant::Legan => "Legan",
            Variant::Screen => "Screen",
            Variant::CrazyScreen => "Crazy Screen",
            Variant::Loop => "Loop",
            Variant::Embassy => "Embassy",
            Variant::Grand => "Grand",
            Variant::Massacre => "Massacre",
            Variant::Janus => "Janus",
            Variant::CapablancaRandom => "Capablanca Random",
            Variant::Dark => "Dark",
        }
    }

    /// Matches a tag value against the named variants, ignoring case and
    /// surrounding whitespace. Returns `None` for unrecognized names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::NAMED
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(name))
    }

    /// Board size the variant is played on.
    pub const fn dimensions(self) -> Dimensions {
        let (width, height) = match self {
            Variant::LosAlamos => (6, 6),
            Variant::Embassy | Variant::Janus | Variant::CapablancaRandom => (10, 8),
            Variant::Grand => (10, 10),
            _ => (8, 8),
        };
        match Dimensions::new(width, height) {
            Some(dims) => dims,
            None => Dimensions::STANDARD,
        }
    }

    /// The piece that castles and whose check is highlighted.
    pub const fn royal_kind(self) -> PieceKind {
        match self {
            Variant::Knightmate => PieceKind::Knight,
            _ => PieceKind::King,
        }
    }

    /// Variants whose castling rook is searched for instead of sitting in a corner.
    pub const fn has_random_castling(self) -> bool {
        matches!(self, Variant::FischerRandom | Variant::CapablancaRandom)
    }

    /// Variants whose starting layout must come from a FEN tag.
    pub const fn requires_fen(self) -> bool {
        matches!(
            self,
            Variant::Corner
                | Variant::Fortress
                | Variant::FischerRandom
                | Variant::Screen
                | Variant::CrazyScreen
                | Variant::Embassy
                | Variant::Janus
                | Variant::CapablancaRandom
        )
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Standard
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_case_insensitively() {
        assert_eq!(Variant::from_name("Three Checks"), Some(Variant::ThreeChecks));
        assert_eq!(Variant::from_name("three checks"), Some(Variant::ThreeChecks));
        assert_eq!(Variant::from_name("  DARK "), Some(Variant::Dark));
        assert_eq!(
            Variant::from_name("capablanca random"),
            Some(Variant::CapablancaRandom)
        );
        assert_eq!(Variant::from_name("Crazyhouse"), None);
        assert_eq!(Variant::from_name(""), None);
    }

    #[test]
    fn every_named_variant_roundtrips() {
        for variant in Variant::NAMED {
            assert_eq!(Variant::from_name(variant.name()), Some(variant));
        }
    }

    #[test]
    fn board_sizes() {
        assert_eq!(Variant::Standard.dimensions(), Dimensions::STANDARD);
        assert_eq!(Variant::LosAlamos.dimensions(), Dimensions::new(6, 6).unwrap());
        assert_eq!(Variant::Embassy.dimensions(), Dimensions::new(10, 8).unwrap());
        assert_eq!(Variant::Janus.dimensions().width(), 10);
        assert_eq!(Variant::Grand.dimensions(), Dimensions::new(10, 10).unwrap());
        assert_eq!(Variant::Atomic.dimensions(), Dimensions::STANDARD);
    }

    #[test]
    fn knightmate_castles_with_the_knight() {
        assert_eq!(Variant::Knightmate.royal_kind(), PieceKind::Knight);
        assert_eq!(Variant::Standard.royal_kind(), PieceKind::King);
    }
}
