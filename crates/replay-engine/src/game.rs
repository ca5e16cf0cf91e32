//! Game records: metadata tags plus the parsed move list.

use chrono::NaiveDate;
use replay_core::{Color, Dimensions, Move, ParseContext, Variant};
use std::collections::BTreeMap;
use std::fmt;

const RESULT: &str = "Result";

/// Final result recorded in the `Result` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    WhiteWon,
    BlackWon,
    Draw,
    #[default]
    Unknown,
}

impl Outcome {
    /// Interprets a `Result` tag value.
    pub fn from_tag(value: &str) -> Self {
        match value.trim() {
            "1-0" => Outcome::WhiteWon,
            "0-1" => Outcome::BlackWon,
            "1/2-1/2" => Outcome::Draw,
            _ => Outcome::Unknown,
        }
    }

    /// The side drawn at the bottom of the board: the loser's opponent
    /// unless Black won.
    pub const fn orientation(self) -> Color {
        match self {
            Outcome::BlackWon => Color::Black,
            _ => Color::White,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::WhiteWon => "1-0",
            Outcome::BlackWon => "0-1",
            Outcome::Draw => "1/2-1/2",
            Outcome::Unknown => "*",
        };
        write!(f, "{s}")
    }
}

/// One imported game.
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    name: String,
    metadata: BTreeMap<String, String>,
    moves: Vec<Move>,
    text: String,
}

impl GameRecord {
    pub fn new(name: impl Into<String>) -> Self {
        GameRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores a tag; a repeated key keeps the last value.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn metadata_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn white(&self) -> Option<&str> {
        self.metadata("White")
    }

    pub fn black(&self) -> Option<&str> {
        self.metadata("Black")
    }

    pub fn result(&self) -> Option<&str> {
        self.metadata(RESULT)
    }

    pub fn date(&self) -> Option<&str> {
        self.metadata("Date")
    }

    pub fn site(&self) -> Option<&str> {
        self.metadata("Site")
    }

    pub fn event(&self) -> Option<&str> {
        self.metadata("Event")
    }

    /// Starting placement, if a non-blank `FEN` tag is present.
    pub fn fen(&self) -> Option<&str> {
        self.metadata("FEN").filter(|fen| !fen.trim().is_empty())
    }

    /// Raw `Variant` tag value.
    pub fn variant_tag(&self) -> Option<&str> {
        self.metadata("Variant").filter(|v| !v.trim().is_empty())
    }

    /// The rule-set to replay with. Unrecognized names mean standard rules.
    pub fn variant(&self) -> Variant {
        self.variant_tag()
            .and_then(Variant::from_name)
            .unwrap_or_default()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.variant().dimensions()
    }

    pub fn outcome(&self) -> Outcome {
        self.result().map(Outcome::from_tag).unwrap_or_default()
    }

    pub fn orientation(&self) -> Color {
        self.outcome().orientation()
    }

    /// The `Date` tag (`yyyy.MM.dd`) as `d. MMMM yyyy`.
    pub fn formatted_date(&self) -> Option<String> {
        let date = self.date()?.trim();
        NaiveDate::parse_from_str(date, "%Y.%m.%d")
            .ok()
            .map(|d| d.format("%-d. %B %Y").to_string())
    }

    /// Context used to parse this game's move tokens.
    pub fn parse_context(&self) -> ParseContext {
        ParseContext::new(self.variant())
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn push_move(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// The full source text the record was imported from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
