//! Per-game summaries, printed as text or as one JSON object per line.

use replay_engine::{GameRecord, ReplaySummary};
use serde::Serialize;
use std::fmt;

/// What the CLI reports for a replayed game.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameSummary {
    /// File stem of the game record.
    pub name: String,
    pub variant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black: Option<String>,
    /// Date as `d. MMMM yyyy`, if the record has a readable one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub moves: usize,
    pub frames: u64,
    /// Result text; empty when the record does not decide the game.
    pub result: String,
    /// Final placement, top row first.
    pub placement: String,
    /// Screenshot tags in the order they were requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
}

impl GameSummary {
    pub fn new(record: &GameRecord, replayed: &ReplaySummary, screenshots: Vec<String>) -> Self {
        GameSummary {
            name: record.name().to_string(),
            variant: record.variant().to_string(),
            white: record.white().map(str::to_string),
            black: record.black().map(str::to_string),
            date: record.formatted_date(),
            moves: replayed.moves,
            frames: replayed.frames,
            result: replayed.result(),
            placement: replayed.placement(),
            screenshots,
        }
    }

    /// Serializes the summary as a single line of JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.variant)?;
        if let (Some(white), Some(black)) = (&self.white, &self.black) {
            write!(f, " {white} vs {black}")?;
        }
        if let Some(date) = &self.date {
            write!(f, ", {date}")?;
        }
        write!(f, ": {} moves", self.moves)?;
        if !self.result.is_empty() {
            write!(f, ", {}", self.result)?;
        }
        Ok(())
    }
}
