//! Replay configuration loaded from `replay.toml`.
//!
//! Every field has a default, so a missing file or a partial one is fine.

use replay_engine::{
    BoardSettings, Canvas, ReplaySettings, FRAMES_AFTER_LAST_MOVE, FRAMES_BETWEEN_MOVES,
    FRAMES_TO_SHOW_TARGET, MOVE_STEPS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this configuration.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Canvas the board is drawn on, in pixels.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_side")]
    pub width: u32,
    #[serde(default = "default_canvas_side")]
    pub height: u32,
    #[serde(default = "default_board_size")]
    pub board_size: u32,
}

fn default_canvas_side() -> u32 {
    Canvas::default().width
}

fn default_board_size() -> u32 {
    Canvas::default().board_size
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: default_canvas_side(),
            height: default_canvas_side(),
            board_size: default_board_size(),
        }
    }
}

/// Top-level replay configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Interpolation steps per move.
    #[serde(default = "default_move_steps")]
    pub move_steps: u32,
    #[serde(default = "default_frames_between_moves")]
    pub frames_between_moves: u32,
    #[serde(default = "default_frames_to_show_target")]
    pub frames_to_show_target: u32,
    #[serde(default = "default_frames_after_last_move")]
    pub frames_after_last_move: u32,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

fn default_move_steps() -> u32 {
    MOVE_STEPS
}

fn default_frames_between_moves() -> u32 {
    FRAMES_BETWEEN_MOVES
}

fn default_frames_to_show_target() -> u32 {
    FRAMES_TO_SHOW_TARGET
}

fn default_frames_after_last_move() -> u32 {
    FRAMES_AFTER_LAST_MOVE
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            move_steps: default_move_steps(),
            frames_between_moves: default_frames_between_moves(),
            frames_to_show_target: default_frames_to_show_target(),
            frames_after_last_move: default_frames_after_last_move(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl ReplayConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `replay.toml` in the
    /// current directory is used if present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.clone(),
                source,
            })?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration path, `replay.toml` in the working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("replay.toml")
    }

    /// Settings handed to the replay driver.
    pub fn settings(&self) -> ReplaySettings {
        ReplaySettings {
            board: BoardSettings {
                canvas: Canvas {
                    width: self.canvas.width,
                    height: self.canvas.height,
                    board_size: self.canvas.board_size,
                },
                move_steps: self.move_steps,
            },
            frames_between_moves: self.frames_between_moves,
            frames_to_show_target: self.frames_to_show_target,
            frames_after_last_move: self.frames_after_last_move,
        }
    }
}
