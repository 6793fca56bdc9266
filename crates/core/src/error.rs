use std::path::PathBuf;

use crate::types::Tool;

/// Errors building a board from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board side {0} outside supported range 3..=12")]
    InvalidSize(usize),

    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("alphabet needs at least 3 distinct symbols, got {0}")]
    AlphabetTooSmall(usize),

    #[error("no playable layout after {shuffles} shuffles and {regenerations} fresh boards")]
    NoPlayableLayout { shuffles: u32, regenerations: u32 },
}

/// Reasons a swap request is rejected. State is never touched on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    #[error("game is over")]
    GameOver,

    #[error("a reshuffle is pending")]
    ShufflePending,

    #[error("cannot swap a cell with itself")]
    SameCell,

    #[error("cell {index} is outside the board")]
    OutOfBounds { index: usize },

    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent { from: usize, to: usize },

    #[error("swapping {from} and {to} makes no match")]
    NoMatch { from: usize, to: usize },
}

/// Reasons a tool cannot be used right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("{} was already used this game", .0.as_str())]
    AlreadyUsed(Tool),

    #[error("game is over")]
    GameOver,

    #[error("a reshuffle is pending")]
    ShufflePending,

    #[error("{} needs {required} points, have {score}", .tool.as_str())]
    InsufficientScore {
        tool: Tool,
        required: u32,
        score: u32,
    },

    #[error("no move to undo")]
    NoSnapshot,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
