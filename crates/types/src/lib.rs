//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no game logic attached, making them usable in any
//! context (core engine, presentation layer, event logs).
//!
//! # Difficulty Presets
//!
//! | Difficulty | Board | Symbols | Moves | Target |
//! |------------|-------|---------|-------|--------|
//! | Easy       | 6x6   | 6       | 20    | 500    |
//! | Medium     | 8x8   | 8       | 20    | 750    |
//! | Hard       | 9x9   | 11      | 20    | 1100   |
//!
//! # Match Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_RUN` | 3 | Shortest run that is removed |
//! | `LINE_CLEAR_RUN` | 4 | Run length that clears its whole row or column |
//! | `WILDCARD_RUN` | 5 | Shortest run that leaves a wildcard tile behind |
//! | `POINTS_PER_TILE` | 20 | Points per matched cell above the 2-cell floor |
//!
//! # Examples
//!
//! ```
//! use fruit_match_types::{Difficulty, Symbol};
//!
//! let rules = Difficulty::Easy.rules();
//! assert_eq!(rules.board_size, 6);
//! assert_eq!(rules.alphabet.len(), 6);
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
//! assert_eq!(Symbol::from_str("apple"), Some(Symbol::Apple));
//! assert_eq!(Symbol::Apple.glyph(), "🍎");
//! ```

use serde::{Deserialize, Serialize};

/// Largest supported board side length.
pub const MAX_BOARD_SIDE: usize = 12;

/// Cell capacity of the largest supported board.
pub const MAX_CELLS: usize = MAX_BOARD_SIDE * MAX_BOARD_SIDE;

/// Smallest board side on which a run of `MIN_RUN` fits.
pub const MIN_BOARD_SIDE: usize = 3;

/// Number of distinct symbols in the game.
pub const SYMBOL_COUNT: usize = 11;

/// Shortest run of identical symbols that counts as a match.
pub const MIN_RUN: usize = 3;

/// A run of exactly this length clears the entire line it lies on.
pub const LINE_CLEAR_RUN: usize = 4;

/// Runs of at least this length leave a wildcard tile at their middle.
pub const WILDCARD_RUN: usize = 5;

/// Points awarded per matched cell above the 2-cell floor.
pub const POINTS_PER_TILE: u32 = 20;

/// Score cost (and minimum score) of the reshuffle tool.
pub const RESHUFFLE_COST: u32 = 50;

/// Score cost (and minimum score) of the extra-move tool.
pub const EXTRA_MOVE_COST: u32 = 70;

/// Moves granted by the extra-move tool.
pub const EXTRA_MOVES_GRANTED: u32 = 3;

/// Default cap on deadlock reshuffle attempts before the board is regenerated.
pub const DEFAULT_MAX_SHUFFLE_ATTEMPTS: u32 = 100;

/// Fruit symbols that can occupy a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Apple,
    Banana,
    Cherry,
    Grape,
    Watermelon,
    Avocado,
    Strawberry,
    Kiwi,
    Coconut,
    Orange,
    Melon,
}

impl Symbol {
    /// Every symbol, in declaration order.
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Symbol::Apple,
        Symbol::Banana,
        Symbol::Cherry,
        Symbol::Grape,
        Symbol::Watermelon,
        Symbol::Avocado,
        Symbol::Strawberry,
        Symbol::Kiwi,
        Symbol::Coconut,
        Symbol::Orange,
        Symbol::Melon,
    ];

    /// Parse symbol from its name or glyph (names are case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|sym| sym.glyph() == s || sym.as_str().eq_ignore_ascii_case(s))
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Apple => "apple",
            Symbol::Banana => "banana",
            Symbol::Cherry => "cherry",
            Symbol::Grape => "grape",
            Symbol::Watermelon => "watermelon",
            Symbol::Avocado => "avocado",
            Symbol::Strawberry => "strawberry",
            Symbol::Kiwi => "kiwi",
            Symbol::Coconut => "coconut",
            Symbol::Orange => "orange",
            Symbol::Melon => "melon",
        }
    }

    /// Emoji shown for this symbol
    pub fn glyph(&self) -> &'static str {
        match self {
            Symbol::Apple => "🍎",
            Symbol::Banana => "🍌",
            Symbol::Cherry => "🍒",
            Symbol::Grape => "🍇",
            Symbol::Watermelon => "🍉",
            Symbol::Avocado => "🥑",
            Symbol::Strawberry => "🍓",
            Symbol::Kiwi => "🥝",
            Symbol::Coconut => "🥥",
            Symbol::Orange => "🍊",
            Symbol::Melon => "🍈",
        }
    }
}

/// Symbols used on easy boards.
pub const EASY_ALPHABET: [Symbol; 6] = [
    Symbol::Apple,
    Symbol::Banana,
    Symbol::Cherry,
    Symbol::Grape,
    Symbol::Watermelon,
    Symbol::Avocado,
];

/// Symbols used on medium boards.
pub const MEDIUM_ALPHABET: [Symbol; 8] = [
    Symbol::Apple,
    Symbol::Banana,
    Symbol::Cherry,
    Symbol::Grape,
    Symbol::Watermelon,
    Symbol::Avocado,
    Symbol::Strawberry,
    Symbol::Coconut,
];

/// Symbols used on hard boards.
pub const HARD_ALPHABET: [Symbol; 11] = [
    Symbol::Apple,
    Symbol::Banana,
    Symbol::Cherry,
    Symbol::Grape,
    Symbol::Watermelon,
    Symbol::Avocado,
    Symbol::Strawberry,
    Symbol::Kiwi,
    Symbol::Coconut,
    Symbol::Orange,
    Symbol::Melon,
];

/// Difficulty levels, fixed at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Parameters a difficulty maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyRules {
    pub moves: u32,
    pub target: u32,
    pub board_size: usize,
    pub alphabet: &'static [Symbol],
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Preset rules for this difficulty
    pub fn rules(&self) -> DifficultyRules {
        match self {
            Difficulty::Easy => DifficultyRules {
                moves: 20,
                target: 500,
                board_size: 6,
                alphabet: &EASY_ALPHABET,
            },
            Difficulty::Medium => DifficultyRules {
                moves: 20,
                target: 750,
                board_size: 8,
                alphabet: &MEDIUM_ALPHABET,
            },
            Difficulty::Hard => DifficultyRules {
                moves: 20,
                target: 1100,
                board_size: 9,
                alphabet: &HARD_ALPHABET,
            },
        }
    }
}

/// A tile sitting in a board cell.
///
/// `wildcard` is cosmetic: the tile matches exactly like a plain tile of `symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub symbol: Symbol,
    pub wildcard: bool,
}

impl Tile {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            wildcard: false,
        }
    }

    pub fn wildcard(symbol: Symbol) -> Self {
        Self {
            symbol,
            wildcard: true,
        }
    }
}

impl From<Symbol> for Tile {
    fn from(symbol: Symbol) -> Self {
        Tile::new(symbol)
    }
}

/// Cell on the board (None = empty, Some = occupied by a tile)
pub type Cell = Option<Tile>;

/// A full row or column of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "axis", content = "index", rename_all = "lowercase")]
pub enum Line {
    Row(usize),
    Column(usize),
}

/// Session lifecycle (`Playing` is initial, the others are terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// One-shot tools available once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Reshuffle,
    ExtraMove,
    Undo,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Reshuffle, Tool::ExtraMove, Tool::Undo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Reshuffle => "reshuffle",
            Tool::ExtraMove => "extra_move",
            Tool::Undo => "undo",
        }
    }

    /// Score a player must hold to use this tool (and that it costs)
    pub fn cost(&self) -> u32 {
        match self {
            Tool::Reshuffle => RESHUFFLE_COST,
            Tool::ExtraMove => EXTRA_MOVE_COST,
            Tool::Undo => 0,
        }
    }
}

/// Why the board was permuted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleReason {
    Deadlock,
    Tool,
}

/// Notifications for the presentation layer.
///
/// The engine emits these in the order the changes happen; a renderer may replay
/// them with whatever pacing it likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    TileChanged { index: usize, tile: Cell },
    TilesRemoved { indices: Vec<usize> },
    TilesWildcarded { indices: Vec<usize> },
    LineCleared { line: Line },
    InvalidSwap { from: usize, to: usize },
    Reshuffled { reason: ShuffleReason },
    ScoreChanged { score: u32 },
    GameEnded { won: bool, final_score: u32 },
}
