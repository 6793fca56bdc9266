//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the match-3 rules, the resolution engine and the
//! session state machine. It has no dependencies on rendering, audio or I/O
//! beyond reading an optional TOML config, which makes it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Runs under any presentation layer, or headless
//!
//! # Module Structure
//!
//! - [`board`]: N x N grid, generation without initial runs, gravity and refill
//! - [`matcher`]: run detection with line-clear and wildcard classification
//! - [`resolver`]: the detect/remove/score/collapse/refill cascade
//! - [`moves`]: swap legality and the row-major move search used for hints
//! - [`shuffle`]: deadlock reshuffling with a bounded attempt budget
//! - [`scoring`]: pass scores, tool costs and progress
//! - [`session`]: moves, score, tools, undo and win/loss evaluation
//! - [`config`]: TOML-loadable session configuration
//! - [`rng`]: seeded randomness behind the [`RandomSource`] trait
//!
//! # Game Rules
//!
//! - **Runs**: 3 or more identical symbols in a row or column are removed
//! - **Line Clear**: a run of exactly 4 clears its entire row or column
//! - **Wildcard**: a run of 5 or more leaves a wildcard tile at its middle cell
//! - **Scoring**: each detection pass scores 20 per matched cell above two
//! - **Tools**: reshuffle (50 points), three extra moves (70 points) and one undo,
//!   each usable once per game
//!
//! # Example
//!
//! ```
//! use fruit_match_core::{GameSession, SessionConfig};
//! use fruit_match_types::{Difficulty, GameStatus};
//!
//! let mut session = GameSession::new(SessionConfig::new(Difficulty::Easy, 12345)).unwrap();
//!
//! // Play the hinted move
//! let (a, b) = session.request_hint().unwrap();
//! session.attempt_swap(a, b).unwrap();
//!
//! assert!(session.score() >= 20);
//! assert_eq!(session.status(), GameStatus::Playing);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod matcher;
pub mod moves;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod snapshot;

pub use fruit_match_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::SessionConfig;
pub use error::{BoardError, ConfigError, SwapError, ToolError};
pub use matcher::{find_matches, has_match, MatchResult, Run};
pub use moves::{find_move, has_any_move, is_legal_swap};
pub use resolver::{resolve_cascade, CascadeReport};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{calculate_pass_score, progress_percent};
pub use session::{GameSession, SwapOutcome};
pub use shuffle::{shuffle_until_playable, ShuffleReport};
pub use snapshot::{SessionSnapshot, ToolSnapshot};
