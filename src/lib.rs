//! Fruit Match (workspace facade crate).
//!
//! Re-exports the engine as `fruit_match::{core, types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use fruit_match_core as core;
pub use fruit_match_types as types;
