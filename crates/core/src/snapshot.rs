use serde::Serialize;

use crate::types::{Cell, Difficulty, GameStatus, Tool};

/// Per-tool availability as a presentation layer shows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolSnapshot {
    pub tool: Tool,
    pub used: bool,
    pub available: bool,
}

/// Read-only view of a session for rendering or logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub size: usize,
    pub cells: Vec<Cell>,
    /// One string of glyphs per row, empty cells shown as `··`
    pub rows: Vec<String>,
    pub score: u32,
    pub moves_left: u32,
    pub target: u32,
    pub progress: u8,
    pub status: GameStatus,
    pub tools: [ToolSnapshot; 3],
    pub undo_available: bool,
    pub shuffle_pending: bool,
    pub wildcards: Vec<usize>,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.status.is_over() && !self.shuffle_pending
    }

    pub fn tool(&self, tool: Tool) -> Option<&ToolSnapshot> {
        self.tools.iter().find(|t| t.tool == tool)
    }
}
