//! Resolution engine - runs detect/remove/score/collapse/refill until the board is stable
//!
//! A cascade is a synchronous loop: it only returns once a pass finds nothing, so
//! callers always get back a full board with no run of `MIN_RUN` or more. Events
//! describing every change are appended to the caller's buffer in the order the
//! changes happen.

use tracing::debug;

use crate::board::Board;
use crate::matcher::{find_matches, MatchResult};
use crate::rng::RandomSource;
use crate::scoring::calculate_pass_score;
use crate::types::{Cell, GameEvent, Symbol, Tile};

/// Totals for one full cascade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Detection passes that found something
    pub passes: u32,
    /// Cells cleared across all passes
    pub matched_cells: usize,
    pub score_delta: u32,
    pub lines_cleared: usize,
    pub wildcards_created: usize,
}

impl CascadeReport {
    pub fn did_anything(&self) -> bool {
        self.passes > 0
    }
}

/// Resolve every match on the board, cascading until it is stable.
pub fn resolve_cascade<R: RandomSource>(
    board: &mut Board,
    alphabet: &[Symbol],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> CascadeReport {
    let mut report = CascadeReport::default();

    if !board.is_full() {
        settle(board, alphabet, rng, events);
    }

    loop {
        let result = find_matches(board);
        if result.is_empty() {
            break;
        }
        report.passes += 1;

        let removed = apply_pass(board, &result, events);
        let pass_score = calculate_pass_score(result.run_cells);
        report.matched_cells += removed;
        report.score_delta = report.score_delta.saturating_add(pass_score);
        report.lines_cleared += result.line_clears.len();
        report.wildcards_created += result.wildcards.len();

        debug!(
            pass = report.passes,
            run_cells = result.run_cells,
            removed,
            lines = result.line_clears.len(),
            wildcards = result.wildcards.len(),
            pass_score,
            "cascade pass"
        );

        settle(board, alphabet, rng, events);
    }

    report
}

/// Clear matched cells and plant wildcard survivors. Returns cells cleared.
fn apply_pass(board: &mut Board, result: &MatchResult, events: &mut Vec<GameEvent>) -> usize {
    for line in result.cleared_lines() {
        events.push(GameEvent::LineCleared { line });
    }

    let removed: Vec<usize> = result.removals().collect();
    for &idx in &removed {
        board.clear_cell(idx);
    }
    if !removed.is_empty() {
        events.push(GameEvent::TilesRemoved {
            indices: removed.clone(),
        });
    }

    if !result.wildcards.is_empty() {
        for w in &result.wildcards {
            board.set(w.index, Some(Tile::wildcard(w.symbol)));
        }
        events.push(GameEvent::TilesWildcarded {
            indices: result.wildcards.iter().map(|w| w.index).collect(),
        });
    }

    removed.len()
}

/// Collapse columns, refill from the top, and report every cell that changed.
fn settle<R: RandomSource>(
    board: &mut Board,
    alphabet: &[Symbol],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let before: Vec<Cell> = board.cells().to_vec();
    board.apply_gravity();
    board.refill(alphabet, rng);
    push_changes(&before, board, events);
}

/// Emit `TileChanged` for each cell that differs from `before`
pub(crate) fn push_changes(before: &[Cell], board: &Board, events: &mut Vec<GameEvent>) {
    for (index, (old, new)) in before.iter().zip(board.cells()).enumerate() {
        if old != new {
            events.push(GameEvent::TileChanged { index, tile: *new });
        }
    }
}
