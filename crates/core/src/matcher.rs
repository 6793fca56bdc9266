//! Match detection - finds runs of identical symbols and classifies them
//!
//! Every row is scanned left to right and every column top to bottom. A run closes
//! when the next cell differs or the line ends; closed runs of `MIN_RUN` or more are
//! matches. Runs of exactly `LINE_CLEAR_RUN` clear their whole line, runs of
//! `WILDCARD_RUN` or more leave a wildcard tile at their middle cell.
//!
//! [`has_match`] is the preview scan used by move validation, hints and deadlock
//! detection: it stops at the first run and never allocates.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::types::{Line, Symbol, LINE_CLEAR_RUN, MIN_RUN, WILDCARD_RUN};

/// A maximal run of at least `MIN_RUN` identical symbols along one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub line: Line,
    pub symbol: Symbol,
    /// Index of the first cell (leftmost or topmost)
    pub start: usize,
    pub len: usize,
    /// Distance between consecutive cells (1 for rows, board size for columns)
    pub step: usize,
}

impl Run {
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |k| self.start + k * self.step)
    }

    /// Middle cell (the lower-index one of the two middles for even lengths)
    pub fn middle(&self) -> usize {
        self.start + (self.len - 1) / 2 * self.step
    }

    /// Cell that represents a line-clear trigger: second-to-last cell of the run
    pub fn trigger_index(&self) -> usize {
        self.start + (self.len.saturating_sub(2)) * self.step
    }
}

/// A 4-run that clears its whole row or column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineClear {
    pub line: Line,
    pub index: usize,
}

/// A 5+-run whose middle cell survives as a wildcard tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WildcardTrigger {
    pub index: usize,
    pub symbol: Symbol,
}

/// Result of a full (non-preview) scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Every cell subject to removal, including whole lines from line clears.
    /// Wildcard survivors are in here too; see [`MatchResult::removals`].
    pub matched: BTreeSet<usize>,
    /// Distinct cells that belong to a run (before line-clear expansion)
    pub run_cells: usize,
    pub line_clears: BTreeSet<LineClear>,
    pub wildcards: Vec<WildcardTrigger>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.wildcards.is_empty()
    }

    pub fn is_survivor(&self, idx: usize) -> bool {
        self.wildcards.iter().any(|w| w.index == idx)
    }

    /// Cells to clear: `matched` minus the wildcard survivors
    pub fn removals(&self) -> impl Iterator<Item = usize> + '_ {
        self.matched
            .iter()
            .copied()
            .filter(move |&idx| !self.is_survivor(idx))
    }

    /// Distinct lines cleared by 4-runs
    pub fn cleared_lines(&self) -> BTreeSet<Line> {
        self.line_clears.iter().map(|lc| lc.line).collect()
    }
}

/// All cells on a line, in scan order
pub fn line_indices(line: Line, size: usize) -> impl Iterator<Item = usize> {
    let (start, step) = line_geometry(line, size);
    (0..size).map(move |k| start + k * step)
}

/// Every row, then every column
pub fn all_lines(size: usize) -> impl Iterator<Item = Line> {
    (0..size).map(Line::Row).chain((0..size).map(Line::Column))
}

/// Runs of `MIN_RUN` or more along one line
pub fn line_runs(board: &Board, line: Line) -> LineRuns<'_> {
    let (start, step) = line_geometry(line, board.size());
    LineRuns {
        board,
        line,
        start,
        step,
        pos: 0,
    }
}

/// Every run on the board: rows first, then columns
pub fn runs(board: &Board) -> Vec<Run> {
    all_lines(board.size())
        .flat_map(|line| line_runs(board, line))
        .collect()
}

/// Preview scan: true if any run of `MIN_RUN` or more exists.
/// Does not mutate the board and stops at the first run.
pub fn has_match(board: &Board) -> bool {
    all_lines(board.size()).any(|line| line_runs(board, line).next().is_some())
}

/// Full scan with line-clear and wildcard classification
pub fn find_matches(board: &Board) -> MatchResult {
    let size = board.size();
    let mut result = MatchResult::default();
    let mut run_cells = BTreeSet::new();

    for run in runs(board) {
        run_cells.extend(run.indices());

        if run.len == LINE_CLEAR_RUN {
            result.line_clears.insert(LineClear {
                line: run.line,
                index: run.trigger_index(),
            });
        }

        if run.len >= WILDCARD_RUN {
            let index = run.middle();
            if !result.is_survivor(index) {
                result.wildcards.push(WildcardTrigger {
                    index,
                    symbol: run.symbol,
                });
            }
        }
    }

    result.run_cells = run_cells.len();
    result.matched = run_cells;
    for lc in &result.line_clears {
        result.matched.extend(line_indices(lc.line, size));
    }

    result
}

fn line_geometry(line: Line, size: usize) -> (usize, usize) {
    match line {
        Line::Row(row) => (row * size, 1),
        Line::Column(col) => (col, size),
    }
}

/// Lazy iterator over the runs of a single line
#[derive(Debug, Clone)]
pub struct LineRuns<'a> {
    board: &'a Board,
    line: Line,
    start: usize,
    step: usize,
    pos: usize,
}

impl Iterator for LineRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let size = self.board.size();
        while self.pos < size {
            let begin = self.pos;
            let symbol = self.board.symbol(self.start + begin * self.step);
            let mut end = begin + 1;
            if symbol.is_some() {
                while end < size && self.board.symbol(self.start + end * self.step) == symbol {
                    end += 1;
                }
            }
            self.pos = end;

            let len = end - begin;
            if let Some(symbol) = symbol {
                if len >= MIN_RUN {
                    return Some(Run {
                        line: self.line,
                        symbol,
                        start: self.start + begin * self.step,
                        len,
                        step: self.step,
                    });
                }
            }
        }
        None
    }
}
