//! Move validation and move search
//!
//! Both work by swapping tentatively, running the preview scan and swapping back,
//! so the caller's board is identical before and after every call.

use crate::board::Board;
use crate::matcher::has_match;

/// True if swapping the two cells would create at least one match.
///
/// Adjacency is not checked here; callers decide which pairs are eligible.
pub fn is_legal_swap(board: &mut Board, a: usize, b: usize) -> bool {
    if !board.swap(a, b) {
        return false;
    }
    let valid = has_match(board);
    board.swap(a, b);
    valid
}

/// First adjacent pair whose swap makes a match, if any.
///
/// Scans row-major and tries each cell's right neighbour before its lower
/// neighbour, which covers every unordered adjacent pair exactly once. The result
/// doubles as the hint and the deadlock test.
pub fn find_move(board: &mut Board) -> Option<(usize, usize)> {
    let size = board.size();
    for idx in 0..board.len() {
        let (row, col) = board.coords(idx);
        if col + 1 < size && is_legal_swap(board, idx, idx + 1) {
            return Some((idx, idx + 1));
        }
        if row + 1 < size && is_legal_swap(board, idx, idx + size) {
            return Some((idx, idx + size));
        }
    }
    None
}

/// True if at least one swap produces a match
pub fn has_any_move(board: &mut Board) -> bool {
    find_move(board).is_some()
}
