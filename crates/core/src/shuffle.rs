//! Shuffler - rearranges tiles until the board is playable again
//!
//! A shuffle is a pure permutation: the multiset of tiles (wildcards included) is
//! preserved. A permutation is accepted only when it offers at least one move and
//! contains no ready-made run, so the board never needs a cascade after a shuffle.
//! If no acceptable permutation turns up within the attempt budget the board is
//! regenerated from scratch, at most [`MAX_REGENERATIONS`] times.

use tracing::{debug, warn};

use crate::board::Board;
use crate::error::BoardError;
use crate::matcher::has_match;
use crate::moves::has_any_move;
use crate::rng::RandomSource;
use crate::types::Symbol;

/// Fresh boards drawn after the permutation budget runs out
pub const MAX_REGENERATIONS: u32 = 20;

/// How a shuffle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleReport {
    /// Permutations tried
    pub attempts: u32,
    /// True when the attempt budget ran out and the board was regenerated
    pub regenerated: bool,
}

/// Permute every tile on the board in place
pub fn shuffle_tiles<R: RandomSource>(board: &mut Board, rng: &mut R) {
    rng.shuffle(board.cells_mut());
}

/// True if the board has a move and no existing run
pub fn is_playable(board: &mut Board) -> bool {
    !has_match(board) && has_any_move(board)
}

/// Shuffle until the board is playable.
///
/// `max_attempts` bounds the permutations tried; zero skips straight to
/// regeneration. Regeneration draws up to [`MAX_REGENERATIONS`] fresh boards
/// from `alphabet`. The board is left untouched by a failed regeneration and
/// the error reports both budgets.
pub fn shuffle_until_playable<R: RandomSource>(
    board: &mut Board,
    alphabet: &[Symbol],
    rng: &mut R,
    max_attempts: u32,
) -> Result<ShuffleReport, BoardError> {
    for attempt in 1..=max_attempts {
        shuffle_tiles(board, rng);
        if is_playable(board) {
            debug!(attempts = attempt, "shuffle accepted");
            return Ok(ShuffleReport {
                attempts: attempt,
                regenerated: false,
            });
        }
    }

    warn!(
        max_attempts,
        size = board.size(),
        "no playable permutation found, regenerating board"
    );
    let size = board.size();
    for regeneration in 1..=MAX_REGENERATIONS {
        let mut fresh = Board::generate(size, alphabet, rng)?;
        if has_any_move(&mut fresh) {
            debug!(regeneration, "regenerated board accepted");
            *board = fresh;
            return Ok(ShuffleReport {
                attempts: max_attempts,
                regenerated: true,
            });
        }
    }

    Err(BoardError::NoPlayableLayout {
        shuffles: max_attempts,
        regenerations: MAX_REGENERATIONS,
    })
}
