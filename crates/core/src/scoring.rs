//! Scoring module - points per resolution pass and progress toward the target
//!
//! Each detection pass is scored as a batch: the distinct cells belonging to runs in
//! that pass are counted and `POINTS_PER_TILE` is awarded for every cell above the
//! two-cell floor. A 3-run is worth 20, a 4-run 40 and a 5-run 60.
//!
//! Cells swept up by a line clear are removed but not counted; the 4-run that
//! triggered the clear is what scores.

use crate::types::{MIN_RUN, POINTS_PER_TILE};

/// Points for one detection pass whose runs cover `run_cells` distinct cells
pub fn calculate_pass_score(run_cells: usize) -> u32 {
    if run_cells < MIN_RUN {
        return 0;
    }
    POINTS_PER_TILE.saturating_mul((run_cells - (MIN_RUN - 1)) as u32)
}

/// Subtract a tool cost, flooring the score at zero
pub fn deduct_cost(score: u32, cost: u32) -> u32 {
    score.saturating_sub(cost)
}

/// Progress toward the target as a percentage, capped at 100
pub fn progress_percent(score: u32, target: u32) -> u8 {
    if target == 0 {
        return 0;
    }
    let percent = (u64::from(score) * 100 / u64::from(target)).min(100);
    percent as u8
}
