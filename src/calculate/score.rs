//! Game score totals.

use crate::models::{PeriodScores, OVERTIME_PERIODS, REGULATION_PERIODS};

/// Sum period scores in play order: four quarters, then up to three overtimes.
///
/// Missing or unplayed overtime periods contribute nothing.
pub fn total_score(period_scores: &[i32]) -> i32 {
    debug_assert!(period_scores.len() <= REGULATION_PERIODS + OVERTIME_PERIODS);
    period_scores.iter().sum()
}

/// Total for one side of a game.
pub fn side_total(scores: &PeriodScores) -> i32 {
    total_score(&scores.sequence())
}
