//! NCAA passer rating.

use rust_decimal::Decimal;

use super::{round_half_up, RATING_PRECISION};

const YARDS_WEIGHT: Decimal = Decimal::from_parts(84, 0, 0, false, 1);
const TOUCHDOWN_WEIGHT: i32 = 330;
const COMPLETION_WEIGHT: i32 = 100;
const INTERCEPTION_WEIGHT: i32 = 200;

/// Compute the NCAA passer rating, rounded to 1 decimal.
///
/// `(8.4 * yards + 330 * touchdowns + 100 * completions - 200 * interceptions) / attempts`
///
/// No component is clamped, so the result may be negative or very large.
/// `attempts` must be nonzero: callers substitute 0.0 for a passer with no
/// attempts instead of calling this. Release builds return NaN for zero
/// attempts.
pub fn passer_rating(
    yards: i32,
    touchdowns: i32,
    completions: i32,
    interceptions: i32,
    attempts: i32,
) -> f64 {
    debug_assert_ne!(attempts, 0, "passer rating requires at least one attempt");

    let points = YARDS_WEIGHT * Decimal::from(yards)
        + Decimal::from(TOUCHDOWN_WEIGHT * touchdowns)
        + Decimal::from(COMPLETION_WEIGHT * completions)
        - Decimal::from(INTERCEPTION_WEIGHT * interceptions);

    points
        .checked_div(Decimal::from(attempts))
        .map_or(f64::NAN, |rating| round_half_up(rating, RATING_PRECISION))
}
