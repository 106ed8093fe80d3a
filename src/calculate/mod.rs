//! Statistics calculation engine.
//!
//! Pure numeric functions that turn raw counts into derived values:
//! - Division-safe rates in exact decimal arithmetic, rounded half-up
//! - NCAA passer rating
//! - Game totals from period scores

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

mod passer;
mod score;

pub use passer::*;
pub use score::*;

/// Decimal places for yards-per-attempt style rates.
pub const YARDS_PER_PRECISION: u32 = 1;

/// Decimal places for completion percentage and win percentage.
pub const PERCENTAGE_PRECISION: u32 = 3;

/// Decimal places for passer rating.
pub const RATING_PRECISION: u32 = 1;

/// Divide `numerator` by `denominator`, rounded half-up to `precision` places.
///
/// A zero denominator yields 0.0 regardless of the numerator.
pub fn safe_ratio(
    numerator: impl Into<Decimal>,
    denominator: impl Into<Decimal>,
    precision: u32,
) -> f64 {
    numerator
        .into()
        .checked_div(denominator.into())
        .map_or(0.0, |ratio| round_half_up(ratio, precision))
}

/// Round to `precision` decimal places, halves away from zero, as an `f64`.
///
/// A result that rounds to zero is always positive zero.
pub fn round_half_up(value: Decimal, precision: u32) -> f64 {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return 0.0;
    }
    rounded.to_f64().unwrap_or(0.0)
}

/// Win percentage over decided games, 3 decimals.
pub fn win_percentage(wins: u32, losses: u32) -> f64 {
    safe_ratio(wins, wins + losses, PERCENTAGE_PRECISION)
}
