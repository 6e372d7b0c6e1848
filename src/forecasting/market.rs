//! Market adjustment cycles.
//!
//! Market corrections arrive in periodic cycles and permanently shift the
//! salary path from the adjustment year onwards. The boost size is random
//! within a bounded range, so callers supply the random source and can
//! seed it for reproducible runs.

use rand::Rng;

/// Year indices that receive a market adjustment by default.
pub const DEFAULT_ADJUSTMENT_YEARS: [usize; 3] = [3, 6, 9];

/// Lower bound of the market boost range.
pub const MARKET_BOOST_MIN: f64 = 0.02;

/// Upper bound of the market boost range.
pub const MARKET_BOOST_MAX: f64 = 0.04;

/// Applies market adjustment cycles to a salary path.
///
/// For each configured year index present in the path, a boost drawn
/// uniformly from 2–4% multiplies that year and every subsequent year.
/// Boosts from multiple adjustment years compound.
///
/// # Example
///
/// ```
/// use equity_engine::forecasting::apply_market_adjustments;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let path = vec![80_000.0; 6];
/// let adjusted = apply_market_adjustments(&path, &[3], &mut rng);
/// assert_eq!(adjusted[..3], path[..3]);
/// assert!(adjusted[3] >= path[3] * 1.02 && adjusted[3] <= path[3] * 1.04);
/// ```
pub fn apply_market_adjustments<R: Rng>(
    salary_path: &[f64],
    adjustment_years: &[usize],
    rng: &mut R,
) -> Vec<f64> {
    let mut adjusted = salary_path.to_vec();

    for &year in adjustment_years {
        if year < adjusted.len() {
            let boost = rng.random_range(MARKET_BOOST_MIN..MARKET_BOOST_MAX);
            for value in adjusted.iter_mut().skip(year) {
                *value *= 1.0 + boost;
            }
        }
    }

    adjusted
}
