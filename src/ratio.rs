// ratio.rs
// Derives the later/earlier population ratio for every aggregated region.

use crate::accumulate::{AggregateMap, Population};

/// `later / earlier` as floating point. A zero earlier population gives `inf`
/// (or `NaN` when both are zero), and a sentinel on either side gives `NaN`.
/// None of these are treated as errors.
pub fn growth_ratio(earlier: Population, later: Population) -> f64 {
    match (earlier, later) {
        (Some(a), Some(b)) => b as f64 / a as f64,
        _ => f64::NAN,
    }
}

/// Fills in `ratio` for every region. Run only once accumulation is finished.
pub fn compute_ratios(map: &mut AggregateMap) {
    for aggregate in map.values_mut() {
        aggregate.ratio = Some(growth_ratio(aggregate.population_a, aggregate.population_b));
    }
}
