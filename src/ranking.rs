// ranking.rs
// Orders regions by growth ratio and renders the ranking lines.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::accumulate::{AggregateMap, Population, RegionAggregate};

/// One row of the ranking.
pub type RankingEntry = (String, RegionAggregate);

fn ratio_of(entry: &RankingEntry) -> f64 {
    entry.1.ratio.unwrap_or(f64::NAN)
}

/// Descending by ratio.
///
/// NaN has no numeric order, and slice sorts need a total one, so every NaN
/// ratio compares equal to every other NaN and after any number (`inf`
/// included). This is a known quirk of the ranking, not a meaningful order.
pub fn by_ratio_desc(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    let (ra, rb) = (ratio_of(a), ratio_of(b));
    match (ra.is_nan(), rb.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => rb.partial_cmp(&ra).unwrap_or(Ordering::Equal),
    }
}

/// Consumes the map and returns its entries sorted by ratio, highest first.
/// The sort is stable, but ties start out in map iteration order, which is arbitrary.
pub fn rank(map: AggregateMap) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = map.into_iter().collect();
    entries.sort_by(by_ratio_desc);
    entries
}

struct PopulationText(Population);

impl Display for PopulationText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "NaN"),
        }
    }
}

/// `<region>:<popA>=><popB>比率<ratio>`
pub fn render(entry: &RankingEntry) -> String {
    let (region, aggregate) = entry;
    format!(
        "{}:{}=>{}比率{}",
        region,
        PopulationText(aggregate.population_a),
        PopulationText(aggregate.population_b),
        ratio_of(entry)
    )
}

pub fn render_all(entries: &[RankingEntry]) -> Vec<String> {
    entries.iter().map(render).collect()
}
