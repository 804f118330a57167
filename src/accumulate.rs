// accumulate.rs
// This module streams raw population rows and collects the two target-year snapshots for every region.

use std::collections::HashMap;
use std::io::Read;

use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;

use crate::config::TargetYears;

/// Struct representing one positional row of the population file.
/// Columns: year, region, (unused), population. Anything past the fourth column is ignored.
///
/// Every field is defaulted so short rows still deserialize, and the numeric
/// fields go through `csv::invalid_option` so an unparseable number becomes
/// `None` instead of an error.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i64>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    _unused: Option<String>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub population: Option<i64>,
}

/// Population snapshot that may hold the "not-a-number" sentinel (`None`)
/// left behind by a failed parse.
pub type Population = Option<i64>;

/// Aggregated snapshots for a single region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAggregate {
    /// Population in the earlier target year.
    pub population_a: Population,

    /// Population in the later target year.
    pub population_b: Population,

    /// `population_b / population_a`; `None` until the ratio pass runs.
    pub ratio: Option<f64>,
}

impl Default for RegionAggregate {
    fn default() -> Self {
        RegionAggregate {
            population_a: Some(0),
            population_b: Some(0),
            ratio: None,
        }
    }
}

/// Region name -> aggregate. Keys are used verbatim.
pub type AggregateMap = HashMap<String, RegionAggregate>;

/// Counters reported after a load. They never influence the aggregation itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub lines_read: usize,
    pub lines_matched: usize,
    pub lines_skipped: usize,
    pub bad_population: usize,
}

/// Applies one row to the map. Returns `true` when the row's year was a target year.
///
/// A row with no region column and a row with an empty region column both land
/// in the single `""` region; the two are deliberately not told apart. A row
/// for a year/region pair that was already seen overwrites the earlier value.
pub fn apply_record(map: &mut AggregateMap, years: TargetYears, record: RawRecord) -> bool {
    let Some(year) = record.year else {
        return false;
    };
    if !years.contains(year) {
        return false;
    }

    let entry = map.entry(record.region.unwrap_or_default()).or_default();
    if year == years.earlier() {
        entry.population_a = record.population;
    }
    if year == years.later() {
        entry.population_b = record.population;
    }
    true
}

/// Reads every row from `reader` and returns the completed map.
///
/// Rows are pulled one at a time; the map is only handed back once the input
/// is exhausted. Every comma splits a field: quotes are ordinary characters and
/// stay part of the value. Bytes that are not valid UTF-8 are replaced with
/// U+FFFD so the row still counts. I/O failures are fatal.
pub fn accumulate<R: Read>(reader: R, years: TargetYears) -> anyhow::Result<(AggregateMap, LoadStats)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut map = AggregateMap::new();
    let mut stats = LoadStats::default();

    for result in rdr.byte_records() {
        stats.lines_read += 1;

        let raw = match result {
            Ok(r) => r,
            Err(err) if err.is_io_error() => {
                return Err(err).context("failed while reading population input");
            }
            Err(err) => {
                log::warn!("line {}: unreadable row skipped: {}", stats.lines_read, err);
                stats.lines_skipped += 1;
                continue;
            }
        };

        let fields: StringRecord = raw
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        let record = match fields.deserialize::<RawRecord>(None) {
            Ok(r) => r,
            Err(err) => {
                log::warn!("line {}: undecodable row skipped: {}", stats.lines_read, err);
                stats.lines_skipped += 1;
                continue;
            }
        };

        let population_missing = record.population.is_none();
        if apply_record(&mut map, years, record) {
            stats.lines_matched += 1;
            if population_missing {
                stats.bad_population += 1;
                log::warn!("line {}: population is not a number", stats.lines_read);
            }
        } else {
            stats.lines_skipped += 1;
            log::debug!("line {}: not a target year, skipped", stats.lines_read);
        }
    }

    Ok((map, stats))
}
