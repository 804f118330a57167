// Main.rs
// Ranks regions by how their population changed between two census years.

mod accumulate;
mod config;
mod ranking;
mod ratio;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;

use accumulate::{accumulate, LoadStats};
use config::{Cli, TargetYears};
use ranking::{rank, render_all};
use ratio::compute_ratios;

/// Runs the whole pipeline over an already opened source:
/// accumulate -> ratios -> sort -> render.
fn ranking_lines<R: Read>(reader: R, years: TargetYears) -> anyhow::Result<(Vec<String>, LoadStats)> {
    let (mut map, stats) = accumulate(reader, years)?;
    compute_ratios(&mut map);
    let ranked = rank(map);
    Ok((render_all(&ranked), stats))
}

/// Opens `path` and ranks its contents. The file is closed when the reader is
/// dropped, whether or not the pass succeeded.
fn ranking_from_path(path: &Path, years: TargetYears) -> anyhow::Result<(Vec<String>, LoadStats)> {
    log::info!("Opening {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open population CSV: {}", path.display()))?;
    ranking_lines(file, years).with_context(|| format!("Failed to rank {}", path.display()))
}

/// Main program entry point:
/// - Reads the target years and input path from the command line
/// - Streams the CSV into per-region aggregates
/// - Prints the full ranking to stdout in one batch
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let years = cli.target_years()?;
    log::info!("Comparing {} => {}", years.earlier(), years.later());

    let (lines, stats) = ranking_from_path(&cli.input, years)?;
    log::info!(
        "Read {} lines | matched {} | skipped {} | bad population {} | regions {}",
        stats.lines_read,
        stats.lines_matched,
        stats.lines_skipped,
        stats.bad_population,
        lines.len()
    );

    println!("{}", lines.join("\n"));
    Ok(())
}

// Cargo Tests
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn years() -> TargetYears {
        TargetYears::new(2010, 2015).unwrap()
    }

    #[test]
    fn test_end_to_end_ranking() {
        let input = "2010,Tokyo,_,100\n2015,Tokyo,_,120\n2010,Osaka,_,200\n2015,Osaka,_,180\n";
        let (lines, stats) = ranking_lines(input.as_bytes(), years()).unwrap();
        assert_eq!(lines, vec!["Tokyo:100=>120比率1.2", "Osaka:200=>180比率0.9"]);
        assert_eq!(stats.lines_matched, 4);
    }

    #[test]
    fn test_every_sighted_region_listed_once() {
        let input = "2010,A,_,1\n2015,B,_,2\n2015,A,_,3\n2012,C,_,4\n2010,A,_,5\n";
        let (lines, _) = ranking_lines(input.as_bytes(), years()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.iter().filter(|l| l.starts_with("A:")).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.starts_with("B:")).count(), 1);
        assert!(!lines.iter().any(|l| l.starts_with("C:")));
    }

    #[test]
    fn test_bad_rows_still_reach_the_end() {
        let input = "year,region,x,pop\n2010,Kyoto,_,oops\n2015,Kyoto,_,10\n2010\n2015,Nara,_,5\n";
        let (lines, stats) = ranking_lines(input.as_bytes(), years()).unwrap();
        assert_eq!(stats.lines_read, 5);
        assert!(lines.contains(&"Kyoto:NaN=>10比率NaN".to_string()));
        assert_eq!(lines[0], "Nara:0=>5比率inf");
    }

    #[test]
    fn test_ranking_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2010,Fukuoka,_,300").unwrap();
        writeln!(file, "2015,Fukuoka,_,330").unwrap();
        let (lines, _) = ranking_from_path(file.path(), years()).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Fukuoka:300=>330比率1.1"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let err = ranking_from_path(&missing, years()).unwrap_err();
        assert!(err.to_string().contains("Failed to open population CSV"));
    }
}
