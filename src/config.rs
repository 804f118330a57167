// config.rs
// Command-line options and the pair of years being compared.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "popu_ranking")]
#[command(about = "Ranks regions by population change between two census years", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Comma-separated input: year,region,<unused>,population
    #[arg(default_value = "./popu-pref.csv")]
    pub input: PathBuf,

    /// Earlier year of the comparison
    #[arg(long, default_value_t = 2010)]
    pub from_year: i64,

    /// Later year of the comparison
    #[arg(long, default_value_t = 2015)]
    pub to_year: i64,
}

impl Cli {
    pub fn target_years(&self) -> anyhow::Result<TargetYears> {
        TargetYears::new(self.from_year, self.to_year)
    }
}

/// Exactly two distinct years. The ratio is always `later / earlier` in the
/// order given, whatever their numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetYears {
    earlier: i64,
    later: i64,
}

impl TargetYears {
    pub fn new(earlier: i64, later: i64) -> anyhow::Result<Self> {
        anyhow::ensure!(
            earlier != later,
            "target years must differ (got {} twice)",
            earlier
        );
        Ok(TargetYears { earlier, later })
    }

    pub fn earlier(&self) -> i64 {
        self.earlier
    }

    pub fn later(&self) -> i64 {
        self.later
    }

    pub fn contains(&self, year: i64) -> bool {
        year == self.earlier || year == self.later
    }
}
