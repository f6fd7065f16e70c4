//! CLI argument definitions using clap
//!
//! Global options: --neofile, --cadfile, --data-dir, --skip-invalid
//!
//! Commands:
//! - neo inspect (--pdes <designation> | --name <name>) [--verbose]
//! - neo query [filters...] [--limit N] [--outfile <path>]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use neo_loader::types::{DEFAULT_CAD_FILE, DEFAULT_NEO_FILE};
use neo_loader::{discover_data_files, DataFiles, FilterCriteria, LoadConfig, NeoResult};
use neo_types::time::parse_date;

/// Explore close approaches of near-Earth objects
#[derive(Parser, Debug)]
#[command(name = "neo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the NEO catalogue CSV
    #[arg(long, env = "NEO_FILE", default_value = DEFAULT_NEO_FILE, global = true)]
    pub neofile: PathBuf,

    /// Path to the close-approach JSON
    #[arg(long, env = "NEO_CAD_FILE", default_value = DEFAULT_CAD_FILE, global = true)]
    pub cadfile: PathBuf,

    /// Directory holding neos.csv and cad.json; overrides --neofile and --cadfile
    #[arg(long, env = "NEO_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Skip malformed rows instead of aborting the load
    #[arg(long, global = true)]
    pub skip_invalid: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a single NEO by designation or name
    Inspect(InspectArgs),

    /// Query close approaches with optional filters
    Query(QueryArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["pdes", "name"])))]
pub struct InspectArgs {
    /// Primary designation, e.g. "433"
    #[arg(long)]
    pub pdes: Option<String>,

    /// IAU name, e.g. "Eros"
    #[arg(long)]
    pub name: Option<String>,

    /// Also print every close approach of the NEO
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub end_date: Option<NaiveDate>,

    /// Minimum approach distance in au
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Maximum approach distance in au
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Minimum relative velocity in km/s
    #[arg(long)]
    pub min_velocity: Option<f64>,

    /// Maximum relative velocity in km/s
    #[arg(long)]
    pub max_velocity: Option<f64>,

    /// Minimum NEO diameter in km
    #[arg(long)]
    pub min_diameter: Option<f64>,

    /// Maximum NEO diameter in km
    #[arg(long)]
    pub max_diameter: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    pub hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    pub not_hazardous: bool,

    /// Maximum number of results (0 for all)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Write results to a .csv or .json file instead of printing them
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Input files, discovered in `--data-dir` when given.
    pub fn data_files(&self) -> NeoResult<DataFiles> {
        match &self.data_dir {
            Some(dir) => discover_data_files(dir),
            None => Ok(DataFiles::new(&self.neofile, &self.cadfile)),
        }
    }

    /// Loader configuration from the global flags.
    pub fn load_config(&self) -> LoadConfig {
        LoadConfig {
            skip_invalid: self.skip_invalid,
        }
    }
}

impl QueryArgs {
    /// Converts the filter flags into loader criteria.
    pub fn criteria(&self) -> FilterCriteria {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };

        FilterCriteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
