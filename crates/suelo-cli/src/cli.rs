use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use suelo_core::config::{parse_storage_backend, StorageBackend};
use suelo_core::models::{
    Coloration, LandUse, NearbyWaterBody, Odor, OdorDetected, ReportId, ReportKind, SoilColor,
    VisibleResidue, WaterTableDepth,
};

/// Suelo - Preliminary soil contamination assessment
#[derive(Parser, Debug)]
#[command(name = "suelo")]
#[command(about = "Preliminary soil hydrocarbon contamination assessment", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the configuration file (defaults to ./suelo.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the report files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend to use (file or memory)
    #[arg(long, global = true, value_parser = parse_storage_backend)]
    pub storage: Option<StorageBackend>,

    /// User whose reports to work with (anonymous when omitted)
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score site observations and optionally save them as a report
    Assess(AssessArgs),

    /// Browse, sync and delete saved reports
    Reports(ReportsArgs),

    /// Show report statistics
    Stats,

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct AssessArgs {
    #[command(subcommand)]
    pub scheme: AssessScheme,
}

#[derive(Subcommand, Debug)]
pub enum AssessScheme {
    /// Land-use weighted assessment
    Advanced(AdvancedArgs),

    /// Quick assessment on a fixed point scale
    Basic(BasicArgs),
}

/// Site identification shared by both forms
#[derive(Args, Debug, Default)]
pub struct SiteArgs {
    /// Save the assessment as a report
    #[arg(long)]
    pub save: bool,

    #[arg(long)]
    pub site_name: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Latitude (WGS 84); requires --lon
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude (WGS 84); requires --lat
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    #[arg(long)]
    pub inspection_date: Option<String>,

    #[arg(long)]
    pub inspector: Option<String>,
}

#[derive(Parser, Debug)]
pub struct AdvancedArgs {
    /// none, mild or severe
    #[arg(long)]
    pub odor: Option<Odor>,

    /// none, superficial or extensive_deep
    #[arg(long)]
    pub coloration: Option<Coloration>,

    /// Free phase observed (true or false)
    #[arg(long)]
    pub free_phase: Option<bool>,

    /// industrial, residential or conservation
    #[arg(long)]
    pub land_use: Option<LandUse>,

    /// Depth to water table: ">10m", "5-10m" or "<5m"
    #[arg(long)]
    pub water_table: Option<WaterTableDepth>,

    /// Affected area in m²
    #[arg(long)]
    pub affected_area: Option<String>,

    /// Contamination depth in m
    #[arg(long)]
    pub depth: Option<String>,

    #[arg(long)]
    pub soil_type: Option<String>,

    /// Water bodies nearby (true or false)
    #[arg(long)]
    pub near_water_bodies: Option<bool>,

    #[command(flatten)]
    pub site: SiteArgs,
}

#[derive(Parser, Debug)]
pub struct BasicArgs {
    /// Odor detected: yes or no
    #[arg(long)]
    pub odor: Option<OdorDetected>,

    /// natural, dark_stained or iridescent
    #[arg(long)]
    pub color: Option<SoilColor>,

    /// none, inorganic_trash, dead_vegetation or hydrocarbon_residue
    #[arg(long)]
    pub residue: Option<VisibleResidue>,

    /// Nearest water body: no, ">500m", "50-500m" or "<50m"
    #[arg(long)]
    pub water_body: Option<NearbyWaterBody>,

    /// Affected area in m²
    #[arg(long)]
    pub area: Option<f64>,

    /// Free-text observations
    #[arg(long)]
    pub notes: Option<String>,

    #[command(flatten)]
    pub site: SiteArgs,
}

#[derive(Parser, Debug)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// List saved reports, most recent first
    List {
        /// Only reports not yet synced
        #[arg(long)]
        unsynced: bool,
    },

    /// Show one report in full
    Show { id: ReportId },

    /// Mark a report as synced
    Sync {
        id: ReportId,

        /// Report type (looked up when omitted)
        #[arg(long = "type")]
        kind: Option<ReportKind>,
    },

    /// Mark every pending report as synced
    SyncAll,

    /// Delete a report
    Delete {
        id: ReportId,

        /// Report type (looked up when omitted)
        #[arg(long = "type")]
        kind: Option<ReportKind>,
    },

    /// Delete all reports of the current user
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}
