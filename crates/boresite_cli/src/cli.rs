//! Command line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "boresite",
    version,
    about = "Manage geotechnical survey projects and borehole records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the project data (overrides BORESITE_DATA_DIR).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides BORESITE_LOG_LEVEL).
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print `pong` to verify the core crate is linked.
    Ping,
    /// Print the core crate version.
    Version,
    /// Project commands.
    #[command(subcommand)]
    Projects(ProjectCommand),
    /// Borehole commands.
    #[command(subcommand)]
    Boreholes(BoreholeCommand),
    /// Export a project's boreholes as CSV.
    Export(ExportArgs),
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List projects, newest first.
    List(ProjectListArgs),
    /// Create a project.
    Create(ProjectCreateArgs),
    /// Mark a project as archived.
    Archive { project: String },
    /// Mark an archived project as active again.
    Activate { project: String },
    /// Delete a project and all of its boreholes.
    Delete { project: String },
}

#[derive(Args)]
pub struct ProjectListArgs {
    /// Only show projects with this status (active|archived).
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive search over name, client and location.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ProjectCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Subcommand)]
pub enum BoreholeCommand {
    /// List boreholes of a project in creation order.
    List {
        project: String,
        /// Only show boreholes with this status.
        #[arg(long)]
        status: Option<String>,
    },
    /// Place a borehole at a coordinate.
    Add(BoreholeAddArgs),
    /// Change a borehole's drilling status.
    SetStatus {
        project: String,
        borehole: String,
        status: String,
    },
    /// Delete a borehole.
    Delete { project: String, borehole: String },
}

#[derive(Args)]
pub struct BoreholeAddArgs {
    pub project: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
    /// Explicit code; defaults to the next free `BH{NN}`.
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    /// Meters; an empty value means unknown.
    #[arg(long = "ground-level", allow_hyphen_values = true)]
    pub ground_level: Option<String>,
    /// Meters; an empty value means unknown.
    #[arg(long = "total-depth")]
    pub total_depth: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    pub project: String,
    /// Output file; stdout when omitted.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}
