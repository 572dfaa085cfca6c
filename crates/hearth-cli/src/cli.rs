//! CLI argument definitions for hearth.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fetch` | Fetch one metric category, optionally range-filtered |
//! | `range` | Show the default date range across all categories |
//! | `sql`   | Run a guardrailed inspection query against the warehouse |
//! | `seed`  | Load category fixtures from a JSON file |
//!
//! ```bash
//! hearth fetch listings --start Mar-24 --end Sep-24 --pretty
//! hearth range
//! hearth sql 'SELECT * FROM listings' --max-rows 50
//! hearth seed fixtures/market.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Read-only analytics CLI for monthly real-estate market statistics.
#[derive(Debug, Parser)]
#[command(name = "hearth", version, about = "Real-estate market statistics CLI")]
pub struct Cli {
    /// Path to the warehouse file (default: $HEARTH_HOME/market.duckdb).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5). Useful in CI.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one metric category.
    Fetch(FetchArgs),
    /// Show the default date range derived from all categories.
    Range,
    /// Run an ad-hoc SQL query with guardrails.
    Sql(SqlArgs),
    /// Load category fixtures from a JSON file.
    Seed(SeedArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Category: listings, prices, ratio, dom, inventory, volume.
    pub category: String,

    /// Start of the range as a MMM-YY label, e.g. Mar-24.
    #[arg(long)]
    pub start: Option<String>,

    /// End of the range as a MMM-YY label, e.g. Sep-24.
    #[arg(long)]
    pub end: Option<String>,

    /// Filter to the default range (latest period minus 12 months).
    #[arg(long, default_value_t = false, conflicts_with_all = ["start", "end"])]
    pub last_year: bool,
}

#[derive(Debug, Args)]
pub struct SqlArgs {
    /// The SQL query to execute.
    pub query: String,

    /// Maximum number of rows to return.
    #[arg(long, default_value_t = 10_000)]
    pub max_rows: usize,

    /// Query timeout in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    pub query_timeout_ms: u64,

    /// Allow write statements.
    #[arg(long, default_value_t = false)]
    pub write: bool,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// JSON file mapping category names to record arrays.
    pub file: PathBuf,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON envelope.
    Json,
    /// Human-oriented summary.
    Table,
}
