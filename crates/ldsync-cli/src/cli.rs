use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Parser)]
#[command(
    name = "ldsync",
    about = "ldsync: reconcile declared, implemented, and rendered JSON-LD structured data",
    version
)]
pub struct Cli {
    /// Config file (defaults to ./ldsync.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log progress to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log per-route decisions to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Three-way reality check: manifest vs source usage vs built output
    Check {
        /// Path to the manifest JSON
        #[arg(long)]
        manifest: Option<String>,

        /// Path to the source-usage JSON
        #[arg(long)]
        source_usage: Option<String>,

        /// Path to the collected (built output) JSON
        #[arg(long)]
        collected: Option<String>,

        /// Comma-separated rulesets whose issues are merged into routes
        #[arg(long)]
        rulesets: Option<String>,

        /// Require structured data on every source-scanned route
        #[arg(long)]
        require_source_routes: bool,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Exit non-zero when any warning is reported
        #[arg(long)]
        fail_on_warn: bool,
    },

    /// Manifest coverage of collected output
    Coverage {
        /// Path to the manifest JSON
        #[arg(long)]
        manifest: Option<String>,

        /// Path to the collected (built output) JSON
        #[arg(long)]
        collected: Option<String>,

        /// Route that must produce structured data (repeatable)
        #[arg(long = "require")]
        require: Vec<String>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Exit non-zero when any warning is reported
        #[arg(long)]
        fail_on_warn: bool,
    },

    /// Run field-quality rulesets over collected output
    Lint {
        /// Path to the collected (built output) JSON
        #[arg(long)]
        collected: Option<String>,

        /// Comma-separated rulesets (default: all)
        #[arg(long)]
        rulesets: Option<String>,

        /// Only lint this route
        #[arg(long)]
        route: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Exit non-zero when any warning is reported
        #[arg(long)]
        fail_on_warn: bool,
    },

    /// Compare two collected snapshots
    Drift {
        /// Earlier collected JSON
        #[arg(long)]
        before: String,

        /// Later collected JSON
        #[arg(long)]
        after: String,

        /// Output format (github renders as text)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// List known rulesets and the types each covers
    Rulesets {
        /// Output format (github renders as text)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    #[default]
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
    #[value(name = "github")]
    Github,
}
