/// CLI argument definitions for the `tg` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "tg", version, about = "Structural quality signals for a source tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Common output arguments shared by the analysis commands.
#[derive(Args)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the detailed per-file report
    #[arg(short, long)]
    pub report: bool,

    /// Show only the top N files in the detailed report, 0 for all (default: 20)
    #[arg(long)]
    pub top: Option<usize>,
}

/// All available analysis subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze import coupling: cycles, instability, cohesion, hub files
    #[command(long_about = "\
Analyze the import dependency graph of a project.

Reads a resolved-imports manifest (JSON) produced by an import resolver:

  { \"files\": [\"src/extra.ts\"],
    \"edges\": [ {\"from\": \"src/a.ts\", \"to\": \"src/b.ts\"}, ... ] }

Edge endpoints must be normalized project-relative paths; the optional
files list adds files with no imports in either direction.

Per-file metrics:
  Instability = outgoing / (incoming + outgoing)
      0 = fully depended-upon (stable), 1 = fully dependent (unstable)
  Cohesion    = average path-prefix overlap with the file's imports
      1 = imports stay in the file's own subtree, 0 = scattered
  Percentile  = the file's incoming-dependency count ranked 0-100
      among all files, tied counts sharing a rank

Project-wide: dependency cycles (deduplicated by canonical rotation),
hub files (incoming dependencies above the threshold), isolated files,
and import totals.")]
    Deps {
        /// Resolved-imports manifest (JSON)
        manifest: PathBuf,

        /// Incoming-dependency count above which a file is a hub
        #[arg(long, default_value = "10")]
        hub_threshold: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Detect duplicated code blocks across files
    #[command(long_about = "\
Detect literal code duplication across a source tree.

Every window of consecutive non-blank lines (default: 5) is normalized
— string and numeric literals, declared names, method-call receivers
and property keys are collapsed to placeholders, comments stripped —
and content-hashed. A file's duplication ratio is the share of its
distinct block hashes that occur anywhere else in the project.

Issues are emitted against per-file-type thresholds (production code
is held to a stricter standard than tests, examples, or config files);
thresholds and block size can be overridden with a TOML config file.")]
    Dups {
        /// Directory to analyze (default: current directory)
        path: Option<PathBuf>,

        /// Thresholds config file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Lines per duplication block window (overrides config)
        #[arg(long)]
        block_lines: Option<usize>,

        /// Exclude files matching a glob (repeatable)
        #[arg(long, value_name = "GLOB")]
        exclude: Vec<String>,

        /// Include test files and directories (excluded by default)
        #[arg(long)]
        include_tests: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}
