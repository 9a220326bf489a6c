//! codescope CLI - project structure and static analysis for source trees
//!
//! Classifies the files of a directory, renders its tree, abstracts
//! non-key files, and reports complexity and dependency statistics for the
//! TypeScript/JavaScript sources in it.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::analyze::{AnalyzeOptions, Sections};
use commands::{analyze, classify, tree};
use config::ScopeConfig;
use output::{OutputFormat, Stream};

/// Project structure and static analysis for source trees.
#[derive(Parser)]
#[command(name = "codescope")]
#[command(author, version)]
#[command(about = "Project structure and static analysis for source trees")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  codescope analyze                 Analyze the current directory
  codescope analyze app -o out.txt  Write the document to a file
  codescope tree src                Show the file tree
  codescope classify --format json  List file categories as JSON")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the structure document and analysis report
    #[command(visible_alias = "a")]
    Analyze {
        /// Directory to analyze (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads for per-file work (default: one per CPU)
        #[arg(long)]
        threads: Option<usize>,

        /// Only produce the analysis report
        #[arg(long, conflicts_with = "structure_only")]
        report_only: bool,

        /// Only produce the project structure
        #[arg(long)]
        structure_only: bool,
    },

    /// Print the file tree of a directory
    Tree {
        /// Directory to render (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show the category assigned to every file
    Classify {
        /// Directory to classify (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

impl Commands {
    fn path(&self) -> &Path {
        match self {
            Commands::Analyze { path, .. }
            | Commands::Tree { path }
            | Commands::Classify { path } => path,
        }
    }

    /// Stream the command writes colored text to.
    fn color_stream(&self) -> Stream {
        match self {
            // the document goes to stdout uncolored, status lines to stderr
            Commands::Analyze { .. } => Stream::Stderr,
            Commands::Tree { .. } | Commands::Classify { .. } => Stream::Stdout,
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    // Configuration lives in the analysed root
    let config = ScopeConfig::load(command.path());

    // Resolve output format: CLI flag > config default > Text
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    });

    output::configure_colors(config.use_color(), command.color_stream());

    match command {
        Commands::Analyze {
            path,
            output,
            threads,
            report_only,
            structure_only,
        } => {
            let options = AnalyzeOptions {
                output: output.as_deref(),
                threads,
                sections: Sections::from_flags(report_only, structure_only),
                format,
                quiet: cli.quiet,
            };
            analyze::run(&path, &config, &options)
        }
        Commands::Tree { path } => tree::run(&path, &config, format, cli.quiet),
        Commands::Classify { path } => classify::run(&path, &config, format, cli.quiet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_stream_follows_colored_output() {
        let cli = Cli::parse_from(["codescope", "analyze", "-o", "out.txt"]);
        assert_eq!(cli.command.unwrap().color_stream(), Stream::Stderr);

        let cli = Cli::parse_from(["codescope", "classify", "src"]);
        let command = cli.command.unwrap();
        assert_eq!(command.color_stream(), Stream::Stdout);
        assert_eq!(command.path(), Path::new("src"));
    }
}
