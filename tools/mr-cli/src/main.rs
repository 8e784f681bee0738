//! mr-cli: save analysis results into a metrics repository and inspect them.
//!
//! ```text
//! mr-cli --repository metrics.json save --timestamp 1700000000000 --tag tag=books --metrics run.json
//! mr-cli --repository metrics.json show --after 1600000000000 --tag tag=books
//! mr-cli --repository metrics.json keys
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mr_metrics_repository::Timestamp;
use mr_telemetry::{init_logging, render_metrics, TelemetryConfig};

/// Metrics repository command line
#[derive(Parser, Debug)]
#[command(name = "mr-cli")]
#[command(about = "Save and query data-quality metrics in a repository document")]
struct Args {
    /// Path of the repository document
    #[arg(short, long, env = "MR_REPOSITORY_PATH")]
    repository: PathBuf,

    /// Write the Prometheus exposition to stderr before exiting
    #[arg(long)]
    print_metrics: bool,

    /// Raise log verbosity to debug
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save (or merge) an analysis result read from a JSON metrics file
    Save {
        /// Dataset timestamp in milliseconds
        #[arg(long)]
        timestamp: Timestamp,

        /// Tag as key=value, repeatable
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,

        /// JSON array of {entity, instance, name, value} records
        #[arg(long)]
        metrics: PathBuf,
    },

    /// Print stored metrics as a table
    Show {
        /// Keep entries strictly before this timestamp
        #[arg(long)]
        before: Option<Timestamp>,

        /// Keep entries strictly after this timestamp
        #[arg(long)]
        after: Option<Timestamp>,

        /// Required tag as key=value, repeatable
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,

        /// Tag column to include, repeatable (default: every observed tag)
        #[arg(long = "with-tag")]
        with_tags: Vec<String>,

        /// Show failed metrics instead of successful ones
        #[arg(long)]
        failed: bool,

        /// Print JSON rows instead of a grid
        #[arg(long)]
        json: bool,
    },

    /// List stored result keys in append order
    Keys,
}

/// Parse a `key=value` tag argument.
fn parse_tag(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if args.verbose {
        telemetry = telemetry.with_log_level("debug");
    }
    init_logging(&telemetry)?;

    let config = commands::repository_config(&args.repository);
    let outcome = commands::run(&config, args.command);

    if args.print_metrics {
        eprint!("{}", render_metrics()?);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(
            parse_tag("tag=books"),
            Ok(("tag".to_string(), "books".to_string()))
        );
        assert_eq!(
            parse_tag("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_tag("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_tag("novalue").is_err());
        assert!(parse_tag("=books").is_err());
    }

    #[test]
    fn test_args_parse_show() {
        let args = Args::try_parse_from([
            "mr-cli",
            "--repository",
            "metrics.json",
            "show",
            "--after",
            "1500",
            "--tag",
            "tag=books",
            "--with-tag",
            "tag",
            "--failed",
        ])
        .unwrap();

        match args.command {
            Command::Show {
                after,
                before,
                tags,
                with_tags,
                failed,
                json,
            } => {
                assert_eq!(after, Some(1500));
                assert_eq!(before, None);
                assert_eq!(tags, vec![("tag".to_string(), "books".to_string())]);
                assert_eq!(with_tags, vec!["tag".to_string()]);
                assert!(failed);
                assert!(!json);
            }
            other => panic!("Expected show, got {other:?}"),
        }
    }

    #[test]
    fn test_args_reject_bad_tag() {
        let result = Args::try_parse_from([
            "mr-cli",
            "--repository",
            "metrics.json",
            "save",
            "--timestamp",
            "1",
            "--tag",
            "broken",
            "--metrics",
            "run.json",
        ]);
        assert!(result.is_err());
    }
}
