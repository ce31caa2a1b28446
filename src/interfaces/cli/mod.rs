mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::execute;

#[derive(Debug, Parser)]
#[command(
    name = "vulnscope",
    version,
    about = "Summarise vulnerability exports from CSV and spreadsheet files"
)]
pub struct Cli {
    /// Configuration file (defaults to ./vulnscope.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute statistics, request an analysis and write a Markdown report
    Report {
        /// Directory with .csv/.xls/.xlsx files (defaults to DATA_DIRECTORY)
        dir: Option<PathBuf>,

        /// Where the report file is written
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Compute and print statistics only; no text generation
    Stats {
        /// Directory with .csv/.xls/.xlsx files (defaults to DATA_DIRECTORY)
        dir: Option<PathBuf>,

        /// Print the statistics as JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_command() {
        let cli = Cli::try_parse_from([
            "vulnscope",
            "--config",
            "custom.toml",
            "report",
            "scans",
            "--output-dir",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Command::Report { dir, output_dir } => {
                assert_eq!(dir, Some(PathBuf::from("scans")));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_stats_defaults() {
        let cli = Cli::try_parse_from(["vulnscope", "stats", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Stats { dir: None, json: true }));
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["vulnscope"]).is_err());
    }
}
