use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::TopperScope;
use crate::domain::Semester;
use crate::grading::WeightingScheme;

#[derive(Parser, Debug)]
#[command(author, version, about = "eduboard marks tracker")]
pub struct Cli {
    /// Directory holding the per-semester databases
    #[arg(long, global = true, default_value = "data", env = "EDUBOARD_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Score weighting: quarter_weighted (default) or half_weighted
    #[arg(long, global = true, env = "EDUBOARD_WEIGHTING")]
    pub weighting: Option<WeightingScheme>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Load a CSV marks sheet into a semester
    Ingest {
        /// Semester number, 1 to 4
        #[arg(short, long)]
        semester: Semester,
        /// Path to the CSV sheet
        #[arg(short, long)]
        file: PathBuf,
        /// Treat every row as this subject; the sheet needs no subject column
        #[arg(long)]
        subject: Option<String>,
    },
    /// Print the topper comparison for year1, year2 or college
    Toppers {
        #[arg(long)]
        scope: TopperScope,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingest_with_global_weighting() {
        let cli = Cli::try_parse_from([
            "eduboard",
            "ingest",
            "--semester",
            "2",
            "--file",
            "marks.csv",
            "--weighting",
            "half",
        ])
        .unwrap();

        assert_eq!(cli.weighting, Some(WeightingScheme::HalfWeighted));
        assert_eq!(
            cli.command,
            Command::Ingest {
                semester: Semester::Sem2,
                file: PathBuf::from("marks.csv"),
                subject: None,
            }
        );
    }

    #[test]
    fn test_rejects_unknown_semester_and_scope() {
        assert!(Cli::try_parse_from(["eduboard", "ingest", "--semester", "5", "--file", "x.csv"]).is_err());
        assert!(Cli::try_parse_from(["eduboard", "toppers", "--scope", "decade"]).is_err());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["eduboard", "serve"]).unwrap();

        assert_eq!(cli.command, Command::Serve { port: 3000 });
    }
}
