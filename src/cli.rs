use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropops",
    version,
    about = "Farm field manager with crop rotation and planting recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file
    Init,
    /// Manage fields
    #[command(subcommand)]
    Field(FieldCommand),
    /// Record or resolve pest and disease problems
    #[command(subcommand)]
    Issue(IssueCommand),
    /// Record a planting on a field
    Plant {
        field_id: i64,
        /// Crop id from the catalog
        #[arg(long)]
        crop: String,
        /// Planting date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a recorded planting
    Unplant { planting_id: i64 },
    /// List plantings on a field, newest first
    Plantings { field_id: i64 },
    /// List the crop catalog
    Crops,
    /// Score every crop for a field
    Recommend(EngineArgs),
    /// Crops the field is currently a poor home for
    Avoid(EngineArgs),
    /// Crops resistant to the field's active pest and disease problems
    Alternatives(EngineArgs),
}

#[derive(Subcommand)]
pub enum FieldCommand {
    /// Add a field
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        ph: f64,
        #[arg(long)]
        soil_type: Option<String>,
    },
    /// List fields
    List,
    /// Show a field with its pest and disease history
    Show { id: i64 },
    /// Update soil readings
    Update {
        id: i64,
        #[arg(long)]
        ph: Option<f64>,
        #[arg(long)]
        soil_type: Option<String>,
    },
    /// Remove a field and everything recorded on it
    Remove { id: i64 },
}

#[derive(Subcommand)]
pub enum IssueCommand {
    /// Log a pest or disease observation
    Log {
        field_id: i64,
        #[arg(long, value_enum)]
        kind: IssueKindArg,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = SeverityArg::Medium)]
        severity: SeverityArg,
        /// Observation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Mark an issue as resolved
    Resolve { issue_id: i64 },
}

#[derive(Args)]
pub struct EngineArgs {
    pub field_id: i64,
    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IssueKindArg {
    Pest,
    Disease,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum SeverityArg {
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_recommend_with_date() {
        let cli = Cli::parse_from(["cropops", "recommend", "3", "--as-of", "2026-05-01", "--json"]);
        match cli.command {
            Commands::Recommend(args) => {
                assert_eq!(args.field_id, 3);
                assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2026, 5, 1));
                assert!(args.json);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn parses_issue_log_defaults() {
        let cli = Cli::parse_from([
            "cropops", "-vv", "issue", "log", "1", "--kind", "pest", "--name", "Aphids",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Issue(IssueCommand::Log { severity, date, .. }) => {
                assert_eq!(severity, SeverityArg::Medium);
                assert!(date.is_none());
            }
            _ => panic!("expected issue log"),
        }
    }

    #[test]
    fn parses_unplant() {
        let cli = Cli::parse_from(["cropops", "unplant", "7"]);
        assert!(matches!(cli.command, Commands::Unplant { planting_id: 7 }));
    }

    #[test]
    fn rejects_bad_date() {
        let result = Cli::try_parse_from(["cropops", "avoid", "1", "--as-of", "May 1st"]);
        assert!(result.is_err());
    }
}
