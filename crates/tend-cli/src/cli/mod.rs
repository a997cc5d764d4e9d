use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `tend` binary.
#[derive(Debug, Parser)]
#[command(name = "tend", version, about = "Tend - project maintenance status records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build status records for every project in a catalog.
    Status(StatusArgs),
    /// Build the status record for one repository.
    Project(ProjectArgs),
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// JSON array of project descriptors.
    #[arg(long)]
    pub catalog: PathBuf,

    /// JSON object mapping project id to prior snapshots, oldest first.
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Only build these project ids.
    #[arg(long, num_args = 1..)]
    pub only: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Repository as `owner/name`.
    pub repo: String,

    /// Record id (defaults to the repository name).
    #[arg(long)]
    pub id: Option<String>,

    /// Workspace directory inside the repository.
    #[arg(long)]
    pub path: Option<String>,

    /// Registry package name.
    #[arg(long)]
    pub pkg: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_parses_catalog_and_filters() {
        let cli = Cli::try_parse_from([
            "tend", "status", "--catalog", "projects.json", "--only", "cli", "arborist",
        ])
        .expect("cli should parse");

        let Commands::Status(args) = cli.command else {
            panic!("expected status command");
        };
        assert_eq!(args.catalog.to_str(), Some("projects.json"));
        assert_eq!(args.only, vec!["cli", "arborist"]);
        assert!(args.history.is_none());
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tend", "project", "npm/cli", "--pkg", "npm", "--format", "raw", "--quiet",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.global_flags().quiet);
        let Commands::Project(args) = cli.command else {
            panic!("expected project command");
        };
        assert_eq!(args.repo, "npm/cli");
        assert_eq!(args.pkg.as_deref(), Some("npm"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tend", "--format", "table", "project", "npm/cli"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn status_requires_catalog() {
        assert!(Cli::try_parse_from(["tend", "status"]).is_err());
    }
}
