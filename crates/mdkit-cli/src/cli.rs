use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for mdkit
#[derive(Parser, Debug)]
#[command(author, version, about = "Parse, analyze, transform and merge Markdown documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file (TOML)
    #[arg(short = 'c', long = "config", global = true)]
    pub config_file: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print metadata, body and extracted elements
    Parse {
        /// Markdown file to read
        file: PathBuf,
    },

    /// Print counts and the top-level block structure
    Analyze {
        /// Markdown file to read
        file: PathBuf,
    },

    /// Print the structural token stream of the body
    Tokens {
        /// Markdown file to read
        file: PathBuf,
    },

    /// Apply a text rewrite to the body, keeping metadata
    Transform {
        /// Markdown file to read
        file: PathBuf,

        /// Operation name (uppercase, title_case, remove_links, ...)
        #[arg(short = 'O', long)]
        operation: String,

        /// Fail on unknown operation names instead of leaving the body unchanged
        #[arg(long)]
        strict: bool,

        /// Write the transformed document here instead of printing JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge documents in order; directories contribute their .md files
    Merge {
        /// Files or directories to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Metadata strategy (append or combine_metadata); defaults to config
        #[arg(short, long)]
        strategy: Option<String>,

        /// Write the merged document here instead of printing JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Answer JSON requests read line by line from stdin
    Serve,
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
    fn parses_transform_with_global_flags() {
        let cli = Cli::try_parse_from([
            "mdkit",
            "transform",
            "notes.md",
            "--operation",
            "title_case",
            "--strict",
            "-v",
            "--compact",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(cli.compact);
        let Commands::Transform {
            file,
            operation,
            strict,
            output,
        } = cli.command
        else {
            panic!("expected transform command");
        };
        assert_eq!(file, PathBuf::from("notes.md"));
        assert_eq!(operation, "title_case");
        assert!(strict);
        assert!(output.is_none());
    }

    #[test]
    fn merge_requires_inputs() {
        assert!(Cli::try_parse_from(["mdkit", "merge"]).is_err());

        let cli = Cli::try_parse_from(["mdkit", "merge", "a.md", "dir", "-s", "combine_metadata"])
            .unwrap();
        let Commands::Merge {
            inputs, strategy, ..
        } = cli.command
        else {
            panic!("expected merge command");
        };
        assert_eq!(inputs.len(), 2);
        assert_eq!(strategy.as_deref(), Some("combine_metadata"));
    }
}
