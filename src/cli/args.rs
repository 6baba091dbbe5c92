// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for aimodels.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::capability::Capability;

/// aimodels - query a catalog of AI models, providers and prices
#[derive(Parser, Debug)]
#[command(name = "aimodels")]
#[command(version, about = "Query a catalog of AI models, providers and prices")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory to load instead of the built-in catalog
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail if any record is invalid instead of skipping it
    #[arg(long, global = true)]
    pub strict: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List models, optionally filtered
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one model by id or alias
    Show(ShowArgs),

    /// Show the token price of a model at a provider
    Price(PriceArgs),

    /// List providers serving at least one model
    Providers,

    /// List organizations that created at least one model
    Creators,

    /// Validate the data and report every problem found
    Validate,

    /// Export the resolved catalog as JSON
    Export(ExportArgs),
}

/// Arguments for the list subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Required capabilities (repeatable or comma separated)
    #[arg(long, value_delimiter = ',')]
    pub can: Vec<Capability>,

    /// Required languages (repeatable or comma separated)
    #[arg(long, value_delimiter = ',')]
    pub know: Vec<String>,

    /// Only models offered by this provider
    #[arg(long)]
    pub provider: Option<String>,

    /// Only models created by this organization
    #[arg(long)]
    pub creator: Option<String>,

    /// Minimum text context window
    #[arg(long)]
    pub min_context: Option<u64>,
}

/// Arguments for the show subcommand
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Model id or alias
    pub model: String,
}

/// Arguments for the price subcommand
#[derive(clap::Args, Debug)]
pub struct PriceArgs {
    /// Model id or alias
    pub model: String,

    /// Provider id
    pub provider: String,

    /// Estimate the cost of this many input tokens
    #[arg(long, value_name = "TOKENS")]
    pub input_tokens: Option<u64>,

    /// Estimate the cost of this many output tokens
    #[arg(long, value_name = "TOKENS")]
    pub output_tokens: Option<u64>,
}

/// Arguments for the export subcommand
#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    // ==================== CLI Global Arguments ====================

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["aimodels", "providers"]);
        assert!(matches!(cli.command, Commands::Providers));
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.strict);
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn test_cli_verbose_multiple() {
        let cli = Cli::parse_from(["aimodels", "-vvv", "creators"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "aimodels",
            "validate",
            "--strict",
            "--data-dir",
            "/srv/data",
            "--format",
            "json",
        ]);
        assert!(cli.strict);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/data")));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["aimodels"]).is_err());
    }

    // ==================== Subcommands ====================

    #[test]
    fn test_list_filters() {
        let cli = Cli::parse_from([
            "aimodels",
            "list",
            "--can",
            "chat,img-in",
            "--can",
            "function-out",
            "--know",
            "en",
            "--provider",
            "openai",
            "--min-context",
            "100000",
        ]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(
                    args.can,
                    vec![Capability::Chat, Capability::ImageIn, Capability::FunctionOut]
                );
                assert_eq!(args.know, vec!["en"]);
                assert_eq!(args.provider.as_deref(), Some("openai"));
                assert!(args.creator.is_none());
                assert_eq!(args.min_context, Some(100_000));
            }
            other => panic!("Expected List command, got {:?}", other),
        }
    }

    #[test]
    fn test_list_rejects_unknown_capability() {
        assert!(Cli::try_parse_from(["aimodels", "list", "--can", "telepathy"]).is_err());
    }

    #[test]
    fn test_ls_alias() {
        let cli = Cli::parse_from(["aimodels", "ls"]);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_price_positional() {
        let cli = Cli::parse_from(["aimodels", "price", "gpt-4o", "openai"]);
        match cli.command {
            Commands::Price(args) => {
                assert_eq!(args.model, "gpt-4o");
                assert_eq!(args.provider, "openai");
                assert_eq!(args.input_tokens, None);
            }
            other => panic!("Expected Price command, got {:?}", other),
        }
    }

    #[test]
    fn test_price_token_counts() {
        let cli = Cli::parse_from([
            "aimodels",
            "price",
            "gpt-4o",
            "openai",
            "--input-tokens",
            "1000000",
            "--output-tokens",
            "2000",
        ]);
        match cli.command {
            Commands::Price(args) => {
                assert_eq!(args.input_tokens, Some(1_000_000));
                assert_eq!(args.output_tokens, Some(2000));
            }
            other => panic!("Expected Price command, got {:?}", other),
        }
    }

    #[test]
    fn test_export_output() {
        let cli = Cli::parse_from(["aimodels", "export", "-o", "catalog.json"]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.output, Some(PathBuf::from("catalog.json")))
            }
            other => panic!("Expected Export command, got {:?}", other),
        }
    }
}
