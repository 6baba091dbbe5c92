// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use aimodels::cli::{Cli, Commands, OutputFormat};
use aimodels::commands::{directory, models, price};
use aimodels::loader::DataLoader;
use clap::Parser;

#[test]
fn test_parse_list_command() {
    let cli = Cli::try_parse_from(["aimodels", "list"]).expect("Valid command parsing");
    assert!(matches!(cli.command, Commands::List(_)));
}

#[test]
fn test_parse_show_command() {
    let cli = Cli::try_parse_from(["aimodels", "show", "gpt-4o"]).expect("Valid command parsing");
    if let Commands::Show(args) = cli.command {
        assert_eq!(args.model, "gpt-4o");
    } else {
        panic!("Expected Show command");
    }
}

#[test]
fn test_parse_show_requires_model() {
    assert!(Cli::try_parse_from(["aimodels", "show"]).is_err());
}

#[test]
fn test_parse_validate_and_export() {
    let cli = Cli::try_parse_from(["aimodels", "validate"]).expect("Valid command parsing");
    assert!(matches!(cli.command, Commands::Validate));

    let cli = Cli::try_parse_from(["aimodels", "export"]).expect("Valid command parsing");
    assert!(matches!(cli.command, Commands::Export(_)));
}

#[test]
fn test_parse_format_json() {
    let cli = Cli::try_parse_from(["aimodels", "--format", "json", "creators"])
        .expect("Valid command parsing");
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(Cli::try_parse_from(["aimodels", "--format", "yaml", "creators"]).is_err());
}

#[test]
fn test_list_command_end_to_end() {
    let cli = Cli::try_parse_from(["aimodels", "list", "--can", "reason", "--format", "json"])
        .expect("Valid command parsing");
    let catalog = DataLoader::builtin().build().catalog;

    let args = match cli.command {
        Commands::List(args) => args,
        _ => panic!("Expected List command"),
    };
    let json = models::render_list(&catalog, &args, cli.format).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["claude-3-7-sonnet", "o3-mini"]);
}

#[test]
fn test_price_command_by_alias() {
    let cli = Cli::try_parse_from(["aimodels", "price", "llama-3.1-8b-instant", "groq"])
        .expect("Valid command parsing");
    let catalog = DataLoader::builtin().build().catalog;

    if let Commands::Price(args) = cli.command {
        let text = price::render(&catalog, &args, cli.format).unwrap().unwrap();
        assert!(text.contains("$0.05 input / $0.08 output"));
    } else {
        panic!("Expected Price command");
    }
}

#[test]
fn test_providers_command_json() {
    let catalog = DataLoader::builtin().build().catalog;
    let json = directory::render_providers(&catalog, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["anthropic", "groq", "openai", "azure"]);
}
