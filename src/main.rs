// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! aimodels - query a catalog of AI models
//!
//! Entry point for the aimodels CLI application.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use aimodels::cli::{Cli, Commands};
use aimodels::commands::{self, data, directory, models, price};

fn main() -> anyhow::Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing; `-v` raises the level
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = commands::load_settings(&cli).context("Failed to load settings")?;
    let format = cli.format;

    // Validation reports problems itself instead of failing on them
    if let Commands::Validate = cli.command {
        let builder = settings
            .catalog_builder()
            .context("Failed to read catalog data")?;
        return exit_code(data::execute_validate(builder, format)?);
    }

    let catalog = settings
        .load_catalog()
        .context("Failed to load catalog")?;

    let found = match cli.command {
        Commands::List(ref args) => models::execute_list(&catalog, args, format)?,
        Commands::Show(ref args) => models::execute_show(&catalog, args, format)?,
        Commands::Price(ref args) => price::execute(&catalog, args, format)?,
        Commands::Providers => directory::execute_providers(&catalog, format)?,
        Commands::Creators => directory::execute_creators(&catalog, format)?,
        Commands::Export(ref args) => {
            data::execute_export(&catalog, args).context("Failed to export catalog")?
        }
        Commands::Validate => true,
    };

    exit_code(found)
}

fn exit_code(success: bool) -> anyhow::Result<ExitCode> {
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
