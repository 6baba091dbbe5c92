// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! `validate` and `export` commands

use serde::Serialize;

use crate::catalog::{AIModels, BuildOutcome, CatalogBuilder};
use crate::cli::args::{ExportArgs, OutputFormat};
use crate::error::Result;

#[derive(Serialize)]
struct ValidationReport {
    models: usize,
    providers: usize,
    organizations: usize,
    errors: Vec<String>,
}

impl ValidationReport {
    fn from_outcome(outcome: &BuildOutcome) -> Self {
        let registry = outcome.catalog.index().registry();
        Self {
            models: outcome.catalog.len(),
            providers: registry.providers().count(),
            organizations: registry.organizations().count(),
            errors: outcome.errors.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Build leniently and report everything that was dropped
pub fn render_validate(builder: CatalogBuilder, format: OutputFormat) -> Result<(String, bool)> {
    let outcome = builder.build();
    let report = ValidationReport::from_outcome(&outcome);
    let clean = report.errors.is_empty();

    if format == OutputFormat::Json {
        return Ok((serde_json::to_string_pretty(&report)?, clean));
    }

    let mut lines: Vec<String> = report.errors.iter().map(|e| format!("✗ {}", e)).collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} {} model(s), {} provider(s), {} organization(s), {} error(s)",
        if clean { "✓" } else { "✗" },
        report.models,
        report.providers,
        report.organizations,
        report.errors.len()
    ));
    Ok((lines.join("\n"), clean))
}

/// Execute the validate command
pub fn execute_validate(builder: CatalogBuilder, format: OutputFormat) -> Result<bool> {
    let (text, clean) = render_validate(builder, format)?;
    println!("{}", text);
    Ok(clean)
}

/// Execute the export command
pub fn execute_export(catalog: &AIModels, args: &ExportArgs) -> Result<bool> {
    let json = serde_json::to_string_pretty(&catalog.snapshot())?;
    match args.output {
        Some(ref path) => {
            std::fs::write(path, json)?;
            tracing::debug!(path = %path.display(), "catalog exported");
        }
        None => println!("{}", json),
    }
    Ok(true)
}
