// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! `providers` and `creators` commands
//!
//! Both list only the entities referenced by at least one model.

use std::sync::Arc;

use crate::catalog::AIModels;
use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::organizations::schema::Organization;
use crate::providers::schema::Provider;

pub fn render_providers(catalog: &AIModels, format: OutputFormat) -> Result<String> {
    let providers = catalog.all_providers();

    if format == OutputFormat::Json {
        let list: Vec<&Provider> = providers.iter().map(Arc::as_ref).collect();
        return Ok(serde_json::to_string_pretty(&list)?);
    }

    let mut lines = Vec::with_capacity(providers.len());
    for provider in &providers {
        let count = catalog.from_provider(&provider.id).len();
        let api = if provider.api_url.is_empty() {
            "-"
        } else {
            provider.api_url.as_str()
        };
        lines.push(format!(
            "{:<14} {:<20} {:>3} model(s)  {}",
            provider.id, provider.name, count, api
        ));
    }
    Ok(lines.join("\n"))
}

pub fn render_creators(catalog: &AIModels, format: OutputFormat) -> Result<String> {
    let creators = catalog.all_organizations();

    if format == OutputFormat::Json {
        let list: Vec<&Organization> = creators.iter().map(Arc::as_ref).collect();
        return Ok(serde_json::to_string_pretty(&list)?);
    }

    let mut lines = Vec::with_capacity(creators.len());
    for org in &creators {
        let count = catalog.from_creator(&org.id).len();
        lines.push(format!(
            "{:<14} {:<20} {:>3} model(s)  {} {}  {}",
            org.id, org.name, count, org.country, org.founded, org.website_url
        ));
    }
    Ok(lines.join("\n"))
}

/// Execute the providers command
pub fn execute_providers(catalog: &AIModels, format: OutputFormat) -> Result<bool> {
    println!("{}", render_providers(catalog, format)?);
    Ok(true)
}

/// Execute the creators command
pub fn execute_creators(catalog: &AIModels, format: OutputFormat) -> Result<bool> {
    println!("{}", render_creators(catalog, format)?);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DataLoader;

    #[test]
    fn test_providers_text() {
        let catalog = DataLoader::builtin().build().catalog;
        let text = render_providers(&catalog, OutputFormat::Text).unwrap();
        assert!(text.contains("groq"));
        assert!(text.contains("https://api.openai.com/v1"));
        // azure has no public endpoint
        let azure = text.lines().find(|l| l.starts_with("azure")).unwrap();
        assert!(azure.ends_with('-'));
    }

    #[test]
    fn test_creators_skip_unused_organizations() {
        let catalog = DataLoader::builtin().build().catalog;
        let text = render_creators(&catalog, OutputFormat::Text).unwrap();
        assert!(text.contains("anthropic"));
        // mistral is in orgs.json but has no models
        assert!(!text.contains("mistral"));

        let json = render_creators(&catalog, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }
}
