// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! `list` and `show` commands

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::AIModels;
use crate::cli::args::{ListArgs, OutputFormat, ShowArgs};
use crate::error::Result;
use crate::models::collection::ModelCollection;
use crate::models::schema::ResolvedModel;
use crate::organizations::schema::Organization;
use crate::providers::schema::Provider;

use super::{context_column, describe_context, join_capabilities};

/// Apply the list filters in order
pub fn select(catalog: &AIModels, args: &ListArgs) -> ModelCollection {
    let mut models = catalog.can(&args.can);

    if !args.know.is_empty() {
        let languages: Vec<&str> = args.know.iter().map(String::as_str).collect();
        models = models.know(&languages);
    }
    if let Some(ref provider) = args.provider {
        models = models.from_provider(provider);
    }
    if let Some(ref creator) = args.creator {
        models = models.from_creator(creator);
    }
    if let Some(min) = args.min_context {
        models = models.with_min_context(min);
    }

    models
}

pub fn render_list(catalog: &AIModels, args: &ListArgs, format: OutputFormat) -> Result<String> {
    let models = select(catalog, args);

    if format == OutputFormat::Json {
        let list: Vec<&ResolvedModel> = models.iter().map(Arc::as_ref).collect();
        return Ok(serde_json::to_string_pretty(&list)?);
    }

    if models.is_empty() {
        return Ok("No models match.".to_string());
    }

    let mut lines = vec![format!(
        "{:<28} {:<24} {:>9}  {}",
        "ID", "NAME", "CONTEXT", "CAPABILITIES"
    )];
    for model in &models {
        lines.push(format!(
            "{:<28} {:<24} {:>9}  {}",
            model.id,
            model.name,
            context_column(&model.context),
            join_capabilities(&model.capabilities)
        ));
    }
    lines.push(format!("\n{} model(s)", models.len()));
    Ok(lines.join("\n"))
}

/// Execute the list command
pub fn execute_list(catalog: &AIModels, args: &ListArgs, format: OutputFormat) -> Result<bool> {
    println!("{}", render_list(catalog, args, format)?);
    Ok(true)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelDetails<'a> {
    #[serde(flatten)]
    model: &'a ResolvedModel,
    creator: Option<&'a Organization>,
    providers: Vec<&'a Provider>,
}

/// Render one model, or `None` if the id is unknown
pub fn render_show(catalog: &AIModels, args: &ShowArgs, format: OutputFormat) -> Result<Option<String>> {
    let model = match catalog.find_model(&args.model) {
        Some(model) => model,
        None => return Ok(None),
    };
    let creator = catalog.get_creator_for_model(&model.id);
    let providers = catalog.get_providers_for_model(&model.id);

    if format == OutputFormat::Json {
        let details = ModelDetails {
            model,
            creator: creator.as_deref(),
            providers: providers.iter().map(Arc::as_ref).collect(),
        };
        return Ok(Some(serde_json::to_string_pretty(&details)?));
    }

    let mut lines = vec![format!("{} ({})", model.name, model.id)];
    let creator_line = match (&creator, &model.creator_id) {
        (Some(org), _) => format!("{} ({})", org.name, org.id),
        (None, Some(id)) => id.clone(),
        (None, None) => "unknown".to_string(),
    };
    lines.push(format!("  Creator:      {}", creator_line));
    if let Some(ref license) = model.license {
        lines.push(format!("  License:      {}", license));
    }
    lines.push(format!(
        "  Capabilities: {}",
        join_capabilities(&model.capabilities)
    ));
    lines.push(format!("  Context:      {}", describe_context(&model.context)));
    lines.push(format!("  Providers:    {}", model.provider_ids.join(", ")));
    if !model.aliases.is_empty() {
        lines.push(format!("  Aliases:      {}", model.aliases.join(", ")));
    }
    if !model.languages.is_empty() {
        lines.push(format!("  Languages:    {}", model.languages.join(", ")));
    }
    if let Some(ref base) = model.extends {
        lines.push(format!("  Extends:      {}", base));
    }

    Ok(Some(lines.join("\n")))
}

/// Execute the show command
pub fn execute_show(catalog: &AIModels, args: &ShowArgs, format: OutputFormat) -> Result<bool> {
    match render_show(catalog, args, format)? {
        Some(text) => {
            println!("{}", text);
            Ok(true)
        }
        None => {
            eprintln!("Model '{}' not found", args.model);
            Ok(false)
        }
    }
}
