// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model resolver
//!
//! Flattens `extends`/`overrides` chains into complete models. A derived
//! model is its resolved base with every field present in `overrides`
//! replaced; a `null` override clears the field. Top-level fields of a
//! derived record play no part. The id is always the record's own.

use std::collections::HashMap;

use super::capability::Capability;
use super::context::ModelContext;
use super::schema::{ModelOverrides, ModelRecord, ResolvedModel};
use crate::error::{CatalogError, Result};

/// Resolver over one batch of model records
pub struct ModelResolver<'a> {
    records: HashMap<&'a str, &'a ModelRecord>,
    order: Vec<&'a ModelRecord>,
}

impl<'a> ModelResolver<'a> {
    /// Create a resolver over the given batch. On duplicate ids the first
    /// record is kept.
    pub fn new(records: &'a [ModelRecord]) -> Self {
        let mut map: HashMap<&str, &ModelRecord> = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());

        for record in records {
            if map.contains_key(record.id.as_str()) {
                tracing::warn!(model = %record.id, "duplicate model id ignored by resolver");
                continue;
            }
            map.insert(record.id.as_str(), record);
            order.push(record);
        }

        Self {
            records: map,
            order,
        }
    }

    /// Look up a record of the batch by id
    pub fn get(&self, id: &str) -> Option<&'a ModelRecord> {
        self.records.get(id).copied()
    }

    /// Resolve a single record against the batch
    pub fn resolve(&self, model: &ModelRecord) -> Result<ResolvedModel> {
        let mut visited = Vec::new();
        self.resolve_with(model, &mut visited)
    }

    /// Resolve every record of the batch, in order.
    ///
    /// A failure only affects the offending model; the others are still
    /// returned.
    pub fn resolve_all(&self) -> ResolveReport {
        let mut report = ResolveReport::default();

        for record in &self.order {
            match self.resolve(record) {
                Ok(model) => report.models.push(model),
                Err(err) => {
                    tracing::debug!(model = %record.id, error = %err, "model failed to resolve");
                    report.errors.push(err);
                }
            }
        }

        report
    }

    /// Resolve one record, recursing through its bases depth-first.
    ///
    /// `visited` holds the chain of ids from the entry point; it is not
    /// shared between sibling resolutions.
    fn resolve_with(&self, model: &ModelRecord, visited: &mut Vec<String>) -> Result<ResolvedModel> {
        let base_id = match model.extends {
            Some(ref base_id) => base_id,
            None => return complete(&model.id, None, Fields::declared(model)),
        };

        if visited.iter().any(|id| *id == model.id) {
            let mut chain = visited.clone();
            chain.push(model.id.clone());
            return Err(CatalogError::CircularDependency { chain });
        }
        visited.push(model.id.clone());

        let base = self
            .get(base_id)
            .ok_or_else(|| CatalogError::MissingBaseModel {
                model: model.id.clone(),
                base: base_id.clone(),
            })?;

        let resolved_base = self.resolve_with(base, visited)?;

        let mut fields = Fields::inherited(resolved_base);
        if let Some(ref overrides) = model.overrides {
            fields.apply(overrides);
        }

        complete(&model.id, Some(base_id.clone()), fields)
    }
}

/// Outcome of resolving a whole batch
#[derive(Debug, Default)]
pub struct ResolveReport {
    /// Successfully resolved models, in batch order
    pub models: Vec<ResolvedModel>,
    /// One error per model that failed
    pub errors: Vec<CatalogError>,
}

impl ResolveReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Inheritable fields while a model is being flattened
#[derive(Debug, Default)]
struct Fields {
    name: Option<String>,
    creator_id: Option<String>,
    license: Option<String>,
    capabilities: Option<Vec<Capability>>,
    provider_ids: Option<Vec<String>>,
    context: Option<ModelContext>,
    aliases: Option<Vec<String>>,
    languages: Option<Vec<String>>,
}

impl Fields {
    /// Fields written on a record without a base
    fn declared(record: &ModelRecord) -> Self {
        Self {
            name: record.name.clone(),
            creator_id: record.creator_id.clone(),
            license: record.license.clone(),
            capabilities: record.capabilities.clone(),
            provider_ids: record.provider_ids.clone(),
            context: record.context.clone(),
            aliases: record.aliases.clone(),
            languages: record.languages.clone(),
        }
    }

    fn inherited(base: ResolvedModel) -> Self {
        Self {
            name: Some(base.name),
            creator_id: base.creator_id,
            license: base.license,
            capabilities: Some(base.capabilities),
            provider_ids: Some(base.provider_ids),
            context: Some(base.context),
            aliases: Some(base.aliases),
            languages: Some(base.languages),
        }
    }

    /// Replace every field that is present in `overrides`, `null` included
    fn apply(&mut self, overrides: &ModelOverrides) {
        if let Some(ref name) = overrides.name {
            self.name = name.clone();
        }
        if let Some(ref creator_id) = overrides.creator_id {
            self.creator_id = creator_id.clone();
        }
        if let Some(ref license) = overrides.license {
            self.license = license.clone();
        }
        if let Some(ref capabilities) = overrides.capabilities {
            self.capabilities = capabilities.clone();
        }
        if let Some(ref provider_ids) = overrides.provider_ids {
            self.provider_ids = provider_ids.clone();
        }
        if let Some(ref context) = overrides.context {
            self.context = context.clone();
        }
        if let Some(ref aliases) = overrides.aliases {
            self.aliases = aliases.clone();
        }
        if let Some(ref languages) = overrides.languages {
            self.languages = languages.clone();
        }
    }

    /// Required fields that are absent or empty
    fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name".to_string());
        }
        if self.capabilities.as_ref().map_or(true, Vec::is_empty) {
            missing.push("capabilities".to_string());
        }
        if self.context.is_none() {
            missing.push("context".to_string());
        }
        if self.provider_ids.as_ref().map_or(true, Vec::is_empty) {
            missing.push("providerIds".to_string());
        }

        missing
    }
}

fn complete(id: &str, extends: Option<String>, fields: Fields) -> Result<ResolvedModel> {
    let missing = fields.missing();
    if !missing.is_empty() {
        return Err(CatalogError::IncompleteModel {
            model: id.to_string(),
            missing,
        });
    }

    match (fields.name, fields.capabilities, fields.provider_ids, fields.context) {
        (Some(name), Some(capabilities), Some(provider_ids), Some(context)) => Ok(ResolvedModel {
            id: id.to_string(),
            name,
            creator_id: fields.creator_id,
            license: fields.license,
            capabilities,
            provider_ids,
            context,
            aliases: fields.aliases.unwrap_or_default(),
            languages: fields.languages.unwrap_or_default(),
            extends,
        }),
        _ => Err(CatalogError::IncompleteModel {
            model: id.to_string(),
            missing: vec!["name".into(), "capabilities".into(), "providerIds".into(), "context".into()],
        }),
    }
}
