// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Catalog facade
//!
//! [`AIModels`] is the object consumers hold: the full model collection plus
//! cross-reference and pricing lookups. It is assembled once by a
//! [`CatalogBuilder`] and never changes afterwards. Hosts that reload data
//! publish new snapshots through a [`SharedCatalog`].
//!
//! ```rust,ignore
//! let outcome = CatalogBuilder::new()
//!     .add_model_document(openai_models)
//!     .add_provider(openai)
//!     .build();
//!
//! let catalog = outcome.catalog;
//! let vision = catalog.can_chat().can_see();
//! let price = catalog.get_price("gpt-4o", "openai");
//! ```

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{CatalogError, Result, ValidationError};
use crate::index::{CatalogIndex, Registry};
use crate::models::collection::ModelCollection;
use crate::models::resolver::ModelResolver;
use crate::models::schema::{ModelDocument, ModelRecord, ResolvedModel};
use crate::organizations::schema::Organization;
use crate::providers::schema::{Provider, TokenPrice};
use crate::validation;

/// Immutable model catalog
#[derive(Debug, Clone)]
pub struct AIModels {
    models: ModelCollection,
    index: CatalogIndex,
}

impl AIModels {
    pub fn new(models: Vec<ResolvedModel>, registry: Registry) -> Self {
        let models: Vec<_> = models.into_iter().map(Arc::new).collect();
        let registry = Arc::new(registry);
        Self {
            models: ModelCollection::new(models.clone(), Arc::clone(&registry)),
            index: CatalogIndex::new(models, registry),
        }
    }

    /// A catalog with no data at all
    pub fn empty() -> Self {
        Self::new(Vec::new(), Registry::default())
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Every resolved model
    pub fn models(&self) -> &ModelCollection {
        &self.models
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Indexed id/alias lookup
    pub fn find_model(&self, id_or_alias: &str) -> Option<&Arc<ResolvedModel>> {
        self.index.find_model(id_or_alias)
    }

    /// Token price of a model at a provider.
    ///
    /// An alias is retried under the model's canonical id. Image, character,
    /// minute and search prices are not returned here.
    pub fn get_price(&self, model_id: &str, provider_id: &str) -> Option<&TokenPrice> {
        let provider = self.index.registry().provider(provider_id)?;
        let entry = provider.price_for(model_id).or_else(|| {
            self.index
                .find_model(model_id)
                .and_then(|model| provider.price_for(&model.id))
        })?;
        entry.as_token()
    }

    /// Providers referenced by at least one model
    pub fn all_providers(&self) -> Vec<Arc<Provider>> {
        self.index.all_providers()
    }

    /// Organizations referenced by at least one model
    pub fn all_organizations(&self) -> Vec<Arc<Organization>> {
        self.index.all_organizations()
    }

    pub fn provider_ids(&self) -> Vec<String> {
        self.all_providers().iter().map(|p| p.id.clone()).collect()
    }

    pub fn creator_ids(&self) -> Vec<String> {
        self.all_organizations()
            .iter()
            .map(|o| o.id.clone())
            .collect()
    }

    /// Serializable copy of the whole catalog, every loaded entity included
    pub fn snapshot(&self) -> CatalogSnapshot {
        let registry = self.index.registry();
        CatalogSnapshot {
            models: self.models.iter().map(|m| (**m).clone()).collect(),
            providers: registry.providers().map(|p| (**p).clone()).collect(),
            organizations: registry.organizations().map(|o| (**o).clone()).collect(),
        }
    }

    /// Rebuild a catalog from a snapshot. Models are taken as already
    /// resolved.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self::new(
            snapshot.models,
            Registry::new(snapshot.providers, snapshot.organizations),
        )
    }
}

impl Default for AIModels {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for AIModels {
    type Target = ModelCollection;

    fn deref(&self) -> &ModelCollection {
        &self.models
    }
}

/// Everything a catalog holds, in serializable form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub models: Vec<ResolvedModel>,
    #[serde(default)]
    pub providers: Vec<Provider>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

/// Result of a lenient build: the catalog that could be assembled and every
/// error met on the way
#[derive(Debug)]
pub struct BuildOutcome {
    pub catalog: AIModels,
    pub errors: Vec<CatalogError>,
}

impl BuildOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fail with [`CatalogError::Load`] if anything went wrong
    pub fn into_strict(self) -> Result<AIModels> {
        if self.errors.is_empty() {
            Ok(self.catalog)
        } else {
            Err(CatalogError::Load {
                errors: self.errors,
            })
        }
    }
}

/// Collects raw and typed data, then validates, resolves and indexes it in
/// one go
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    models: Vec<ModelRecord>,
    providers: Vec<Provider>,
    organizations: Vec<Organization>,
    errors: Vec<CatalogError>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one organization's models; records without a creator get the
    /// document's
    pub fn add_model_document(mut self, document: ModelDocument) -> Self {
        let creator = document.creator;
        self.models
            .extend(document.models.into_iter().map(|mut record| {
                record.stamp_creator(&creator);
                record
            }));
        self
    }

    pub fn add_model_records(mut self, records: impl IntoIterator<Item = ModelRecord>) -> Self {
        self.models.extend(records);
        self
    }

    pub fn add_provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn add_providers(mut self, providers: impl IntoIterator<Item = Provider>) -> Self {
        self.providers.extend(providers);
        self
    }

    pub fn add_organization(mut self, organization: Organization) -> Self {
        self.organizations.push(organization);
        self
    }

    pub fn add_organizations(
        mut self,
        organizations: impl IntoIterator<Item = Organization>,
    ) -> Self {
        self.organizations.extend(organizations);
        self
    }

    /// Validate and add an untyped model document (`{ creator, models }`)
    pub fn add_model_document_value(mut self, value: &Value) -> Self {
        match validation::validate_model_document(value) {
            Ok(validated) => {
                self.models.extend(validated.records);
                self.absorb_errors(validated.errors);
            }
            Err(err) => self.errors.push(err.into()),
        }
        self
    }

    /// Validate and add untyped model records
    pub fn add_models_value(mut self, values: &[Value]) -> Self {
        let validated = validation::validate_models(values);
        self.models.extend(validated.records);
        self.absorb_errors(validated.errors);
        self
    }

    /// Validate and add an untyped provider, or an array of them
    pub fn add_provider_value(mut self, value: &Value) -> Self {
        match value {
            Value::Array(values) => {
                let validated = validation::validate_providers(values);
                self.providers.extend(validated.records);
                self.absorb_errors(validated.errors);
            }
            single => match validation::validate_provider(single) {
                Ok(provider) => self.providers.push(provider),
                Err(err) => self.errors.push(err.into()),
            },
        }
        self
    }

    /// Validate and add an untyped organizations map (`id -> organization`)
    pub fn add_organizations_value(mut self, value: &Value) -> Self {
        let validated = validation::validate_organizations(value);
        self.organizations.extend(validated.records);
        self.absorb_errors(validated.errors);
        self
    }

    /// Record an error found outside the builder (e.g. an unreadable file)
    pub fn add_error(mut self, error: CatalogError) -> Self {
        self.errors.push(error);
        self
    }

    fn absorb_errors(&mut self, errors: Vec<ValidationError>) {
        self.errors.extend(errors.into_iter().map(CatalogError::from));
    }

    /// Build with the lenient policy: bad records are dropped and reported
    pub fn build(self) -> BuildOutcome {
        let CatalogBuilder {
            models,
            providers,
            organizations,
            mut errors,
        } = self;

        let models = first_by_id(models, |m| &m.id, "unique model id", &mut errors);
        let providers = first_by_id(providers, |p| &p.id, "unique provider id", &mut errors);
        let organizations = first_by_id(
            organizations,
            |o| &o.id,
            "unique organization id",
            &mut errors,
        );

        let report = ModelResolver::new(&models).resolve_all();
        errors.extend(report.errors);

        tracing::debug!(
            models = report.models.len(),
            providers = providers.len(),
            organizations = organizations.len(),
            errors = errors.len(),
            "catalog built"
        );

        BuildOutcome {
            catalog: AIModels::new(report.models, Registry::new(providers, organizations)),
            errors,
        }
    }

    /// Build with the strict policy: any collected error aborts the load
    pub fn build_strict(self) -> Result<AIModels> {
        self.build().into_strict()
    }
}

/// Keep the first entity per id, reporting the rest
fn first_by_id<T>(
    items: Vec<T>,
    id: impl Fn(&T) -> &String,
    expected: &str,
    errors: &mut Vec<CatalogError>,
) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        let key = id(&item).clone();
        if seen.contains(&key) {
            errors.push(
                ValidationError::new("id", expected, json!(key))
                    .in_record(key.as_str())
                    .into(),
            );
            continue;
        }
        seen.insert(key);
        kept.push(item);
    }

    kept
}

/// Atomically published catalog snapshot.
///
/// Readers grab the current `Arc` and keep using it for as long as they
/// like; a reload builds a complete new catalog and swaps the pointer, so a
/// reader never sees a half-built one.
pub struct SharedCatalog {
    current: ArcSwap<AIModels>,
}

impl SharedCatalog {
    pub fn new(catalog: AIModels) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog),
        }
    }

    pub fn current(&self) -> Arc<AIModels> {
        self.current.load_full()
    }

    /// Publish a new catalog, returning the previous one
    pub fn replace(&self, catalog: AIModels) -> Arc<AIModels> {
        let previous = self.current.swap(Arc::new(catalog));
        tracing::debug!(models = previous.len(), "catalog snapshot replaced");
        previous
    }

    /// Build strictly and publish on success. On failure the published
    /// catalog stays untouched.
    pub fn reload(&self, builder: CatalogBuilder) -> Result<Arc<AIModels>> {
        match builder.build_strict() {
            Ok(catalog) => Ok(self.replace(catalog)),
            Err(err) => {
                tracing::warn!(error = %err, "catalog reload rejected");
                Err(err)
            }
        }
    }
}

impl Default for SharedCatalog {
    fn default() -> Self {
        Self::new(AIModels::empty())
    }
}

impl std::fmt::Debug for SharedCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCatalog")
            .field("models", &self.current.load().len())
            .finish()
    }
}
