// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Cross-reference index
//!
//! Links resolved models to the providers that serve them and the
//! organizations that created them. The index is rebuilt from scratch for
//! every snapshot and never patched in place.
//!
//! `all_providers` / `all_organizations` list only the entities referenced by
//! at least one loaded model. Point lookups (`provider`, `organization`)
//! answer for every loaded entity, referenced or not.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::models::schema::ResolvedModel;
use crate::organizations::schema::Organization;
use crate::providers::schema::Provider;

/// Loaded providers and organizations, keyed by id
#[derive(Debug, Clone, Default)]
pub struct Registry {
    providers: BTreeMap<String, Arc<Provider>>,
    organizations: BTreeMap<String, Arc<Organization>>,
}

impl Registry {
    /// On duplicate ids the first entry is kept
    pub fn new(
        providers: impl IntoIterator<Item = Provider>,
        organizations: impl IntoIterator<Item = Organization>,
    ) -> Self {
        let mut registry = Self::default();
        for provider in providers {
            registry
                .providers
                .entry(provider.id.clone())
                .or_insert_with(|| Arc::new(provider));
        }
        for organization in organizations {
            registry
                .organizations
                .entry(organization.id.clone())
                .or_insert_with(|| Arc::new(organization));
        }
        registry
    }

    pub fn provider(&self, id: &str) -> Option<&Arc<Provider>> {
        self.providers.get(id)
    }

    pub fn organization(&self, id: &str) -> Option<&Arc<Organization>> {
        self.organizations.get(id)
    }

    /// Every loaded provider, ordered by id
    pub fn providers(&self) -> impl Iterator<Item = &Arc<Provider>> {
        self.providers.values()
    }

    /// Every loaded organization, ordered by id
    pub fn organizations(&self) -> impl Iterator<Item = &Arc<Organization>> {
        self.organizations.values()
    }

    /// Providers of a model, in the model's order; dangling ids are skipped
    pub fn providers_of(&self, model: &ResolvedModel) -> Vec<Arc<Provider>> {
        model
            .provider_ids
            .iter()
            .filter_map(|id| self.providers.get(id).cloned())
            .collect()
    }

    /// Creator of a model, if it is loaded
    pub fn organization_of(&self, model: &ResolvedModel) -> Option<Arc<Organization>> {
        model
            .creator_id
            .as_deref()
            .and_then(|id| self.organizations.get(id).cloned())
    }

    /// Deduplicated providers referenced by the given models, first
    /// reference first
    pub fn providers_in_use<'m>(
        &self,
        models: impl IntoIterator<Item = &'m Arc<ResolvedModel>>,
    ) -> Vec<Arc<Provider>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for model in models {
            for id in &model.provider_ids {
                if seen.insert(id.as_str().to_owned()) {
                    if let Some(provider) = self.providers.get(id) {
                        out.push(Arc::clone(provider));
                    }
                }
            }
        }
        out
    }

    /// Deduplicated organizations referenced by the given models
    pub fn organizations_in_use<'m>(
        &self,
        models: impl IntoIterator<Item = &'m Arc<ResolvedModel>>,
    ) -> Vec<Arc<Organization>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for model in models {
            if let Some(ref id) = model.creator_id {
                if seen.insert(id.clone()) {
                    if let Some(org) = self.organizations.get(id) {
                        out.push(Arc::clone(org));
                    }
                }
            }
        }
        out
    }
}

/// Lookup maps over one finalized set of resolved models
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    models: Vec<Arc<ResolvedModel>>,
    by_id: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    registry: Arc<Registry>,
}

impl CatalogIndex {
    /// Build the index. Models keep their order; the first model to claim an
    /// id or alias owns it.
    pub fn new(models: Vec<Arc<ResolvedModel>>, registry: Arc<Registry>) -> Self {
        let mut by_id = HashMap::with_capacity(models.len());
        let mut by_alias = HashMap::new();

        for (pos, model) in models.iter().enumerate() {
            by_id.entry(model.id.clone()).or_insert(pos);
            for alias in &model.aliases {
                by_alias.entry(alias.clone()).or_insert(pos);
            }
        }

        Self {
            models,
            by_id,
            by_alias,
            registry,
        }
    }

    pub fn models(&self) -> &[Arc<ResolvedModel>] {
        &self.models
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Exact id match first, then the first model listing it as an alias
    pub fn find_model(&self, id_or_alias: &str) -> Option<&Arc<ResolvedModel>> {
        self.by_id
            .get(id_or_alias)
            .or_else(|| self.by_alias.get(id_or_alias))
            .map(|&pos| &self.models[pos])
    }

    pub fn providers_for_model(&self, id_or_alias: &str) -> Vec<Arc<Provider>> {
        self.find_model(id_or_alias)
            .map(|model| self.registry.providers_of(model))
            .unwrap_or_default()
    }

    pub fn organization_for_model(&self, id_or_alias: &str) -> Option<Arc<Organization>> {
        self.find_model(id_or_alias)
            .and_then(|model| self.registry.organization_of(model))
    }

    /// Providers referenced by at least one model
    pub fn all_providers(&self) -> Vec<Arc<Provider>> {
        self.registry.providers_in_use(&self.models)
    }

    /// Organizations referenced by at least one model
    pub fn all_organizations(&self) -> Vec<Arc<Organization>> {
        self.registry.organizations_in_use(&self.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::capability::Capability;
    use crate::models::context::ModelContext;

    fn model(id: &str, providers: &[&str], creator: &str, aliases: &[&str]) -> Arc<ResolvedModel> {
        Arc::new(ResolvedModel {
            id: id.into(),
            name: id.into(),
            creator_id: Some(creator.into()),
            license: None,
            capabilities: vec![Capability::Chat],
            provider_ids: providers.iter().map(|s| s.to_string()).collect(),
            context: ModelContext::tokens(Some(8192), None),
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
            languages: vec![],
            extends: None,
        })
    }

    fn registry() -> Arc<Registry> {
        Arc::new(Registry::new(
            vec![
                Provider::new("openai", "OpenAI"),
                Provider::new("azure", "Azure"),
                Provider::new("groq", "Groq"),
            ],
            vec![
                Organization::new("openai", "OpenAI", "https://openai.com", "US", 2015),
                Organization::new("meta", "Meta", "https://meta.com", "US", 2004),
                Organization::new("mistral", "Mistral", "https://mistral.ai", "FR", 2023),
            ],
        ))
    }

    fn index() -> CatalogIndex {
        CatalogIndex::new(
            vec![
                model("gpt-4", &["openai", "azure", "ghost"], "openai", &["gpt-4-turbo"]),
                model("llama-3", &["groq"], "meta", &["llama", "gpt-4-turbo"]),
                model("gpt-4-turbo", &["openai"], "openai", &[]),
                model("mystery", &[], "nobody", &["llama"]),
            ],
            registry(),
        )
    }

    #[test]
    fn test_registry_keeps_first_duplicate() {
        let registry = Registry::new(
            vec![Provider::new("openai", "OpenAI"), Provider::new("openai", "Impostor")],
            vec![
                Organization::new("meta", "Meta", "https://meta.com", "US", 2004),
                Organization::new("meta", "Other", "https://other.example", "GB", 1999),
            ],
        );
        assert_eq!(registry.provider("openai").unwrap().name, "OpenAI");
        assert_eq!(registry.organization("meta").unwrap().name, "Meta");
        assert_eq!(registry.providers().count(), 1);
    }

    #[test]
    fn test_find_model_prefers_exact_id() {
        let index = index();
        // "gpt-4-turbo" is both an alias of gpt-4 and a real id
        assert_eq!(index.find_model("gpt-4-turbo").unwrap().id, "gpt-4-turbo");
    }

    #[test]
    fn test_find_model_by_alias_first_match_wins() {
        let index = index();
        assert_eq!(index.find_model("llama").unwrap().id, "llama-3");
        assert!(index.find_model("claude").is_none());
    }

    #[test]
    fn test_alias_and_id_share_reference() {
        let models = vec![model("gpt-4", &["openai"], "openai", &["gpt-4-0613"])];
        let index = CatalogIndex::new(models, registry());
        let by_id = index.find_model("gpt-4").unwrap();
        let by_alias = index.find_model("gpt-4-0613").unwrap();
        assert!(Arc::ptr_eq(by_id, by_alias));
    }

    #[test]
    fn test_providers_for_model_drops_dangling_ids() {
        let index = index();
        let ids: Vec<_> = index
            .providers_for_model("gpt-4")
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["openai", "azure"]);
        assert!(index.providers_for_model("nope").is_empty());
    }

    #[test]
    fn test_organization_for_model() {
        let index = index();
        assert_eq!(index.organization_for_model("llama").unwrap().id, "meta");
        assert!(index.organization_for_model("mystery").is_none());
        assert!(index.organization_for_model("nope").is_none());
    }

    #[test]
    fn test_all_providers_reflect_usage() {
        let index = index();
        let ids: Vec<_> = index.all_providers().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["openai", "azure", "groq"]);

        let orgs: Vec<_> = index
            .all_organizations()
            .iter()
            .map(|o| o.id.clone())
            .collect();
        // mistral is loaded but unused
        assert_eq!(orgs, vec!["openai", "meta"]);
        assert!(index.registry().organization("mistral").is_some());
    }

    #[test]
    fn test_empty_index() {
        let index = CatalogIndex::new(vec![], Arc::new(Registry::default()));
        assert!(index.models().is_empty());
        assert!(index.all_providers().is_empty());
        assert!(index.find_model("x").is_none());
    }
}
