// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chainable model collection
//!
//! `ModelCollection` is an ordered list of resolved models sharing one
//! provider/organization registry. Every filter builds a new collection; the
//! receiver is never touched, so intermediate results can be kept and reused:
//!
//! ```ignore
//! let chat = catalog.can_chat();
//! let vision = chat.can_see().from_provider("openai");
//! assert!(chat.len() >= vision.len());
//! ```
//!
//! Lookups that miss return `None`.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use crate::index::Registry;
use crate::models::capability::Capability;
use crate::models::schema::ResolvedModel;
use crate::organizations::schema::Organization;
use crate::providers::schema::Provider;

/// Ordered, immutable view over resolved models
#[derive(Debug, Clone, Default)]
pub struct ModelCollection {
    models: Vec<Arc<ResolvedModel>>,
    registry: Arc<Registry>,
}

impl ModelCollection {
    pub fn new(models: Vec<Arc<ResolvedModel>>, registry: Arc<Registry>) -> Self {
        Self { models, registry }
    }

    fn derive(&self, models: Vec<Arc<ResolvedModel>>) -> Self {
        Self {
            models,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Keep the models matching a predicate
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&ResolvedModel) -> bool,
    {
        self.derive(
            self.models
                .iter()
                .filter(|m| predicate(m))
                .cloned()
                .collect(),
        )
    }

    /// Models supporting every given capability. No arguments keeps all.
    pub fn can(&self, capabilities: &[Capability]) -> Self {
        self.filter(|m| m.can(capabilities))
    }

    pub fn can_chat(&self) -> Self {
        self.can(&[Capability::Chat])
    }

    pub fn can_reason(&self) -> Self {
        self.can(&[Capability::Reason])
    }

    pub fn can_read(&self) -> Self {
        self.can(&[Capability::TextIn])
    }

    pub fn can_write(&self) -> Self {
        self.can(&[Capability::TextOut])
    }

    pub fn can_see(&self) -> Self {
        self.can(&[Capability::ImageIn])
    }

    pub fn can_generate_images(&self) -> Self {
        self.can(&[Capability::ImageOut])
    }

    pub fn can_hear(&self) -> Self {
        self.can(&[Capability::AudioIn])
    }

    pub fn can_speak(&self) -> Self {
        self.can(&[Capability::AudioOut])
    }

    pub fn can_output_json(&self) -> Self {
        self.can(&[Capability::JsonOut])
    }

    pub fn can_call_functions(&self) -> Self {
        self.can(&[Capability::FunctionOut])
    }

    pub fn can_generate_embeddings(&self) -> Self {
        self.can(&[Capability::VectorOut])
    }

    pub fn can_generate_video(&self) -> Self {
        self.can(&[Capability::VideoOut])
    }

    /// Models listing every given language. A model without a language list
    /// never matches a non-empty query.
    pub fn know(&self, languages: &[&str]) -> Self {
        self.filter(|m| m.knows(languages))
    }

    pub fn from_provider(&self, provider_id: &str) -> Self {
        self.filter(|m| m.is_offered_by(provider_id))
    }

    pub fn from_creator(&self, creator_id: &str) -> Self {
        self.filter(|m| m.is_created_by(creator_id))
    }

    /// Models with a text window of at least `tokens`.
    ///
    /// Only `token` and `character` contexts carry a comparable total;
    /// everything else, and unknown totals, is filtered out.
    pub fn with_min_context(&self, tokens: u64) -> Self {
        self.filter(|m| m.context.text_total().is_some_and(|total| total >= tokens))
    }

    /// Look up by exact id first, then by alias; first match wins
    pub fn id(&self, id_or_alias: &str) -> Option<&Arc<ResolvedModel>> {
        self.models
            .iter()
            .find(|m| m.id == id_or_alias)
            .or_else(|| {
                self.models
                    .iter()
                    .find(|m| m.aliases.iter().any(|a| a == id_or_alias))
            })
    }

    /// Sub-collection by position; out-of-range bounds are clamped
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.models.len());
        let start = range.start.min(end);
        self.derive(self.models[start..end].to_vec())
    }

    pub fn get(&self, index: usize) -> Option<&Arc<ResolvedModel>> {
        self.models.get(index)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<ResolvedModel>> {
        self.models.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<Arc<ResolvedModel>> {
        self.models
    }

    /// Provider ids referenced by this collection, first reference first
    pub fn providers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.models
            .iter()
            .flat_map(|m| m.provider_ids.iter())
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Creator ids referenced by this collection
    pub fn creators(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.models
            .iter()
            .filter_map(|m| m.creator_id.as_deref())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn get_provider(&self, id: &str) -> Option<Arc<Provider>> {
        self.registry.provider(id).cloned()
    }

    pub fn get_creator(&self, id: &str) -> Option<Arc<Organization>> {
        self.registry.organization(id).cloned()
    }

    /// Providers serving a model, in the model's order. Empty when the model
    /// is unknown.
    pub fn get_providers_for_model(&self, id_or_alias: &str) -> Vec<Arc<Provider>> {
        self.id(id_or_alias)
            .map(|m| self.registry.providers_of(m))
            .unwrap_or_default()
    }

    pub fn get_creator_for_model(&self, id_or_alias: &str) -> Option<Arc<Organization>> {
        self.id(id_or_alias)
            .and_then(|m| self.registry.organization_of(m))
    }
}

impl<'a> IntoIterator for &'a ModelCollection {
    type Item = &'a Arc<ResolvedModel>;
    type IntoIter = std::slice::Iter<'a, Arc<ResolvedModel>>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::context::{ImageContext, ModelContext};
    use proptest::prelude::*;

    fn model(id: &str, caps: &[Capability], context: ModelContext) -> ResolvedModel {
        ResolvedModel {
            id: id.into(),
            name: id.to_uppercase(),
            creator_id: Some("openai".into()),
            license: None,
            capabilities: caps.to_vec(),
            provider_ids: vec!["openai".into()],
            context,
            aliases: vec![],
            languages: vec![],
            extends: None,
        }
    }

    fn image_context() -> ModelContext {
        ModelContext::Image(ImageContext {
            max_output: 1,
            sizes: vec!["1024x1024".into()],
            qualities: vec!["standard".into()],
        })
    }

    /// Five models with varying capability sets
    fn fixture() -> ModelCollection {
        use Capability::*;

        let mut gpt4 = model("gpt-4", &[Chat, TextIn, TextOut, ImageIn], ModelContext::tokens(Some(128_000), Some(4096)));
        gpt4.aliases = vec!["gpt-4-turbo".into()];
        gpt4.languages = vec!["en".into(), "fr".into(), "de".into()];
        gpt4.provider_ids = vec!["openai".into(), "azure".into()];

        let mut mini = model("gpt-4o-mini", &[Chat, TextIn, TextOut], ModelContext::tokens(Some(16_000), None));
        mini.languages = vec!["en".into()];

        let dalle = model("dall-e-3", &[TextIn, ImageOut], image_context());

        let mut llama = model("llama-3", &[Chat, TextIn, TextOut, FunctionOut], ModelContext::tokens(None, None));
        llama.creator_id = Some("meta".into());
        llama.provider_ids = vec!["groq".into(), "azure".into()];

        let mut claude = model("claude-3", &[Chat, ImageIn, TextIn, TextOut, Reason], ModelContext::tokens(Some(200_000), Some(8192)));
        claude.creator_id = Some("anthropic".into());
        claude.provider_ids = vec!["anthropic".into()];
        claude.aliases = vec!["claude".into()];

        let registry = Registry::new(
            vec![
                Provider::new("openai", "OpenAI"),
                Provider::new("azure", "Azure"),
                Provider::new("groq", "Groq"),
            ],
            vec![Organization::new("openai", "OpenAI", "https://openai.com", "US", 2015)],
        );

        ModelCollection::new(
            vec![gpt4, mini, dalle, llama, claude].into_iter().map(Arc::new).collect(),
            Arc::new(registry),
        )
    }

    #[test]
    fn test_can_without_arguments_is_identity() {
        let all = fixture();
        assert_eq!(all.can(&[]).ids(), all.ids());
    }

    #[test]
    fn test_can_uses_and_semantics() {
        let all = fixture();
        let both = all.can(&[Capability::Chat, Capability::ImageIn]);
        assert_eq!(both.ids(), vec!["gpt-4", "claude-3"]);

        let none = all.can(&[Capability::ImageOut, Capability::Chat]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_capability_sugar() {
        let all = fixture();
        assert_eq!(all.can_chat().len(), 4);
        assert_eq!(all.can_see().ids(), vec!["gpt-4", "claude-3"]);
        assert_eq!(all.can_generate_images().ids(), vec!["dall-e-3"]);
        assert_eq!(all.can_call_functions().ids(), vec!["llama-3"]);
        assert_eq!(all.can_reason().ids(), vec!["claude-3"]);
        assert_eq!(all.can_read().len(), 5);
        assert!(all.can_hear().is_empty());
        assert!(all.can_speak().is_empty());
        assert!(all.can_generate_video().is_empty());
        assert!(all.can_generate_embeddings().is_empty());
        assert!(all.can_output_json().is_empty());
        assert_eq!(all.can_write().len(), 4);
    }

    #[test]
    fn test_filters_do_not_mutate_receiver() {
        let models = fixture();
        let a = models.can_chat();
        let before = a.len();
        let b = models.can_see();
        let _c = a.can_see().from_provider("azure");
        assert_eq!(a.len(), before);
        assert_eq!(b.len(), 2);
        assert_eq!(models.len(), 5);
    }

    #[test]
    fn test_know_requires_every_language() {
        let all = fixture();
        assert_eq!(all.know(&["en"]).ids(), vec!["gpt-4", "gpt-4o-mini"]);
        assert_eq!(all.know(&["en", "fr"]).ids(), vec!["gpt-4"]);
        assert!(all.know(&["ja"]).is_empty());
        // models without a language list do not know everything
        assert!(all.know(&["en"]).id("llama-3").is_none());
    }

    #[test]
    fn test_provider_and_creator_filters() {
        let all = fixture();
        assert_eq!(all.from_provider("azure").ids(), vec!["gpt-4", "llama-3"]);
        assert_eq!(all.from_creator("meta").ids(), vec!["llama-3"]);
        assert!(all.from_creator("nobody").is_empty());
    }

    #[test]
    fn test_with_min_context_excludes_image_and_unknown_totals() {
        let all = fixture();
        let big = all.with_min_context(100_000);
        assert_eq!(big.ids(), vec!["gpt-4", "claude-3"]);
        assert!(big.id("dall-e-3").is_none());
        assert!(big.id("llama-3").is_none());

        let any = all.with_min_context(0);
        assert!(any.id("llama-3").is_none());
        assert!(any.id("dall-e-3").is_none());
        assert_eq!(any.len(), 3);
    }

    #[test]
    fn test_id_and_alias_return_same_reference() {
        let all = fixture();
        let by_id = all.id("gpt-4").unwrap();
        let by_alias = all.id("gpt-4-turbo").unwrap();
        assert!(Arc::ptr_eq(by_id, by_alias));
        assert!(all.id("gpt-5").is_none());
    }

    #[test]
    fn test_slice_get_and_iter() {
        let all = fixture();
        assert_eq!(all.slice(1..3).ids(), vec!["gpt-4o-mini", "dall-e-3"]);
        assert_eq!(all.slice(3..99).len(), 2);
        assert!(all.slice(9..12).is_empty());
        assert_eq!(all.get(0).unwrap().id, "gpt-4");
        assert!(all.get(5).is_none());
        assert_eq!(all.iter().count(), 5);
        assert_eq!((&all).into_iter().count(), 5);
        assert_eq!(all.clone().into_vec().len(), 5);
    }

    #[test]
    fn test_providers_and_creators_are_deduplicated() {
        let all = fixture();
        assert_eq!(all.providers(), vec!["openai", "azure", "groq", "anthropic"]);
        assert_eq!(all.creators(), vec!["openai", "meta", "anthropic"]);
        assert_eq!(all.from_creator("meta").providers(), vec!["groq", "azure"]);
    }

    #[test]
    fn test_cross_reference_accessors() {
        let all = fixture();
        assert_eq!(all.get_provider("groq").unwrap().name, "Groq");
        assert!(all.get_provider("anthropic").is_none());
        assert_eq!(all.get_creator("openai").unwrap().country, "US");

        let ids: Vec<_> = all
            .get_providers_for_model("gpt-4-turbo")
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["openai", "azure"]);

        // dangling provider ids are dropped silently
        assert!(all.get_providers_for_model("claude").is_empty());
        assert!(all.get_providers_for_model("nope").is_empty());
        assert_eq!(all.get_creator_for_model("gpt-4").unwrap().id, "openai");
        assert!(all.get_creator_for_model("llama-3").is_none());
    }

    #[test]
    fn test_filtered_collections_share_registry() {
        let all = fixture();
        let chat = all.can_chat();
        assert!(Arc::ptr_eq(all.registry(), chat.registry()));
    }

    fn arb_capabilities() -> impl Strategy<Value = Vec<Capability>> {
        proptest::sample::subsequence(Capability::ALL.to_vec(), 0..=Capability::ALL.len())
    }

    proptest! {
        #[test]
        fn prop_can_matches_superset(
            sets in proptest::collection::vec(arb_capabilities(), 0..12),
            query in arb_capabilities(),
        ) {
            let models: Vec<_> = sets
                .iter()
                .enumerate()
                .map(|(i, caps)| Arc::new(model(&format!("m{}", i), caps, ModelContext::tokens(Some(1), None))))
                .collect();
            let all = ModelCollection::new(models, Arc::default());
            let hits = all.can(&query);

            prop_assert_eq!(all.len(), sets.len());
            for m in all.iter() {
                let expected = query.iter().all(|c| m.capabilities.contains(c));
                prop_assert_eq!(hits.id(&m.id).is_some(), expected);
            }
        }

        #[test]
        fn prop_min_context_threshold(
            totals in proptest::collection::vec(proptest::option::of(0u64..500_000), 0..12),
            threshold in 0u64..500_000,
        ) {
            let models: Vec<_> = totals
                .iter()
                .enumerate()
                .map(|(i, total)| Arc::new(model(&format!("m{}", i), &[Capability::Chat], ModelContext::tokens(*total, None))))
                .collect();
            let all = ModelCollection::new(models, Arc::default());
            let kept = all.with_min_context(threshold);

            let expected = totals.iter().filter(|t| t.is_some_and(|t| t >= threshold)).count();
            prop_assert_eq!(kept.len(), expected);
            prop_assert_eq!(all.len(), totals.len());
        }
    }
}
