// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model record schema
//!
//! [`ModelRecord`] is a model as written in a data file, possibly extending
//! another one. [`ResolvedModel`] is the flattened, complete result of
//! inheritance resolution.

use serde::{Deserialize, Deserializer, Serialize};

use super::capability::Capability;
use super::context::ModelContext;

/// A model as declared in a data file, before inheritance is resolved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    /// Unique identifier, never inherited
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Organization that created the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ModelContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    /// Identifier of the base record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Fields replacing the base's values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ModelOverrides>,
}

impl ModelRecord {
    /// Create an empty record with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder: set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set creator
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator_id = Some(creator.into());
        self
    }

    /// Builder: set license
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Builder: set capabilities
    pub fn with_capabilities(mut self, capabilities: &[Capability]) -> Self {
        self.capabilities = Some(capabilities.to_vec());
        self
    }

    /// Builder: set provider ids
    pub fn with_providers(mut self, providers: &[&str]) -> Self {
        self.provider_ids = Some(providers.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Builder: set context descriptor
    pub fn with_context(mut self, context: ModelContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Builder: set aliases
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = Some(aliases.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Builder: set languages
    pub fn with_languages(mut self, languages: &[&str]) -> Self {
        self.languages = Some(languages.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Builder: extend another record
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    /// Builder: set overrides
    pub fn with_overrides(mut self, overrides: ModelOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Stamp a document's creator onto a base record that names none.
    /// Derived records take their creator from the base.
    pub fn stamp_creator(&mut self, creator: &str) {
        if self.extends.is_none() && self.creator_id.is_none() {
            self.creator_id = Some(creator.to_string());
        }
    }
}

/// Partial record of inheritable fields.
///
/// The outer `Option` records whether the key was present at all, the inner
/// one holds its value. `Some(None)` is an explicit `null`, which clears the
/// base's value. A present field wins over the base even when it holds an
/// empty string or list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOverrides {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<Option<String>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub license: Option<Option<String>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Option<Vec<Capability>>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub provider_ids: Option<Option<Vec<String>>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub context: Option<Option<ModelContext>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Option<Vec<String>>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub languages: Option<Option<Vec<String>>>,
}

/// A key that is present deserializes to `Some`, even when its value is `null`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// One per-organization data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Organization id stamped onto records that do not name a creator
    pub creator: String,

    #[serde(default)]
    pub models: Vec<ModelRecord>,
}

/// A model after inheritance flattening; always complete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModel {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    pub capabilities: Vec<Capability>,

    pub provider_ids: Vec<String>,

    pub context: ModelContext,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Absent means no language support is declared, not "all languages"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,

    /// Base the model was derived from, kept for provenance only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

impl ResolvedModel {
    /// Whether every given capability is supported
    pub fn can(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().all(|c| self.capabilities.contains(c))
    }

    /// Whether every given language is listed
    pub fn knows(&self, languages: &[&str]) -> bool {
        languages
            .iter()
            .all(|lang| self.languages.iter().any(|l| l == lang))
    }

    pub fn is_offered_by(&self, provider_id: &str) -> bool {
        self.provider_ids.iter().any(|p| p == provider_id)
    }

    pub fn is_created_by(&self, creator_id: &str) -> bool {
        self.creator_id.as_deref() == Some(creator_id)
    }
}
