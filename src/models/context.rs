// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Context descriptors
//!
//! Input/output size limits of a model, one variant per modality. The enum is
//! always tagged by `type` once loaded; inferring the variant from an untagged
//! shape happens only in [`crate::validation`].
//!
//! `None` for `total`/`max_output` means unbounded or unknown and is distinct
//! from zero.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Size limits of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModelContext {
    Token(TokenContext),
    Character(CharacterContext),
    Image(ImageContext),
    AudioIn(AudioInContext),
    AudioOut(AudioOutContext),
    Embedding(EmbeddingContext),
}

impl ModelContext {
    /// The `type` discriminator as written in data files
    pub fn kind(&self) -> &'static str {
        match self {
            ModelContext::Token(_) => "token",
            ModelContext::Character(_) => "character",
            ModelContext::Image(_) => "image",
            ModelContext::AudioIn(_) => "audio-in",
            ModelContext::AudioOut(_) => "audio-out",
            ModelContext::Embedding(_) => "embedding",
        }
    }

    /// Total window of the text variants (`token`, `character`).
    ///
    /// Every other variant returns `None`, as does a text window whose total
    /// is unknown.
    pub fn text_total(&self) -> Option<u64> {
        match self {
            ModelContext::Token(ctx) => ctx.total,
            ModelContext::Character(ctx) => ctx.total,
            _ => None,
        }
    }

    /// Token window with the given limits
    pub fn tokens(total: Option<u64>, max_output: Option<u64>) -> Self {
        ModelContext::Token(TokenContext {
            total,
            max_output,
            ..Default::default()
        })
    }
}

/// Token-counted text window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenContext {
    /// Maximum input tokens
    #[serde(default)]
    pub total: Option<u64>,

    /// Maximum generated tokens
    #[serde(default)]
    pub max_output: Option<u64>,

    /// Output budget does not shrink as the input grows
    #[serde(
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_is_fixed: Option<bool>,

    /// Model-specific extensions (reasoning budgets, experimental modes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended: Option<Map<String, Value>>,
}

/// Character-counted text window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterContext {
    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub max_output: Option<u64>,
}

/// Image generation limits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContext {
    /// Images per request
    pub max_output: u64,

    /// Available sizes, e.g. `1024x1024`
    pub sizes: Vec<String>,

    /// Available quality tiers, e.g. `standard`, `hd`
    #[serde(default)]
    pub qualities: Vec<String>,
}

/// Audio input limits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioInContext {
    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub max_output: Option<u64>,

    /// Maximum duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,

    /// Maximum upload size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
}

/// Audio output (speech synthesis) limits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioOutContext {
    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub max_output: Option<u64>,

    /// Longest text that can be spoken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_input: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub voices: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualities: Vec<String>,
}

/// Embedding model limits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingContext {
    /// Maximum input size, measured in `unit`
    #[serde(default)]
    pub total: Option<u64>,

    /// `tokens` or `characters`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Vector dimensionality
    pub dimensions: u64,

    /// `text`, `image`, `audio` or `multimodal`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<bool>,
}

/// Accepts `true`/`false` as well as the numeric `1`/`0` spelling.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::Number(n)) => Ok(Some(n.as_f64().map(|v| v != 0.0).unwrap_or(false))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected boolean or number, found {}",
            other
        ))),
    }
}
