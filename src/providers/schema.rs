// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Provider schema
//!
//! A provider serves models through an API and prices them. Prices are a
//! tagged union; entries whose shape matches none of the variants are
//! rejected by the validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An API provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Unique identifier (e.g. "openai", "groq")
    pub id: String,

    /// Display name
    pub name: String,

    /// Main website
    pub website_url: String,

    /// API endpoint; empty for providers without a hosted endpoint
    pub api_url: String,

    /// API documentation
    pub api_docs_url: String,

    /// Prices keyed by model id
    #[serde(default)]
    pub pricing: BTreeMap<String, PriceEntry>,

    /// Model used when none is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// Runs on the user's machine
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_local: bool,
}

impl Provider {
    /// Create a provider with empty URLs and no pricing
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            website_url: String::new(),
            api_url: String::new(),
            api_docs_url: String::new(),
            pricing: BTreeMap::new(),
            default_model: None,
            is_local: false,
        }
    }

    /// Builder: add a price entry
    pub fn with_price(mut self, model_id: impl Into<String>, price: PriceEntry) -> Self {
        self.pricing.insert(model_id.into(), price);
        self
    }

    /// Price entry for a model, of any shape
    pub fn price_for(&self, model_id: &str) -> Option<&PriceEntry> {
        self.pricing.get(model_id)
    }
}

/// One pricing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PriceEntry {
    /// Per million tokens
    Token(TokenPrice),
    /// Per generated image
    Image(ImagePrice),
    /// Per character
    Character(UnitPrice),
    /// Per minute of audio
    Minute(UnitPrice),
    /// Per search request
    Search(UnitPrice),
}

impl PriceEntry {
    /// The `type` discriminator as written in data files
    pub fn kind(&self) -> &'static str {
        match self {
            PriceEntry::Token(_) => "token",
            PriceEntry::Image(_) => "image",
            PriceEntry::Character(_) => "character",
            PriceEntry::Minute(_) => "minute",
            PriceEntry::Search(_) => "search",
        }
    }

    pub fn as_token(&self) -> Option<&TokenPrice> {
        match self {
            PriceEntry::Token(price) => Some(price),
            _ => None,
        }
    }
}

/// Token-based price, per million tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub input: f64,
    pub output: f64,

    /// Discounted price for cached input tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_cached: Option<f64>,
}

impl TokenPrice {
    pub fn new(input: f64, output: f64) -> Self {
        Self {
            input,
            output,
            input_cached: None,
        }
    }

    /// Cost in the pricing currency for the given token counts
    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        (input_tokens as f64 * self.input + output_tokens as f64 * self.output) / 1_000_000.0
    }
}

/// Price per generated image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePrice {
    pub price: f64,
    pub size: String,
    /// Always `per_image`
    pub unit: String,
}

/// Flat price per unit (character, minute, search)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPrice {
    pub price: f64,
}
