// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model capabilities
//!
//! The fixed set of functional traits a model can expose. Data files use the
//! short wire names (`txt-in`, `img-in`, `fn-out`); the long spellings
//! (`text-in`, `image-in`, `function-out`) are accepted on input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named functional trait of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Conversational chat
    #[serde(rename = "chat")]
    Chat,
    /// Extended reasoning
    #[serde(rename = "reason")]
    Reason,
    /// Text input
    #[serde(rename = "txt-in", alias = "text-in")]
    TextIn,
    /// Text output
    #[serde(rename = "txt-out", alias = "text-out")]
    TextOut,
    /// Image understanding
    #[serde(rename = "img-in", alias = "image-in")]
    ImageIn,
    /// Image generation
    #[serde(rename = "img-out", alias = "image-out")]
    ImageOut,
    /// Audio input
    #[serde(rename = "audio-in")]
    AudioIn,
    /// Audio output
    #[serde(rename = "audio-out")]
    AudioOut,
    /// Structured JSON output
    #[serde(rename = "json-out")]
    JsonOut,
    /// Function / tool calling
    #[serde(rename = "fn-out", alias = "function-out")]
    FunctionOut,
    /// Embedding vectors
    #[serde(rename = "vec-out", alias = "vector-out")]
    VectorOut,
    /// Video generation
    #[serde(rename = "video-out")]
    VideoOut,
}

impl Capability {
    /// Every capability, in declaration order
    pub const ALL: [Capability; 12] = [
        Capability::Chat,
        Capability::Reason,
        Capability::TextIn,
        Capability::TextOut,
        Capability::ImageIn,
        Capability::ImageOut,
        Capability::AudioIn,
        Capability::AudioOut,
        Capability::JsonOut,
        Capability::FunctionOut,
        Capability::VectorOut,
        Capability::VideoOut,
    ];

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Chat => "chat",
            Capability::Reason => "reason",
            Capability::TextIn => "txt-in",
            Capability::TextOut => "txt-out",
            Capability::ImageIn => "img-in",
            Capability::ImageOut => "img-out",
            Capability::AudioIn => "audio-in",
            Capability::AudioOut => "audio-out",
            Capability::JsonOut => "json-out",
            Capability::FunctionOut => "fn-out",
            Capability::VectorOut => "vec-out",
            Capability::VideoOut => "video-out",
        }
    }

    /// Comma-separated list of accepted names, used in validation messages
    pub fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Capability::Chat),
            "reason" => Ok(Capability::Reason),
            "txt-in" | "text-in" => Ok(Capability::TextIn),
            "txt-out" | "text-out" => Ok(Capability::TextOut),
            "img-in" | "image-in" => Ok(Capability::ImageIn),
            "img-out" | "image-out" => Ok(Capability::ImageOut),
            "audio-in" => Ok(Capability::AudioIn),
            "audio-out" => Ok(Capability::AudioOut),
            "json-out" => Ok(Capability::JsonOut),
            "fn-out" | "function-out" => Ok(Capability::FunctionOut),
            "vec-out" | "vector-out" => Ok(Capability::VectorOut),
            "video-out" => Ok(Capability::VideoOut),
            _ => Err(format!("Unknown capability: {}", s)),
        }
    }
}
