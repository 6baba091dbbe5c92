// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Data directory loader
//!
//! A data directory looks like:
//!
//! ```text
//! data/
//! ├── models/
//! │   ├── openai.json        { "creator": "openai", "models": [...] }
//! │   └── meta.toml
//! ├── providers/
//! │   ├── openai.json        one provider, or an array of them
//! │   └── groq.toml
//! └── orgs.json              { "<id>": { organization }, ... }
//! ```
//!
//! Documents may be JSON or TOML. Files are read in sorted order so the model
//! order, and with it first-match alias lookups, is stable. A file that
//! cannot be read or parsed is reported and skipped; the rest still load.

use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::catalog::CatalogBuilder;
use crate::error::{CatalogError, Result};

const MODELS_DIR: &str = "models";
const PROVIDERS_DIR: &str = "providers";
const ORGS_FILE: &str = "orgs";

/// Catalog compiled into the binary
const BUILTIN_MODELS: &[(&str, &str)] = &[
    (
        "models/anthropic.json",
        include_str!("../data/models/anthropic.json"),
    ),
    ("models/meta.json", include_str!("../data/models/meta.json")),
    ("models/openai.json", include_str!("../data/models/openai.json")),
];

const BUILTIN_PROVIDERS: &[(&str, &str)] = &[
    (
        "providers/anthropic.json",
        include_str!("../data/providers/anthropic.json"),
    ),
    (
        "providers/azure.json",
        include_str!("../data/providers/azure.json"),
    ),
    (
        "providers/groq.json",
        include_str!("../data/providers/groq.json"),
    ),
    (
        "providers/openai.json",
        include_str!("../data/providers/openai.json"),
    ),
];

const BUILTIN_ORGS: (&str, &str) = ("orgs.json", include_str!("../data/orgs.json"));

/// Document format, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(DocumentFormat::Json),
            Some("toml") => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    /// Parse a document into an untyped value
    pub fn parse(&self, content: &str) -> std::result::Result<Value, String> {
        match self {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Loads a catalog from a data directory
#[derive(Debug, Clone)]
pub struct DataLoader {
    root: PathBuf,
}

impl DataLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every document under the data directory.
    ///
    /// Only a missing root is an error. Problems with individual files are
    /// collected in the returned builder and surface when it is built.
    pub fn load(&self) -> Result<CatalogBuilder> {
        if !self.root.is_dir() {
            return Err(CatalogError::Config(format!(
                "Data directory not found: {}",
                self.root.display()
            )));
        }

        let mut builder = CatalogBuilder::new();

        for path in documents_in(&self.root.join(MODELS_DIR)) {
            builder = match read_document(&path) {
                Ok(value) => builder.add_model_document_value(&value),
                Err(err) => builder.add_error(err),
            };
        }

        for path in documents_in(&self.root.join(PROVIDERS_DIR)) {
            builder = match read_document(&path) {
                Ok(value) => builder.add_provider_value(&value),
                Err(err) => builder.add_error(err),
            };
        }

        match self.orgs_file() {
            Some(path) => {
                builder = match read_document(&path) {
                    Ok(value) => builder.add_organizations_value(&value),
                    Err(err) => builder.add_error(err),
                };
            }
            None => tracing::debug!(root = %self.root.display(), "no organizations file"),
        }

        Ok(builder)
    }

    /// The built-in catalog
    pub fn builtin() -> CatalogBuilder {
        let mut builder = CatalogBuilder::new();

        for (name, content) in BUILTIN_MODELS {
            builder = match parse_embedded(name, content) {
                Ok(value) => builder.add_model_document_value(&value),
                Err(err) => builder.add_error(err),
            };
        }

        for (name, content) in BUILTIN_PROVIDERS {
            builder = match parse_embedded(name, content) {
                Ok(value) => builder.add_provider_value(&value),
                Err(err) => builder.add_error(err),
            };
        }

        let (name, content) = BUILTIN_ORGS;
        match parse_embedded(name, content) {
            Ok(value) => builder.add_organizations_value(&value),
            Err(err) => builder.add_error(err),
        }
    }

    fn orgs_file(&self) -> Option<PathBuf> {
        ["json", "toml"]
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", ORGS_FILE, ext)))
            .find(|path| path.is_file())
    }
}

/// JSON and TOML files directly inside `dir`, sorted by name. A missing
/// directory yields nothing.
fn documents_in(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "data subdirectory missing");
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| DocumentFormat::from_path(path).is_some())
        .collect()
}

/// Read and parse one document
pub fn read_document(path: &Path) -> Result<Value> {
    let document_error = |message: String| CatalogError::Document {
        path: path.display().to_string(),
        message,
    };

    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| document_error("unsupported file extension".to_string()))?;
    let content = std::fs::read_to_string(path).map_err(|e| document_error(e.to_string()))?;

    format.parse(&content).map_err(|message| {
        tracing::warn!(path = %path.display(), error = %message, "skipping unparseable document");
        document_error(message)
    })
}

fn parse_embedded(name: &str, content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| CatalogError::Document {
        path: name.to_string(),
        message: e.to_string(),
    })
}
