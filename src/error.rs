// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for the model catalog
//!
//! Data-integrity problems found while loading are reported as structured
//! errors. Lookups that simply miss return `None` and never produce one of
//! these.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A raw record did not match the expected shape
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Inheritance chain loops back on itself
    #[error("Circular dependency detected: {}", chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },

    /// `extends` names a model that is not part of the batch
    #[error("Base model '{base}' not found for '{model}'")]
    MissingBaseModel { model: String, base: String },

    /// Required fields are still unset after inheritance was flattened
    #[error("Model '{model}' is incomplete, missing: {}", missing.join(", "))]
    IncompleteModel { model: String, missing: Vec<String> },

    /// Strict load aborted because errors were collected
    #[error("Catalog load failed with {} error(s)", errors.len())]
    Load { errors: Vec<CatalogError> },

    /// A data document could not be read or parsed
    #[error("Failed to load '{path}': {message}")]
    Document { path: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Id of the model this error concerns, when there is one
    pub fn model_id(&self) -> Option<&str> {
        match self {
            CatalogError::Validation(err) => err.record.as_deref(),
            CatalogError::CircularDependency { chain } => chain.first().map(String::as_str),
            CatalogError::MissingBaseModel { model, .. } => Some(model),
            CatalogError::IncompleteModel { model, .. } => Some(model),
            _ => None,
        }
    }
}

/// A raw record failed validation
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Identifier of the record, if it could be read
    pub record: Option<String>,
    /// Offending field (dotted path for nested fields)
    pub field: String,
    /// Description of the expected type or value
    pub expected: String,
    /// The value that was found
    pub actual: Value,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: Value) -> Self {
        Self {
            record: None,
            field: field.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Attach the record identifier
    pub fn in_record(mut self, record: impl Into<String>) -> Self {
        self.record = Some(record.into());
        self
    }

    /// Prefix the field with a parent path (`pricing.gpt-4`, `overrides.name`)
    pub fn nested(mut self, parent: &str) -> Self {
        self.field = if self.field.is_empty() {
            parent.to_string()
        } else {
            format!("{}.{}", parent, self.field)
        };
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref record) = self.record {
            write!(f, "{}: ", record)?;
        }
        write!(
            f,
            "field '{}' expected {}, found {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
