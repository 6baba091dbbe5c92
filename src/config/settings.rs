// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management
//!
//! Handles loading and saving settings from ~/.aimodels/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{AIModels, CatalogBuilder};
use crate::error::Result;
use crate::loader::DataLoader;

mod io;

/// Main settings structure, stored in ~/.aimodels/settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Data directory to load the catalog from. The built-in catalog is
    /// used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Abort the load on the first batch of errors instead of dropping the
    /// offending records
    #[serde(default)]
    pub strict: bool,
}

impl Settings {
    /// Builder holding the configured data, not yet validated
    pub fn catalog_builder(&self) -> Result<CatalogBuilder> {
        match self.data_dir {
            Some(ref dir) => DataLoader::new(dir).load(),
            None => Ok(DataLoader::builtin()),
        }
    }

    /// Load the catalog under the configured policy.
    ///
    /// Lenient loads log every dropped record and return what remains.
    pub fn load_catalog(&self) -> Result<AIModels> {
        let builder = self.catalog_builder()?;

        if self.strict {
            return builder.build_strict();
        }

        let outcome = builder.build();
        for err in &outcome.errors {
            tracing::warn!(error = %err, "catalog entry dropped");
        }
        Ok(outcome.catalog)
    }
}
