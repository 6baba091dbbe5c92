// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! aimodels - a queryable catalog of AI model metadata.
//!
//! This crate exposes the catalog used by the `aimodels` CLI (`src/main.rs`)
//! and by any host that embeds it.
//!
//! Data flows one way:
//! - `validation`: untyped JSON records into typed models, providers, organizations
//! - `models::resolver`: `extends`/`overrides` chains flattened into complete models
//! - `index`: id/alias lookups and model to provider/creator links
//! - `models::collection`: chainable filters over resolved models
//! - `catalog`: the `AIModels` facade, its builder and the reloadable `SharedCatalog`
//!
//! `loader` reads data directories (and the built-in catalog), `config` holds
//! user settings, `cli` and `commands` implement the binary.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod models;
pub mod organizations;
pub mod providers;
pub mod validation;

pub use catalog::{AIModels, BuildOutcome, CatalogBuilder, CatalogSnapshot, SharedCatalog};
pub use error::{CatalogError, Result, ValidationError};
pub use models::{Capability, ModelCollection, ModelContext, ModelRecord, ResolvedModel};
pub use organizations::Organization;
pub use providers::{PriceEntry, Provider, TokenPrice};
