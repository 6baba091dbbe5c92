// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model definitions
//!
//! Raw records come out of [`crate::validation`] as [`ModelRecord`]s. A record
//! may `extends` another one and patch it with `overrides`; the
//! [`ModelResolver`] flattens those chains into complete [`ResolvedModel`]s,
//! which are then queried through a [`ModelCollection`].
//!
//! ## Inheritance
//!
//! ```json
//! { "id": "gpt-4o", "name": "GPT-4o", "capabilities": ["chat", "img-in"], ... }
//! { "id": "gpt-4o-mini", "extends": "gpt-4o", "overrides": { "name": "GPT-4o mini" } }
//! ```
//!
//! A derived model is its resolved base with every field present in
//! `overrides` replaced. Presence decides, not truthiness: an empty list
//! replaces the base's list and `null` clears the field. A derived record
//! may not carry inheritable fields at the top level; the validator rejects
//! them.
//!
//! `id` is never inherited.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aimodels::models::{Capability, ModelResolver};
//!
//! let report = ModelResolver::new(&records).resolve_all();
//! for model in &report.models {
//!     println!("{} can chat: {}", model.id, model.can(&[Capability::Chat]));
//! }
//! ```

pub mod capability;
pub mod collection;
pub mod context;
pub mod resolver;
pub mod schema;

// Re-export commonly used types
pub use capability::Capability;
pub use collection::ModelCollection;
pub use context::{
    AudioInContext, AudioOutContext, CharacterContext, EmbeddingContext, ImageContext,
    ModelContext, TokenContext,
};
pub use resolver::{ModelResolver, ResolveReport};
pub use schema::{ModelDocument, ModelOverrides, ModelRecord, ResolvedModel};
