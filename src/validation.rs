// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Record validation
//!
//! Turns untyped JSON records into typed entities. This is the only place
//! that infers a variant from the shape of a value: untagged image contexts
//! and price entries are normalized here, and everything downstream works
//! with tagged enums.
//!
//! Single-record functions fail on the first offending field. Batch
//! functions keep going and return every error next to the records that
//! passed, leaving the abort-or-degrade decision to the caller.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::models::capability::Capability;
use crate::models::context::{
    AudioInContext, AudioOutContext, CharacterContext, EmbeddingContext, ImageContext,
    ModelContext, TokenContext,
};
use crate::models::schema::{ModelOverrides, ModelRecord};
use crate::organizations::schema::{Organization, MAX_FOUNDED, MIN_FOUNDED};
use crate::providers::schema::{ImagePrice, PriceEntry, Provider, TokenPrice, UnitPrice};

type FieldResult<T> = std::result::Result<T, ValidationError>;

/// Fields a derived model takes from its base, replaceable through `overrides`
const INHERITABLE: [&str; 8] = [
    "name",
    "creatorId",
    "license",
    "capabilities",
    "providerIds",
    "context",
    "aliases",
    "languages",
];

/// Records that passed validation together with the errors of those that did not
#[derive(Debug, Clone)]
pub struct Validated<T> {
    pub records: Vec<T>,
    pub errors: Vec<ValidationError>,
}

impl<T> Default for Validated<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> Validated<T> {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, result: FieldResult<T>) {
        match result {
            Ok(record) => self.records.push(record),
            Err(err) => {
                tracing::debug!(error = %err, "record rejected");
                self.errors.push(err);
            }
        }
    }
}

/// Typed view over one JSON object
struct Fields<'a> {
    map: &'a Map<String, Value>,
    record: Option<String>,
}

impl<'a> Fields<'a> {
    fn of(value: &'a Value, what: &str) -> FieldResult<Self> {
        match value.as_object() {
            Some(map) => Ok(Self { map, record: None }),
            None => Err(ValidationError::new(what, "object", value.clone())),
        }
    }

    fn error(&self, field: &str, expected: impl Into<String>, actual: Value) -> ValidationError {
        let err = ValidationError::new(field, expected, actual);
        match self.record {
            Some(ref record) => err.in_record(record.clone()),
            None => err,
        }
    }

    /// Present and not `null`
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    /// `Some` when the key is present at all, wrapping the parsed value,
    /// which is `None` for an explicit `null`
    fn overridden<T>(
        &self,
        field: &str,
        parse: impl FnOnce(&Self, &str) -> FieldResult<Option<T>>,
    ) -> FieldResult<Option<Option<T>>> {
        if self.map.contains_key(field) {
            parse(self, field).map(Some)
        } else {
            Ok(None)
        }
    }

    fn missing(&self, field: &str, expected: &str) -> ValidationError {
        self.error(field, expected, Value::Null)
    }

    fn required_str(&self, field: &str) -> FieldResult<String> {
        match self.optional_str(field)? {
            Some(s) if !s.is_empty() => Ok(s),
            Some(s) => Err(self.error(field, "non-empty string", Value::String(s))),
            None => Err(self.missing(field, "string")),
        }
    }

    fn optional_str(&self, field: &str) -> FieldResult<Option<String>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.error(field, "string", other.clone())),
        }
    }

    fn optional_str_list(&self, field: &str) -> FieldResult<Option<Vec<String>>> {
        let items = match self.get(field) {
            None => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(self.error(field, "array of strings", other.clone())),
        };

        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(self.error(field, "array of strings", other.clone())),
            })
            .collect::<FieldResult<Vec<_>>>()
            .map(Some)
    }

    fn optional_capabilities(&self, field: &str) -> FieldResult<Option<Vec<Capability>>> {
        let names = match self.optional_str_list(field)? {
            Some(names) => names,
            None => return Ok(None),
        };

        let mut capabilities = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();
        for name in names {
            match name.parse::<Capability>() {
                Ok(cap) => {
                    if !capabilities.contains(&cap) {
                        capabilities.push(cap);
                    }
                }
                Err(_) => unknown.push(Value::String(name)),
            }
        }

        if unknown.is_empty() {
            Ok(Some(capabilities))
        } else {
            Err(self.error(
                field,
                format!("capabilities from [{}]", Capability::expected_values()),
                Value::Array(unknown),
            ))
        }
    }

    fn optional_context(&self, field: &str) -> FieldResult<Option<ModelContext>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => validate_context(value)
                .map(Some)
                .map_err(|err| self.relabel(err, field)),
        }
    }

    fn url(&self, field: &str, allow_empty: bool) -> FieldResult<String> {
        let raw = match self.optional_str(field)? {
            Some(raw) => raw,
            None => return Err(self.missing(field, "URL")),
        };
        if raw.is_empty() && allow_empty {
            return Ok(raw);
        }
        match url::Url::parse(&raw) {
            Ok(_) => Ok(raw),
            Err(e) => Err(self.error(field, format!("URL ({})", e), Value::String(raw))),
        }
    }

    fn flag(&self, field: &str) -> FieldResult<bool> {
        match self.get(field) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
            Some(other) => Err(self.error(field, "boolean or number", other.clone())),
        }
    }

    /// Re-home an error produced by a nested validator under `field`
    fn relabel(&self, mut err: ValidationError, field: &str) -> ValidationError {
        if err.field != field && !err.field.starts_with(&format!("{}.", field)) {
            err = err.nested(field);
        }
        if err.record.is_none() {
            if let Some(ref record) = self.record {
                err = err.in_record(record.clone());
            }
        }
        err
    }
}

/// Validate one raw model record
pub fn validate_model(value: &Value) -> FieldResult<ModelRecord> {
    let mut fields = Fields::of(value, "model")?;

    let id = fields.required_str("id")?;
    fields.record = Some(id.clone());

    let name = fields.optional_str("name")?;
    let extends = fields.optional_str("extends")?;

    if extends.is_none() && name.as_deref().map_or(true, str::is_empty) {
        return Err(fields.missing("name", "string (required unless 'extends' is set)"));
    }
    if extends.as_deref() == Some("") {
        return Err(fields.error("extends", "model id", Value::String(String::new())));
    }
    if extends.is_some() {
        if let Some((field, found)) = INHERITABLE
            .iter()
            .find_map(|field| fields.get(field).map(|found| (*field, found)))
        {
            return Err(fields.error(
                field,
                "no top-level value on a model with 'extends'; set it under 'overrides'",
                found.clone(),
            ));
        }
    }

    let overrides = match fields.get("overrides") {
        None => None,
        Some(raw) => Some(
            validate_overrides(raw)
                .map_err(|err| fields.relabel(err, "overrides"))?,
        ),
    };

    Ok(ModelRecord {
        id,
        name,
        creator_id: fields.optional_str("creatorId")?,
        license: fields.optional_str("license")?,
        capabilities: fields.optional_capabilities("capabilities")?,
        provider_ids: fields.optional_str_list("providerIds")?,
        context: fields.optional_context("context")?,
        aliases: fields.optional_str_list("aliases")?,
        languages: fields.optional_str_list("languages")?,
        extends,
        overrides,
    })
}

fn validate_overrides(value: &Value) -> FieldResult<ModelOverrides> {
    let fields = Fields::of(value, "overrides")?;

    for forbidden in ["id", "extends", "overrides"] {
        if let Some(found) = fields.map.get(forbidden) {
            return Err(fields.error(forbidden, "field that can be overridden", found.clone()));
        }
    }

    Ok(ModelOverrides {
        name: fields.overridden("name", Fields::optional_str)?,
        creator_id: fields.overridden("creatorId", Fields::optional_str)?,
        license: fields.overridden("license", Fields::optional_str)?,
        capabilities: fields.overridden("capabilities", Fields::optional_capabilities)?,
        provider_ids: fields.overridden("providerIds", Fields::optional_str_list)?,
        context: fields.overridden("context", Fields::optional_context)?,
        aliases: fields.overridden("aliases", Fields::optional_str_list)?,
        languages: fields.overridden("languages", Fields::optional_str_list)?,
    })
}

/// Validate a context descriptor, inferring untagged image contexts from
/// their shape
pub fn validate_context(value: &Value) -> FieldResult<ModelContext> {
    let fields = Fields::of(value, "context")?;

    let kind = match fields.map.get("type") {
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => return Err(ValidationError::new("type", "string", other.clone())),
        None if fields.map.contains_key("sizes") && fields.map.contains_key("maxOutput") => {
            "image"
        }
        None => {
            return Err(ValidationError::new(
                "type",
                "context type, or an image context with maxOutput and sizes",
                Value::Null,
            ))
        }
    };

    match kind {
        "token" => typed::<TokenContext>(value, kind).map(ModelContext::Token),
        "character" => typed::<CharacterContext>(value, kind).map(ModelContext::Character),
        "image" => typed::<ImageContext>(value, kind).map(ModelContext::Image),
        "audio-in" => typed::<AudioInContext>(value, kind).map(ModelContext::AudioIn),
        "audio-out" => typed::<AudioOutContext>(value, kind).map(ModelContext::AudioOut),
        "embedding" => typed::<EmbeddingContext>(value, kind).map(ModelContext::Embedding),
        other => Err(ValidationError::new(
            "type",
            "one of token, character, image, audio-in, audio-out, embedding",
            Value::String(other.to_string()),
        )),
    }
}

fn typed<T: DeserializeOwned>(value: &Value, kind: &str) -> FieldResult<T> {
    serde_json::from_value(value.clone()).map_err(|e| {
        ValidationError::new("", format!("{} context ({})", kind, e), value.clone())
    })
}

/// Match a price entry against the five known shapes. Amounts may not be
/// negative.
pub fn validate_price(value: &Value) -> FieldResult<PriceEntry> {
    match_price(value).ok_or_else(|| {
        ValidationError::new(
            "",
            "token, image, character, minute or search price with non-negative amounts",
            value.clone(),
        )
    })
}

fn match_price(value: &Value) -> Option<PriceEntry> {
    let obj = value.as_object()?;
    let number = |key: &str| obj.get(key).and_then(Value::as_f64).filter(|n| *n >= 0.0);
    let text = |key: &str| obj.get(key).and_then(Value::as_str);

    match text("type")? {
        "token" => Some(PriceEntry::Token(TokenPrice {
            input: number("input")?,
            output: number("output")?,
            input_cached: match obj.get("input_cached") {
                None | Some(Value::Null) => None,
                Some(_) => Some(number("input_cached")?),
            },
        })),
        "image" => {
            if text("unit")? != "per_image" {
                return None;
            }
            Some(PriceEntry::Image(ImagePrice {
                price: number("price")?,
                size: text("size")?.to_string(),
                unit: "per_image".to_string(),
            }))
        }
        "character" => Some(PriceEntry::Character(UnitPrice {
            price: number("price")?,
        })),
        "minute" => Some(PriceEntry::Minute(UnitPrice {
            price: number("price")?,
        })),
        "search" => Some(PriceEntry::Search(UnitPrice {
            price: number("price")?,
        })),
        _ => None,
    }
}

/// Validate one raw provider record
pub fn validate_provider(value: &Value) -> FieldResult<Provider> {
    let mut fields = Fields::of(value, "provider")?;

    let id = fields.required_str("id")?;
    fields.record = Some(id.clone());

    let name = fields.required_str("name")?;
    let website_url = fields.url("websiteUrl", false)?;
    let api_url = fields.url("apiUrl", true)?;
    let api_docs_url = fields.url("apiDocsUrl", false)?;

    let mut pricing = BTreeMap::new();
    match fields.get("pricing") {
        None => {}
        Some(Value::Object(entries)) => {
            for (model_id, raw) in entries {
                let entry = validate_price(raw).map_err(|err| {
                    ValidationError {
                        field: format!("pricing.{}", model_id),
                        ..err
                    }
                    .in_record(id.clone())
                })?;
                pricing.insert(model_id.clone(), entry);
            }
        }
        Some(other) => return Err(fields.error("pricing", "object", other.clone())),
    }

    Ok(Provider {
        id,
        name,
        website_url,
        api_url,
        api_docs_url,
        pricing,
        default_model: fields.optional_str("defaultModel")?,
        is_local: fields.flag("isLocal")?,
    })
}

/// Validate one raw organization. `key` is the id it is filed under; an
/// explicit `id` field in the body takes precedence.
pub fn validate_organization(key: &str, value: &Value) -> FieldResult<Organization> {
    let mut fields = Fields::of(value, "organization")?;
    fields.record = Some(key.to_string());

    let id = match fields.optional_str("id")? {
        Some(id) if !id.is_empty() => id,
        _ => key.to_string(),
    };
    fields.record = Some(id.clone());

    let name = fields.required_str("name")?;
    let website_url = fields.url("websiteUrl", false)?;

    let country = fields.required_str("country")?;
    if !(2..=3).contains(&country.len()) || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(fields.error("country", "2 or 3 letter country code", Value::String(country)));
    }

    let founded = match fields.get("founded") {
        Some(raw) => match raw.as_i64() {
            Some(year) if (MIN_FOUNDED..=MAX_FOUNDED).contains(&year) => year as u16,
            _ => {
                return Err(fields.error(
                    "founded",
                    format!("integer year between {} and {}", MIN_FOUNDED, MAX_FOUNDED),
                    raw.clone(),
                ))
            }
        },
        None => return Err(fields.missing("founded", "integer year")),
    };

    Ok(Organization {
        id,
        name,
        website_url,
        country,
        founded,
    })
}

/// Validate a batch of raw model records
pub fn validate_models(values: &[Value]) -> Validated<ModelRecord> {
    let mut out = Validated::default();
    for value in values {
        out.push(validate_model(value));
    }
    out
}

/// Validate a model document (`{ creator, models: [...] }`).
///
/// The document creator is stamped onto every base record that does not name
/// its own; derived records inherit theirs. Fails as a whole only when the envelope itself is malformed.
pub fn validate_model_document(value: &Value) -> FieldResult<Validated<ModelRecord>> {
    let fields = Fields::of(value, "document")?;
    let creator = fields.required_str("creator")?;

    let models = match fields.get("models") {
        None => return Ok(Validated::default()),
        Some(Value::Array(models)) => models,
        Some(other) => return Err(fields.error("models", "array of models", other.clone())),
    };

    let mut out = validate_models(models);
    for record in &mut out.records {
        record.stamp_creator(&creator);
    }
    Ok(out)
}

/// Validate a batch of raw provider records
pub fn validate_providers(values: &[Value]) -> Validated<Provider> {
    let mut out = Validated::default();
    for value in values {
        out.push(validate_provider(value));
    }
    out
}

/// Validate an organizations map (`{ id: organization, ... }`)
pub fn validate_organizations(value: &Value) -> Validated<Organization> {
    let mut out = Validated::default();
    match value.as_object() {
        Some(map) => {
            for (key, raw) in map {
                out.push(validate_organization(key, raw));
            }
        }
        None => out
            .errors
            .push(ValidationError::new("organizations", "object", value.clone())),
    }
    out
}
