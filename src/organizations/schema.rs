// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Organization schema

use serde::{Deserialize, Serialize};

/// Earliest founding year accepted by the validator
pub const MIN_FOUNDED: i64 = 1000;
/// Latest founding year accepted by the validator
pub const MAX_FOUNDED: i64 = 3000;

/// A model creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique identifier (e.g. "openai", "meta")
    pub id: String,

    /// Display name
    pub name: String,

    /// Main website
    pub website_url: String,

    /// Country code, two or three letters
    pub country: String,

    /// Year founded
    pub founded: u16,
}

impl Organization {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        website_url: impl Into<String>,
        country: impl Into<String>,
        founded: u16,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            website_url: website_url.into(),
            country: country.into(),
            founded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_json_shape() {
        let org = Organization::new("openai", "OpenAI", "https://openai.com", "US", 2015);
        let value = serde_json::to_value(&org).unwrap();
        assert_eq!(value["websiteUrl"], "https://openai.com");
        assert_eq!(value["founded"], 2015);

        let back: Organization = serde_json::from_value(value).unwrap();
        assert_eq!(back, org);
    }
}
