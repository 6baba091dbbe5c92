// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! `price` command

use serde_json::{json, Value};

use crate::catalog::AIModels;
use crate::cli::args::{OutputFormat, PriceArgs};
use crate::error::Result;

/// Render the token price, or `None` if there is none.
///
/// With token counts the estimated cost is included; a missing count is
/// taken as zero.
pub fn render(catalog: &AIModels, args: &PriceArgs, format: OutputFormat) -> Result<Option<String>> {
    let price = match catalog.get_price(&args.model, &args.provider) {
        Some(price) => price,
        None => return Ok(None),
    };

    let tokens = match (args.input_tokens, args.output_tokens) {
        (None, None) => None,
        (input, output) => Some((input.unwrap_or(0), output.unwrap_or(0))),
    };
    let cost = tokens.map(|(input, output)| price.cost(input, output));

    if format == OutputFormat::Json {
        let mut value = serde_json::to_value(price)?;
        if let (Some(cost), Value::Object(map)) = (cost, &mut value) {
            map.insert("estimatedCost".to_string(), json!(cost));
        }
        return Ok(Some(serde_json::to_string_pretty(&value)?));
    }

    let mut text = format!(
        "{} at {}: ${:.2} input / ${:.2} output per 1M tokens",
        args.model, args.provider, price.input, price.output
    );
    if let Some(cached) = price.input_cached {
        text.push_str(&format!(" (cached input ${:.3})", cached));
    }
    if let (Some((input, output)), Some(cost)) = (tokens, cost) {
        text.push_str(&format!(
            "\n{} input + {} output tokens: ${:.4}",
            input, output, cost
        ));
    }
    Ok(Some(text))
}

/// Execute the price command
pub fn execute(catalog: &AIModels, args: &PriceArgs, format: OutputFormat) -> Result<bool> {
    match render(catalog, args, format)? {
        Some(text) => {
            println!("{}", text);
            Ok(true)
        }
        None => {
            eprintln!(
                "No token price for '{}' at provider '{}'",
                args.model, args.provider
            );
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DataLoader;

    fn args(model: &str, provider: &str) -> PriceArgs {
        PriceArgs {
            model: model.into(),
            provider: provider.into(),
            input_tokens: None,
            output_tokens: None,
        }
    }

    #[test]
    fn test_render_text() {
        let catalog = DataLoader::builtin().build().catalog;
        let text = render(&catalog, &args("gpt-4o", "openai"), OutputFormat::Text)
            .unwrap()
            .unwrap();
        assert_eq!(
            text,
            "gpt-4o at openai: $2.50 input / $10.00 output per 1M tokens (cached input $1.250)"
        );
    }

    #[test]
    fn test_render_json() {
        let catalog = DataLoader::builtin().build().catalog;
        let json = render(&catalog, &args("gpt-4", "azure"), OutputFormat::Json)
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["input"], 30.0);
        assert_eq!(value["output"], 60.0);
    }

    #[test]
    fn test_render_estimated_cost() {
        let catalog = DataLoader::builtin().build().catalog;
        let estimate = PriceArgs {
            input_tokens: Some(1_000_000),
            output_tokens: Some(200_000),
            ..args("gpt-4o", "openai")
        };

        let text = render(&catalog, &estimate, OutputFormat::Text).unwrap().unwrap();
        assert!(text.ends_with("\n1000000 input + 200000 output tokens: $4.5000"), "{}", text);

        let json = render(&catalog, &estimate, OutputFormat::Json).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!((value["estimatedCost"].as_f64().unwrap() - 4.5).abs() < 1e-9);

        let output_only = PriceArgs {
            output_tokens: Some(1_000_000),
            ..args("gpt-4o", "openai")
        };
        let json = render(&catalog, &output_only, OutputFormat::Json).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!((value["estimatedCost"].as_f64().unwrap() - 10.0).abs() < 1e-9);

        let plain = render(&catalog, &args("gpt-4o", "openai"), OutputFormat::Json)
            .unwrap()
            .unwrap();
        assert!(!plain.contains("estimatedCost"));
    }

    #[test]
    fn test_render_missing() {
        let catalog = DataLoader::builtin().build().catalog;
        // image pricing is not a token price
        assert!(render(&catalog, &args("dall-e-3", "openai"), OutputFormat::Text)
            .unwrap()
            .is_none());
        assert!(render(&catalog, &args("gpt-4o", "groq"), OutputFormat::Text)
            .unwrap()
            .is_none());
    }
}
