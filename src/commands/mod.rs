// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Command runners for the aimodels CLI
//!
//! Each command renders to a `String` so the output can be checked without
//! a terminal; `execute` prints it. Runners return `Ok(false)` when the
//! lookup found nothing, which the binary turns into a non-zero exit code.

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::Result;
use crate::models::capability::Capability;
use crate::models::context::ModelContext;

pub mod data;
pub mod directory;
pub mod models;
pub mod price;

/// Settings from the config file, with command-line flags applied on top
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match cli.config {
        Some(ref path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    if let Some(ref dir) = cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }
    if cli.strict {
        settings.strict = true;
    }

    tracing::debug!(?settings, "settings resolved");
    Ok(settings)
}

/// One-line summary of a context descriptor
pub fn describe_context(context: &ModelContext) -> String {
    fn limit(value: Option<u64>) -> String {
        value.map_or_else(|| "unbounded".to_string(), |v| v.to_string())
    }

    match context {
        ModelContext::Token(ctx) => format!(
            "{} tokens in, {} out",
            limit(ctx.total),
            limit(ctx.max_output)
        ),
        ModelContext::Character(ctx) => format!(
            "{} characters in, {} out",
            limit(ctx.total),
            limit(ctx.max_output)
        ),
        ModelContext::Image(ctx) => format!(
            "{} image(s) per request, sizes {}",
            ctx.max_output,
            ctx.sizes.join(", ")
        ),
        ModelContext::AudioIn(ctx) => match ctx.max_duration {
            Some(secs) => format!("audio in, up to {}s", secs),
            None => "audio in".to_string(),
        },
        ModelContext::AudioOut(ctx) => match ctx.max_input {
            Some(chars) => format!("audio out, up to {} input characters", chars),
            None => "audio out".to_string(),
        },
        ModelContext::Embedding(ctx) => format!(
            "{} {} in, {} dimensions",
            limit(ctx.total),
            ctx.unit.as_deref().unwrap_or("tokens"),
            ctx.dimensions
        ),
    }
}

/// Short context column for model listings
pub fn context_column(context: &ModelContext) -> String {
    match context.text_total() {
        Some(total) if total >= 1000 => format!("{}k", total / 1000),
        Some(total) => total.to_string(),
        None => context.kind().to_string(),
    }
}

pub fn join_capabilities(capabilities: &[Capability]) -> String {
    capabilities
        .iter()
        .map(Capability::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::context::ImageContext;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_describe_context() {
        assert_eq!(
            describe_context(&ModelContext::tokens(Some(8192), None)),
            "8192 tokens in, unbounded out"
        );

        let image = ModelContext::Image(ImageContext {
            max_output: 1,
            sizes: vec!["1024x1024".into(), "512x512".into()],
            qualities: vec![],
        });
        assert_eq!(
            describe_context(&image),
            "1 image(s) per request, sizes 1024x1024, 512x512"
        );
    }

    #[test]
    fn test_context_column() {
        assert_eq!(context_column(&ModelContext::tokens(Some(128_000), None)), "128k");
        assert_eq!(context_column(&ModelContext::tokens(Some(512), None)), "512");
        assert_eq!(context_column(&ModelContext::tokens(None, None)), "token");
    }

    #[test]
    fn test_join_capabilities() {
        assert_eq!(
            join_capabilities(&[Capability::Chat, Capability::ImageIn]),
            "chat, img-in"
        );
    }

    #[test]
    fn test_cli_flags_override_settings_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        Settings {
            data_dir: Some(temp.path().join("from-file")),
            strict: false,
        }
        .save_to(&path)
        .unwrap();

        let config = path.to_string_lossy().to_string();
        let cli = Cli::parse_from(["aimodels", "--config", &config, "providers"]);
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.data_dir, Some(temp.path().join("from-file")));
        assert!(!settings.strict);

        let cli = Cli::parse_from([
            "aimodels",
            "--config",
            &config,
            "--data-dir",
            "/override",
            "--strict",
            "providers",
        ]);
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.data_dir, Some("/override".into()));
        assert!(settings.strict);
    }
}
