// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod mock;
mod openai;
mod provider;
mod types;

pub use mock::{MockProvider, ScriptedMockProvider};
pub use openai::OpenAiProvider;
pub use provider::{ModelProvider, ResponseStream};
pub use types::*;

use anyhow::bail;
use folio_config::ModelConfig;

/// Construct a boxed [`ModelProvider`] from configuration.
///
/// Provider selection:
/// - `"openai"` → [`OpenAiProvider`]
/// - `"mock"` → [`MockProvider`] (echo-back, used in tests and demos)
pub fn from_config(cfg: &ModelConfig) -> anyhow::Result<Box<dyn ModelProvider>> {
    let key = resolve_api_key(cfg);
    match cfg.provider.as_str() {
        "openai" => Ok(Box::new(OpenAiProvider::new(
            cfg.name.clone(),
            key,
            cfg.base_url.clone(),
            cfg.max_tokens,
            cfg.temperature,
        ))),
        "mock" => Ok(Box::new(MockProvider)),
        other => bail!("unknown model provider: {other}"),
    }
}

fn resolve_api_key(cfg: &ModelConfig) -> Option<String> {
    if let Some(k) = &cfg.api_key {
        return Some(k.clone());
    }
    if let Some(env) = &cfg.api_key_env {
        return std::env::var(env).ok();
    }
    // Canonical env var for the provider.
    match cfg.provider.as_str() {
        "openai" => std::env::var("OPENAI_API_KEY").ok(),
        _ => None,
    }
}
