// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider identifier: "openai" | "mock"
    pub provider: String,
    /// Model name forwarded to the provider API
    pub name: String,
    /// Environment variable that holds the API key (read at runtime)
    pub api_key_env: Option<String>,
    /// Explicit API key; prefer api_key_env in config files to avoid secrets
    /// in version-controlled files
    pub api_key: Option<String>,
    /// Base URL override.  Useful for local proxies or OpenAI-compatible
    /// endpoints; the hosted default is auto-selected when unset.
    pub base_url: Option<String>,
    /// Maximum tokens to request in a single completion
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0–2.0)
    pub temperature: Option<f32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            name: "gpt-4o-mini".into(),
            // api_key_env is intentionally None: resolve_api_key() falls back
            // to the provider's canonical env var (OPENAI_API_KEY).
            api_key_env: None,
            api_key: None,
            base_url: None,
            max_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }
}

/// Remote conversation store.  All fields optional: with no URL or key the
/// recorder degrades to a no-op — that is a supported configuration, not an
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project base URL (e.g. `https://xyzcompany.supabase.co`).
    pub url: Option<String>,
    /// Explicit anon API key.
    pub api_key: Option<String>,
    /// Environment variable that holds the anon API key.
    pub api_key_env: Option<String>,
}

impl StoreConfig {
    /// Resolve the API key from the explicit value or the named env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(k) = &self.api_key {
            return Some(k.clone());
        }
        if let Some(env) = &self.api_key_env {
            return std::env::var(env).ok();
        }
        None
    }

    /// True when both a URL and a key are available.
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.resolve_api_key().is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Use plain ASCII borders instead of rounded unicode ones.
    #[serde(default)]
    pub ascii_borders: bool,
    /// Hard wrap width for chat text; 0 means use the pane width.
    #[serde(default)]
    pub wrap_width: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { ascii_borders: false, wrap_width: 0 }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
