// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use folio_config::StoreConfig;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("store returned no session id")]
    MissingId,
}

/// Thin REST client for the conversation store.
///
/// Two tables: `chat_sessions` (one row per opened panel) and
/// `chat_messages` (one row per mirrored turn, keyed by session id).
pub struct StoreClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct SessionRow {
    id: String,
}

impl StoreClient {
    /// Build a client from configuration.  Returns `None` when the store is
    /// not configured — callers degrade to a no-op recorder in that case.
    pub fn from_config(cfg: &StoreConfig) -> Option<Self> {
        let url = cfg.url.clone()?;
        let key = cfg.resolve_api_key()?;
        Some(Self {
            base_url: url.trim_end_matches('/').to_string(),
            api_key: key,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Create a new session row and return its opaque identifier.
    pub async fn create_session(&self) -> Result<String, StoreError> {
        let resp = self
            .client
            .post(self.endpoint("chat_sessions"))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&json!({}))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status()));
        }

        let rows: Vec<SessionRow> = resp.json().await?;
        let id = rows.into_iter().next().ok_or(StoreError::MissingId)?.id;
        debug!(session = %id, "created chat session");
        Ok(id)
    }

    /// Insert one message row.  Returns nothing observable on success.
    pub async fn insert_message(
        &self,
        session_id: &str,
        role: &str,
        content: &str,
    ) -> Result<(), StoreError> {
        let resp = self
            .client
            .post(self.endpoint("chat_messages"))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&json!({
                "session_id": session_id,
                "role": role,
                "content": content,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status()));
        }
        Ok(())
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> StoreConfig {
        StoreConfig {
            url: Some("https://example.supabase.co/".into()),
            api_key: Some("anon".into()),
            api_key_env: None,
        }
    }

    #[test]
    fn from_config_none_when_unconfigured() {
        assert!(StoreClient::from_config(&StoreConfig::default()).is_none());
    }

    #[test]
    fn from_config_some_when_url_and_key_present() {
        assert!(StoreClient::from_config(&configured()).is_some());
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let c = StoreClient::from_config(&configured()).unwrap();
        assert_eq!(
            c.endpoint("chat_messages"),
            "https://example.supabase.co/rest/v1/chat_messages"
        );
    }
}
