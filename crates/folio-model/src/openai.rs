use anyhow::{bail, Context};
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use tracing::debug;

use crate::{provider::ResponseStream, CompletionRequest, ResponseEvent, Role};

pub struct OpenAiProvider {
    model: String,
    api_key: Option<String>,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            model,
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com".into()),
            max_tokens: max_tokens.unwrap_or(1024),
            temperature: temperature.unwrap_or(0.7),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl crate::ModelProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, req: CompletionRequest) -> anyhow::Result<ResponseStream> {
        let key = self.api_key.as_deref().context("OPENAI_API_KEY not set")?;

        let messages: Vec<Value> = req
            .messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                };
                json!({ "role": role, "content": m.content })
            })
            .collect();

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "stream": req.stream,
        });

        debug!(model = %self.model, n_messages = req.messages.len(), "sending openai request");

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .context("OpenAI request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("OpenAI error {status}: {text}");
        }

        let byte_stream = resp.bytes_stream();
        let event_stream = byte_stream.flat_map(|chunk| {
            let lines = match chunk {
                Ok(b) => String::from_utf8_lossy(&b).to_string(),
                Err(e) => return futures::stream::iter(vec![Err(anyhow::anyhow!(e))]),
            };
            let events: Vec<anyhow::Result<ResponseEvent>> = lines
                .lines()
                .filter_map(|line| {
                    let line = line.strip_prefix("data: ")?.trim();
                    if line == "[DONE]" {
                        return Some(Ok(ResponseEvent::Done));
                    }
                    let v: Value = serde_json::from_str(line).ok()?;
                    Some(Ok(parse_openai_event(&v)))
                })
                .collect();
            futures::stream::iter(events)
        });

        Ok(Box::pin(event_stream))
    }
}

/// Map one decoded SSE payload to a [`ResponseEvent`].
///
/// Unknown payload shapes become empty text deltas so a protocol addition
/// never kills the stream.
pub(crate) fn parse_openai_event(v: &Value) -> ResponseEvent {
    if let Some(err) = v.get("error") {
        let msg = err["message"].as_str().unwrap_or("unknown provider error");
        return ResponseEvent::Error(msg.to_string());
    }
    let delta = &v["choices"][0]["delta"];
    if let Some(text) = delta["content"].as_str() {
        return ResponseEvent::TextDelta(text.to_string());
    }
    ResponseEvent::TextDelta(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelProvider;

    #[test]
    fn provider_name_and_model() {
        let p = OpenAiProvider::new("gpt-4o-mini".into(), None, None, None, None);
        assert_eq!(p.name(), "openai");
        assert_eq!(p.model_name(), "gpt-4o-mini");
    }

    // ── parse_openai_event ────────────────────────────────────────────────────

    #[test]
    fn content_delta_becomes_text_delta() {
        let v = serde_json::json!({
            "choices": [{ "delta": { "content": "world" }, "index": 0 }]
        });
        let ev = parse_openai_event(&v);
        assert!(matches!(ev, ResponseEvent::TextDelta(t) if t == "world"));
    }

    #[test]
    fn role_only_delta_is_empty_text() {
        // The first chunk carries only the role, no content.
        let v = serde_json::json!({
            "choices": [{ "delta": { "role": "assistant" }, "index": 0 }]
        });
        let ev = parse_openai_event(&v);
        assert!(matches!(ev, ResponseEvent::TextDelta(t) if t.is_empty()));
    }

    #[test]
    fn finish_chunk_is_empty_text() {
        let v = serde_json::json!({
            "choices": [{ "delta": {}, "finish_reason": "stop", "index": 0 }]
        });
        let ev = parse_openai_event(&v);
        assert!(matches!(ev, ResponseEvent::TextDelta(t) if t.is_empty()));
    }

    #[test]
    fn error_payload_becomes_error_event() {
        let v = serde_json::json!({
            "error": { "message": "rate limited", "type": "rate_limit_error" }
        });
        let ev = parse_openai_event(&v);
        assert!(matches!(ev, ResponseEvent::Error(m) if m == "rate limited"));
    }

    #[test]
    fn empty_payload_is_empty_text() {
        let v = serde_json::json!({});
        let ev = parse_openai_event(&v);
        assert!(matches!(ev, ResponseEvent::TextDelta(t) if t.is_empty()));
    }
}
