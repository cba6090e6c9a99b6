// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Fire-and-forget session recorder.
//!
//! The UI never talks HTTP directly: it enqueues operations on an unbounded
//! channel and an independent task drains them in order.  That keeps "turn
//! appended to buffer" decoupled from "turn mirrored to store" — ordering and
//! failure live in one place instead of being implicit in call sites.

use tokio::sync::mpsc;
use tracing::warn;

use crate::StoreClient;

/// Role tag of a mirrored turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedRole {
    Visitor,
    Assistant,
}

impl RecordedRole {
    /// Tag stored in the `role` column.  The store schema predates this
    /// client and uses `amy` for assistant turns.
    pub fn as_store_tag(&self) -> &'static str {
        match self {
            RecordedRole::Visitor => "user",
            RecordedRole::Assistant => "amy",
        }
    }
}

#[derive(Debug)]
enum RecordOp {
    /// Open a fresh session; subsequent messages attach to it.
    BeginSession,
    Message { role: RecordedRole, text: String },
}

/// Handle the UI holds.  All methods are synchronous and never block: they
/// enqueue and return.  A disabled recorder (unconfigured store) accepts the
/// same calls and does nothing.
#[derive(Clone)]
pub struct Recorder {
    tx: Option<mpsc::UnboundedSender<RecordOp>>,
}

impl Recorder {
    /// Recorder that silently drops everything.  Used when the store is not
    /// configured — by design this is indistinguishable from a working
    /// recorder from the UI's point of view.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Spawn the drain task over a configured client.
    pub fn spawn(client: StoreClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain(client, rx));
        Self { tx: Some(tx) }
    }

    /// Build from config: a configured store gets a live recorder, anything
    /// else degrades to the disabled one.
    pub fn from_config(cfg: &folio_config::StoreConfig) -> Self {
        match StoreClient::from_config(cfg) {
            Some(client) => Self::spawn(client),
            None => Self::disabled(),
        }
    }

    /// True when records actually go somewhere (status display only).
    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Request a fresh session handle.  Called at panel open and on every
    /// topic change.
    pub fn begin_session(&self) {
        self.send(RecordOp::BeginSession);
    }

    /// Mirror one turn.  Never awaited, never retried.
    pub fn record(&self, role: RecordedRole, text: impl Into<String>) {
        self.send(RecordOp::Message { role, text: text.into() });
    }

    fn send(&self, op: RecordOp) {
        if let Some(tx) = &self.tx {
            // The drain task only stops when every sender is gone, so a send
            // failure here means shutdown is in progress — drop the op.
            let _ = tx.send(op);
        }
    }
}

/// Single consumer: ops are performed strictly in enqueue order, so message
/// rows are issued in turn order.  No ordering guarantee is made beyond that;
/// the UI never reads back from the store.
async fn drain(client: StoreClient, mut rx: mpsc::UnboundedReceiver<RecordOp>) {
    let mut session: Option<String> = None;
    while let Some(op) = rx.recv().await {
        match op {
            RecordOp::BeginSession => {
                session = match client.create_session().await {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!("failed to create chat session: {e}");
                        None
                    }
                };
            }
            RecordOp::Message { role, text } => {
                // No session (creation failed or never requested) — skip
                // silently, same as the unconfigured case.
                let Some(sid) = session.as_deref() else { continue };
                if let Err(e) = client.insert_message(sid, role.as_store_tag(), &text).await {
                    warn!("failed to record chat message: {e}");
                }
            }
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use folio_config::StoreConfig;

    #[test]
    fn role_tags_match_store_schema() {
        assert_eq!(RecordedRole::Visitor.as_store_tag(), "user");
        assert_eq!(RecordedRole::Assistant.as_store_tag(), "amy");
    }

    #[test]
    fn disabled_recorder_accepts_records() {
        let r = Recorder::disabled();
        assert!(!r.is_enabled());
        r.begin_session();
        r.record(RecordedRole::Visitor, "hello");
        r.record(RecordedRole::Assistant, "hi there");
        // Nothing to assert beyond "does not panic": a disabled recorder is
        // a black hole by contract.
    }

    #[tokio::test]
    async fn from_config_unconfigured_is_disabled() {
        let r = Recorder::from_config(&StoreConfig::default());
        assert!(!r.is_enabled());
    }

    #[tokio::test]
    async fn from_config_configured_is_enabled() {
        let cfg = StoreConfig {
            url: Some("https://example.supabase.co".into()),
            api_key: Some("anon".into()),
            api_key_env: None,
        };
        let r = Recorder::from_config(&cfg);
        assert!(r.is_enabled());
    }
}
