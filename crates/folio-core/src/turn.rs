// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use folio_model::{Message, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Visitor,
    Assistant,
}

/// One committed message in the conversation buffer.
///
/// `id` uniqueness is the only invariant; ordering is the buffer's insertion
/// order.  The in-progress assistant reply is NOT a `Turn` — it lives in a
/// separate streaming accumulator and is committed here only when the stream
/// completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn visitor(text: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), role: TurnRole::Visitor, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), role: TurnRole::Assistant, text: text.into() }
    }

    /// Map to the wire message format.
    pub fn to_message(&self) -> Message {
        match self.role {
            TurnRole::Visitor => Message { role: Role::User, content: self.text.clone() },
            TurnRole::Assistant => Message { role: Role::Assistant, content: self.text.clone() },
        }
    }
}

/// Build the full request payload: persona system message followed by every
/// turn of the conversation in order.
pub fn request_messages(persona: &str, turns: &[Turn]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(Message::system(persona));
    messages.extend(turns.iter().map(Turn::to_message));
    messages
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
