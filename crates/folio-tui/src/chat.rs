// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Chat display data: the `Segment` enum and helpers that operate on segment
//! slices without needing the full `App` state.

use folio_core::{Turn, TurnRole};

/// One entry in the chat display: a committed turn or an error bubble.
#[derive(Debug, Clone)]
pub enum Segment {
    Turn(Turn),
    /// A retryable completion failure, rendered inline.
    Error(String),
}

impl Segment {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_error(&self) -> bool {
        matches!(self, Segment::Error(_))
    }
}

/// Clone out the conversation turns, skipping error bubbles.  Used to build
/// the payload for a completion request and to compute recorder deltas.
pub fn conversation_turns(segments: &[Segment]) -> Vec<Turn> {
    segments
        .iter()
        .filter_map(|s| match s {
            Segment::Turn(t) => Some(t.clone()),
            Segment::Error(_) => None,
        })
        .collect()
}

/// Number of committed turns (error bubbles excluded).
#[cfg_attr(not(test), allow(dead_code))]
pub fn turn_count(segments: &[Segment]) -> usize {
    segments.iter().filter(|s| matches!(s, Segment::Turn(_))).count()
}

/// Index of the first assistant turn, if any.
#[cfg_attr(not(test), allow(dead_code))]
pub fn first_assistant_index(segments: &[Segment]) -> Option<usize> {
    segments.iter().position(|s| {
        matches!(s, Segment::Turn(t) if t.role == TurnRole::Assistant)
    })
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
