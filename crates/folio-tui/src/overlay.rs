// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Suggestion overlay state.
//!
//! One explicit tagged state instead of parallel boolean flags: the overlay
//! is either idle or showing a ranked list with an optional highlight.
//! Transitions are pure functions of (state, event); rendering reads the
//! state, never the other way around.

use crate::suggest::{SuggestKind, SuggestionItem, Suggestions};

/// State of the suggestion overlay above the input box.
#[derive(Debug)]
pub enum SuggestState {
    /// Nothing shown (no matches, or dismissed until the next edit).
    Idle,
    Showing {
        kind: SuggestKind,
        items: Vec<SuggestionItem>,
        /// Highlighted index.  `None` until the user navigates — plain Enter
        /// then submits the literal input, not a suggestion.
        selected: Option<usize>,
    },
}

impl SuggestState {
    /// Rebuild from fresh matcher output, carrying the highlight over.
    ///
    /// The highlight is clamped to the new list length so a previously
    /// selected index can never point past the end after the candidate
    /// count changes.
    pub fn rebuild(&self, s: Suggestions) -> SuggestState {
        if s.items.is_empty() {
            return SuggestState::Idle;
        }
        let carried = match self {
            SuggestState::Showing { selected: Some(i), .. } => {
                Some((*i).min(s.items.len() - 1))
            }
            _ => None,
        };
        SuggestState::Showing { kind: s.kind, items: s.items, selected: carried }
    }

    pub fn dismiss(&mut self) {
        *self = SuggestState::Idle;
    }

    pub fn is_showing(&self) -> bool {
        matches!(self, SuggestState::Showing { .. })
    }

    /// Move the highlight down by one, wrapping past the end.
    pub fn select_next(&mut self) {
        if let SuggestState::Showing { items, selected, .. } = self {
            *selected = Some(match selected {
                None => 0,
                Some(i) => (*i + 1) % items.len(),
            });
        }
    }

    /// Move the highlight up by one, wrapping past the start.
    pub fn select_prev(&mut self) {
        if let SuggestState::Showing { items, selected, .. } = self {
            *selected = Some(match selected {
                None => items.len() - 1,
                Some(0) => items.len() - 1,
                Some(i) => *i - 1,
            });
        }
    }

    /// The highlighted item, if the user has navigated to one.
    pub fn selected_item(&self) -> Option<&SuggestionItem> {
        match self {
            SuggestState::Showing { items, selected: Some(i), .. } => items.get(*i),
            _ => None,
        }
    }

    /// The item Tab accepts: the highlighted one, or the first.
    pub fn accept_item(&self) -> Option<&SuggestionItem> {
        match self {
            SuggestState::Showing { items, selected, .. } => {
                items.get(selected.unwrap_or(0))
            }
            SuggestState::Idle => None,
        }
    }

    pub fn items(&self) -> &[SuggestionItem] {
        match self {
            SuggestState::Showing { items, .. } => items,
            SuggestState::Idle => &[],
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self {
            SuggestState::Showing { selected, .. } => *selected,
            SuggestState::Idle => None,
        }
    }

    pub fn kind(&self) -> Option<SuggestKind> {
        match self {
            SuggestState::Showing { kind, .. } => Some(*kind),
            SuggestState::Idle => None,
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
