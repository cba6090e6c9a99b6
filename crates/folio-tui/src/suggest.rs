// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The suggestion matcher: ranks canned prompts and slash commands against
//! the current input.
//!
//! Pure: a function of the input string plus the injected catalog and
//! command registry.  The edit-distance scoring tolerates transpositions and
//! missing characters; ties keep catalog/registration order.

use std::sync::Arc;

use folio_content::ContentCatalog;

use crate::commands::CommandRegistry;

/// Cap for plain prompt suggestions.
pub const PROMPT_LIMIT: usize = 5;
/// Cap for slash-command suggestions.
pub const COMMAND_LIMIT: usize = 8;

/// One ranked entry in the suggestion list.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionItem {
    /// Text placed into the input when accepted with Tab.
    pub insert: String,
    /// Query submitted when chosen with Enter.
    pub query: String,
    /// Display text shown in the overlay.
    pub label: String,
    /// Secondary description shown in muted style.
    pub description: Option<String>,
    /// Char ranges into `label` to highlight (half-open).
    pub spans: Vec<(usize, usize)>,
    /// Match distance — lower is better.
    pub distance: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestKind {
    Prompts,
    Commands,
}

#[derive(Debug, Clone)]
pub struct Suggestions {
    pub kind: SuggestKind,
    pub items: Vec<SuggestionItem>,
}

pub struct SuggestionMatcher {
    catalog: Arc<ContentCatalog>,
    registry: Arc<CommandRegistry>,
}

impl SuggestionMatcher {
    pub fn new(catalog: Arc<ContentCatalog>, registry: Arc<CommandRegistry>) -> Self {
        Self { catalog, registry }
    }

    /// Rank candidates for `input`.
    ///
    /// - `""` → the first [`PROMPT_LIMIT`] canned prompts, unscored
    /// - `"/"` → the command list in registration order
    /// - `"/x…"` → fuzzy over command names and descriptions
    /// - anything else → fuzzy over the canned prompt list
    pub fn suggest(&self, input: &str) -> Suggestions {
        if let Some(rest) = input.strip_prefix('/') {
            let pattern = rest.split_whitespace().next().unwrap_or("");
            return Suggestions {
                kind: SuggestKind::Commands,
                items: self.command_items(pattern),
            };
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Suggestions {
                kind: SuggestKind::Prompts,
                items: self.prompt_prefix(),
            };
        }
        Suggestions {
            kind: SuggestKind::Prompts,
            items: self.prompt_items(trimmed),
        }
    }

    fn prompt_prefix(&self) -> Vec<SuggestionItem> {
        self.catalog
            .prompts()
            .iter()
            .take(PROMPT_LIMIT)
            .map(|p| SuggestionItem {
                insert: p.query.to_string(),
                query: p.query.to_string(),
                label: p.query.to_string(),
                description: None,
                spans: Vec::new(),
                distance: 0,
            })
            .collect()
    }

    fn prompt_items(&self, pattern: &str) -> Vec<SuggestionItem> {
        let mut items: Vec<SuggestionItem> = self
            .catalog
            .prompts()
            .iter()
            .filter_map(|p| {
                let d = best_distance(pattern, &[p.query, p.label])?;
                Some(SuggestionItem {
                    insert: p.query.to_string(),
                    query: p.query.to_string(),
                    label: p.query.to_string(),
                    description: None,
                    spans: highlight_spans(pattern, p.query),
                    distance: d,
                })
            })
            .collect();
        // Stable sort: equal distances keep catalog order.
        items.sort_by_key(|i| i.distance);
        items.truncate(PROMPT_LIMIT);
        items
    }

    fn command_items(&self, pattern: &str) -> Vec<SuggestionItem> {
        let mut items: Vec<SuggestionItem> = self
            .registry
            .iter()
            .filter_map(|cmd| {
                let label = format!("/{}", cmd.name());
                let d = if pattern.is_empty() {
                    0
                } else {
                    best_distance(pattern, &[cmd.name(), cmd.description()])?
                };
                let query = cmd
                    .expansion()
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| label.clone());
                Some(SuggestionItem {
                    insert: label.clone(),
                    query,
                    spans: highlight_spans(pattern, &label),
                    label,
                    description: Some(cmd.description().to_string()),
                    distance: d,
                })
            })
            .collect();
        items.sort_by_key(|i| i.distance);
        items.truncate(COMMAND_LIMIT);
        items
    }
}

/// Lowest match distance of `pattern` against any of `candidates`, or `None`
/// when nothing clears the threshold.
fn best_distance(pattern: &str, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .filter_map(|c| match_distance(pattern, c))
        .min()
}

/// Maximum accepted distance for a pattern of `n` chars: one edit per four
/// pattern characters, plus one.  Loose enough for transpositions and a
/// dropped letter, tight enough that unrelated entries never match.
fn distance_threshold(n: usize) -> usize {
    n / 4 + 1
}

/// Approximate substring distance: the best optimal-string-alignment
/// distance between `pattern` and any same-length window of `candidate`
/// (case-insensitive).  `None` when over the threshold.
fn match_distance(pattern: &str, candidate: &str) -> Option<usize> {
    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    if p.is_empty() {
        return Some(0);
    }
    let c: Vec<char> = candidate.to_lowercase().chars().collect();
    let pat: String = p.iter().collect();

    let mut best = usize::MAX;
    if c.len() <= p.len() {
        best = strsim::osa_distance(&pat, &c.iter().collect::<String>());
    } else {
        for start in 0..=(c.len() - p.len()) {
            let window: String = c[start..start + p.len()].iter().collect();
            best = best.min(strsim::osa_distance(&pat, &window));
            if best == 0 {
                break;
            }
        }
    }

    (best <= distance_threshold(p.len())).then_some(best)
}

/// Char ranges of `label` to highlight: the case-insensitive subsequence
/// positions of `pattern`, merged into runs.  Empty when the pattern is not
/// a subsequence (e.g. it matched only via a transposition) — the overlay
/// then renders the label unhighlighted.
fn highlight_spans(pattern: &str, label: &str) -> Vec<(usize, usize)> {
    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    if p.is_empty() {
        return Vec::new();
    }
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut pi = 0;
    let mut count = 0;
    for (i, ch) in label.chars().enumerate() {
        count = i + 1;
        if pi < p.len() && ch.to_lowercase().next() == Some(p[pi]) {
            if run_start.is_none() {
                run_start = Some(i);
            }
            pi += 1;
            if pi == p.len() {
                spans.push((run_start.take().unwrap_or(i), i + 1));
                break;
            }
        } else if let Some(s) = run_start.take() {
            spans.push((s, i));
        }
    }
    if let Some(s) = run_start {
        spans.push((s, count));
    }
    if pi < p.len() {
        return Vec::new();
    }
    spans
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
