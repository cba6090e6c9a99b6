// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Slash command parser.
//!
//! Identifies what the input buffer holds at submit time.  Commands here
//! take no arguments; anything after the name is tokenised and carried
//! along, then ignored by the built-ins.

/// Parse result for a submitted input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Input does not start with `/` — not a slash command at all.
    NotCommand,

    /// Just `/` with nothing after it.
    Bare,

    /// `/name` possibly followed by extra tokens.
    Invocation { name: String, args: Vec<String> },
}

/// Parse the input string.  Pure; called on submit.
pub fn parse(input: &str) -> ParsedCommand {
    let Some(body) = input.strip_prefix('/') else {
        return ParsedCommand::NotCommand;
    };

    let mut tokens = body.split_whitespace().map(str::to_string);
    match tokens.next() {
        None => ParsedCommand::Bare,
        Some(name) => ParsedCommand::Invocation { name, args: tokens.collect() },
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
