// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Static site content: the persona prompt, canned visitor prompts, slash
//! command expansions, and pre-written topic replies.
//!
//! Everything here is plain data.  The catalog is constructed once at startup
//! and passed into the UI — no module-level state, so tests can build their
//! own catalogs.

mod catalog;
mod persona;

pub use catalog::{CannedReply, CommandEntry, ContentCatalog, PromptEntry, TopicSeed};
pub use persona::system_prompt;
