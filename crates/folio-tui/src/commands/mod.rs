// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Slash command system.
//!
//! Commands are invoked by typing `/command` in the input box.  Built-ins
//! cover the site's fixed topics and expansions plus conversation control
//! (`/clear`, `/help`, `/quit`); all are registered at startup from the
//! injected content catalog.

pub mod builtin;
pub mod parser;
pub mod registry;

pub use parser::{parse, ParsedCommand};
pub use registry::CommandRegistry;

/// The effect(s) a command wants to produce when executed.
///
/// Commands do not mutate app state directly; they return this struct and
/// the app applies each effect.  This keeps commands stateless and testable.
#[derive(Debug, Default)]
pub struct CommandResult {
    /// If set, the command wants to send this text as the visitor message.
    pub message_to_send: Option<String>,

    /// If set, seed the conversation from this canned topic instead of
    /// sending anything to the completion service.
    pub seed_topic: Option<String>,

    /// If set, triggers an immediate side-effect in the app.
    pub immediate_action: Option<ImmediateAction>,
}

/// Side-effects that must be handled by the app immediately.
#[derive(Debug, PartialEq, Eq)]
pub enum ImmediateAction {
    Quit,
    /// Reset the conversation buffer (retopic semantics).
    ClearConversation,
    ShowHelp,
}

/// A slash command that can be invoked from the input box.
///
/// Implementations must be `Send + Sync` so they can be stored in the
/// registry behind an `Arc`.
pub trait SlashCommand: Send + Sync {
    /// The command keyword used after `/` (e.g. `"proven"` for `/proven`).
    fn name(&self) -> &str;

    /// One-line description shown in the suggestion list and help.
    fn description(&self) -> &str;

    /// The expansion query a highlighted suggestion submits on Enter, when
    /// the command is a pure expansion.  Control commands return `None` and
    /// are submitted as their `/name` invocation instead.
    fn expansion(&self) -> Option<&str> {
        None
    }

    /// Execute the command, returning the effects to apply.
    fn execute(&self) -> CommandResult;
}

/// Parse `input` and execute the named command against the registry.
///
/// Returns `None` for non-commands and unknown commands — an unknown
/// `/typo` is silently consumed by the caller, matching the input layer's
/// "malformed submission is a no-op" rule.
pub fn dispatch_command(
    input: &str,
    registry: &CommandRegistry,
) -> Option<(String, CommandResult)> {
    match parse(input) {
        ParsedCommand::Invocation { name, .. } => {
            let cmd = registry.get(&name)?;
            let result = cmd.execute();
            Some((name, result))
        }
        _ => None,
    }
}
