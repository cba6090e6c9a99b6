// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Command registry: central ordered store for all registered slash commands.
//!
//! Registration order is meaningful — the suggestion matcher breaks ranking
//! ties by it, so the registry keeps commands in a `Vec` rather than a map.

use std::sync::Arc;

use folio_content::ContentCatalog;

use super::{builtin, SlashCommand};

/// Ordered registry of all available slash commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn SlashCommand>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self { commands: Vec::new() }
    }

    /// Create a registry pre-populated with all built-in commands: the
    /// catalog's expansion commands in catalog order, then the topic seeds,
    /// then conversation control.
    pub fn with_builtins(catalog: &Arc<ContentCatalog>) -> Self {
        let mut reg = Self::empty();
        for entry in catalog.commands() {
            reg.register(Arc::new(builtin::ExpandCommand::from_entry(entry)));
        }
        reg.register(Arc::new(builtin::TopicCommand {
            name: "about",
            description: "Who Amy is — background and philosophy",
            topic: "about",
        }));
        reg.register(Arc::new(builtin::TopicCommand {
            name: "projects",
            description: "What Amy is building — PROVEN, Durin, Noteworthy",
            topic: "projects",
        }));
        reg.register(Arc::new(builtin::ClearCommand));
        reg.register(Arc::new(builtin::HelpCommand));
        reg.register(Arc::new(builtin::QuitCommand));
        reg
    }

    /// Register a command.  Replaces any existing command with the same
    /// name, keeping the original position.
    pub fn register(&mut self, cmd: Arc<dyn SlashCommand>) {
        if let Some(existing) = self
            .commands
            .iter_mut()
            .find(|c| c.name() == cmd.name())
        {
            *existing = cmd;
        } else {
            self.commands.push(cmd);
        }
    }

    /// Look up a command by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommand>> {
        self.commands.iter().find(|c| c.name() == name).cloned()
    }

    /// Iterate over all registered commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SlashCommand>> {
        self.commands.iter()
    }

    /// `(name, description)` pairs in registration order, for the help view.
    pub fn help_entries(&self) -> Vec<(String, String)> {
        self.commands
            .iter()
            .map(|c| (format!("/{}", c.name()), c.description().to_string()))
            .collect()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
