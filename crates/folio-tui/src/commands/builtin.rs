// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Built-in slash commands.

use folio_content::CommandEntry;

use super::{CommandResult, ImmediateAction, SlashCommand};

/// A command that expands to a fixed visitor query and submits it.
pub struct ExpandCommand {
    name: &'static str,
    description: &'static str,
    query: &'static str,
}

impl ExpandCommand {
    pub fn from_entry(entry: &CommandEntry) -> Self {
        Self {
            name: entry.name,
            description: entry.description,
            query: entry.query,
        }
    }
}

impl SlashCommand for ExpandCommand {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn expansion(&self) -> Option<&str> {
        Some(self.query)
    }
    fn execute(&self) -> CommandResult {
        CommandResult {
            message_to_send: Some(self.query.to_string()),
            ..CommandResult::default()
        }
    }
}

/// A command that seeds the conversation from a canned landing topic,
/// bypassing the completion service.
pub struct TopicCommand {
    pub name: &'static str,
    pub description: &'static str,
    pub topic: &'static str,
}

impl SlashCommand for TopicCommand {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn execute(&self) -> CommandResult {
        CommandResult {
            seed_topic: Some(self.topic.to_string()),
            ..CommandResult::default()
        }
    }
}

/// `/clear` — reset the conversation buffer and start a fresh session.
pub struct ClearCommand;

impl SlashCommand for ClearCommand {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Start a new conversation"
    }
    fn execute(&self) -> CommandResult {
        CommandResult {
            immediate_action: Some(ImmediateAction::ClearConversation),
            ..CommandResult::default()
        }
    }
}

/// `/help` — list commands and key bindings.
pub struct HelpCommand;

impl SlashCommand for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show commands and key bindings"
    }
    fn execute(&self) -> CommandResult {
        CommandResult {
            immediate_action: Some(ImmediateAction::ShowHelp),
            ..CommandResult::default()
        }
    }
}

/// `/quit` — leave the chat.
pub struct QuitCommand;

impl SlashCommand for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }
    fn description(&self) -> &str {
        "Close the chat"
    }
    fn execute(&self) -> CommandResult {
        CommandResult {
            immediate_action: Some(ImmediateAction::Quit),
            ..CommandResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_command_sends_its_query() {
        let entry = CommandEntry {
            name: "proven",
            description: "desc",
            query: "Tell me about PROVEN",
        };
        let cmd = ExpandCommand::from_entry(&entry);
        assert_eq!(cmd.expansion(), Some("Tell me about PROVEN"));
        let result = cmd.execute();
        assert_eq!(result.message_to_send.as_deref(), Some("Tell me about PROVEN"));
    }

    #[test]
    fn topic_command_has_no_expansion() {
        let cmd = TopicCommand { name: "about", description: "d", topic: "about" };
        assert_eq!(cmd.expansion(), None);
        assert_eq!(cmd.execute().seed_topic.as_deref(), Some("about"));
    }

    #[test]
    fn control_commands_return_immediate_actions() {
        assert_eq!(
            ClearCommand.execute().immediate_action,
            Some(ImmediateAction::ClearConversation)
        );
        assert_eq!(HelpCommand.execute().immediate_action, Some(ImmediateAction::ShowHelp));
        assert_eq!(QuitCommand.execute().immediate_action, Some(ImmediateAction::Quit));
    }
}
