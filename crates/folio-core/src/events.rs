// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
/// Events emitted by the assistant task during a single turn.
/// The TUI subscribes to these to drive its display.
#[derive(Debug, Clone)]
pub enum AssistantEvent {
    /// A text chunk streamed from the model
    TextDelta(String),
    /// The complete reply text (after streaming finishes)
    TextComplete(String),
    /// The assistant has finished processing the current turn
    TurnComplete,
    /// The turn was cancelled; `partial_text` is whatever had streamed so far
    Aborted { partial_text: String },
    /// The completion request or stream failed.  Recoverable: the UI keeps
    /// the failed request and may resubmit it on user-triggered retry.
    Error(String),
}
