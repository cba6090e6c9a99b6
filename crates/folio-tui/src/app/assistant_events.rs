// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Assistant event handler: streams into the accumulator, commits on
//! completion, surfaces retryable errors.

use folio_core::{AssistantEvent, Turn};

use crate::{app::App, chat::Segment};

impl App {
    pub(crate) fn handle_assistant_event(&mut self, event: AssistantEvent) {
        match event {
            AssistantEvent::TextDelta(delta) => {
                // A delta that raced a reset belongs to an abandoned turn;
                // the buffer was cleared and must stay cleared.
                if !self.busy {
                    return;
                }
                self.streaming_buffer.push_str(&delta);
                self.rebuild_display();
                self.scroll_to_bottom();
            }
            AssistantEvent::TextComplete(full_text) => {
                if !self.busy {
                    return;
                }
                self.segments.push(Segment::Turn(Turn::assistant(full_text)));
                self.streaming_buffer.clear();
                self.sync_recorder();
                self.rebuild_display();
                self.scroll_to_bottom();
            }
            AssistantEvent::TurnComplete => {
                self.busy = false;
                self.inflight_request = None;
            }
            AssistantEvent::Aborted { .. } => {
                // Cancellations come from retopic or quit; the buffer has
                // already been reset, so the partial text is dropped.
                self.streaming_buffer.clear();
                self.busy = false;
            }
            AssistantEvent::Error(message) => {
                if !self.busy {
                    return;
                }
                // Keep the streaming buffer: the visitor sees whatever
                // streamed before the failure, plus the error bubble.
                // `inflight_request` stays set so Ctrl+R re-issues the
                // identical request.
                self.segments.push(Segment::Error(message));
                self.busy = false;
                self.rebuild_display();
                self.scroll_to_bottom();
            }
        }
    }
}
