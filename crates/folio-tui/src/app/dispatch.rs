// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Action dispatch: every key binding resolves to one arm here.

use crate::{app::App, keys::Action};

impl App {
    /// Apply one [`Action`].  Returns `true` when the app should exit.
    pub(crate) async fn dispatch(&mut self, action: Action) -> bool {
        match action {
            // ── Input editing ─────────────────────────────────────────────────
            Action::InputChar(c) => {
                self.input_buffer.insert(self.input_cursor, c);
                self.input_cursor += c.len_utf8();
                self.history.reset_cursor();
                self.refresh_suggestions();
            }
            Action::InputBackspace => {
                if self.input_cursor > 0 {
                    let prev = prev_char_boundary(&self.input_buffer, self.input_cursor);
                    self.input_buffer.remove(prev);
                    self.input_cursor = prev;
                }
                self.history.reset_cursor();
                self.refresh_suggestions();
            }
            Action::InputDelete => {
                if self.input_cursor < self.input_buffer.len() {
                    self.input_buffer.remove(self.input_cursor);
                    self.refresh_suggestions();
                }
            }
            Action::InputMoveLeft => {
                self.input_cursor = prev_char_boundary(&self.input_buffer, self.input_cursor);
            }
            Action::InputMoveRight => {
                if self.input_cursor < self.input_buffer.len() {
                    let step = self.input_buffer[self.input_cursor..]
                        .chars()
                        .next()
                        .map(char::len_utf8)
                        .unwrap_or(1);
                    self.input_cursor += step;
                }
            }
            Action::InputMoveStart => self.input_cursor = 0,
            Action::InputMoveEnd => self.input_cursor = self.input_buffer.len(),
            Action::InputClear => {
                self.input_buffer.clear();
                self.input_cursor = 0;
                self.history.reset_cursor();
                self.refresh_suggestions();
            }
            Action::InputClearAndDismiss => {
                self.input_buffer.clear();
                self.input_cursor = 0;
                self.history.reset_cursor();
                self.suggest.dismiss();
            }

            // ── Submission ────────────────────────────────────────────────────
            Action::Submit => return self.submit_from_input().await,

            // ── Suggestion overlay ────────────────────────────────────────────
            Action::SuggestNext => self.suggest.select_next(),
            Action::SuggestPrev => self.suggest.select_prev(),
            Action::SuggestAccept => {
                let insert = self.suggest.accept_item().map(|i| i.insert.clone());
                if let Some(insert) = insert {
                    self.apply_suggestion_text(&insert);
                }
            }
            Action::SuggestDismiss => self.suggest.dismiss(),

            // ── History ───────────────────────────────────────────────────────
            Action::HistoryPrev => {
                if let Some(text) = self.history.prev(&self.input_buffer) {
                    self.set_input_no_suggest(text);
                }
            }
            Action::HistoryNext => {
                if let Some(text) = self.history.next() {
                    self.set_input_no_suggest(text);
                }
            }

            // ── Chat pane ─────────────────────────────────────────────────────
            Action::ScrollUp => self.scroll_up(3),
            Action::ScrollDown => self.scroll_down(3),

            // ── App ───────────────────────────────────────────────────────────
            Action::Retry => self.retry_last_request().await,
            Action::Help => self.show_help = !self.show_help,
            Action::Quit => {
                self.send_cancel().await;
                return true;
            }
        }
        false
    }

    /// Regenerate the suggestion overlay from the current input.
    ///
    /// The overlay is shown only for non-empty input; the empty-input prompt
    /// prefix renders as chips in the empty chat pane instead, which keeps
    /// the Up/Down keys free for history when the line is blank.
    pub(crate) fn refresh_suggestions(&mut self) {
        if self.input_buffer.is_empty() {
            self.suggest.dismiss();
            return;
        }
        let suggestions = self.matcher.suggest(&self.input_buffer);
        self.suggest = self.suggest.rebuild(suggestions);
    }

    /// Tab: replace the input with the accepted suggestion and close the
    /// list.  Clicking an item goes through this same path, so the two
    /// gestures always yield the same input text.
    pub(crate) fn apply_suggestion_text(&mut self, insert: &str) {
        self.input_buffer = insert.to_string();
        self.input_cursor = self.input_buffer.len();
        self.history.reset_cursor();
        self.suggest.dismiss();
    }

    /// Replace the input from history without re-opening the overlay, so a
    /// history walk is not hijacked by suggestion navigation.
    fn set_input_no_suggest(&mut self, text: String) {
        self.input_buffer = text;
        self.input_cursor = self.input_buffer.len();
    }

    async fn retry_last_request(&mut self) {
        if self.busy {
            return;
        }
        let Some(messages) = self.inflight_request.clone() else {
            return;
        };
        // Drop the error bubble; the re-issued stream rebuilds the reply.
        if matches!(self.segments.last(), Some(crate::chat::Segment::Error(_))) {
            self.segments.pop();
        }
        self.streaming_buffer.clear();
        self.auto_scroll = true;
        self.rebuild_display();
        self.scroll_to_bottom();
        self.send_to_assistant(messages).await;
    }
}

/// Largest char boundary strictly before `idx`.
pub(crate) fn prev_char_boundary(s: &str, idx: usize) -> usize {
    if idx == 0 {
        return 0;
    }
    let mut i = idx - 1;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
