// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Unified user-input submission path.
//!
//! # Message Lifecycle
//!
//! **Step 1** — `Action::Submit` (`app/dispatch.rs`) calls
//! `submit_from_input()`: a highlighted suggestion submits its expansion
//! query directly; otherwise the trimmed input text is used.  Empty text and
//! an in-flight request are both complete no-ops.
//!
//! **Step 2** — `submit_user_input()` dispatches slash commands through the
//! registry (quit / clear / topic seed / expansion) or falls through to the
//! plain-text path.
//!
//! **Step 3** — `send_visitor_message()` first checks the catalog for a
//! pre-written reply registered for exactly this text.  A hit seeds the
//! visitor+assistant pair directly — a deliberate branch that never touches
//! the network.  Otherwise the visitor turn is appended and the full history
//! plus persona is sent to the assistant task.
//!
//! **Step 4** — `assistant_task` (folio-core) streams the reply back as
//! `AssistantEvent`s handled in `app/assistant_events.rs`.
//!
//! After every buffer mutation `sync_recorder()` mirrors the count-delta of
//! new turns to the store, fire-and-forget.

use folio_core::{request_messages, Turn};
use folio_model::Message;
use folio_store::RecordedRole;
use tracing::debug;

use crate::{
    app::App,
    chat::{conversation_turns, Segment},
    commands::{dispatch_command, ImmediateAction},
};

impl App {
    /// Submit whatever the input line currently holds.
    ///
    /// Returns `true` when the app should exit (`/quit`).
    pub(crate) async fn submit_from_input(&mut self) -> bool {
        // Don't double-submit: while a request is in flight the submit key
        // is a no-op and the typed text stays put.
        if self.busy {
            return false;
        }

        // Enter with a highlighted suggestion submits its expansion query
        // directly, bypassing the literal input text.
        let highlighted = self.suggest.selected_item().map(|i| i.query.clone());
        if let Some(query) = highlighted {
            self.suggest.dismiss();
            self.input_buffer.clear();
            self.input_cursor = 0;
            self.history.push(&query);
            return self.submit_user_input(&query).await;
        }

        let text = self.input_buffer.trim().to_string();
        if text.is_empty() {
            return false;
        }
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.suggest.dismiss();
        self.history.push(&text);
        self.submit_user_input(&text).await
    }

    /// Process user input text: dispatch slash commands or send as a message.
    pub(crate) async fn submit_user_input(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        if text.starts_with('/') {
            match dispatch_command(text, &self.registry) {
                Some((_name, result)) => {
                    match result.immediate_action {
                        Some(ImmediateAction::Quit) => {
                            self.send_cancel().await;
                            return true;
                        }
                        Some(ImmediateAction::ClearConversation) => {
                            self.clear_conversation().await;
                            return false;
                        }
                        Some(ImmediateAction::ShowHelp) => {
                            self.show_help = true;
                            return false;
                        }
                        None => {}
                    }
                    if let Some(topic) = result.seed_topic {
                        self.open_topic(&topic).await;
                        return false;
                    }
                    match result.message_to_send {
                        Some(msg) => return self.send_visitor_message(&msg).await,
                        None => return false,
                    }
                }
                // Unknown command: consumed silently, nothing is sent.
                None => return false,
            }
        }

        self.send_visitor_message(text).await
    }

    /// Append a visitor turn and either seed the canned reply or start a
    /// completion request.
    pub(crate) async fn send_visitor_message(&mut self, text: &str) -> bool {
        if self.busy {
            return false;
        }
        self.streaming_buffer.clear();
        self.auto_scroll = true;

        // Canned replies short-circuit the completion service entirely.
        if let Some(reply) = self.catalog.canned_reply(text) {
            self.segments.push(Segment::Turn(Turn::visitor(text)));
            self.segments.push(Segment::Turn(Turn::assistant(reply)));
            self.sync_recorder();
            self.rebuild_display();
            self.scroll_to_bottom();
            return false;
        }

        self.segments.push(Segment::Turn(Turn::visitor(text)));
        let turns = conversation_turns(&self.segments);
        let messages = request_messages(folio_content::system_prompt(), &turns);
        self.sync_recorder();
        self.rebuild_display();
        self.scroll_to_bottom();
        self.send_to_assistant(messages).await;
        false
    }

    pub(crate) async fn send_to_assistant(&mut self, messages: Vec<Message>) {
        if let Some(tx) = &self.assistant_tx {
            debug!(n = messages.len(), "sending completion request");
            self.inflight_request = Some(messages.clone());
            let _ = tx
                .send(folio_core::AssistantRequest::Submit { messages })
                .await;
            self.busy = true;
        }
    }

    /// Signal the currently running turn to abort.
    ///
    /// Dropping the sender half of the oneshot channel resolves the receiver
    /// inside the assistant task, triggering the abort branch there.
    pub(crate) async fn send_cancel(&self) {
        let sender = self.cancel_handle.lock().await.take();
        drop(sender);
    }

    // ── Topic seeding and reset ───────────────────────────────────────────────

    /// Open a canned landing topic.  A topic distinct from the last one
    /// clears the buffer, zeroes the recorded-turns counter, requests a
    /// fresh session handle, and abandons any in-flight stream; reopening
    /// the same topic is a no-op.
    pub(crate) async fn open_topic(&mut self, name: &str) {
        if self.current_topic.as_deref() == Some(name) && !self.segments.is_empty() {
            return;
        }
        debug!(topic = name, "retopic: resetting conversation");
        self.send_cancel().await;
        self.reset_state();
        if self.seed_topic(name) {
            self.current_topic = Some(name.to_string());
        }
    }

    /// `/clear`: retopic semantics without a new seed.
    pub(crate) async fn clear_conversation(&mut self) {
        self.send_cancel().await;
        self.reset_state();
    }

    /// Clear all conversation state and start a fresh store session.
    pub(crate) fn reset_state(&mut self) {
        self.segments.clear();
        self.streaming_buffer.clear();
        self.recorded_turns = 0;
        self.busy = false;
        self.inflight_request = None;
        self.current_topic = None;
        self.scroll_offset = 0;
        self.auto_scroll = true;
        self.recorder.begin_session();
        self.rebuild_display();
    }

    /// Seed the buffer with a topic's visitor+assistant pair.  Returns
    /// `false` for an unknown topic.
    pub(crate) fn seed_topic(&mut self, name: &str) -> bool {
        let (visitor, reply) = match self.catalog.topic(name) {
            Some(t) => (t.visitor, t.reply),
            None => return false,
        };
        self.segments.push(Segment::Turn(Turn::visitor(visitor)));
        self.segments.push(Segment::Turn(Turn::assistant(reply)));
        self.sync_recorder();
        self.rebuild_display();
        self.scroll_to_bottom();
        true
    }

    // ── Recorder sync ─────────────────────────────────────────────────────────

    /// Mirror turns the store has not seen yet.  The delta is by count, not
    /// identity: the recorder replays everything past `recorded_turns` in
    /// order and advances the counter.
    pub(crate) fn sync_recorder(&mut self) {
        let turns = conversation_turns(&self.segments);
        for turn in turns.iter().skip(self.recorded_turns) {
            let role = match turn.role {
                folio_core::TurnRole::Visitor => RecordedRole::Visitor,
                folio_core::TurnRole::Assistant => RecordedRole::Assistant,
            };
            self.recorder.record(role, turn.text.clone());
        }
        self.recorded_turns = turns.len();
    }
}

// ── Integration tests ─────────────────────────────────────────────────────────
//
// These exercise the full "user input → AssistantRequest channel" path
// through the real App machinery with a mock assistant receiver.  Every
// regression in the suggestion/submit interplay shows up at exactly this
// boundary; these tests are the safety net.

#[cfg(test)]
mod submit_integration_tests {
    use folio_core::{AssistantEvent, AssistantRequest};
    use folio_model::Role;

    use crate::app::{App, AppOptions};
    use crate::keys::Action;

    fn request_messages_of(req: &AssistantRequest) -> &[folio_model::Message] {
        let AssistantRequest::Submit { messages } = req;
        messages
    }

    // ── Plain submission ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn plain_message_reaches_assistant_with_persona() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("What drives Amy?");
        app.dispatch(Action::Submit).await;

        let req = rx.try_recv().expect("expected a request");
        let messages = request_messages_of(&req);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Zaoshi (Amy) Yuan"));
        assert_eq!(messages.last().unwrap().role, Role::User);
        assert_eq!(messages.last().unwrap().content, "What drives Amy?");
    }

    #[tokio::test]
    async fn submit_appends_exactly_one_visitor_turn() {
        let (mut app, _rx) = App::for_testing();
        app.inject_input("What drives Amy?");
        app.dispatch(Action::Submit).await;

        assert_eq!(app.turn_texts(), vec!["What drives Amy?"]);
        assert!(crate::chat::first_assistant_index(&app.segments).is_none());
    }

    #[tokio::test]
    async fn whitespace_input_is_a_noop() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("   ");
        app.dispatch(Action::Submit).await;

        assert!(rx.try_recv().is_err(), "no request may be issued");
        assert!(app.turn_texts().is_empty(), "buffer must be unchanged");
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn busy_submit_is_a_noop_and_keeps_input() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("first");
        app.dispatch(Action::Submit).await;
        let _ = rx.try_recv().expect("first request");
        assert!(app.busy);

        app.inject_input("second");
        app.dispatch(Action::Submit).await;
        assert!(rx.try_recv().is_err(), "no double submit while in flight");
        assert_eq!(app.input_buffer, "second", "typed text must not be lost");
        assert_eq!(app.turn_texts().len(), 1);
    }

    // ── Canned replies ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn canned_text_short_circuits_the_network() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("Tell me about PROVEN");
        app.dispatch(Action::Submit).await;

        assert!(rx.try_recv().is_err(), "canned replies must not call the model");
        let texts = app.turn_texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], "Tell me about PROVEN");
        assert!(texts[1].contains("PROVEN"));
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn expansion_command_resolves_to_canned_reply() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("/proven");
        app.dispatch(Action::Submit).await;

        assert!(rx.try_recv().is_err());
        let texts = app.turn_texts();
        assert_eq!(texts[0], "Tell me about PROVEN");
        assert_eq!(texts.len(), 2);
    }

    #[tokio::test]
    async fn non_canned_expansion_goes_to_the_model() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("/technical");
        app.dispatch(Action::Submit).await;

        let req = rx.try_recv().expect("technical expansion has no canned reply");
        let messages = request_messages_of(&req);
        assert_eq!(
            messages.last().unwrap().content,
            "What's your technical background?"
        );
    }

    // ── Slash commands ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn quit_command_returns_true() {
        let (mut app, _rx) = App::for_testing();
        app.inject_input("/quit");
        let quit = app.dispatch(Action::Submit).await;
        assert!(quit, "/quit must terminate the event loop");
    }

    #[tokio::test]
    async fn unknown_command_sends_nothing() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("/doesnotexist foo");
        let quit = app.dispatch(Action::Submit).await;
        assert!(!quit);
        assert!(rx.try_recv().is_err(), "unknown command must not send");
        assert!(app.turn_texts().is_empty());
    }

    #[tokio::test]
    async fn clear_command_resets_the_buffer() {
        let (mut app, _rx) = App::for_testing();
        app.inject_input("Tell me about PROVEN");
        app.dispatch(Action::Submit).await;
        assert_eq!(app.turn_texts().len(), 2);
        assert_eq!(app.recorded_turns, 2);

        app.inject_input("/clear");
        app.dispatch(Action::Submit).await;
        assert!(app.turn_texts().is_empty());
        assert_eq!(app.recorded_turns, 0);
    }

    // ── Topic seeding / retopic ───────────────────────────────────────────────

    #[tokio::test]
    async fn topic_option_seeds_visitor_assistant_pair() {
        let (app, _rx) = App::for_testing_with_opts(AppOptions {
            topic: Some("about".into()),
            initial_prompt: None,
        });
        let texts = app.turn_texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], "Tell me about yourself");
        assert!(texts[1].contains("computational physics"));
    }

    #[tokio::test]
    async fn reopening_with_a_different_topic_resets_to_seeded_count() {
        let (mut app, mut rx) = App::for_testing_with_opts(AppOptions {
            topic: Some("about".into()),
            initial_prompt: None,
        });
        // Grow the conversation past the seed.
        app.inject_input("What else?");
        app.dispatch(Action::Submit).await;
        let _ = rx.try_recv().expect("live request");
        app.handle_assistant_event(AssistantEvent::TextComplete("more detail".into()));
        app.handle_assistant_event(AssistantEvent::TurnComplete);
        assert_eq!(app.turn_texts().len(), 4);

        app.inject_input("/projects");
        app.dispatch(Action::Submit).await;

        let texts = app.turn_texts();
        assert_eq!(texts.len(), 2, "buffer must reset to the seeded count");
        assert_eq!(texts[0], "What projects are you working on?");
        assert_eq!(app.recorded_turns, 2, "recorded counter must restart");
        assert_eq!(app.current_topic.as_deref(), Some("projects"));
    }

    #[tokio::test]
    async fn reopening_the_same_topic_does_not_duplicate_the_seed() {
        let (mut app, _rx) = App::for_testing_with_opts(AppOptions {
            topic: Some("about".into()),
            initial_prompt: None,
        });
        app.inject_input("/about");
        app.dispatch(Action::Submit).await;
        assert_eq!(app.turn_texts().len(), 2);
    }

    // ── Streaming and errors ──────────────────────────────────────────────────

    #[tokio::test]
    async fn deltas_accumulate_and_commit_on_completion() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("hello");
        app.dispatch(Action::Submit).await;
        let _ = rx.try_recv().expect("request sent");

        app.handle_assistant_event(AssistantEvent::TextDelta("Hi ".into()));
        app.handle_assistant_event(AssistantEvent::TextDelta("there".into()));
        assert_eq!(app.streaming_buffer, "Hi there");
        assert_eq!(app.turn_texts().len(), 1, "not yet committed");

        app.handle_assistant_event(AssistantEvent::TextComplete("Hi there".into()));
        app.handle_assistant_event(AssistantEvent::TurnComplete);
        assert_eq!(app.turn_texts(), vec!["hello", "Hi there"]);
        assert!(app.streaming_buffer.is_empty());
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn stale_delta_after_reset_is_dropped() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("hello");
        app.dispatch(Action::Submit).await;
        let _ = rx.try_recv().expect("request sent");
        app.handle_assistant_event(AssistantEvent::TextDelta("partial".into()));

        app.clear_conversation().await;
        // A delta that was already queued when the reset happened.
        app.handle_assistant_event(AssistantEvent::TextDelta("stale".into()));
        assert!(
            app.streaming_buffer.is_empty(),
            "stale tokens must never land in a since-reset buffer"
        );
    }

    #[tokio::test]
    async fn error_keeps_partial_text_and_sets_error_state() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("hello");
        app.dispatch(Action::Submit).await;
        let _ = rx.try_recv().expect("request sent");

        app.handle_assistant_event(AssistantEvent::TextDelta("par".into()));
        app.handle_assistant_event(AssistantEvent::Error("rate limited".into()));

        assert_eq!(app.streaming_buffer, "par", "streamed prefix must remain");
        assert!(app.has_error_segment());
        assert!(!app.busy);
        assert!(app.inflight_request.is_some(), "failed request kept for retry");
    }

    #[tokio::test]
    async fn retry_reissues_the_identical_request() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("hello");
        app.dispatch(Action::Submit).await;
        let first = rx.try_recv().expect("first request");

        app.handle_assistant_event(AssistantEvent::Error("boom".into()));
        app.dispatch(Action::Retry).await;

        let second = rx.try_recv().expect("retry must resend");
        assert_eq!(
            request_messages_of(&first),
            request_messages_of(&second),
            "retry must re-issue the identical request"
        );
        assert!(!app.has_error_segment(), "error bubble cleared on retry");
        assert!(app.busy);
    }

    #[tokio::test]
    async fn retry_without_a_failed_request_is_a_noop() {
        let (mut app, mut rx) = App::for_testing();
        app.dispatch(Action::Retry).await;
        assert!(rx.try_recv().is_err());
        assert!(!app.busy);
    }

    // ── Suggestion interplay ──────────────────────────────────────────────────

    #[tokio::test]
    async fn enter_on_highlighted_suggestion_submits_expansion() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("/tech");
        assert!(app.suggest.is_showing());
        app.dispatch(Action::SuggestNext).await;
        app.dispatch(Action::Submit).await;

        let req = rx.try_recv().expect("expansion query must be submitted");
        let content = &request_messages_of(&req).last().unwrap().content;
        assert_eq!(content, "What's your technical background?");
        assert!(app.input_buffer.is_empty());
        assert!(!app.suggest.is_showing());
        // The expansion query, not the literal "/tech", went to history.
        assert_eq!(
            app.history.prev("").as_deref(),
            Some("What's your technical background?")
        );
    }

    #[tokio::test]
    async fn tab_accept_matches_direct_application() {
        let (mut app, _rx) = App::for_testing();
        app.inject_input("/prov");
        app.dispatch(Action::SuggestAccept).await;
        let after_tab = app.input_buffer.clone();
        assert_eq!(after_tab, "/proven");
        assert!(!app.suggest.is_showing(), "Tab must close the list");

        // Applying the same suggestion again yields the same text —
        // accepting is idempotent with clicking the item.
        app.inject_input("/prov");
        let item = app.suggest.accept_item().unwrap().insert.clone();
        app.apply_suggestion_text(&item);
        assert_eq!(app.input_buffer, after_tab);
    }

    #[tokio::test]
    async fn plain_enter_without_highlight_submits_literal_input() {
        let (mut app, mut rx) = App::for_testing();
        app.inject_input("Tell me");
        assert!(app.suggest.is_showing());
        // No arrow navigation: nothing is highlighted.
        app.dispatch(Action::Submit).await;

        let req = rx.try_recv().expect("literal text must be submitted");
        assert_eq!(request_messages_of(&req).last().unwrap().content, "Tell me");
    }

    // ── History interplay ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn history_walk_is_bounded_and_restores_draft() {
        let (mut app, mut rx) = App::for_testing();
        for text in ["first question", "second question"] {
            app.inject_input(text);
            app.dispatch(Action::Submit).await;
            let _ = rx.try_recv();
            app.handle_assistant_event(AssistantEvent::TextComplete("ok".into()));
            app.handle_assistant_event(AssistantEvent::TurnComplete);
        }

        app.inject_input("");
        app.dispatch(Action::HistoryPrev).await;
        assert_eq!(app.input_buffer, "second question");
        app.dispatch(Action::HistoryPrev).await;
        assert_eq!(app.input_buffer, "first question");
        // Past the oldest entry: holds, does not wrap or panic.
        app.dispatch(Action::HistoryPrev).await;
        app.dispatch(Action::HistoryPrev).await;
        assert_eq!(app.input_buffer, "first question");

        app.dispatch(Action::HistoryNext).await;
        assert_eq!(app.input_buffer, "second question");
        app.dispatch(Action::HistoryNext).await;
        assert_eq!(app.input_buffer, "", "walking forward restores the draft");
    }

    // ── Input clearing ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn ctrl_c_clears_input_and_closes_suggestions() {
        let (mut app, _rx) = App::for_testing();
        app.inject_input("/pro");
        assert!(app.suggest.is_showing());
        app.dispatch(Action::InputClearAndDismiss).await;
        assert!(app.input_buffer.is_empty());
        assert!(!app.suggest.is_showing());
    }
}
