// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Top-level TUI application state and event loop.

pub(crate) mod assistant_events;
pub(crate) mod dispatch;
pub(crate) mod render;
pub(crate) mod term_events;

use std::sync::Arc;

use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::text::Line;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use folio_config::Config;
use folio_content::ContentCatalog;
use folio_core::{assistant_task, AssistantRequest, CancelHandle};
use folio_model::Message;
use folio_store::Recorder;

use crate::{
    chat::Segment,
    commands::CommandRegistry,
    history::InputHistory,
    layout::AppLayout,
    overlay::SuggestState,
    suggest::SuggestionMatcher,
    widgets::{
        draw_chat, draw_help, draw_hints, draw_input, draw_status, draw_suggestion_overlay,
    },
};

/// Options passed when constructing the TUI app.
#[derive(Debug, Default)]
pub struct AppOptions {
    /// Seed the conversation from this canned landing topic (no model call).
    pub topic: Option<String>,
    /// Submit this visitor message as soon as the app starts.
    pub initial_prompt: Option<String>,
}

/// The top-level TUI application state.
pub struct App {
    pub(crate) config: Arc<Config>,
    pub(crate) catalog: Arc<ContentCatalog>,
    pub(crate) registry: Arc<CommandRegistry>,
    pub(crate) matcher: SuggestionMatcher,
    pub(crate) recorder: Recorder,

    /// Committed turns and error bubbles, in display order.
    pub(crate) segments: Vec<Segment>,
    /// Accumulated assistant text during streaming.  Committed to
    /// `segments` only when the stream completes.
    pub(crate) streaming_buffer: String,
    pub(crate) chat_lines: Vec<Line<'static>>,
    pub(crate) scroll_offset: u16,
    pub(crate) auto_scroll: bool,
    pub(crate) chat_height: u16,
    pub(crate) last_chat_width: u16,

    pub(crate) input_buffer: String,
    /// Byte offset of the cursor within `input_buffer`.
    pub(crate) input_cursor: usize,
    pub(crate) suggest: SuggestState,
    pub(crate) history: InputHistory,
    pub(crate) show_help: bool,

    /// True while a completion request is in flight.
    pub(crate) busy: bool,
    /// The messages of the last issued request, kept so a failed turn can be
    /// re-issued identically on user-triggered retry.
    pub(crate) inflight_request: Option<Vec<Message>>,
    /// Number of turns already mirrored to the store.
    pub(crate) recorded_turns: usize,
    /// The topic the buffer was last seeded from, for retopic comparison.
    pub(crate) current_topic: Option<String>,

    pub(crate) assistant_tx: Option<mpsc::Sender<AssistantRequest>>,
    pub(crate) cancel_handle: CancelHandle,

    pending_initial_prompt: Option<String>,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<ContentCatalog>,
        recorder: Recorder,
        opts: AppOptions,
    ) -> Self {
        let registry = Arc::new(CommandRegistry::with_builtins(&catalog));
        let matcher = SuggestionMatcher::new(catalog.clone(), registry.clone());

        let mut app = Self {
            config,
            catalog,
            registry,
            matcher,
            recorder,
            segments: Vec::new(),
            streaming_buffer: String::new(),
            chat_lines: Vec::new(),
            scroll_offset: 0,
            auto_scroll: true,
            chat_height: 24,
            last_chat_width: 78,
            input_buffer: String::new(),
            input_cursor: 0,
            suggest: SuggestState::Idle,
            history: InputHistory::new(),
            show_help: false,
            busy: false,
            inflight_request: None,
            recorded_turns: 0,
            current_topic: None,
            assistant_tx: None,
            cancel_handle: Arc::new(tokio::sync::Mutex::new(None)),
            pending_initial_prompt: opts.initial_prompt,
        };

        // One session handle per opened panel; replaced on every retopic.
        app.recorder.begin_session();

        if let Some(topic) = opts.topic {
            if app.seed_topic(&topic) {
                app.current_topic = Some(topic);
            }
        }
        app.rebuild_display();
        app
    }

    /// Run the TUI event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        let (submit_tx, submit_rx) = mpsc::channel::<AssistantRequest>(16);
        let (event_tx, mut event_rx) = mpsc::channel(256);

        self.assistant_tx = Some(submit_tx);

        let provider: Arc<dyn folio_model::ModelProvider> =
            Arc::from(folio_model::from_config(&self.config.model)?);
        tokio::spawn(assistant_task(
            provider,
            submit_rx,
            event_tx,
            self.cancel_handle.clone(),
        ));

        if let Some(prompt) = self.pending_initial_prompt.take() {
            self.history.push(&prompt);
            self.submit_user_input(&prompt).await;
        }

        let mut term_events = EventStream::new();

        loop {
            if let Ok(size) = terminal.size() {
                let layout =
                    AppLayout::compute(ratatui::layout::Rect::new(0, 0, size.width, size.height));
                self.chat_height = layout.chat_inner_height().max(1);
                let width = layout.chat_pane.width.saturating_sub(2).max(20);
                if width != self.last_chat_width {
                    self.last_chat_width = width;
                    self.rebuild_display();
                    self.scroll_to_bottom();
                }
            }

            let ascii = self.ascii();
            terminal.draw(|frame| {
                let layout = AppLayout::new(frame);
                draw_status(
                    frame,
                    layout.status_bar,
                    &self.model_label(),
                    self.busy,
                    self.recorder.is_enabled(),
                    ascii,
                );
                draw_chat(frame, layout.chat_pane, &self.chat_lines, self.scroll_offset, ascii);
                draw_input(
                    frame,
                    layout.input_pane,
                    &self.input_buffer,
                    self.input_cursor,
                    self.busy,
                    ascii,
                );
                draw_hints(frame, layout.hint_bar);
                if self.suggest.is_showing() {
                    draw_suggestion_overlay(frame, layout.input_pane, &self.suggest, ascii);
                }
                if self.show_help {
                    draw_help(frame, &self.registry.help_entries(), ascii);
                }
            })?;

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    self.handle_assistant_event(event);
                }
                Some(Ok(term_event)) = term_events.next() => {
                    if self.handle_term_event(term_event).await {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    pub(crate) fn model_label(&self) -> String {
        format!("{}/{}", self.config.model.provider, self.config.model.name)
    }

    pub(crate) fn ascii(&self) -> bool {
        if std::env::var("FOLIO_ASCII_BORDERS").as_deref() == Ok("1") {
            return true;
        }
        self.config.tui.ascii_borders
    }
}

// ── Test helpers ──────────────────────────────────────────────────────────────

#[cfg(test)]
impl App {
    /// Construct a minimal `App` suitable for integration tests.
    ///
    /// The returned receiver is the mock "assistant" channel; call
    /// `rx.try_recv()` to assert on requests dispatched by submit actions.
    pub(crate) fn for_testing() -> (Self, mpsc::Receiver<AssistantRequest>) {
        Self::for_testing_with_opts(AppOptions::default())
    }

    pub(crate) fn for_testing_with_opts(
        opts: AppOptions,
    ) -> (Self, mpsc::Receiver<AssistantRequest>) {
        let config = Arc::new(Config::default());
        let catalog = Arc::new(ContentCatalog::builtin());
        let (tx, rx) = mpsc::channel(64);
        let mut app = Self::new(config, catalog, Recorder::disabled(), opts);
        app.assistant_tx = Some(tx);
        (app, rx)
    }

    /// Set the input buffer as if the user typed `text`.
    pub(crate) fn inject_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.input_cursor = text.len();
        self.refresh_suggestions();
    }

    /// Texts of the committed turns, in order.
    pub(crate) fn turn_texts(&self) -> Vec<String> {
        crate::chat::conversation_turns(&self.segments)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    pub(crate) fn has_error_segment(&self) -> bool {
        self.segments.iter().any(Segment::is_error)
    }
}
