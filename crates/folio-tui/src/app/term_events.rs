// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Terminal event handler: keyboard, mouse, and resize dispatch.

use crossterm::event::{Event, KeyEventKind, MouseEventKind};

use crate::{app::App, keys::map_key};

impl App {
    /// Handle one crossterm event.  Returns `true` when the app should exit.
    pub(crate) async fn handle_term_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(k) if k.kind == KeyEventKind::Press => {
                // Any key dismisses the help modal first.
                if self.show_help {
                    self.show_help = false;
                    return false;
                }
                let suggesting = self.suggest.is_showing();
                if let Some(action) = map_key(k, suggesting) {
                    return self.dispatch(action).await;
                }
                false
            }

            Event::Mouse(mouse) => {
                match mouse.kind {
                    MouseEventKind::ScrollUp => self.scroll_up(3),
                    MouseEventKind::ScrollDown => self.scroll_down(3),
                    _ => {}
                }
                false
            }

            // The run loop re-measures the layout every frame; a resize only
            // needs to trigger the next draw.
            Event::Resize(..) => false,

            _ => false,
        }
    }
}
