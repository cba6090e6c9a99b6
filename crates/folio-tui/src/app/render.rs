// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Chat display rendering and scroll management.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::{app::App, chat::Segment, widgets::wrap_text};

impl App {
    /// Rebuild `chat_lines` from the committed segments plus the streaming
    /// accumulator.  Runs on every fragment so streaming feels live.
    pub(crate) fn rebuild_display(&mut self) {
        let width = self.last_chat_width.max(20) as usize - 2;
        let mut lines: Vec<Line<'static>> = Vec::new();

        if self.segments.is_empty() && self.streaming_buffer.is_empty() && !self.busy {
            self.chat_lines = self.empty_state_lines(width);
            return;
        }

        for seg in &self.segments {
            match seg {
                Segment::Turn(t) => {
                    lines.push(turn_header(t.role));
                    for body in wrap_text(&t.text, width) {
                        lines.push(body_line(body));
                    }
                }
                Segment::Error(message) => {
                    lines.push(Line::from(Span::styled(
                        format!("✗ {message}"),
                        Style::default().fg(Color::Red),
                    )));
                    lines.push(Line::from(Span::styled(
                        "  press Ctrl+R to retry",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            lines.push(Line::from(""));
        }

        if !self.streaming_buffer.is_empty() {
            lines.push(turn_header(folio_core::TurnRole::Assistant));
            let mut body = wrap_text(&self.streaming_buffer, width);
            if let Some(last) = body.last_mut() {
                last.push('▍');
            }
            for b in body {
                lines.push(body_line(b));
            }
        } else if self.busy {
            lines.push(turn_header(folio_core::TurnRole::Assistant));
            lines.push(Line::from(Span::styled(
                "  …",
                Style::default().fg(Color::DarkGray),
            )));
        }

        self.chat_lines = lines;
    }

    /// Greeting plus suggestion chips, shown before the first turn.
    fn empty_state_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = vec![Line::from("")];
        for l in wrap_text(self.catalog.greeting(), width) {
            lines.push(Line::from(Span::styled(
                format!("  {l}"),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));
        for item in self.matcher.suggest("").items {
            lines.push(Line::from(vec![
                Span::styled("  ▸ ", Style::default().fg(Color::LightCyan)),
                Span::styled(item.query, Style::default().fg(Color::Gray)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Type / for commands.",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }

    // ── Scroll helpers ────────────────────────────────────────────────────────

    pub(crate) fn scroll_up(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
        self.auto_scroll = false;
    }

    pub(crate) fn scroll_down(&mut self, n: u16) {
        let max = (self.chat_lines.len() as u16).saturating_sub(self.chat_height);
        self.scroll_offset = (self.scroll_offset + n).min(max);
        if self.scroll_offset >= max {
            self.auto_scroll = true;
        }
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        if self.auto_scroll {
            self.scroll_offset =
                (self.chat_lines.len() as u16).saturating_sub(self.chat_height);
        }
    }
}

fn turn_header(role: folio_core::TurnRole) -> Line<'static> {
    match role {
        folio_core::TurnRole::Visitor => Line::from(Span::styled(
            "You",
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        )),
        folio_core::TurnRole::Assistant => Line::from(Span::styled(
            "Amy",
            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
        )),
    }
}

fn body_line(text: String) -> Line<'static> {
    Line::from(Span::raw(format!("  {text}")))
}
