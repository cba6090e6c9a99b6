// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    overlay::SuggestState,
    suggest::{SuggestKind, SuggestionItem},
};

// ── Character sets ────────────────────────────────────────────────────────────

fn sep(ascii: bool) -> &'static str {
    if ascii { "|" } else { "│" }
}
fn busy_char(ascii: bool) -> &'static str {
    if ascii { "*" } else { "⠿" }
}
fn marker(ascii: bool) -> &'static str {
    if ascii { "> " } else { "▸ " }
}
fn border_type(ascii: bool) -> BorderType {
    if ascii { BorderType::Plain } else { BorderType::Rounded }
}

// ── Text wrapping ─────────────────────────────────────────────────────────────

/// Greedy word wrap to a display width.  Words wider than the line are
/// hard-broken; blank lines are preserved.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.split('\n') {
        if raw_line.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut line_w = 0usize;

        for word in raw_line.split_whitespace() {
            let word_w = UnicodeWidthStr::width(word);
            if line_w > 0 && line_w + 1 + word_w > width {
                out.push(std::mem::take(&mut line));
                line_w = 0;
            }
            if line_w > 0 {
                line.push(' ');
                line_w += 1;
            }
            if word_w > width {
                push_long_word(&mut out, &mut line, &mut line_w, word, width);
            } else {
                line.push_str(word);
                line_w += word_w;
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    out
}

fn push_long_word(
    out: &mut Vec<String>,
    line: &mut String,
    line_w: &mut usize,
    word: &str,
    width: usize,
) {
    for ch in word.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if *line_w + w > width && *line_w > 0 {
            out.push(std::mem::take(line));
            *line_w = 0;
        }
        line.push(ch);
        *line_w += w;
    }
}

/// Horizontal window of a single-line input: returns the visible slice and
/// the cursor column within it, scrolling left when the cursor would fall
/// past the available width.
pub fn input_window(buffer: &str, cursor: usize, avail: usize) -> (String, usize) {
    let prefix_w = UnicodeWidthStr::width(&buffer[..cursor.min(buffer.len())]);
    if prefix_w < avail.max(1) {
        return (buffer.to_string(), prefix_w);
    }
    let mut start = 0usize;
    let mut w = prefix_w;
    let mut iter = buffer[..cursor].chars();
    while w >= avail {
        match iter.next() {
            Some(ch) => {
                start += ch.len_utf8();
                w -= UnicodeWidthChar::width(ch).unwrap_or(0);
            }
            None => break,
        }
    }
    (buffer[start..].to_string(), w)
}

// ── Draw functions ────────────────────────────────────────────────────────────

/// Draw the status bar at the top.
pub fn draw_status(
    frame: &mut Frame,
    area: Rect,
    model_label: &str,
    busy: bool,
    recording: bool,
    ascii: bool,
) {
    let separator = sep(ascii);
    let busy_span: Span<'static> = if busy {
        Span::styled(
            format!(" {} thinking ", busy_char(ascii)),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::raw("")
    };
    let rec_span: Span<'static> = if recording {
        Span::styled(
            format!(" {separator} ● rec"),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(" Amy ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(separator, Style::default().fg(Color::Gray)),
        Span::styled(format!(" {model_label} "), Style::default().fg(Color::LightCyan)),
        busy_span,
        rec_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Draw the chat scroll pane.
pub fn draw_chat(
    frame: &mut Frame,
    area: Rect,
    lines: &[Line<'static>],
    scroll_offset: u16,
    ascii: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(ascii));
    let para = Paragraph::new(Text::from(lines.to_vec()))
        .block(block)
        .scroll((scroll_offset, 0));
    frame.render_widget(para, area);
}

/// Draw the input box and place the terminal cursor.
pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    buffer: &str,
    cursor: usize,
    busy: bool,
    ascii: bool,
) {
    let border_style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if buffer.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "Ask me anything…",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(placeholder, inner);
        frame.set_cursor_position(ratatui::layout::Position::new(inner.x, inner.y));
        return;
    }

    let (window, cursor_col) = input_window(buffer, cursor, inner.width as usize);
    frame.render_widget(Paragraph::new(Span::raw(window)), inner);
    frame.set_cursor_position(ratatui::layout::Position::new(
        inner.x + cursor_col as u16,
        inner.y,
    ));
}

/// Draw the key-hint line under the input box.
pub fn draw_hints(frame: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Span::styled(
        " Enter:send  Tab:complete  ↑↓:history/suggestions  ^C:clear  ^R:retry  F1:help  ^Q:quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(hints, area);
}

/// Draw the suggestion overlay floating above the input pane.
pub fn draw_suggestion_overlay(
    frame: &mut Frame,
    input_pane: Rect,
    state: &SuggestState,
    ascii: bool,
) {
    let items = state.items();
    if items.is_empty() {
        return;
    }

    let max_height = input_pane.y; // rows available above the input box
    let height = ((items.len() as u16) + 2).min(max_height);
    if height < 3 {
        return;
    }
    let area = Rect::new(
        input_pane.x,
        input_pane.y - height,
        input_pane.width,
        height,
    );

    let title = match state.kind() {
        Some(SuggestKind::Commands) => " Commands ",
        _ => " Suggestions ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .title(title)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let visible = (inner.height as usize).min(items.len());
    let selected = state.selected_index();
    let lines: Vec<Line<'static>> = items[..visible]
        .iter()
        .enumerate()
        .map(|(i, item)| suggestion_line(item, selected == Some(i), ascii))
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn suggestion_line(item: &SuggestionItem, selected: bool, ascii: bool) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if selected {
        spans.push(Span::styled(
            marker(ascii).to_string(),
            Style::default().fg(Color::LightCyan),
        ));
    } else {
        spans.push(Span::raw("  "));
    }
    spans.extend(label_spans(item));
    if let Some(desc) = &item.description {
        spans.push(Span::styled(
            format!("  {desc}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let line = Line::from(spans);
    if selected {
        line.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        line
    }
}

/// Split the label into plain and highlighted spans according to the item's
/// match-highlight char ranges.
fn label_spans(item: &SuggestionItem) -> Vec<Span<'static>> {
    if item.spans.is_empty() {
        return vec![Span::raw(item.label.clone())];
    }
    let chars: Vec<char> = item.label.chars().collect();
    let mut out: Vec<Span<'static>> = Vec::new();
    let mut idx = 0usize;
    let highlight = Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);
    for &(start, end) in &item.spans {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > idx {
            out.push(Span::raw(chars[idx..start].iter().collect::<String>()));
        }
        if end > start {
            out.push(Span::styled(
                chars[start..end].iter().collect::<String>(),
                highlight,
            ));
        }
        idx = end;
    }
    if idx < chars.len() {
        out.push(Span::raw(chars[idx..].iter().collect::<String>()));
    }
    out
}

/// Draw the help modal: key bindings plus the registered commands.
pub fn draw_help(frame: &mut Frame, entries: &[(String, String)], ascii: bool) {
    let area = frame.area();
    let width = area.width.clamp(30, 64);
    let height = (entries.len() as u16 + 10).min(area.height.saturating_sub(2));
    let rect = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Enter     send message / run highlighted suggestion"),
        Line::from("  Tab       accept suggestion"),
        Line::from("  Esc       close suggestions"),
        Line::from("  ↑ / ↓     cycle suggestions, or walk input history"),
        Line::from("  ^C ^L ^U  clear input"),
        Line::from("  ^R        retry after an error"),
        Line::from(""),
        Line::from(Span::styled("Commands", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for (name, desc) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {name:<12}"), Style::default().fg(Color::LightCyan)),
            Span::raw(desc.clone()),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .title(" Help ");
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), rect);
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── wrap_text ─────────────────────────────────────────────────────────────

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        let lines = wrap_text("one\n\ntwo", 20);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_fits_exact_width() {
        let lines = wrap_text("abcd efgh", 4);
        assert_eq!(lines, vec!["abcd", "efgh"]);
    }

    #[test]
    fn wrap_zero_width_does_not_panic() {
        let lines = wrap_text("hi", 0);
        assert!(!lines.is_empty());
    }

    // ── input_window ──────────────────────────────────────────────────────────

    #[test]
    fn input_window_shows_all_when_it_fits() {
        let (win, col) = input_window("hello", 5, 20);
        assert_eq!(win, "hello");
        assert_eq!(col, 5);
    }

    #[test]
    fn input_window_scrolls_left_when_cursor_past_width() {
        let (win, col) = input_window("0123456789", 10, 5);
        assert!(win.starts_with('6'), "window should drop the left edge: {win}");
        assert_eq!(col, 4);
    }

    #[test]
    fn input_window_cursor_mid_string() {
        let (win, col) = input_window("0123456789", 3, 5);
        assert_eq!(win, "0123456789");
        assert_eq!(col, 3);
    }

    // ── label_spans ───────────────────────────────────────────────────────────

    #[test]
    fn label_spans_cover_whole_label() {
        let item = SuggestionItem {
            insert: "/proven".into(),
            query: "q".into(),
            label: "/proven".into(),
            description: None,
            spans: vec![(1, 5)],
            distance: 0,
        };
        let spans = label_spans(&item);
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, "/proven");
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn label_spans_without_ranges_is_single_span() {
        let item = SuggestionItem {
            insert: "x".into(),
            query: "x".into(),
            label: "plain".into(),
            description: None,
            spans: vec![],
            distance: 0,
        };
        assert_eq!(label_spans(&item).len(), 1);
    }
}
