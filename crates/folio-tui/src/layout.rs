use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// The regions that make up the TUI layout.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub chat_pane: Rect,
    pub input_pane: Rect,
    pub hint_bar: Rect,
}

impl AppLayout {
    /// Calculate layout regions from a `Rect` (terminal area).
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        AppLayout {
            status_bar: vertical[0],
            chat_pane: vertical[1],
            input_pane: vertical[2],
            hint_bar: vertical[3],
        }
    }

    /// Convenience wrapper — derive the area from the current frame.
    pub fn new(frame: &Frame) -> Self {
        Self::compute(frame.area())
    }

    /// The number of text rows visible inside the chat pane's border.
    pub fn chat_inner_height(&self) -> u16 {
        self.chat_pane.height.saturating_sub(2)
    }
}
