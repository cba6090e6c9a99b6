use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// All logical actions the TUI can perform, independent of key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Input editing
    InputChar(char),
    InputBackspace,
    InputDelete,
    InputMoveLeft,
    InputMoveRight,
    InputMoveStart,
    InputMoveEnd,
    /// Clear the input text (Ctrl+L / Ctrl+U).
    InputClear,
    /// Clear the input text AND close the suggestion list (Ctrl+C).
    InputClearAndDismiss,
    Submit,

    // Suggestion overlay
    SuggestNext,
    SuggestPrev,
    /// Tab: replace input with the highlighted (or first) suggestion.
    SuggestAccept,
    /// Esc: close the list, clear the highlight.
    SuggestDismiss,

    // Command history (only while no suggestions are open)
    HistoryPrev,
    HistoryNext,

    // Chat pane
    ScrollUp,
    ScrollDown,

    // App
    Retry,
    Help,
    Quit,
}

/// Map a raw key event to an [`Action`].
///
/// `suggesting` — true when the suggestion overlay is open; arrows and
/// Tab/Esc are routed to it in that state, otherwise Up/Down walk history.
pub fn map_key(event: KeyEvent, suggesting: bool) -> Option<Action> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);
    // "plain" = no modifier that would make a char a control sequence
    let plain = !ctrl && !alt;

    match event.code {
        // ── Control chords ────────────────────────────────────────────────────
        KeyCode::Char('c') if ctrl => Some(Action::InputClearAndDismiss),
        KeyCode::Char('l') if ctrl => Some(Action::InputClear),
        KeyCode::Char('u') if ctrl => Some(Action::InputClear),
        KeyCode::Char('r') if ctrl => Some(Action::Retry),
        KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::Char('d') if ctrl => Some(Action::Quit),

        // ── Overlay keys ──────────────────────────────────────────────────────
        KeyCode::Tab if suggesting && !shift => Some(Action::SuggestAccept),
        KeyCode::BackTab if suggesting => Some(Action::SuggestPrev),
        KeyCode::Esc if suggesting => Some(Action::SuggestDismiss),
        KeyCode::Down if suggesting && plain => Some(Action::SuggestNext),
        KeyCode::Up if suggesting && plain => Some(Action::SuggestPrev),

        // ── History (overlay closed) ──────────────────────────────────────────
        KeyCode::Up if plain => Some(Action::HistoryPrev),
        KeyCode::Down if plain => Some(Action::HistoryNext),

        // ── Submission and editing ────────────────────────────────────────────
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Delete => Some(Action::InputDelete),
        KeyCode::Left if plain => Some(Action::InputMoveLeft),
        KeyCode::Right if plain => Some(Action::InputMoveRight),
        KeyCode::Home => Some(Action::InputMoveStart),
        KeyCode::End => Some(Action::InputMoveEnd),

        // ── Chat pane ─────────────────────────────────────────────────────────
        KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::ScrollDown),

        KeyCode::F(1) => Some(Action::Help),

        // Printable characters — only when no ctrl/alt modifier
        KeyCode::Char(c) if plain => Some(Action::InputChar(c)),

        _ => None,
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
