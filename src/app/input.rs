//! Keyboard input mapping
//!
//! Translates crossterm key events into the small set of actions the
//! quiz screens understand.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Confirm selection (Enter, Space)
    Select,
    /// Pick an answer directly (1-9), zero-based
    Choose(usize),
    /// Go back to the start screen (Esc, Backspace)
    Back,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

impl InputAction {
    /// Convert keyboard event to an action
    pub fn from_key(key: KeyEvent) -> Self {
        // Windows reports releases too
        if key.kind == KeyEventKind::Release {
            return InputAction::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }

            KeyCode::Up | KeyCode::Char('k') => InputAction::Up,
            KeyCode::Down | KeyCode::Char('j') => InputAction::Down,

            KeyCode::Enter | KeyCode::Char(' ') => InputAction::Select,

            KeyCode::Char(c @ '1'..='9') => InputAction::Choose(c as usize - '1' as usize),

            KeyCode::Esc | KeyCode::Backspace => InputAction::Back,

            _ => InputAction::None,
        }
    }
}
