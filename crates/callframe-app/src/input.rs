//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples call controls from terminal libraries (crossterm, termion,
/// etc.) so the session can be driven from tests without a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character (call control shortcuts).
    Char(char),
    /// Escape key (close settings, then hang up).
    Esc,
}
