//! Terminal driver for the call screen.
//!
//! Reads keys and resizes from crossterm, draws the call with ratatui, and
//! emits a tick whenever the terminal is idle so the connection indicator
//! keeps pulsing.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use callframe_app::{AppEvent, CallSession, Driver, KeyInput};
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal event stream ended.
    #[error("terminal event stream closed")]
    EventStreamClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns raw mode and the alternate screen for its whole lifetime; both are
/// restored on drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    tick_interval: Duration,
}

impl TerminalDriver {
    /// Create a new terminal driver that emits a tick every `tick_interval`
    /// without input.
    pub fn new(tick_interval: Duration) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, tick_interval })
    }

    /// Map a key press to session input.
    ///
    /// Ctrl+C leaves the call like `q`, since raw mode swallows SIGINT.
    fn map_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(KeyInput::Char('q'));
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Esc => Some(KeyInput::Esc),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        tokio::select! {
            biased;

            terminal_event = self.event_stream.next() => {
                match terminal_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Ok(Self::map_key(key).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(..))) => Ok(Some(AppEvent::Resize)),
                    Some(Ok(_)) => Ok(None),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    None => Err(TerminalError::EventStreamClosed),
                }
            }

            () = tokio::time::sleep(self.tick_interval) => {
                Ok(Some(AppEvent::Tick))
            }
        }
    }

    fn render(&mut self, session: &CallSession) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, session);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
