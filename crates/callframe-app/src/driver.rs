//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the call runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{AppEvent, CallSession};

/// Abstracts user-facing I/O for the call runtime.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, ratatui for rendering
/// - **Tests**: Scripted input, records renders
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an event or `None` if nothing arrived before the driver's tick
    /// interval elapsed.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the session.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, session: &CallSession) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
