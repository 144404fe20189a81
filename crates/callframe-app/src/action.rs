//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::CallSession`] state machine for the runtime to
//! execute.

/// Actions produced by the call session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Leave the call through the signaling layer.
    HangUp,
}
