//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::CallSession`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - Stream and status updates translated from the signaling layer.

use std::sync::Arc;

use callframe_media::MediaStream;

use crate::{ConnectionStatus, KeyInput};

/// Events processed by the call session.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick. Drives indicator animation.
    Tick,

    /// Display area resized; redraw.
    Resize,

    /// Peer link status changed.
    StatusChanged(ConnectionStatus),

    /// Local capture stream acquired, replaced, or released.
    LocalStreamChanged(Option<Arc<MediaStream>>),

    /// Remote peer stream arrived or went away.
    RemoteStreamChanged(Option<Arc<MediaStream>>),

    /// Display name of the peer resolved.
    PeerNameResolved(String),

    /// Call is over (local hang-up or remote end).
    CallEnded {
        /// Human readable reason shown to the user.
        reason: String,
    },

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
