//! Signaling abstraction.
//!
//! The peer connection and its signaling protocol live outside this crate.
//! The [`Signaling`] trait is the seam: an implementation delivers streams,
//! status, and peer identity as [`SignalEvent`]s and accepts a hang-up
//! request. Nothing here assumes a particular protocol.

use std::{future::Future, sync::Arc};

use callframe_media::MediaStream;

use crate::{AppEvent, ConnectionStatus};

/// Notification from the signaling layer.
#[derive(Debug, Clone)]
pub enum SignalEvent {
    /// Peer link status changed.
    Status(ConnectionStatus),
    /// Local capture stream acquired or released.
    LocalStream(Option<Arc<MediaStream>>),
    /// Remote stream arrived or went away.
    RemoteStream(Option<Arc<MediaStream>>),
    /// Peer display name resolved.
    PeerName(String),
    /// Call ended by the remote side or the network.
    Ended {
        /// Human readable reason.
        reason: String,
    },
}

impl From<SignalEvent> for AppEvent {
    fn from(event: SignalEvent) -> Self {
        match event {
            SignalEvent::Status(status) => AppEvent::StatusChanged(status),
            SignalEvent::LocalStream(stream) => AppEvent::LocalStreamChanged(stream),
            SignalEvent::RemoteStream(stream) => AppEvent::RemoteStreamChanged(stream),
            SignalEvent::PeerName(name) => AppEvent::PeerNameResolved(name),
            SignalEvent::Ended { reason } => AppEvent::CallEnded { reason },
        }
    }
}

/// Injected peer-connection layer.
///
/// # Implementations
///
/// - **TUI**: loopback signaling fed by an in-process simulated peer
/// - **Tests**: scripted event queues
pub trait Signaling: Send {
    /// Implementation-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next signaling event.
    ///
    /// Returns `None` once the signaling layer has closed for good.
    ///
    /// # Cancel safety
    ///
    /// Must be cancel safe. [`crate::Runtime`] races this future against
    /// driver input and drops it when input wins; an event must not be
    /// consumed unless the future completes with it.
    fn next_event(&mut self) -> impl Future<Output = Option<SignalEvent>> + Send;

    /// Leave the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the leave request could not be delivered.
    fn hang_up(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
