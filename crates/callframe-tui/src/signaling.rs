//! Loopback signaling.
//!
//! [`LoopbackSignaling`] implements [`Signaling`] on top of a realtime
//! [`Subscription`] fed by the simulated peer. Dropping it releases the
//! subscription.

use callframe_app::{SignalEvent, Signaling, Subscription};
use thiserror::Error;

use crate::peer::PeerHandle;

/// Loopback signaling errors.
#[derive(Debug, Error)]
pub enum SignalingError {
    /// Peer task already exited, nobody to notify.
    #[error("peer is no longer running")]
    PeerGone,
}

/// Signaling over an in-process realtime topic.
#[derive(Debug)]
pub struct LoopbackSignaling {
    subscription: Subscription<SignalEvent>,
    peer: PeerHandle,
}

impl LoopbackSignaling {
    /// Create signaling from a live subscription and the peer publishing on
    /// it.
    pub fn new(subscription: Subscription<SignalEvent>, peer: PeerHandle) -> Self {
        Self { subscription, peer }
    }

    /// Topic the session listens on.
    pub fn topic(&self) -> &str {
        self.subscription.topic()
    }
}

impl Signaling for LoopbackSignaling {
    type Error = SignalingError;

    async fn next_event(&mut self) -> Option<SignalEvent> {
        self.subscription.recv().await
    }

    async fn hang_up(&mut self) -> Result<(), Self::Error> {
        if self.peer.is_finished() {
            return Err(SignalingError::PeerGone);
        }
        tracing::info!(topic = %self.topic(), "hanging up");
        self.peer.stop();
        Ok(())
    }
}

impl Drop for LoopbackSignaling {
    fn drop(&mut self) {
        self.peer.stop();
    }
}
