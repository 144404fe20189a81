//! In-process simulated peer.
//!
//! Stands in for the peer connection layer when running the TUI: it
//! publishes the local capture stream, a remote stream, and connection status
//! changes on a realtime topic. No network; everything flows through the
//! [`RealtimeClient`].

use std::{sync::Arc, time::Duration};

use callframe_app::{ConnectionStatus, RealtimeClient, RealtimeError, SignalEvent};
use callframe_media::MediaStream;

/// How long a simulated outage lasts before reconnecting.
const OUTAGE_DURATION: Duration = Duration::from_secs(2);

/// Simulated peer configuration.
#[derive(Debug, Clone)]
pub struct PeerConfig {
    /// Peer display name.
    pub name: String,
    /// Delay between call start and the peer joining.
    pub connect_delay: Duration,
    /// Drop the link this often. `None` keeps it up.
    pub drop_every: Option<Duration>,
    /// Audio tracks on the peer's stream.
    pub audio_tracks: usize,
    /// Video tracks on the peer's stream.
    pub video_tracks: usize,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            name: "peer".into(),
            connect_delay: Duration::from_millis(1500),
            drop_every: None,
            audio_tracks: 1,
            video_tracks: 1,
        }
    }
}

/// Handle to a running simulated peer.
#[derive(Debug)]
pub struct PeerHandle {
    /// Abort handle to stop the peer task.
    abort_handle: tokio::task::AbortHandle,
}

impl PeerHandle {
    /// Stop the peer.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }

    /// Peer task has exited (stopped, or the realtime client closed).
    pub fn is_finished(&self) -> bool {
        self.abort_handle.is_finished()
    }
}

/// Spawn a simulated peer publishing to `topic`.
///
/// `local` is the capture stream handed to the session as if a device had
/// just been acquired. The task runs until stopped or until the realtime
/// client shuts down.
pub fn spawn_peer(
    realtime: RealtimeClient<SignalEvent>,
    topic: String,
    local: Arc<MediaStream>,
    config: PeerConfig,
) -> PeerHandle {
    let handle = tokio::spawn(async move {
        if let Err(e) = run_peer(&realtime, &topic, local, &config).await {
            tracing::debug!(%topic, error = %e, "simulated peer stopped");
        }
    });

    PeerHandle { abort_handle: handle.abort_handle() }
}

async fn run_peer(
    realtime: &RealtimeClient<SignalEvent>,
    topic: &str,
    local: Arc<MediaStream>,
    config: &PeerConfig,
) -> Result<(), RealtimeError> {
    let publish = |event: SignalEvent| realtime.publish(topic, event).map(|_| ());

    publish(SignalEvent::LocalStream(Some(local)))?;
    publish(SignalEvent::PeerName(config.name.clone()))?;
    publish(SignalEvent::Status(ConnectionStatus::Connecting))?;

    tokio::time::sleep(config.connect_delay).await;

    let remote = Arc::new(MediaStream::synthetic(
        format!("{}-remote", config.name),
        config.audio_tracks,
        config.video_tracks,
    ));
    publish(SignalEvent::RemoteStream(Some(remote)))?;
    publish(SignalEvent::Status(ConnectionStatus::Connected))?;
    tracing::info!(peer = %config.name, "simulated peer joined");

    // Stays in the call until stopped.
    let Some(drop_every) = config.drop_every else {
        return std::future::pending().await;
    };

    loop {
        tokio::time::sleep(drop_every).await;
        tracing::info!(peer = %config.name, "simulating link loss");
        publish(SignalEvent::Status(ConnectionStatus::Disconnected))?;

        tokio::time::sleep(OUTAGE_DURATION).await;
        publish(SignalEvent::Status(ConnectionStatus::Connecting))?;

        tokio::time::sleep(config.connect_delay).await;
        publish(SignalEvent::Status(ConnectionStatus::Connected))?;
    }
}
