//! Call session configuration.

/// Configuration for one [`crate::CallSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallConfig {
    /// Display name of the local user, shown under the self-preview.
    pub self_name: String,
    /// Peer display name used until signaling resolves the real one.
    pub peer_name: String,
    /// Start the call with the camera on.
    pub initial_video_enabled: bool,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self { self_name: "You".into(), peer_name: "peer".into(), initial_video_enabled: true }
    }
}
