//! View models for the call screen.
//!
//! Pure functions from session state to what a frontend should draw. The
//! terminal UI renders these with ratatui; any other frontend can render the
//! same models.
//!
//! - [`connection_indicator`]: the connection status view. Renders nothing
//!   while connected.
//! - [`VideoView::local`] / [`VideoView::remote`]: a stream bound to a video
//!   surface, with placeholder and caption.

use std::sync::Arc;

use callframe_media::MediaStream;

use crate::{CallUiState, ConnectionStatus};

/// Placeholder shown in the self-preview while the camera is off.
pub const CAMERA_OFF_PLACEHOLDER: &str = "Camera is off";

/// Label of the connecting indicator.
pub const CONNECTING_LABEL: &str = "Connecting...";

/// Label of the disconnected indicator.
pub const DISCONNECTED_LABEL: &str = "Connection lost. Reconnecting...";

/// Visual treatment of a [`ConnectionIndicator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorTone {
    /// Animated dot; link is being established.
    Pulsing,
    /// Static warning; link was lost.
    Warning,
}

/// Connection status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionIndicator {
    /// Visual treatment.
    pub tone: IndicatorTone,
    /// Text next to the indicator.
    pub label: &'static str,
}

/// Indicator for `status`. `None` while connected: no indicator on the happy
/// path.
pub fn connection_indicator(status: ConnectionStatus) -> Option<ConnectionIndicator> {
    match status {
        ConnectionStatus::Connected => None,
        ConnectionStatus::Connecting => {
            Some(ConnectionIndicator { tone: IndicatorTone::Pulsing, label: CONNECTING_LABEL })
        },
        ConnectionStatus::Disconnected => {
            Some(ConnectionIndicator { tone: IndicatorTone::Warning, label: DISCONNECTED_LABEL })
        },
    }
}

/// A media stream bound to a video surface.
#[derive(Debug, Clone)]
pub struct VideoView {
    /// Bound stream. `None` if nothing to show.
    pub stream: Option<Arc<MediaStream>>,
    /// Playback audio is muted. Always `true` for the self-preview.
    pub playback_muted: bool,
    /// Text drawn instead of the video. `None` means the video is visible.
    pub placeholder: Option<String>,
    /// Identity caption (self or peer name).
    pub caption: String,
    /// Show a muted badge next to the caption.
    pub muted_badge: bool,
}

impl VideoView {
    /// Self-preview of the local capture.
    pub fn local(stream: Option<Arc<MediaStream>>, state: CallUiState, self_name: &str) -> Self {
        Self {
            stream,
            playback_muted: true,
            placeholder: state.is_video_off.then(|| CAMERA_OFF_PLACEHOLDER.to_string()),
            caption: format!("{self_name} (You)"),
            muted_badge: state.is_muted,
        }
    }

    /// View of the remote peer.
    ///
    /// The waiting placeholder stays up while the link is still connecting
    /// even if a stream has already arrived.
    pub fn remote(
        stream: Option<Arc<MediaStream>>,
        status: ConnectionStatus,
        peer_name: &str,
    ) -> Self {
        let is_connecting = status == ConnectionStatus::Connecting;
        let placeholder = (stream.is_none() || is_connecting)
            .then(|| format!("Waiting for {peer_name} to join..."));

        Self {
            stream,
            playback_muted: false,
            placeholder,
            caption: peer_name.to_string(),
            muted_badge: false,
        }
    }

    /// Video surface is covered by the placeholder.
    pub fn shows_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }
}
