//! Observable call state types.
//!
//! This module defines the data the call session renders from:
//! [`CallUiState`] and its [`CallStateStore`], the externally supplied
//! [`ConnectionStatus`], and the [`CallPhase`] lifecycle the session records.
//!
//! The store is deliberately media-agnostic. Mapping the flags onto real
//! tracks is the job of [`callframe_media::MediaTrackController`].

use callframe_media::TrackFlags;

/// UI-level call state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallUiState {
    /// Local microphone is muted.
    pub is_muted: bool,
    /// Local camera is off.
    pub is_video_off: bool,
    /// Settings panel is visible.
    pub show_settings: bool,
}

impl CallUiState {
    /// Initial state for a call that starts with the camera on or off.
    pub fn new(initial_video_enabled: bool) -> Self {
        Self { is_muted: false, is_video_off: !initial_video_enabled, show_settings: false }
    }

    /// Flags the track controller mirrors onto the local stream.
    pub fn track_flags(&self) -> TrackFlags {
        TrackFlags { muted: self.is_muted, video_off: self.is_video_off }
    }
}

/// Holds [`CallUiState`] and exposes its toggle operations.
///
/// All operations are synchronous and infallible.
#[derive(Debug, Clone)]
pub struct CallStateStore {
    state: CallUiState,
}

impl CallStateStore {
    /// Create a store with the session defaults.
    pub fn new(initial_video_enabled: bool) -> Self {
        Self { state: CallUiState::new(initial_video_enabled) }
    }

    /// Current state.
    pub fn state(&self) -> CallUiState {
        self.state
    }

    /// Flip `is_muted`.
    pub fn toggle_audio(&mut self) {
        self.state.is_muted = !self.state.is_muted;
    }

    /// Flip `is_video_off`.
    pub fn toggle_video(&mut self) {
        self.state.is_video_off = !self.state.is_video_off;
    }

    /// Flip `show_settings`.
    pub fn toggle_settings(&mut self) {
        self.state.show_settings = !self.state.show_settings;
    }

    /// Set `show_settings` to an absolute value.
    pub fn set_show_settings(&mut self, show: bool) {
        self.state.show_settings = show;
    }
}

/// Peer link health, supplied by signaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// Media is flowing.
    Connected,
    /// Establishing the peer link. Initial value before any signal.
    #[default]
    Connecting,
    /// Link lost; signaling is expected to retry.
    Disconnected,
}

/// Call lifecycle as observed by the session.
///
/// `Idle -> Connecting -> Connected -> (Disconnected -> Connecting | Ended)`.
/// Transitions other than `Ended` are driven by signaling; the session only
/// records them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallPhase {
    /// No status received yet.
    #[default]
    Idle,
    /// Establishing the link.
    Connecting,
    /// Link established.
    Connected,
    /// Link lost.
    Disconnected,
    /// Call is over. Terminal.
    Ended,
}

impl CallPhase {
    /// Phase after observing `status`. `Ended` absorbs every status.
    pub fn observe(self, status: ConnectionStatus) -> Self {
        match (self, status) {
            (Self::Ended, _) => Self::Ended,
            (_, ConnectionStatus::Connecting) => Self::Connecting,
            (_, ConnectionStatus::Connected) => Self::Connected,
            (_, ConnectionStatus::Disconnected) => Self::Disconnected,
        }
    }

    /// Call has ended.
    pub fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_follows_video_preference() {
        let with_video = CallStateStore::new(true).state();
        assert!(!with_video.is_muted);
        assert!(!with_video.is_video_off);
        assert!(!with_video.show_settings);

        let without_video = CallStateStore::new(false).state();
        assert!(without_video.is_video_off);
    }

    #[test]
    fn toggles_flip_independently() {
        let mut store = CallStateStore::new(true);

        store.toggle_audio();
        assert_eq!(store.state(), CallUiState {
            is_muted: true,
            is_video_off: false,
            show_settings: false
        });

        store.toggle_video();
        store.toggle_settings();
        assert_eq!(store.state(), CallUiState {
            is_muted: true,
            is_video_off: true,
            show_settings: true
        });
    }

    #[test]
    fn set_show_settings_is_absolute() {
        let mut store = CallStateStore::new(true);

        store.set_show_settings(true);
        store.set_show_settings(true);
        assert!(store.state().show_settings);

        store.set_show_settings(false);
        assert!(!store.state().show_settings);
    }

    #[test]
    fn ended_phase_absorbs_status() {
        let phase = CallPhase::Idle.observe(ConnectionStatus::Connecting);
        assert_eq!(phase, CallPhase::Connecting);
        assert_eq!(phase.observe(ConnectionStatus::Connected), CallPhase::Connected);
        assert_eq!(CallPhase::Ended.observe(ConnectionStatus::Connected), CallPhase::Ended);
    }
}
