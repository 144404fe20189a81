//! Call session state machine.
//!
//! This module defines [`CallSession`], the composition root of the call
//! screen. It wires the [`CallStateStore`] to the
//! [`MediaTrackController`] and exposes the view models for the connection
//! indicator and both video surfaces.
//!
//! The session consumes [`crate::AppEvent`] inputs and produces
//! [`crate::AppAction`] instructions for the runtime to execute. The only side
//! effect it performs itself is the synchronous track enable/disable on the
//! local stream, re-applied after every state change.
//!
//! # Responsibilities
//!
//! - Maps call control keys onto the four toggle operations and hang-up.
//! - Holds the local and remote stream references and the connection status.
//! - Tears down on call end: no track writes after that point.

use std::sync::Arc;

use callframe_media::{MediaStream, MediaTrackController, SyncOutcome};

use crate::{
    AppAction, AppEvent, CallConfig, CallPhase, CallStateStore, CallUiState, ConnectionIndicator,
    ConnectionStatus, KeyInput, VideoView, connection_indicator,
};

/// Call session state machine.
///
/// Owned by a single runtime; never shared.
#[derive(Debug)]
pub struct CallSession {
    store: CallStateStore,
    tracks: MediaTrackController,
    local_stream: Option<Arc<MediaStream>>,
    remote_stream: Option<Arc<MediaStream>>,
    status: ConnectionStatus,
    phase: CallPhase,
    self_name: String,
    peer_name: String,
    /// Ticks observed; drives the pulsing indicator.
    ticks: u64,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl CallSession {
    /// Create a session from configuration.
    pub fn new(config: CallConfig) -> Self {
        Self {
            store: CallStateStore::new(config.initial_video_enabled),
            tracks: MediaTrackController::new(),
            local_stream: None,
            remote_stream: None,
            status: ConnectionStatus::default(),
            phase: CallPhase::default(),
            self_name: config.self_name,
            peer_name: config.peer_name,
            ticks: 0,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    ///
    /// After teardown every event is ignored.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        if self.is_torn_down() {
            tracing::trace!(?event, "event after teardown ignored");
            return vec![];
        }

        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => {
                self.ticks = self.ticks.wrapping_add(1);
                if self.connection_indicator().is_some() { vec![AppAction::Render] } else { vec![] }
            },
            AppEvent::Resize => vec![AppAction::Render],
            AppEvent::StatusChanged(status) => {
                self.status = status;
                let phase = self.phase.observe(status);
                if phase != self.phase {
                    tracing::info!(from = ?self.phase, to = ?phase, "call phase changed");
                    self.phase = phase;
                }
                vec![AppAction::Render]
            },
            AppEvent::LocalStreamChanged(stream) => {
                self.local_stream = stream;
                self.sync_tracks();
                vec![AppAction::Render]
            },
            AppEvent::RemoteStreamChanged(stream) => {
                self.remote_stream = stream;
                vec![AppAction::Render]
            },
            AppEvent::PeerNameResolved(name) => {
                self.peer_name = name;
                vec![AppAction::Render]
            },
            AppEvent::CallEnded { reason } => {
                self.status_message = Some(reason);
                self.teardown();
                vec![AppAction::Render, AppAction::Quit]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char('m' | 'M') => self.toggle_audio(),
            KeyInput::Char('v' | 'V') => self.toggle_video(),
            KeyInput::Char('s' | 'S') => self.toggle_settings(),
            KeyInput::Char('q' | 'Q') => self.hang_up(),
            KeyInput::Esc if self.store.state().show_settings => self.set_show_settings(false),
            KeyInput::Esc => self.hang_up(),
            KeyInput::Char(_) => vec![],
        }
    }

    /// Flip microphone mute.
    ///
    /// The toggles are no-ops after teardown, like [`Self::handle`].
    pub fn toggle_audio(&mut self) -> Vec<AppAction> {
        if self.is_torn_down() {
            return vec![];
        }
        self.store.toggle_audio();
        self.sync_tracks();
        vec![AppAction::Render]
    }

    /// Flip camera on/off.
    pub fn toggle_video(&mut self) -> Vec<AppAction> {
        if self.is_torn_down() {
            return vec![];
        }
        self.store.toggle_video();
        self.sync_tracks();
        vec![AppAction::Render]
    }

    /// Flip settings panel visibility.
    pub fn toggle_settings(&mut self) -> Vec<AppAction> {
        if self.is_torn_down() {
            return vec![];
        }
        self.store.toggle_settings();
        vec![AppAction::Render]
    }

    /// Show or hide the settings panel.
    pub fn set_show_settings(&mut self, show: bool) -> Vec<AppAction> {
        if self.is_torn_down() {
            return vec![];
        }
        self.store.set_show_settings(show);
        vec![AppAction::Render]
    }

    /// Leave the call. The runtime reports back with
    /// [`AppEvent::CallEnded`].
    pub fn hang_up(&mut self) -> Vec<AppAction> {
        self.status_message = Some("Leaving call...".into());
        vec![AppAction::HangUp, AppAction::Render]
    }

    /// Stop reacting: dispose the track controller and mark the call ended.
    ///
    /// Idempotent. Stream references are kept for a final render but are
    /// never written to again.
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.tracks.dispose();
        tracing::info!(from = ?self.phase, "call session torn down");
        self.phase = CallPhase::Ended;
    }

    /// Session has been torn down.
    pub fn is_torn_down(&self) -> bool {
        self.phase.is_ended()
    }

    fn sync_tracks(&mut self) {
        let flags = self.store.state().track_flags();
        if let SyncOutcome::Applied { changed, .. } =
            self.tracks.sync(self.local_stream.as_ref(), flags)
        {
            tracing::trace!(changed, "local tracks updated");
        }
    }

    /// Current UI toggle state.
    pub fn ui_state(&self) -> CallUiState {
        self.store.state()
    }

    /// Current peer link status.
    pub fn connection_status(&self) -> ConnectionStatus {
        self.status
    }

    /// Recorded lifecycle phase.
    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Connection indicator to draw. `None` while connected.
    pub fn connection_indicator(&self) -> Option<ConnectionIndicator> {
        connection_indicator(self.status)
    }

    /// Self-preview view model.
    pub fn local_view(&self) -> VideoView {
        VideoView::local(self.local_stream.clone(), self.store.state(), &self.self_name)
    }

    /// Remote peer view model.
    pub fn remote_view(&self) -> VideoView {
        VideoView::remote(self.remote_stream.clone(), self.status, &self.peer_name)
    }

    /// Local capture stream. `None` before acquisition.
    pub fn local_stream(&self) -> Option<&Arc<MediaStream>> {
        self.local_stream.as_ref()
    }

    /// Remote peer stream. `None` before the peer connects.
    pub fn remote_stream(&self) -> Option<&Arc<MediaStream>> {
        self.remote_stream.as_ref()
    }

    /// Local user's display name.
    pub fn self_name(&self) -> &str {
        &self.self_name
    }

    /// Peer display name.
    pub fn peer_name(&self) -> &str {
        &self.peer_name
    }

    /// Ticks observed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_stream() -> (CallSession, Arc<MediaStream>) {
        let mut session = CallSession::new(CallConfig::default());
        let stream = Arc::new(MediaStream::synthetic("local", 1, 1));
        let _ = session.handle(AppEvent::LocalStreamChanged(Some(Arc::clone(&stream))));
        (session, stream)
    }

    #[test]
    fn mute_key_disables_audio_tracks() {
        let (mut session, stream) = session_with_stream();

        let actions = session.handle(AppEvent::Key(KeyInput::Char('m')));

        assert_eq!(actions, vec![AppAction::Render]);
        assert!(session.ui_state().is_muted);
        assert!(stream.audio_tracks().all(|t| !t.is_enabled()));
    }

    #[test]
    fn camera_off_at_start_applies_on_stream_arrival() {
        let config = CallConfig { initial_video_enabled: false, ..CallConfig::default() };
        let mut session = CallSession::new(config);
        let stream = Arc::new(MediaStream::synthetic("local", 1, 1));

        let _ = session.handle(AppEvent::LocalStreamChanged(Some(Arc::clone(&stream))));

        assert!(stream.video_tracks().all(|t| !t.is_enabled()));
        assert!(stream.audio_tracks().all(|t| t.is_enabled()));
    }

    #[test]
    fn esc_closes_settings_before_hanging_up() {
        let mut session = CallSession::new(CallConfig::default());
        let _ = session.handle(AppEvent::Key(KeyInput::Char('s')));

        let actions = session.handle(AppEvent::Key(KeyInput::Esc));
        assert_eq!(actions, vec![AppAction::Render]);
        assert!(!session.ui_state().show_settings);

        let actions = session.handle(AppEvent::Key(KeyInput::Esc));
        assert_eq!(actions, vec![AppAction::HangUp, AppAction::Render]);
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut session = CallSession::new(CallConfig::default());
        assert!(session.handle(AppEvent::Key(KeyInput::Char('x'))).is_empty());
        assert_eq!(session.ui_state(), CallUiState::new(true));
    }

    #[test]
    fn tick_renders_only_while_indicator_visible() {
        let mut session = CallSession::new(CallConfig::default());
        assert_eq!(session.handle(AppEvent::Tick), vec![AppAction::Render]);

        let _ = session.handle(AppEvent::StatusChanged(ConnectionStatus::Connected));
        assert!(session.handle(AppEvent::Tick).is_empty());
        assert_eq!(session.ticks(), 2);
    }

    #[test]
    fn status_changes_are_recorded_as_phases() {
        let mut session = CallSession::new(CallConfig::default());
        assert_eq!(session.phase(), CallPhase::Idle);

        let _ = session.handle(AppEvent::StatusChanged(ConnectionStatus::Connected));
        assert_eq!(session.phase(), CallPhase::Connected);

        let _ = session.handle(AppEvent::StatusChanged(ConnectionStatus::Disconnected));
        assert_eq!(session.phase(), CallPhase::Disconnected);
    }

    #[test]
    fn call_end_tears_down_and_quits() {
        let (mut session, stream) = session_with_stream();

        let actions = session.handle(AppEvent::CallEnded { reason: "Call ended".into() });

        assert_eq!(actions, vec![AppAction::Render, AppAction::Quit]);
        assert!(session.is_torn_down());
        assert_eq!(session.status_message(), Some("Call ended"));

        // No further track writes
        assert!(session.handle(AppEvent::Key(KeyInput::Char('m'))).is_empty());
        assert!(stream.audio_tracks().all(|t| t.is_enabled()));
    }

    #[test]
    fn toggles_after_teardown_change_nothing() {
        let (mut session, stream) = session_with_stream();
        session.teardown();
        let before = session.ui_state();

        assert!(session.toggle_audio().is_empty());
        assert!(session.toggle_video().is_empty());
        assert!(session.toggle_settings().is_empty());
        assert!(session.set_show_settings(true).is_empty());

        assert_eq!(session.ui_state(), before);
        assert!(stream.tracks().iter().all(|t| t.is_enabled()));
    }

    #[test]
    fn resize_only_redraws() {
        let mut session = CallSession::new(CallConfig::default());
        let before = session.ui_state();

        assert_eq!(session.handle(AppEvent::Resize), vec![AppAction::Render]);
        assert_eq!(session.ui_state(), before);
    }

    #[test]
    fn peer_name_feeds_remote_placeholder() {
        let mut session = CallSession::new(CallConfig::default());
        let _ = session.handle(AppEvent::PeerNameResolved("carol".into()));

        let view = session.remote_view();
        assert_eq!(view.placeholder.as_deref(), Some("Waiting for carol to join..."));
    }
}
