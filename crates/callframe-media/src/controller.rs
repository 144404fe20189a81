//! Track enable/disable effect.
//!
//! [`MediaTrackController`] is the media half of the call session: the state
//! store decides *whether* the user is muted or has the camera off, and the
//! controller makes the local stream's tracks agree.
//!
//! It behaves like a reactive effect with two dependencies, the stream
//! reference and the [`TrackFlags`]. A [`MediaTrackController::sync`] call
//! whose dependencies equal the last applied ones does nothing.
//!
//! # Invariants
//!
//! - After a successful sync, every audio track is enabled iff `!muted` and
//!   every video track is enabled iff `!video_off`.
//! - A missing stream is a silent no-op.
//! - Once disposed, the controller never writes to any stream again.

use std::sync::{Arc, Weak};

use crate::{MediaStream, TrackKind};

/// Session flags the controller mirrors onto tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackFlags {
    /// Audio tracks must be disabled.
    pub muted: bool,
    /// Video tracks must be disabled.
    pub video_off: bool,
}

impl TrackFlags {
    /// Enabled value required for a track of `kind`.
    pub fn enabled_for(self, kind: TrackKind) -> bool {
        match kind {
            TrackKind::Audio => !self.muted,
            TrackKind::Video => !self.video_off,
        }
    }
}

/// Result of a [`MediaTrackController::sync`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Flags were written to every track of the stream.
    Applied {
        /// Number of tracks visited.
        tracks: usize,
        /// Number of tracks whose enabled flag actually flipped.
        changed: usize,
    },
    /// Stream reference and flags match the last application.
    Unchanged,
    /// No stream bound yet.
    NoStream,
    /// Controller was disposed; nothing was written.
    Disposed,
}

/// Applies [`TrackFlags`] to the local [`MediaStream`].
#[derive(Debug, Default)]
pub struct MediaTrackController {
    /// Stream and flags of the last application. `None` if nothing applied
    /// since construction or since the stream went away.
    applied: Option<(Weak<MediaStream>, TrackFlags)>,
    disposed: bool,
}

impl MediaTrackController {
    /// Create a live controller with nothing applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the stream's tracks in line with `flags`.
    ///
    /// Re-applies whenever the stream reference (pointer identity, not
    /// [`crate::StreamId`]) or either flag differs from the last call.
    pub fn sync(&mut self, stream: Option<&Arc<MediaStream>>, flags: TrackFlags) -> SyncOutcome {
        if self.disposed {
            return SyncOutcome::Disposed;
        }

        let Some(stream) = stream else {
            self.applied = None;
            return SyncOutcome::NoStream;
        };

        let unchanged = self.applied.as_ref().is_some_and(|(last, last_flags)| {
            std::ptr::eq(last.as_ptr(), Arc::as_ptr(stream)) && *last_flags == flags
        });
        if unchanged {
            return SyncOutcome::Unchanged;
        }

        let changed = stream
            .tracks()
            .iter()
            .filter(|track| track.set_enabled(flags.enabled_for(track.kind())))
            .count();

        tracing::debug!(
            stream = %stream.id(),
            muted = flags.muted,
            video_off = flags.video_off,
            changed,
            "applied track flags"
        );

        self.applied = Some((Arc::downgrade(stream), flags));
        SyncOutcome::Applied { tracks: stream.tracks().len(), changed }
    }

    /// Stop applying flags. Every later [`Self::sync`] is a no-op.
    pub fn dispose(&mut self) {
        if !self.disposed {
            tracing::debug!("track controller disposed");
        }
        self.disposed = true;
        self.applied = None;
    }

    /// Controller has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn muted() -> TrackFlags {
        TrackFlags { muted: true, video_off: false }
    }

    #[test]
    fn missing_stream_is_noop() {
        let mut controller = MediaTrackController::new();
        assert_eq!(controller.sync(None, muted()), SyncOutcome::NoStream);
    }

    #[test]
    fn mute_disables_only_audio() {
        let stream = Arc::new(MediaStream::synthetic("local", 2, 1));
        let mut controller = MediaTrackController::new();

        let outcome = controller.sync(Some(&stream), muted());

        assert_eq!(outcome, SyncOutcome::Applied { tracks: 3, changed: 2 });
        assert!(stream.audio_tracks().all(|t| !t.is_enabled()));
        assert!(stream.video_tracks().all(|t| t.is_enabled()));
    }

    #[test]
    fn same_dependencies_skip_application() {
        let stream = Arc::new(MediaStream::synthetic("local", 1, 1));
        let mut controller = MediaTrackController::new();

        let _ = controller.sync(Some(&stream), muted());
        assert_eq!(controller.sync(Some(&stream), muted()), SyncOutcome::Unchanged);
    }

    #[test]
    fn new_stream_reference_reapplies_flags() {
        let first = Arc::new(MediaStream::synthetic("local", 1, 1));
        let second = Arc::new(MediaStream::synthetic("local", 1, 1));
        let mut controller = MediaTrackController::new();

        let _ = controller.sync(Some(&first), muted());
        let outcome = controller.sync(Some(&second), muted());

        // Same StreamId, different reference
        assert_eq!(outcome, SyncOutcome::Applied { tracks: 2, changed: 1 });
        assert!(second.audio_tracks().all(|t| !t.is_enabled()));
    }

    #[test]
    fn stream_removed_then_restored_reapplies() {
        let stream = Arc::new(MediaStream::synthetic("local", 1, 0));
        let mut controller = MediaTrackController::new();

        let _ = controller.sync(Some(&stream), muted());
        let _ = controller.sync(None, muted());
        stream.tracks()[0].set_enabled(true);

        let outcome = controller.sync(Some(&stream), muted());
        assert_eq!(outcome, SyncOutcome::Applied { tracks: 1, changed: 1 });
    }

    #[test]
    fn disposed_controller_never_writes() {
        let stream = Arc::new(MediaStream::synthetic("local", 1, 1));
        let mut controller = MediaTrackController::new();
        controller.dispose();

        let flags = TrackFlags { muted: true, video_off: true };
        assert_eq!(controller.sync(Some(&stream), flags), SyncOutcome::Disposed);
        assert!(stream.tracks().iter().all(|t| t.is_enabled()));
    }
}
