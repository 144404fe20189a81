//! Media streams and tracks.
//!
//! A [`MediaStream`] is acquired outside the call session (local capture or a
//! remote peer) and shared by reference. The session only flips the `enabled`
//! flag of individual tracks; it never creates or ends a stream it was handed.
//!
//! The enabled flag is atomic because the provider that owns the stream and
//! the session that toggles it observe the same track.

use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

/// Stable identity of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamId(String);

impl StreamId {
    /// Create a stream ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of media carried by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    /// Microphone or other audio source.
    Audio,
    /// Camera or other video source.
    Video,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// A single audio or video track.
///
/// Tracks start enabled, matching freshly acquired capture devices.
#[derive(Debug)]
pub struct MediaTrack {
    id: String,
    kind: TrackKind,
    label: String,
    enabled: AtomicBool,
}

impl MediaTrack {
    /// Create an enabled track.
    pub fn new(id: impl Into<String>, kind: TrackKind, label: impl Into<String>) -> Self {
        Self { id: id.into(), kind, label: label.into(), enabled: AtomicBool::new(true) }
    }

    /// Track identifier, unique within its stream.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Audio or video.
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Human readable device label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the track currently produces media.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Set the enabled flag. Returns `true` if the value changed.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        self.enabled.swap(enabled, Ordering::AcqRel) != enabled
    }
}

/// Ordered collection of audio and video tracks.
#[derive(Debug)]
pub struct MediaStream {
    id: StreamId,
    tracks: Vec<MediaTrack>,
}

impl MediaStream {
    /// Create a stream from already acquired tracks.
    pub fn new(id: StreamId, tracks: Vec<MediaTrack>) -> Self {
        Self { id, tracks }
    }

    /// Build a stream of `audio` microphone tracks followed by `video` camera
    /// tracks, with generated IDs and labels.
    ///
    /// Used by simulated capture and by tests that have no real device.
    pub fn synthetic(id: impl Into<String>, audio: usize, video: usize) -> Self {
        let id = StreamId::new(id);
        let audio_tracks = (1..=audio).map(|n| {
            MediaTrack::new(format!("{id}/audio-{n}"), TrackKind::Audio, format!("Microphone {n}"))
        });
        let video_tracks = (1..=video).map(|n| {
            MediaTrack::new(format!("{id}/video-{n}"), TrackKind::Video, format!("Camera {n}"))
        });
        let tracks = audio_tracks.chain(video_tracks).collect();
        Self { id, tracks }
    }

    /// Stream identity.
    pub fn id(&self) -> &StreamId {
        &self.id
    }

    /// All tracks in acquisition order.
    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Tracks of the given kind, in order.
    pub fn tracks_of(&self, kind: TrackKind) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(move |t| t.kind == kind)
    }

    /// Audio tracks, in order.
    pub fn audio_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks_of(TrackKind::Audio)
    }

    /// Video tracks, in order.
    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks_of(TrackKind::Video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_orders_audio_before_video() {
        let stream = MediaStream::synthetic("local", 2, 1);
        let kinds: Vec<_> = stream.tracks().iter().map(MediaTrack::kind).collect();

        assert_eq!(kinds, vec![TrackKind::Audio, TrackKind::Audio, TrackKind::Video]);
        assert_eq!(stream.tracks()[2].label(), "Camera 1");
        assert_eq!(stream.tracks()[0].id(), "local/audio-1");
    }

    #[test]
    fn set_enabled_reports_change() {
        let track = MediaTrack::new("t", TrackKind::Audio, "Mic");

        assert!(track.is_enabled());
        assert!(!track.set_enabled(true));
        assert!(track.set_enabled(false));
        assert!(!track.is_enabled());
    }
}
