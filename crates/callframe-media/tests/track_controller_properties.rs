//! Property-based tests for the track controller.
//!
//! Flags are applied in arbitrary order to streams of arbitrary shape; after
//! every sync the stream must agree with the last flags, and a disposed
//! controller must leave the stream untouched.

use std::sync::Arc;

use callframe_media::{MediaStream, MediaTrackController, SyncOutcome, TrackFlags, TrackKind};
use proptest::prelude::*;

fn flags_strategy() -> impl Strategy<Value = TrackFlags> {
    (any::<bool>(), any::<bool>()).prop_map(|(muted, video_off)| TrackFlags { muted, video_off })
}

/// Every track agrees with `flags`.
fn stream_matches(stream: &MediaStream, flags: TrackFlags) -> bool {
    stream.tracks().iter().all(|t| t.is_enabled() == flags.enabled_for(t.kind()))
}

proptest! {
    #[test]
    fn prop_tracks_follow_last_flags(
        audio in 0usize..5,
        video in 0usize..5,
        sequence in prop::collection::vec(flags_strategy(), 1..30),
    ) {
        let stream = Arc::new(MediaStream::synthetic("local", audio, video));
        let mut controller = MediaTrackController::new();

        for flags in sequence {
            let outcome = controller.sync(Some(&stream), flags);
            prop_assert_ne!(outcome, SyncOutcome::Disposed);
            prop_assert!(stream_matches(&stream, flags));
        }
    }

    #[test]
    fn prop_mute_round_trip_restores_audio(audio in 1usize..8) {
        let stream = Arc::new(MediaStream::synthetic("local", audio, 1));
        let mut controller = MediaTrackController::new();

        let _ = controller.sync(Some(&stream), TrackFlags { muted: true, video_off: false });
        prop_assert_eq!(stream.audio_tracks().filter(|t| !t.is_enabled()).count(), audio);

        let _ = controller.sync(Some(&stream), TrackFlags { muted: false, video_off: false });
        prop_assert_eq!(stream.audio_tracks().filter(|t| t.is_enabled()).count(), audio);
    }

    #[test]
    fn prop_disposed_controller_is_inert(
        sequence in prop::collection::vec(flags_strategy(), 0..20),
    ) {
        let stream = Arc::new(MediaStream::synthetic("local", 2, 2));
        let mut controller = MediaTrackController::new();
        controller.dispose();

        for flags in sequence {
            prop_assert_eq!(controller.sync(Some(&stream), flags), SyncOutcome::Disposed);
        }
        prop_assert!(stream.tracks().iter().all(|t| t.is_enabled()));
    }
}

#[test]
fn audio_only_stream_ignores_video_flag() {
    let stream = Arc::new(MediaStream::synthetic("local", 1, 0));
    let mut controller = MediaTrackController::new();

    let _ = controller.sync(Some(&stream), TrackFlags { muted: false, video_off: true });

    assert!(stream.tracks_of(TrackKind::Audio).all(|t| t.is_enabled()));
    assert_eq!(stream.video_tracks().count(), 0);
}
