//! Media primitives for Callframe
//!
//! Streams and tracks acquired outside the call session, plus the effect that
//! keeps local track state aligned with the session's mute and camera flags.
//!
//! # Components
//!
//! - [`MediaStream`]: ordered collection of [`MediaTrack`]s, shared by `Arc`
//! - [`MediaTrackController`]: applies [`TrackFlags`] to a stream whenever the
//!   stream reference or a flag changes

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod controller;
mod stream;

pub use controller::{MediaTrackController, SyncOutcome, TrackFlags};
pub use stream::{MediaStream, MediaTrack, StreamId, TrackKind};
