//! Terminal call screen for Callframe
//!
//! A thin shell over [`callframe_app::Driver`] and [`callframe_app::Signaling`]
//! that provides terminal I/O and an in-process simulated peer. All call logic
//! lives in the generic [`callframe_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod peer;
pub mod signaling;
pub mod terminal;
pub mod ui;

pub use callframe_app::{AppAction, AppEvent, CallConfig, CallSession, Driver, KeyInput, Runtime};
pub use peer::{PeerConfig, PeerHandle, spawn_peer};
pub use signaling::{LoopbackSignaling, SignalingError};
pub use terminal::{TerminalDriver, TerminalError};
