//! Application layer for Callframe
//!
//! Pure state machines and a generic runtime for the call session UI, so the
//! same orchestration code runs in the terminal frontend and in tests.
//!
//! # Components
//!
//! - [`CallStateStore`]: mute / camera / settings toggles
//! - [`CallSession`]: composition root (store + track controller + views)
//! - [`connection_indicator`], [`VideoView`]: pure view models
//! - [`Signaling`]: Trait for the injected peer-connection layer
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver and Signaling
//! - [`RealtimeClient`]: Explicit pub/sub handle with scoped subscriptions

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod config;
mod driver;
mod error;
mod event;
mod input;
mod realtime;
mod runtime;
mod signaling;
mod state;
mod view;

pub use action::AppAction;
pub use app::CallSession;
pub use config::CallConfig;
pub use driver::Driver;
pub use error::RealtimeError;
pub use event::AppEvent;
pub use input::KeyInput;
pub use realtime::{RealtimeClient, Subscription};
pub use runtime::Runtime;
pub use signaling::{SignalEvent, Signaling};
pub use state::{CallPhase, CallStateStore, CallUiState, ConnectionStatus};
pub use view::{
    CAMERA_OFF_PLACEHOLDER, CONNECTING_LABEL, ConnectionIndicator, DISCONNECTED_LABEL,
    IndicatorTone, VideoView, connection_indicator,
};
