//! Generic runtime for call orchestration.
//!
//! The Runtime drives the call event loop, coordinating between:
//! - [`CallSession`]: call state machine
//! - [`Signaling`]: injected peer-connection layer
//! - [`Driver`]: Platform-specific I/O

use crate::{AppAction, AppEvent, CallConfig, CallSession, Driver, Signaling};

/// Reason recorded when the local user leaves.
const LOCAL_HANG_UP_REASON: &str = "You left the call";

/// Generic runtime that orchestrates the session, signaling, and driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Signaling implementation
pub struct Runtime<D, S>
where
    D: Driver,
    S: Signaling,
{
    driver: D,
    signaling: S,
    session: CallSession,
    /// Signaling still delivers events. Cleared once it returns `None`.
    signaling_open: bool,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: Signaling,
{
    /// Create a new runtime with the given driver, signaling, and config.
    pub fn new(driver: D, signaling: S, config: CallConfig) -> Self {
        Self { driver, signaling, session: CallSession::new(config), signaling_open: true }
    }

    /// Run the main event loop until the call ends.
    ///
    /// This is the core orchestration loop that:
    /// 1. Waits for either driver input or a signaling event
    /// 2. Feeds the event to the session
    /// 3. Executes the resulting actions (render, hang up, quit)
    ///
    /// On exit, successful or not, the session is torn down and the driver
    /// stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;

        self.session.teardown();
        self.driver.stop();
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.session)?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                return Ok(());
            }
        }
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let event = tokio::select! {
            input = self.driver.poll_event() => input?,

            signal = self.signaling.next_event(), if self.signaling_open => match signal {
                Some(signal) => Some(AppEvent::from(signal)),
                None => {
                    tracing::warn!("signaling closed, no further stream or status updates");
                    self.signaling_open = false;
                    None
                },
            },
        };

        let Some(event) = event else {
            return Ok(false);
        };

        let actions = self.session.handle(event);
        self.process_actions(actions).await
    }

    /// Process actions returned by the session.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.session)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::HangUp => {
                        if let Err(e) = self.signaling.hang_up().await {
                            tracing::warn!(error = %e, "Failed to deliver hang-up");
                        }
                        let event = AppEvent::CallEnded { reason: LOCAL_HANG_UP_REASON.into() };
                        pending_actions.extend(self.session.handle(event));
                    },
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the session
    pub fn session(&self) -> &CallSession {
        &self.session
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a reference to the signaling implementation
    pub fn signaling(&self) -> &S {
        &self.signaling
    }
}
