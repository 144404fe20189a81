//! UI rendering
//!
//! Rendering functions that convert call session state into terminal output
//! using ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

pub mod controls;
pub mod settings;
pub mod status;
pub mod video;

use callframe_app::CallSession;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, session: &CallSession) {
    const STATUS_HEIGHT: u16 = 1;
    const MAIN_AREA_MIN_HEIGHT: u16 = 5;
    const CONTROLS_HEIGHT: u16 = 3;
    const MESSAGE_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Length(MESSAGE_HEIGHT),
        ])
        .split(frame.area());

    let [status_area, main_area, controls_area, message_area] = chunks.as_ref() else {
        return;
    };

    status::render(frame, session, *status_area);
    render_main_area(frame, session, *main_area);
    controls::render(frame, session.ui_state(), *controls_area);
    render_message(frame, session, *message_area);

    if session.ui_state().show_settings {
        settings::render(frame, session, frame.area());
    }
}

/// Render the main area (remote view + self-preview).
fn render_main_area(frame: &mut Frame, session: &CallSession, area: Rect) {
    const REMOTE_MIN_WIDTH: u16 = 30;
    const LOCAL_WIDTH: u16 = 34;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(REMOTE_MIN_WIDTH), Constraint::Length(LOCAL_WIDTH)])
        .split(area);

    let [remote_area, local_area] = chunks.as_ref() else {
        return;
    };

    video::render(frame, &session.remote_view(), *remote_area, session.ticks());
    video::render(frame, &session.local_view(), *local_area, session.ticks());
}

/// Render the transient status message line.
fn render_message(frame: &mut Frame, session: &CallSession, area: Rect) {
    let Some(message) = session.status_message() else {
        return;
    };

    let paragraph = Paragraph::new(Line::raw(format!(" {message}")))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}
