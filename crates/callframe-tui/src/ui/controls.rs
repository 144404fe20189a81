//! Call controls
//!
//! Shortcut hints for the call control buttons. Toggled-off controls are
//! highlighted.

use callframe_app::CallUiState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Control labels in display order, paired with whether the control is in
/// its "off" state.
pub fn labels(state: CallUiState) -> [(&'static str, bool); 4] {
    [
        (if state.is_muted { "[m] Unmute" } else { "[m] Mute" }, state.is_muted),
        (if state.is_video_off { "[v] Start video" } else { "[v] Stop video" }, state.is_video_off),
        (if state.show_settings { "[s] Hide settings" } else { "[s] Settings" }, false),
        ("[q] Leave", false),
    ]
}

/// Render the control bar.
pub fn render(frame: &mut Frame, state: CallUiState, area: Rect) {
    let off_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for (label, off) in labels(state) {
        spans.push(Span::raw("  "));
        spans.push(if off { Span::styled(label, off_style) } else { Span::raw(label) });
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
