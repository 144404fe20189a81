//! Connection status bar
//!
//! Displays the connection indicator. Draws nothing while connected.

use callframe_app::{CallSession, ConnectionIndicator, IndicatorTone};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const PULSE_DOT: &str = "●";
const WARNING_MARK: &str = "▲";

/// Ticks per pulse phase.
const PULSE_PERIOD: u64 = 4;

/// Indicator line for `indicator` at animation frame `ticks`.
pub fn indicator_line(indicator: ConnectionIndicator, ticks: u64) -> Line<'static> {
    let (mark, mark_style, label_style) = match indicator.tone {
        IndicatorTone::Pulsing => {
            let bright = (ticks / PULSE_PERIOD) % 2 == 0;
            let dot_style = if bright {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM)
            };
            (PULSE_DOT, dot_style, Style::default().fg(Color::Yellow))
        },
        IndicatorTone::Warning => (
            WARNING_MARK,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Red),
        ),
    };

    Line::from(vec![
        Span::raw(" "),
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(indicator.label, label_style),
    ])
}

/// Render the status bar.
pub fn render(frame: &mut Frame, session: &CallSession, area: Rect) {
    let Some(indicator) = session.connection_indicator() else {
        return;
    };

    let paragraph = Paragraph::new(indicator_line(indicator, session.ticks()));
    frame.render_widget(paragraph, area);
}
