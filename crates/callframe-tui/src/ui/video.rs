//! Video surfaces
//!
//! Draws a [`VideoView`] into a bordered tile. A terminal cannot show real
//! video, so a live stream is drawn as a moving test card labelled with the
//! active camera.

use callframe_app::VideoView;
use callframe_media::MediaTrack;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const MUTED_BADGE: &str = " · Muted";
const NO_VIDEO: &str = "No video";
const BORDER_SIZE: u16 = 2;

const TEST_CARD: [Color; 7] = [
    Color::White,
    Color::Yellow,
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

/// Tile title: caption plus the muted badge when set.
pub fn title(view: &VideoView) -> Line<'static> {
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(view.caption.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if view.muted_badge {
        spans.push(Span::styled(MUTED_BADGE, Style::default().fg(Color::Red)));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Render a video tile.
pub fn render(frame: &mut Frame, view: &VideoView, area: Rect, ticks: u64) {
    let block = Block::default().borders(Borders::ALL).title(title(view));

    let live_camera = view
        .stream
        .as_ref()
        .and_then(|stream| stream.video_tracks().find(|t| t.is_enabled()).map(MediaTrack::label));

    let lines = match (&view.placeholder, live_camera) {
        (Some(placeholder), _) => centered_text(placeholder, area),
        (None, Some(camera)) => test_card(camera, area, ticks),
        (None, None) => centered_text(NO_VIDEO, area),
    };

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}

/// Single line of dim text, vertically centered inside the tile.
fn centered_text(text: &str, area: Rect) -> Vec<Line<'static>> {
    let inner_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let mut lines = vec![Line::raw(""); inner_height.saturating_sub(1) / 2];
    lines.push(Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))));
    lines
}

/// Color bars scrolled by `ticks`, with the camera label on the last row.
fn test_card(camera: &str, area: Rect, ticks: u64) -> Vec<Line<'static>> {
    let inner_width = area.width.saturating_sub(BORDER_SIZE) as usize;
    let inner_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let bar_width = (inner_width / TEST_CARD.len()).max(1);
    let offset = ticks as usize % TEST_CARD.len();

    let bars: Vec<Span<'static>> = (0..TEST_CARD.len())
        .map(|i| {
            let color = TEST_CARD[(i + offset) % TEST_CARD.len()];
            Span::styled(" ".repeat(bar_width), Style::default().bg(color))
        })
        .collect();

    let mut lines = vec![Line::from(bars); inner_height.saturating_sub(1)];
    lines.push(Line::from(Span::styled(camera.to_string(), Style::default().fg(Color::Gray))));
    lines
}
