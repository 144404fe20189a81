//! Settings panel
//!
//! Popup listing the local capture devices and their current state.

use callframe_app::CallSession;
use callframe_media::MediaTrack;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

const PANEL_WIDTH: u16 = 44;
const PANEL_MIN_HEIGHT: u16 = 6;

/// Row text for one track.
pub fn track_row(track: &MediaTrack) -> String {
    let state = if track.is_enabled() { "on" } else { "off" };
    format!("{:<20} {:<6} {state}", track.label(), track.kind())
}

/// Centered popup area, clamped to `area`.
fn popup_area(area: Rect, rows: u16) -> Rect {
    let width = PANEL_WIDTH.min(area.width);
    let height = rows.saturating_add(2).max(PANEL_MIN_HEIGHT).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render the settings popup over `area`.
pub fn render(frame: &mut Frame, session: &CallSession, area: Rect) {
    let mut items: Vec<ListItem> = session.local_stream().map_or_else(
        || {
            vec![ListItem::new(Line::from(Span::styled(
                "No capture devices",
                Style::default().fg(Color::DarkGray),
            )))]
        },
        |stream| stream.tracks().iter().map(|t| ListItem::new(track_row(t))).collect(),
    );
    items.push(ListItem::new(""));
    items.push(ListItem::new(Span::styled("[Esc] close", Style::default().fg(Color::DarkGray))));

    let rows = u16::try_from(items.len()).unwrap_or(u16::MAX);
    let popup = popup_area(area, rows);
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Settings "));

    frame.render_widget(Clear, popup);
    frame.render_widget(list, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_fits_area_for_any_row_count() {
        let area = Rect::new(0, 0, 100, 20);

        for rows in [0, 4, 18, u16::MAX - 1, u16::MAX] {
            let popup = popup_area(area, rows);
            assert!(popup.height <= area.height);
            assert!(popup.width <= area.width);
        }
        assert_eq!(popup_area(area, 4).height, 6);
    }
}
