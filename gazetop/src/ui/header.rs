//! Top header with the data source, link status and last update time.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::mqtt::LinkStatus;

pub fn status_text(status: &LinkStatus) -> String {
    match status {
        LinkStatus::Connecting => "connecting...".into(),
        LinkStatus::Connected => "connected".into(),
        LinkStatus::Subscribed => "subscribed".into(),
        LinkStatus::Demo => "demo data".into(),
        LinkStatus::Disconnected(why) => format!("disconnected: {why}"),
    }
}

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    source: &str,
    status: &LinkStatus,
    last_update: Option<DateTime<Local>>,
) {
    let last = last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".into());
    let title = format!(
        "gazetop — {source} | {} | last update: {last}  (press 'q' to quit)",
        status_text(status)
    );
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnect_reason_is_shown() {
        let s = status_text(&LinkStatus::Disconnected("connection refused".into()));
        assert_eq!(s, "disconnected: connection refused");
    }
}
