//! Bottom status line: latest counts per emotion plus message counters.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::feed::EmotionFeed;
use crate::types::Emotion;
use crate::ui::theme::emotion_color;

pub fn footer_line(feed: &EmotionFeed) -> Line<'static> {
    let mut spans = Vec::new();
    match feed.buffer().latest() {
        Some(s) => {
            spans.push(Span::raw(format!("#{} ", s.index)));
            for e in Emotion::ALL {
                spans.push(Span::styled(
                    format!("{}: {} ", e.label(), s.counts.get(e)),
                    Style::default()
                        .fg(emotion_color(e))
                        .add_modifier(Modifier::BOLD),
                ));
            }
        }
        None => spans.push(Span::raw("no samples yet ")),
    }
    spans.push(Span::raw(format!(
        "| msgs: {} rejected: {}",
        feed.received(),
        feed.rejected()
    )));
    if let Some(err) = feed.last_error() {
        spans.push(Span::styled(
            format!(" | last error: {err}"),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

pub fn draw_footer(f: &mut ratatui::Frame<'_>, area: Rect, feed: &EmotionFeed) {
    f.render_widget(Paragraph::new(footer_line(feed)), area);
}
