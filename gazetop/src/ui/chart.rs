//! Emotion line chart: renders the retained ChartCanvas with ratatui's Chart.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};

use crate::chart::ChartCanvas;
use crate::ui::theme::{AXIS, CHART_TITLE, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::ui::util::{axis_labels, display_bounds};

pub fn draw_emotion_chart(f: &mut ratatui::Frame<'_>, area: Rect, canvas: &ChartCanvas) {
    let block = Block::default().borders(Borders::ALL).title(CHART_TITLE);

    // Explicit limits first, else the plotted points' own extent
    let Some(limits) = canvas
        .limits
        .or(canvas.data_extent)
        .filter(|_| canvas.has_data())
    else {
        let waiting = Paragraph::new("waiting for samples...")
            .style(Style::default().fg(AXIS))
            .block(block);
        f.render_widget(waiting, area);
        return;
    };

    let x = display_bounds(limits.x, 0.5);
    let y = display_bounds(limits.y, 1.0);
    // roughly one x label per 12 columns, clamped to something readable
    let x_ticks = (area.width as usize / 12).clamp(2, 6);

    let datasets: Vec<Dataset> = canvas
        .series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.label.clone())
                .marker(s.style.marker)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.style.color))
                .data(&s.points)
        })
        .collect();

    let legend = if canvas.legend {
        Some(LegendPosition::TopRight)
    } else {
        None
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(X_AXIS_TITLE, Style::default().fg(AXIS)))
                .style(Style::default().fg(AXIS))
                .bounds(x)
                .labels(axis_labels(x, x_ticks)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(
                    Y_AXIS_TITLE,
                    Style::default().fg(AXIS).add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().fg(AXIS))
                .bounds(y)
                .labels(axis_labels(y, 5)),
        )
        .legend_position(legend)
        // Always show the legend, however small the pane
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));
    f.render_widget(chart, area);
}
