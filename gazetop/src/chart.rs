//! Real-time multi-series chart: projects the rolling buffer onto a drawable
//! surface with one labeled line per emotion and auto-scaled axes.

use ratatui::{style::Color, symbols::Marker};

use crate::error::ChartError;
use crate::history::RollingSeriesBuffer;
use crate::types::Emotion;
use crate::ui::theme::emotion_color;

// Headroom added below/above the combined count range
pub const Y_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: Color,
    pub marker: Marker,
}

impl SeriesStyle {
    pub fn for_emotion(e: Emotion) -> Self {
        Self {
            color: emotion_color(e),
            marker: Marker::Braille,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Anything the chart can draw onto.
pub trait DrawSurface {
    type Series: Copy;

    fn create_line_series(&mut self, label: &str, style: SeriesStyle) -> Self::Series;
    fn set_line_data(&mut self, series: Self::Series, points: Vec<(f64, f64)>);
    fn set_axis_limits(&mut self, limits: AxisLimits);
    fn recompute_limits(&mut self);
    fn draw_legend(&mut self);
}

pub struct RealtimeChart<S: DrawSurface> {
    surface: S,
    series: [S::Series; 5],
}

impl<S: DrawSurface> RealtimeChart<S> {
    pub fn new(mut surface: S) -> Self {
        let series = Emotion::ALL
            .map(|e| surface.create_line_series(e.label(), SeriesStyle::for_emotion(e)));
        surface.draw_legend();
        Self { surface, series }
    }

    /// Overwrite every series from the buffer and rescale both axes.
    /// The surface is left untouched when the buffer is empty.
    pub fn redraw(&mut self, buf: &RollingSeriesBuffer) -> Result<(), ChartError> {
        let (Some((x_min, x_max)), Some((y_min, y_max))) = (buf.x_bounds(), buf.y_bounds()) else {
            return Err(ChartError::EmptyBuffer);
        };

        for (e, series) in Emotion::ALL.into_iter().zip(self.series) {
            let points = buf
                .indices()
                .iter()
                .zip(buf.series(e))
                .map(|(&x, &y)| (x as f64, y as f64))
                .collect();
            self.surface.set_line_data(series, points);
        }

        self.surface.set_axis_limits(AxisLimits {
            x: [x_min as f64, x_max as f64],
            y: [y_min as f64 - Y_MARGIN, y_max as f64 + Y_MARGIN],
        });
        self.surface.draw_legend();
        self.surface.recompute_limits();
        Ok(())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<(f64, f64)>,
}

/// Retained plot state drawn by the terminal UI each frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartCanvas {
    pub series: Vec<LineSeries>,
    pub limits: Option<AxisLimits>,
    // Tight extent of all plotted points, refreshed by recompute_limits.
    // The UI falls back to it when no explicit limits were set.
    pub data_extent: Option<AxisLimits>,
    pub legend: bool,
}

impl ChartCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.points.is_empty())
    }
}

impl DrawSurface for ChartCanvas {
    type Series = usize;

    fn create_line_series(&mut self, label: &str, style: SeriesStyle) -> usize {
        self.series.push(LineSeries {
            label: label.to_string(),
            style,
            points: Vec::new(),
        });
        self.series.len() - 1
    }

    fn set_line_data(&mut self, series: usize, points: Vec<(f64, f64)>) {
        if let Some(s) = self.series.get_mut(series) {
            s.points = points;
        }
    }

    fn set_axis_limits(&mut self, limits: AxisLimits) {
        self.limits = Some(limits);
    }

    fn recompute_limits(&mut self) {
        let mut pts = self.series.iter().flat_map(|s| s.points.iter());
        self.data_extent = pts.next().map(|&(x0, y0)| {
            let first = AxisLimits {
                x: [x0, x0],
                y: [y0, y0],
            };
            pts.fold(first, |acc, &(x, y)| AxisLimits {
                x: [acc.x[0].min(x), acc.x[1].max(x)],
                y: [acc.y[0].min(y), acc.y[1].max(y)],
            })
        });
    }

    fn draw_legend(&mut self) {
        self.legend = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Records every call so tests can assert on what the chart did.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        canvas: ChartCanvas,
    }

    impl DrawSurface for Recorder {
        type Series = usize;

        fn create_line_series(&mut self, label: &str, style: SeriesStyle) -> usize {
            self.calls.push(format!("create:{label}"));
            self.canvas.create_line_series(label, style)
        }
        fn set_line_data(&mut self, series: usize, points: Vec<(f64, f64)>) {
            self.calls.push(format!("data:{series}"));
            self.canvas.set_line_data(series, points);
        }
        fn set_axis_limits(&mut self, limits: AxisLimits) {
            self.calls.push("limits".into());
            self.canvas.set_axis_limits(limits);
        }
        fn recompute_limits(&mut self) {
            self.calls.push("relim".into());
            self.canvas.recompute_limits();
        }
        fn draw_legend(&mut self) {
            self.calls.push("legend".into());
            self.canvas.draw_legend();
        }
    }

    #[test]
    fn creates_five_labeled_series_and_legend() {
        let chart = RealtimeChart::new(Recorder::default());
        assert_eq!(
            chart.surface().calls,
            [
                "create:Neutral",
                "create:Happy",
                "create:Sad",
                "create:Surprised",
                "create:Anger",
                "legend"
            ]
        );
        let styles: Vec<Color> = chart
            .surface()
            .canvas
            .series
            .iter()
            .map(|s| s.style.color)
            .collect();
        let expected: Vec<Color> = Emotion::ALL.iter().map(|&e| emotion_color(e)).collect();
        assert_eq!(styles, expected);
    }

    #[test]
    fn redraw_on_empty_buffer_leaves_surface_alone() {
        let mut chart = RealtimeChart::new(Recorder::default());
        let before = chart.surface().calls.len();
        let buf = RollingSeriesBuffer::new(20).unwrap();
        assert!(matches!(chart.redraw(&buf), Err(ChartError::EmptyBuffer)));
        assert_eq!(chart.surface().calls.len(), before);
        assert_eq!(chart.surface().canvas.limits, None);
    }

    #[test]
    fn single_sample_bounds() {
        let mut chart = RealtimeChart::new(ChartCanvas::new());
        let mut buf = RollingSeriesBuffer::new(20).unwrap();
        buf.add(1, 5, 5, 5, 5, 5);
        chart.redraw(&buf).unwrap();
        let lim = chart.surface().limits.unwrap();
        assert_eq!(lim.x, [1.0, 1.0]);
        assert_eq!(lim.y, [0.0, 10.0]);
        assert!(chart.surface().legend);
    }

    #[test]
    fn series_follow_buffer_axes() {
        let mut chart = RealtimeChart::new(ChartCanvas::new());
        let mut buf = RollingSeriesBuffer::new(2).unwrap();
        buf.add(1, 1, 2, 3, 4, 5);
        buf.add(2, 6, 7, 8, 9, -3);
        buf.add(3, 0, 0, 0, 30, 1);
        chart.redraw(&buf).unwrap();

        let canvas = chart.surface();
        assert_eq!(canvas.series[0].points, vec![(2.0, 6.0), (3.0, 0.0)]);
        assert_eq!(canvas.series[4].points, vec![(2.0, -3.0), (3.0, 1.0)]);
        let lim = canvas.limits.unwrap();
        assert_eq!(lim.x, [2.0, 3.0]);
        assert_eq!(lim.y, [-8.0, 35.0]);
        let extent = canvas.data_extent.unwrap();
        assert_eq!(extent.y, [-3.0, 30.0]);
    }

    #[test]
    fn redraw_is_idempotent() {
        let mut chart = RealtimeChart::new(ChartCanvas::new());
        let mut buf = RollingSeriesBuffer::new(5).unwrap();
        for i in 1..=7 {
            buf.add(i, i, i * 2, 10 - i, 3, 0);
        }
        chart.redraw(&buf).unwrap();
        let first = chart.surface().clone();
        chart.redraw(&buf).unwrap();
        assert_eq!(chart.surface(), &first);
    }

    #[test]
    fn redraw_overwrites_rather_than_appends() {
        let mut chart = RealtimeChart::new(Recorder::default());
        let mut buf = RollingSeriesBuffer::new(3).unwrap();
        buf.add(1, 1, 1, 1, 1, 1);
        chart.redraw(&buf).unwrap();
        buf.add(2, 2, 2, 2, 2, 2);
        chart.redraw(&buf).unwrap();
        for s in &chart.surface().canvas.series {
            assert_eq!(s.points.len(), 2);
        }
        let tail: Vec<&str> = chart
            .surface()
            .calls
            .iter()
            .rev()
            .take(8)
            .map(String::as_str)
            .collect();
        assert_eq!(
            tail,
            ["relim", "legend", "limits", "data:4", "data:3", "data:2", "data:1", "data:0"]
        );
    }
}
