//! End-to-end checks of the buffer + chart contract through the public API.
use gazetop::chart::{ChartCanvas, RealtimeChart};
use gazetop::error::ChartError;
use gazetop::feed::EmotionFeed;
use gazetop::history::RollingSeriesBuffer;
use gazetop::types::Emotion;

fn indices(b: &RollingSeriesBuffer) -> Vec<i64> {
    b.indices().iter().copied().collect()
}

#[test]
fn oldest_sample_is_evicted_at_capacity() {
    let mut b = RollingSeriesBuffer::new(3).unwrap();
    b.add(1, 10, 0, 0, 0, 0);
    b.add(2, 5, 20, 0, 0, 0);
    b.add(3, 1, 1, 30, 0, 0);
    b.add(4, 2, 2, 2, 40, 0);
    assert_eq!(indices(&b), vec![2, 3, 4]);
    assert!(!b.samples().any(|s| s.index == 1));
}

#[test]
fn single_sample_chart_bounds() {
    let mut b = RollingSeriesBuffer::new(20).unwrap();
    b.add(1, 5, 5, 5, 5, 5);
    let mut chart = RealtimeChart::new(ChartCanvas::new());
    chart.redraw(&b).unwrap();
    let lim = chart.surface().limits.unwrap();
    assert_eq!((lim.x[0], lim.x[1]), (1.0, 1.0));
    assert_eq!((lim.y[0], lim.y[1]), (0.0, 10.0));
}

#[test]
fn empty_redraw_fails_without_mutation() {
    let b = RollingSeriesBuffer::new(20).unwrap();
    let mut chart = RealtimeChart::new(ChartCanvas::new());
    let before = chart.surface().clone();
    assert!(matches!(chart.redraw(&b), Err(ChartError::EmptyBuffer)));
    assert_eq!(chart.surface(), &before);
}

#[test]
fn capacity_one_tracks_latest() {
    let mut b = RollingSeriesBuffer::new(1).unwrap();
    for i in 1..=3 {
        b.add(i, i, i, i, i, i);
        assert_eq!(b.len(), 1);
        assert_eq!(indices(&b), vec![i]);
    }
}

#[test]
fn axis_bounds_track_window_after_every_redraw() {
    let mut feed = EmotionFeed::new(4).unwrap();
    let mut chart = RealtimeChart::new(ChartCanvas::new());
    let payloads = [
        r#"{"neutral":3,"happy":"1","sad":0,"surprised":0,"anger":0}"#,
        r#"{"neutral":25,"happy":"2","sad":1,"surprised":0,"anger":0}"#,
        r#"{"neutral":4,"happy":"2","sad":1,"surprised":-2,"anger":0}"#,
        r#"{"neutral":4,"happy":"9","sad":1,"surprised":1,"anger":0}"#,
        r#"{"neutral":4,"happy":"3","sad":1,"surprised":1,"anger":6}"#,
        r#"{"neutral":4,"happy":"3","sad":1,"surprised":1,"anger":6}"#,
    ];
    for p in payloads {
        feed.on_message("retail/traffic", p.as_bytes()).unwrap();
        chart.redraw(feed.buffer()).unwrap();

        let b = feed.buffer();
        let xs: Vec<i64> = indices(b);
        let ys: Vec<i64> = Emotion::ALL
            .iter()
            .flat_map(|&e| b.series(e).iter().copied())
            .collect();
        let lim = chart.surface().limits.unwrap();
        assert_eq!(lim.x, [*xs.iter().min().unwrap() as f64, *xs.iter().max().unwrap() as f64]);
        assert_eq!(
            lim.y,
            [
                *ys.iter().min().unwrap() as f64 - 5.0,
                *ys.iter().max().unwrap() as f64 + 5.0
            ]
        );
    }
    // Window now holds samples 3..=6; the spike of 25 in sample 2 is gone
    assert_eq!(indices(feed.buffer()), vec![3, 4, 5, 6]);
    assert_eq!(chart.surface().limits.unwrap().y, [-7.0, 14.0]);
}
