//! Small UI helpers: axis padding and tick labels.

// ratatui can't place points on a zero-width axis; widen it for display only
pub fn display_bounds(b: [f64; 2], pad: f64) -> [f64; 2] {
    if b[1] > b[0] {
        b
    } else {
        [b[0] - pad, b[0] + pad]
    }
}

/// Evenly spaced tick labels from `lo` to `hi`. Whole numbers unless the
/// step is below one, then one decimal.
pub fn axis_labels(b: [f64; 2], n: usize) -> Vec<String> {
    let n = n.max(2);
    let step = (b[1] - b[0]) / (n - 1) as f64;
    let prec = if step > 0.0 && step < 1.0 { 1 } else { 0 };
    (0..n)
        .map(|i| format!("{:.*}", prec, b[0] + step * i as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_axis_is_padded() {
        assert_eq!(display_bounds([1.0, 1.0], 0.5), [0.5, 1.5]);
        assert_eq!(display_bounds([2.0, 9.0], 0.5), [2.0, 9.0]);
    }

    #[test]
    fn labels_cover_range() {
        assert_eq!(axis_labels([0.0, 10.0], 3), ["0", "5", "10"]);
        assert_eq!(axis_labels([-5.0, 5.0], 1), ["-5", "5"]);
        assert_eq!(axis_labels([0.5, 1.5], 3), ["0.5", "1.0", "1.5"]);
    }
}
