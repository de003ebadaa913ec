use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Smallest window span, as a fraction of the domain.
pub const MIN_WINDOW_SPAN: f64 = 0.1;

/// Fractional `[start, end]` slice of the domain shown by the main chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub start: f64,
    pub end: f64,
}

impl VisibleWindow {
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(
                "window bounds must be finite".to_owned(),
            ));
        }
        if start < 0.0 || end > 1.0 || start >= end {
            return Err(ChartError::InvalidData(format!(
                "window must satisfy 0 <= start < end <= 1, got [{start}, {end}]"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// Inclusive sample range covered by the window over `len` samples.
    ///
    /// `[floor(len * start), ceil(len * end)]`, with the end clamped to the
    /// last sample. Empty data maps to `(0, 0)`.
    #[must_use]
    pub fn index_range(self, len: usize) -> (usize, usize) {
        if len == 0 {
            return (0, 0);
        }
        let last = len - 1;
        let count = len as f64;
        let start = ((count * self.start).floor().max(0.0) as usize).min(last);
        let end = ((count * self.end).ceil().max(0.0) as usize).min(last);
        (start, end.max(start))
    }

    /// Domain coordinates `(min_x, max_x)` of the window over `[first, last]`.
    #[must_use]
    pub fn domain_range(self, first: f64, last: f64) -> (f64, f64) {
        let span = last - first;
        (first + span * self.start, first + span * self.end)
    }
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self {
            start: 0.4,
            end: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VisibleWindow;

    #[test]
    fn default_window_over_hundred_samples() {
        assert_eq!(VisibleWindow::default().index_range(100), (40, 80));
    }

    #[test]
    fn full_window_clamps_to_last_sample() {
        let window = VisibleWindow::new(0.0, 1.0).expect("valid window");
        assert_eq!(window.index_range(10), (0, 9));
        assert_eq!(window.index_range(0), (0, 0));
    }

    #[test]
    fn invalid_windows_are_rejected() {
        assert!(VisibleWindow::new(0.5, 0.5).is_err());
        assert!(VisibleWindow::new(-0.1, 0.5).is_err());
        assert!(VisibleWindow::new(0.2, 1.1).is_err());
    }

    #[test]
    fn domain_range_scales_window_over_axis() {
        let window = VisibleWindow::new(0.25, 0.75).expect("valid window");
        assert_eq!(window.domain_range(100.0, 500.0), (200.0, 400.0));
    }
}
