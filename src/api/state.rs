use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{ChartData, LineSeries, PrimaryAxis, Viewport, VisibleWindow};
use crate::error::{ChartError, ChartResult};

/// CSS-pixel sizes of the chart's surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width_px: u32,
    pub main_height_px: u32,
    pub slider_height_px: u32,
}

impl ChartLayout {
    pub fn new(width_px: u32, main_height_px: u32, slider_height_px: u32) -> ChartResult<Self> {
        let layout = Self {
            width_px,
            main_height_px,
            slider_height_px,
        };
        if !layout.main_viewport().is_valid() {
            return Err(ChartError::InvalidViewport {
                width: width_px,
                height: main_height_px,
            });
        }
        if !layout.slider_viewport().is_valid() {
            return Err(ChartError::InvalidViewport {
                width: width_px,
                height: slider_height_px,
            });
        }
        Ok(layout)
    }

    #[must_use]
    pub fn main_viewport(self) -> Viewport {
        Viewport::new(self.width_px, self.main_height_px)
    }

    #[must_use]
    pub fn slider_viewport(self) -> Viewport {
        Viewport::new(self.width_px, self.slider_height_px)
    }
}

/// Canonical chart state.
///
/// An immutable value: every change produces a new state through the
/// `with_*` methods. Data is shared behind `Arc`, so clones are cheap and
/// unchanged columns keep their identity across updates.
#[derive(Debug, Clone)]
pub struct ChartState {
    pub primary_axis: Arc<PrimaryAxis>,
    pub series: Arc<[LineSeries]>,
    pub window: VisibleWindow,
    pub hover: Option<usize>,
    pub dark_theme: bool,
    pub layout: ChartLayout,
}

impl ChartState {
    #[must_use]
    pub fn new(data: ChartData, window: VisibleWindow, layout: ChartLayout) -> Self {
        Self {
            primary_axis: Arc::new(data.primary_axis),
            series: data.series.into(),
            window,
            hover: None,
            dark_theme: false,
            layout,
        }
    }

    #[must_use]
    pub fn with_window(&self, window: VisibleWindow) -> Self {
        Self {
            window,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_hover(&self, hover: Option<usize>) -> Self {
        Self {
            hover,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_dark_theme(&self, dark_theme: bool) -> Self {
        Self {
            dark_theme,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_layout(&self, layout: ChartLayout) -> Self {
        Self {
            layout,
            ..self.clone()
        }
    }

    /// Flips `hidden` on series `index`, producing a new series list.
    ///
    /// Returns `None` when `index` is out of range.
    #[must_use]
    pub fn with_series_toggled(&self, index: usize) -> Option<Self> {
        let target = self.series.get(index)?;
        let toggled = target.with_hidden(!target.hidden);
        let series: Arc<[LineSeries]> = self
            .series
            .iter()
            .enumerate()
            .map(|(position, series)| {
                if position == index {
                    toggled.clone()
                } else {
                    series.clone()
                }
            })
            .collect();
        Some(Self {
            series,
            ..self.clone()
        })
    }

    /// Series that take part in value bounds and drawing.
    pub fn visible_series(&self) -> impl Iterator<Item = &LineSeries> {
        self.series.iter().filter(|series| !series.hidden)
    }

    /// Inclusive sample range shown by the main chart.
    #[must_use]
    pub fn index_range(&self) -> (usize, usize) {
        self.window.index_range(self.primary_axis.len())
    }

    /// Domain `(min_x, max_x)` shown by the main chart.
    #[must_use]
    pub fn domain_range(&self) -> (f64, f64) {
        let (first, last) = self.primary_axis.bounds();
        self.window.domain_range(first, last)
    }
}
