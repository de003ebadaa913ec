use std::sync::Arc;

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::{
    LineSeries, PrimaryAxis, Tick, TickSet, Viewport, time_ticks_with_spacing, value_ticks,
};

use super::{ChartConfig, ChartState};

/// Fully resolved render target of the main chart.
///
/// Built fresh from every state change and never mutated afterwards. The
/// pipeline animates toward its value bounds and tick sets; everything else
/// applies immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub primary_axis: Arc<PrimaryAxis>,
    pub series: Arc<[LineSeries]>,
    pub start_idx: usize,
    pub end_idx: usize,
    pub value_ticks: TickSet,
    pub time_ticks: Vec<Tick>,
    pub min_x: f64,
    pub x_scale: f64,
    pub min_y: f64,
    pub y_scale: f64,
    pub dark_theme: bool,
    pub padding_top_px: f64,
    pub padding_bottom_px: f64,
    pub hover: Option<usize>,
    /// Surface size in CSS pixels.
    pub viewport: Viewport,
}

impl ChartFrame {
    #[must_use]
    pub fn build(state: &ChartState, config: &ChartConfig) -> Self {
        let (start_idx, end_idx) = state.index_range();
        let (min_x, max_x) = state.domain_range();

        let (min_value, max_value) =
            value_bounds(state.visible_series(), start_idx, end_idx).unwrap_or((0.0, 0.0));
        let value_layout = value_ticks(min_value, max_value, config.value_tick_count);

        let viewport = state.layout.main_viewport();
        let time_ticks = time_ticks_with_spacing(
            min_x,
            max_x,
            f64::from(viewport.width),
            config.time_tick_spacing_px,
        );

        debug!(
            start_idx,
            end_idx,
            min_y = value_layout.min,
            max_y = value_layout.max,
            time_ticks = time_ticks.len(),
            "main frame target"
        );

        Self {
            primary_axis: Arc::clone(&state.primary_axis),
            series: Arc::clone(&state.series),
            start_idx,
            end_idx,
            min_x,
            x_scale: max_x - min_x,
            min_y: value_layout.min,
            y_scale: value_layout.span(),
            value_ticks: value_layout.ticks,
            time_ticks,
            dark_theme: state.dark_theme,
            padding_top_px: config.padding_top_px,
            padding_bottom_px: config.padding_bottom_px,
            hover: state.hover,
            viewport,
        }
    }

    /// Series the frame asks to show; hidden ones fade out.
    pub fn visible_series(&self) -> impl Iterator<Item = &LineSeries> {
        self.series.iter().filter(|series| !series.hidden)
    }
}

/// `(min, max)` over samples `start_idx..=end_idx` of `series`.
///
/// Returns `None` when there is no sample to look at (no series, or a range
/// outside the data).
pub fn value_bounds<'a>(
    series: impl IntoIterator<Item = &'a LineSeries>,
    start_idx: usize,
    end_idx: usize,
) -> Option<(f64, f64)> {
    let mut bounds: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for line in series {
        let data = line.data();
        if data.is_empty() || start_idx >= data.len() {
            continue;
        }
        let end = end_idx.min(data.len() - 1);
        for &value in &data[start_idx..=end] {
            let value = OrderedFloat(value);
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
    }
    bounds.map(|(min, max)| (min.into_inner(), max.into_inner()))
}
