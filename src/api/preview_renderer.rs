use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{AnimatedScalar, FadingGroup, LineSeries, PixelRatio, PrimaryAxis, Viewport};
use crate::render::{DrawCommand, DrawLayer, PolylinePrimitive, RenderFrame, SurfaceKind};

use super::chart_frame::value_bounds;
use super::render_pipeline::non_zero;
use super::{ChartState, RenderMetrics};

#[derive(Debug, Clone)]
struct PreviewTarget {
    primary_axis: Arc<PrimaryAxis>,
    series: Arc<[LineSeries]>,
    /// Surface size in device pixels.
    viewport: Viewport,
}

/// Overview strip renderer: every series across the whole domain, with the
/// same value-axis easing and series cross-fade as the main chart.
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    pixel_ratio: PixelRatio,
    duration_ms: f64,
    padding_px: f64,
    target: Option<PreviewTarget>,
    min_y: AnimatedScalar,
    y_scale: AnimatedScalar,
    series: FadingGroup<LineSeries>,
    render_time: f64,
    last_timestamp: Option<f64>,
}

impl PreviewRenderer {
    #[must_use]
    pub fn new(pixel_ratio: PixelRatio, duration_ms: f64, padding_px: f64) -> Self {
        Self {
            pixel_ratio,
            duration_ms,
            padding_px,
            target: None,
            min_y: AnimatedScalar::new(0.0),
            y_scale: AnimatedScalar::new(0.0),
            series: FadingGroup::new(),
            render_time: 0.0,
            last_timestamp: None,
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.render_time > 0.0 && self.target.is_some()
    }

    #[must_use]
    pub fn series(&self) -> &FadingGroup<LineSeries> {
        &self.series
    }

    #[must_use]
    pub fn min_y(&self) -> &AnimatedScalar {
        &self.min_y
    }

    #[must_use]
    pub fn y_scale(&self) -> &AnimatedScalar {
        &self.y_scale
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: PixelRatio) {
        self.pixel_ratio = pixel_ratio;
    }

    /// Takes `state` as the new target when its data or surface size changed.
    ///
    /// Data identity is compared by pointer, so window and hover updates are
    /// skipped without scanning the series. Returns `true` when the target
    /// was replaced.
    pub fn render(&mut self, state: &ChartState) -> bool {
        let viewport = state.layout.slider_viewport().to_device(self.pixel_ratio);
        let unchanged = self.target.as_ref().is_some_and(|target| {
            Arc::ptr_eq(&target.primary_axis, &state.primary_axis)
                && Arc::ptr_eq(&target.series, &state.series)
                && target.viewport == viewport
        });
        if unchanged {
            trace!("preview target unchanged");
            return false;
        }

        let (min, max) =
            value_bounds(state.visible_series(), 0, usize::MAX).unwrap_or((0.0, 0.0));
        self.min_y.set_target(min);
        self.y_scale.set_target(max - min);
        self.series.put_values(state.visible_series().cloned());
        self.target = Some(PreviewTarget {
            primary_axis: Arc::clone(&state.primary_axis),
            series: Arc::clone(&state.series),
            viewport,
        });
        self.render_time = self.duration_ms;
        debug!(min_y = min, max_y = max, "preview target");
        true
    }

    /// Runs one scheduling quantum at `timestamp_ms`.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<RenderFrame> {
        let target = self.target.as_ref()?;
        let diff = self
            .last_timestamp
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        self.last_timestamp = Some(timestamp_ms);

        if self.render_time <= 0.0 {
            return None;
        }

        let step = diff / self.duration_ms;
        self.min_y.step(step);
        self.y_scale.step(step);
        self.series.step(step);
        self.render_time -= diff;

        if !target.viewport.is_valid() {
            return None;
        }
        Some(self.compose(target))
    }

    fn compose(&self, target: &PreviewTarget) -> RenderFrame {
        let width = f64::from(target.viewport.width);
        let height = f64::from(target.viewport.height);
        let padding = self.pixel_ratio.px(self.padding_px);
        let metrics = RenderMetrics::scaled(self.pixel_ratio);

        let axis = target.primary_axis.data();
        let (min_x, max_x) = target.primary_axis.bounds();
        let x_scale = non_zero(max_x - min_x);
        let min_y = self.min_y.get();
        let y_scale = non_zero(self.y_scale.get());

        let mut out = RenderFrame::new(SurfaceKind::Preview, target.viewport);
        out.push(DrawLayer::Clear, DrawCommand::Clear);

        for (series, fading) in self.series.iter() {
            let points: Vec<(f64, f64)> = axis
                .iter()
                .zip(series.data())
                .map(|(&x, &y)| {
                    let cx = width * ((x - min_x) / x_scale);
                    let cy = (height - padding) * (1.0 - (y - min_y) / y_scale) + padding;
                    (cx, cy)
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            out.push(
                DrawLayer::Series,
                DrawCommand::Polyline(PolylinePrimitive {
                    points,
                    stroke_width: metrics.preview_stroke,
                    color: series.color.fade(fading.opacity),
                }),
            );
        }

        out
    }
}
