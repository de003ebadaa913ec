use tracing::trace;

use crate::core::{AnimatedScalar, FadingGroup, LineSeries, PixelRatio, Tick};
use crate::render::{
    CirclePrimitive, Color, CompositeMode, DrawCommand, DrawLayer, GradientStop, LinePrimitive,
    LinearGradient, PolylinePrimitive, RectPrimitive, RenderFrame, SurfaceKind, TextHAlign,
    TextPrimitive,
};

use super::{ChartFrame, RenderMetrics, ThemePalette};

/// Animation clock and draw-list builder of the main chart.
///
/// `animate_to` installs a new target and restarts the countdown; each
/// `tick` while the countdown is positive advances every animated value by
/// the elapsed time and emits a full frame. Once the countdown runs out,
/// ticks emit nothing until the next target arrives.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    pixel_ratio: PixelRatio,
    short_duration_ms: f64,
    long_duration_ms: f64,
    current: Option<ChartFrame>,
    min_y: AnimatedScalar,
    y_scale: AnimatedScalar,
    series: FadingGroup<LineSeries>,
    value_ticks: FadingGroup<Tick>,
    time_ticks: FadingGroup<Tick>,
    render_time: f64,
    last_timestamp: Option<f64>,
}

impl RenderPipeline {
    #[must_use]
    pub fn new(pixel_ratio: PixelRatio, short_duration_ms: f64, long_duration_ms: f64) -> Self {
        Self {
            pixel_ratio,
            short_duration_ms,
            long_duration_ms,
            current: None,
            min_y: AnimatedScalar::new(0.0),
            y_scale: AnimatedScalar::new(0.0),
            series: FadingGroup::new(),
            value_ticks: FadingGroup::new(),
            time_ticks: FadingGroup::new(),
            render_time: 0.0,
            last_timestamp: None,
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.render_time > 0.0 && self.current.is_some()
    }

    #[must_use]
    pub fn current_frame(&self) -> Option<&ChartFrame> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn min_y(&self) -> &AnimatedScalar {
        &self.min_y
    }

    #[must_use]
    pub fn y_scale(&self) -> &AnimatedScalar {
        &self.y_scale
    }

    #[must_use]
    pub fn series(&self) -> &FadingGroup<LineSeries> {
        &self.series
    }

    #[must_use]
    pub fn value_ticks(&self) -> &FadingGroup<Tick> {
        &self.value_ticks
    }

    #[must_use]
    pub fn time_ticks(&self) -> &FadingGroup<Tick> {
        &self.time_ticks
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> PixelRatio {
        self.pixel_ratio
    }

    /// Applies a new pixel ratio and schedules a redraw at the new size.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: PixelRatio) {
        self.pixel_ratio = pixel_ratio;
        if self.current.is_some() {
            self.render_time = self.long_duration_ms;
        }
    }

    pub fn animate_to(&mut self, frame: ChartFrame) {
        self.min_y.set_target(frame.min_y);
        self.y_scale.set_target(frame.y_scale);
        self.series.put_values(frame.visible_series().cloned());
        self.value_ticks.put_values(frame.value_ticks.iter().cloned());
        self.time_ticks.put_values(frame.time_ticks.iter().cloned());
        self.current = Some(frame);
        self.render_time = self.long_duration_ms;
    }

    /// Runs one scheduling quantum at `timestamp_ms`.
    ///
    /// Returns the frame to present, or `None` while idle.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<RenderFrame> {
        let diff = self
            .last_timestamp
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        self.last_timestamp = Some(timestamp_ms);

        if self.render_time <= 0.0 {
            return None;
        }

        let step = diff / self.short_duration_ms;
        let long_step = diff / self.long_duration_ms;
        self.min_y.step(step);
        self.y_scale.step(step);
        self.series.step(step);
        self.value_ticks.step(step);
        self.time_ticks.step(long_step);
        self.render_time -= diff;

        let frame = self.current.as_ref()?;
        let viewport = frame.viewport.to_device(self.pixel_ratio);
        if !viewport.is_valid() {
            trace!(width = viewport.width, height = viewport.height, "main surface has no area");
            return None;
        }

        Some(self.compose(frame, f64::from(viewport.width), f64::from(viewport.height)))
    }

    fn compose(&self, frame: &ChartFrame, width: f64, height: f64) -> RenderFrame {
        let ratio = self.pixel_ratio;
        let metrics = RenderMetrics::scaled(ratio);
        let palette = ThemePalette::for_theme(frame.dark_theme);
        let padding_top = ratio.px(frame.padding_top_px);
        let padding_bottom = ratio.px(frame.padding_bottom_px);

        let projection = Projection {
            width,
            min_x: frame.min_x,
            x_scale: non_zero(frame.x_scale),
            min_y: self.min_y.get(),
            y_scale: non_zero(self.y_scale.get()),
            plot_height: height - padding_top - padding_bottom,
            padding_top,
        };

        let viewport = frame.viewport.to_device(ratio);
        let mut out = RenderFrame::new(SurfaceKind::Main, viewport);
        out.push(DrawLayer::Clear, DrawCommand::Clear);

        for (tick, fading) in self.value_ticks.iter() {
            let cy = projection.y(tick.position);
            out.push(
                DrawLayer::Grid,
                DrawCommand::Line(LinePrimitive::new(
                    0.0,
                    cy,
                    width,
                    cy,
                    metrics.grid_stroke,
                    palette.grid.fade(fading.opacity),
                )),
            );
        }

        let axis = frame.primary_axis.data();
        for (series, fading) in self.series.iter() {
            let points: Vec<(f64, f64)> = (frame.start_idx..=frame.end_idx)
                .filter_map(|index| {
                    let x = axis.get(index)?;
                    let y = series.value_at(index)?;
                    Some((projection.x(*x), projection.y(y)))
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            out.push(
                DrawLayer::Series,
                DrawCommand::Polyline(PolylinePrimitive {
                    points,
                    stroke_width: metrics.series_stroke,
                    color: series.color.fade(fading.opacity),
                }),
            );
        }

        if let Some(x_value) = frame.hover.and_then(|index| axis.get(index).copied()) {
            let cx = projection.x(x_value);
            out.push(
                DrawLayer::Hover,
                DrawCommand::Line(LinePrimitive::new(
                    cx,
                    padding_top,
                    cx,
                    height - padding_bottom - padding_top,
                    metrics.crosshair_stroke,
                    palette.crosshair,
                )),
            );

            for (series, fading) in self.series.iter() {
                let Some(y_value) = frame.hover.and_then(|index| series.value_at(index)) else {
                    continue;
                };
                // Markers of a series fading out fade with its line.
                let cy = projection.y(y_value);
                let radius = metrics.marker_radius;
                out.push(
                    DrawLayer::Hover,
                    DrawCommand::ClearRect(RectPrimitive::new(
                        cx - radius,
                        cy - radius,
                        radius * 2.0,
                        radius * 2.0,
                    )),
                );
                out.push(
                    DrawLayer::Hover,
                    DrawCommand::Circle(CirclePrimitive {
                        cx,
                        cy,
                        radius,
                        stroke_width: metrics.series_stroke,
                        color: series.color.fade(fading.opacity),
                    }),
                );
            }
        }

        for (tick, fading) in self.value_ticks.iter() {
            let cy = projection.y(tick.position);
            out.push(
                DrawLayer::ValueLabels,
                DrawCommand::Text(TextPrimitive::new(
                    tick.label.clone(),
                    0.0,
                    cy - metrics.value_label_lift,
                    metrics.font_size,
                    palette.labels.fade(fading.opacity),
                    TextHAlign::Left,
                )),
            );
        }

        let label_y = height - padding_bottom + metrics.time_label_drop;
        for (tick, fading) in self.time_ticks.iter() {
            out.push(
                DrawLayer::TimeLabels,
                DrawCommand::Text(TextPrimitive::new(
                    tick.label.clone(),
                    projection.x(tick.position),
                    label_y,
                    metrics.font_size,
                    palette.labels.fade(fading.opacity),
                    TextHAlign::Center,
                )),
            );
        }

        out.push(DrawLayer::EdgeFade, edge_fade(width, height, padding_top));
        out
    }
}

/// Mask that keeps content fully opaque below the top padding and fades it
/// out toward the top edge.
fn edge_fade(width: f64, height: f64, padding_top: f64) -> DrawCommand {
    let solid_from = (padding_top / height).clamp(0.0, 1.0);
    DrawCommand::GradientFill {
        rect: RectPrimitive::new(0.0, 0.0, width, height),
        gradient: LinearGradient {
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: height,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: Color::TRANSPARENT,
                },
                GradientStop {
                    offset: solid_from,
                    color: Color::WHITE,
                },
                GradientStop {
                    offset: 1.0,
                    color: Color::WHITE,
                },
            ],
        },
        composite: CompositeMode::DestinationIn,
    }
}

/// Zero (or non-finite) spans would collapse the projection; fall back to 1.
pub(super) fn non_zero(scale: f64) -> f64 {
    if scale == 0.0 || !scale.is_finite() {
        1.0
    } else {
        scale
    }
}

/// Domain to device-pixel mapping of the main plot area.
#[derive(Debug, Clone, Copy)]
struct Projection {
    width: f64,
    min_x: f64,
    x_scale: f64,
    min_y: f64,
    y_scale: f64,
    plot_height: f64,
    padding_top: f64,
}

impl Projection {
    fn x(self, value: f64) -> f64 {
        self.width * (value - self.min_x) / self.x_scale
    }

    fn y(self, value: f64) -> f64 {
        (1.0 - (value - self.min_y) / self.y_scale) * self.plot_height + self.padding_top
    }
}
