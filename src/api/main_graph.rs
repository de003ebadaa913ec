use std::any::Any;

use tracing::trace;

use crate::core::{PixelRatio, nearest_index};
use crate::error::ChartResult;
use crate::interaction::PointerEvent;
use crate::render::Renderer;

use super::{ChartConfig, ChartEvent, ChartFrame, ChartModule, ChartState, RenderPipeline, TooltipModel};

pub const MAIN_GRAPH_MODULE: &str = "main-graph";

/// Main chart surface: hover tracking, tooltip and the animated plot.
#[derive(Debug, Clone)]
pub struct MainGraphModule {
    config: ChartConfig,
    pipeline: RenderPipeline,
    tooltip: Option<TooltipModel>,
    mounted: bool,
}

impl MainGraphModule {
    #[must_use]
    pub fn new(config: ChartConfig, pixel_ratio: PixelRatio) -> Self {
        Self {
            pipeline: RenderPipeline::new(pixel_ratio, config.animation_ms, config.long_animation_ms),
            config,
            tooltip: None,
            mounted: false,
        }
    }

    #[must_use]
    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipModel> {
        self.tooltip.as_ref()
    }

    /// Resolves a pointer position to the nearest visible sample.
    fn hover_index(state: &ChartState, pointer: PointerEvent) -> Option<usize> {
        let x = pointer.hover_x()?;
        let width = f64::from(state.layout.width_px);
        if width <= 0.0 {
            return None;
        }

        let fraction = (x / width).clamp(0.0, 1.0);
        let (min_x, max_x) = state.domain_range();
        let value = fraction * (max_x - min_x) + min_x;
        let (start_idx, end_idx) = state.index_range();
        nearest_index(state.primary_axis.data(), value, start_idx, end_idx)
    }
}

impl ChartModule for MainGraphModule {
    fn name(&self) -> &str {
        MAIN_GRAPH_MODULE
    }

    fn on_mount(&mut self, _state: &ChartState) {
        self.mounted = true;
    }

    fn on_unmount(&mut self) {
        self.mounted = false;
        self.tooltip = None;
    }

    fn render(&mut self, state: &ChartState) {
        if !self.mounted {
            return;
        }
        self.tooltip = TooltipModel::from_state(state, self.config.tooltip_width_px);
        self.pipeline
            .animate_to(ChartFrame::build(state, &self.config));
    }

    fn handle_event(&mut self, event: &ChartEvent, state: &ChartState) -> Option<ChartState> {
        match *event {
            ChartEvent::MainPointerMove(pointer) => {
                let Some(index) = Self::hover_index(state, pointer) else {
                    trace!(?pointer, "hover pointer ignored");
                    return None;
                };
                (state.hover != Some(index)).then(|| state.with_hover(Some(index)))
            }
            ChartEvent::MainPointerLeave => {
                state.hover.is_some().then(|| state.with_hover(None))
            }
            ChartEvent::PixelRatioChanged(pixel_ratio) => {
                self.pipeline.set_pixel_ratio(pixel_ratio);
                None
            }
            _ => None,
        }
    }

    fn advance(&mut self, timestamp_ms: f64, renderer: &mut dyn Renderer) -> ChartResult<()> {
        match self.pipeline.tick(timestamp_ms) {
            Some(frame) => renderer.render(&frame),
            None => Ok(()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::MainGraphModule;
    use crate::api::{ChartConfig, ChartEvent, ChartLayout, ChartModule, ChartState};
    use crate::core::{ChartData, LineSeries, PixelRatio, PrimaryAxis, SeriesId, VisibleWindow};
    use crate::interaction::PointerEvent;
    use crate::render::Color;

    fn state() -> ChartState {
        let data = ChartData {
            primary_axis: PrimaryAxis::new((0..101).map(f64::from).collect()).expect("axis"),
            series: vec![LineSeries::new(
                SeriesId::new("y0"),
                "a",
                Color::RED,
                vec![1.0; 101],
            )],
        };
        let window = VisibleWindow::new(0.5, 1.0).expect("window");
        ChartState::new(data, window, ChartLayout::new(500, 300, 50).expect("layout"))
    }

    fn module() -> MainGraphModule {
        let mut module = MainGraphModule::new(ChartConfig::default(), PixelRatio::default());
        module.on_mount(&state());
        module
    }

    #[test]
    fn pointer_maps_to_nearest_visible_sample() {
        let mut module = module();
        let state = state();

        let next = module
            .handle_event(&ChartEvent::MainPointerMove(PointerEvent::mouse(250.0)), &state)
            .expect("hover set");
        assert_eq!(next.hover, Some(75));

        let next = module
            .handle_event(&ChartEvent::MainPointerMove(PointerEvent::mouse(-40.0)), &state)
            .expect("hover set");
        assert_eq!(next.hover, Some(50));
    }

    #[test]
    fn unchanged_hover_is_not_written() {
        let mut module = module();
        let state = state().with_hover(Some(75));
        let event = ChartEvent::MainPointerMove(PointerEvent::mouse(250.0));
        assert!(module.handle_event(&event, &state).is_none());
    }

    #[test]
    fn scrolling_touch_and_leave() {
        let mut module = module();
        let state = state();
        let scrolling = ChartEvent::MainPointerMove(PointerEvent::touch(250.0, false));
        assert!(module.handle_event(&scrolling, &state).is_none());

        let hovered = state.with_hover(Some(60));
        let cleared = module
            .handle_event(&ChartEvent::MainPointerLeave, &hovered)
            .expect("hover cleared");
        assert_eq!(cleared.hover, None);
        assert!(module.handle_event(&ChartEvent::MainPointerLeave, &state).is_none());
    }

    #[test]
    fn render_targets_pipeline_and_tooltip() {
        let mut module = module();
        module.render(&state().with_hover(Some(80)));
        assert!(module.pipeline().is_animating());
        assert!(module.tooltip().is_some());

        module.render(&state());
        assert!(module.tooltip().is_none());
    }
}
