use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::core::{PixelRatio, VisibleWindow};
use crate::error::ChartResult;
use crate::interaction::RangeSelector;
use crate::render::Renderer;

use super::{ChartConfig, ChartEvent, ChartModule, ChartState, PreviewRenderer};

pub const SLIDER_MODULE: &str = "slider";

/// Overlay geometry of the range selector, in percent of the strip width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderLayout {
    pub left_cover_width: f64,
    pub right_cover_width: f64,
    pub window_left: f64,
    pub window_width: f64,
    pub left_handle: f64,
    pub right_handle: f64,
}

impl SliderLayout {
    #[must_use]
    pub fn for_window(window: VisibleWindow) -> Self {
        Self {
            left_cover_width: window.start * 100.0,
            right_cover_width: (1.0 - window.end) * 100.0,
            window_left: window.start * 100.0,
            window_width: window.span() * 100.0,
            left_handle: window.start * 100.0,
            right_handle: window.end * 100.0,
        }
    }
}

/// Overview strip: preview plot plus the draggable window over it.
#[derive(Debug, Clone)]
pub struct SliderModule {
    preview: PreviewRenderer,
    selector: RangeSelector,
    layout: SliderLayout,
    mounted: bool,
}

impl SliderModule {
    #[must_use]
    pub fn new(config: &ChartConfig, pixel_ratio: PixelRatio) -> Self {
        Self {
            preview: PreviewRenderer::new(
                pixel_ratio,
                config.animation_ms,
                config.preview_padding_px,
            ),
            selector: RangeSelector::new(config.min_window_span),
            layout: SliderLayout::for_window(config.initial_window),
            mounted: false,
        }
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewRenderer {
        &self.preview
    }

    #[must_use]
    pub fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    #[must_use]
    pub fn layout(&self) -> SliderLayout {
        self.layout
    }
}

impl ChartModule for SliderModule {
    fn name(&self) -> &str {
        SLIDER_MODULE
    }

    fn on_mount(&mut self, _state: &ChartState) {
        self.mounted = true;
    }

    fn on_unmount(&mut self) {
        self.mounted = false;
        self.selector.pointer_up();
    }

    fn render(&mut self, state: &ChartState) {
        if !self.mounted {
            return;
        }
        self.preview.render(state);
        self.layout = SliderLayout::for_window(state.window);
    }

    fn handle_event(&mut self, event: &ChartEvent, state: &ChartState) -> Option<ChartState> {
        match *event {
            ChartEvent::SliderPointerDown { target, pointer } => {
                self.selector
                    .pointer_down(target, state.window, pointer.drag_x());
                None
            }
            ChartEvent::SliderPointerMove(pointer) => {
                let width = f64::from(state.layout.width_px);
                let window = self.selector.pointer_move(pointer.drag_x(), width)?;
                (window != state.window).then(|| state.with_window(window))
            }
            ChartEvent::SliderPointerUp => {
                self.selector.pointer_up();
                None
            }
            ChartEvent::PixelRatioChanged(pixel_ratio) => {
                self.preview.set_pixel_ratio(pixel_ratio);
                None
            }
            _ => None,
        }
    }

    fn advance(&mut self, timestamp_ms: f64, renderer: &mut dyn Renderer) -> ChartResult<()> {
        match self.preview.tick(timestamp_ms) {
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
    use approx::assert_abs_diff_eq;

    use super::{SliderLayout, SliderModule};
    use crate::api::{ChartConfig, ChartEvent, ChartLayout, ChartModule, ChartState};
    use crate::core::{ChartData, PixelRatio, PrimaryAxis, VisibleWindow};
    use crate::interaction::{DragTarget, PointerEvent};

    fn state() -> ChartState {
        let data = ChartData {
            primary_axis: PrimaryAxis::new((0..10).map(f64::from).collect()).expect("axis"),
            series: Vec::new(),
        };
        ChartState::new(
            data,
            VisibleWindow::default(),
            ChartLayout::new(200, 300, 50).expect("layout"),
        )
    }

    #[test]
    fn layout_tracks_window_percentages() {
        let layout = SliderLayout::for_window(VisibleWindow::new(0.25, 0.75).expect("window"));
        assert_eq!(layout.left_cover_width, 25.0);
        assert_eq!(layout.right_cover_width, 25.0);
        assert_eq!(layout.window_left, 25.0);
        assert_eq!(layout.window_width, 50.0);
        assert_eq!(layout.right_handle, 75.0);
    }

    #[test]
    fn drag_writes_window_until_pointer_up() {
        let mut slider = SliderModule::new(&ChartConfig::default(), PixelRatio::default());
        let state = state();
        slider.on_mount(&state);

        let down = ChartEvent::SliderPointerDown {
            target: DragTarget::Window,
            pointer: PointerEvent::mouse(100.0),
        };
        assert!(slider.handle_event(&down, &state).is_none());

        let moved = slider
            .handle_event(&ChartEvent::SliderPointerMove(PointerEvent::mouse(120.0)), &state)
            .expect("window moved");
        assert_abs_diff_eq!(moved.window.start, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(moved.window.end, 0.9, epsilon = 1e-12);

        slider.render(&moved);
        assert_abs_diff_eq!(slider.layout().window_left, 50.0, epsilon = 1e-9);

        slider.handle_event(&ChartEvent::SliderPointerUp, &moved);
        assert!(
            slider
                .handle_event(&ChartEvent::SliderPointerMove(PointerEvent::mouse(10.0)), &moved)
                .is_none()
        );
    }
}
