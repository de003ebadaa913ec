mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, LayeredCommand, RenderFrame};
pub use layer_stack::{DrawLayer, SurfaceKind, SurfaceLayerStack};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, CompositeMode, GradientStop, LinePrimitive, LinearGradient,
    PolylinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, ordered `RenderFrame` so drawing
/// code remains isolated from animation and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
