//! Chart facade: configuration, state store, modules and render pipelines.

mod chart_frame;
mod config;
mod line_chart;
mod main_graph;
mod module;
mod preview_renderer;
mod render_pipeline;
mod render_style;
mod slider;
mod state;
mod store;
mod togglers;
mod tooltip;

pub use chart_frame::{ChartFrame, value_bounds};
pub use config::ChartConfig;
pub use line_chart::LineChart;
pub use main_graph::{MAIN_GRAPH_MODULE, MainGraphModule};
pub use module::{ChartEvent, ChartModule, ModuleRegistry};
pub use preview_renderer::PreviewRenderer;
pub use render_pipeline::RenderPipeline;
pub use render_style::{RenderMetrics, ThemePalette};
pub use slider::{SLIDER_MODULE, SliderLayout, SliderModule};
pub use state::{ChartLayout, ChartState};
pub use store::Store;
pub use togglers::{TOGGLERS_MODULE, TogglerView, TogglersModule};
pub use tooltip::{TooltipEntry, TooltipModel, place_tooltip};
