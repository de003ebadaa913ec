use tracing::debug;

use crate::core::{ChartData, PixelRatio};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{
    ChartConfig, ChartEvent, ChartLayout, ChartState, MainGraphModule, SliderLayout, SliderModule,
    Store, TogglerView, TogglersModule, TooltipModel,
};

/// Interactive line chart: main plot, overview slider and series switches
/// sharing one state store.
///
/// The host forwards input through `dispatch`, and calls `advance` once per
/// display refresh with a monotonic timestamp; frames are handed to the
/// renderer only while something is animating.
#[derive(Debug)]
pub struct LineChart {
    config: ChartConfig,
    store: Store,
    mounted: bool,
}

impl LineChart {
    pub fn new(data: ChartData, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let pixel_ratio = config.device_pixel_ratio()?;
        let layout = ChartLayout::new(
            config.width_px,
            config.main_height_px,
            config.slider_height_px,
        )?;

        let state = ChartState::new(data, config.initial_window, layout)
            .with_dark_theme(config.dark_theme);
        let mut store = Store::new(state);
        store.register(Box::new(MainGraphModule::new(config, pixel_ratio)))?;
        store.register(Box::new(SliderModule::new(&config, pixel_ratio)))?;
        store.register(Box::new(TogglersModule::new()))?;
        store.mount_all();
        store.render_all();

        debug!(
            samples = store.get_state().primary_axis.len(),
            series = store.get_state().series.len(),
            "line chart mounted"
        );

        Ok(Self {
            config,
            store,
            mounted: true,
        })
    }

    /// Builds a chart from the columnar JSON dataset format.
    pub fn from_json_str(dataset: &str, config: ChartConfig) -> ChartResult<Self> {
        Self::new(ChartData::from_json_str(dataset)?, config)
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        self.store.get_state()
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn dispatch(&mut self, event: ChartEvent) {
        self.store.dispatch(&event);
    }

    /// Re-targets every module against the current state.
    pub fn redraw(&mut self) {
        self.store.render_all();
    }

    pub fn resize(&mut self, width_px: u32) -> ChartResult<()> {
        let current = self.store.get_state().layout;
        let layout = ChartLayout::new(width_px, current.main_height_px, current.slider_height_px)?;
        if layout != current {
            let next = self.store.get_state().with_layout(layout);
            self.store.put_state(next);
        }
        Ok(())
    }

    pub fn set_dark_theme(&mut self, dark_theme: bool) {
        let next = self.store.get_state().with_dark_theme(dark_theme);
        self.store.put_state(next);
    }

    /// Display-change notification: every surface is rebuilt at the new ratio.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) -> ChartResult<()> {
        let pixel_ratio = PixelRatio::new(pixel_ratio)?;
        self.config.pixel_ratio = pixel_ratio.get();
        self.store
            .dispatch(&ChartEvent::PixelRatioChanged(pixel_ratio));
        self.store.render_all();
        Ok(())
    }

    /// One scheduling quantum for every surface.
    pub fn advance(&mut self, timestamp_ms: f64, renderer: &mut dyn Renderer) -> ChartResult<()> {
        if !self.mounted {
            return Ok(());
        }
        self.store.advance(timestamp_ms, renderer)
    }

    /// Unmounts every module; the chart stops producing frames.
    pub fn remove(&mut self) {
        if self.mounted {
            self.store.unmount_all();
            self.mounted = false;
            debug!("line chart removed");
        }
    }

    #[must_use]
    pub fn main_graph(&self) -> Option<&MainGraphModule> {
        self.store.registry().get::<MainGraphModule>()
    }

    #[must_use]
    pub fn slider(&self) -> Option<&SliderModule> {
        self.store.registry().get::<SliderModule>()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipModel> {
        self.main_graph().and_then(MainGraphModule::tooltip)
    }

    #[must_use]
    pub fn slider_layout(&self) -> Option<SliderLayout> {
        self.slider().map(SliderModule::layout)
    }

    #[must_use]
    pub fn togglers(&self) -> &[TogglerView] {
        self.store
            .registry()
            .get::<TogglersModule>()
            .map(TogglersModule::views)
            .unwrap_or_default()
    }
}
