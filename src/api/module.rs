use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::core::PixelRatio;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragTarget, PointerEvent};
use crate::render::Renderer;

use super::ChartState;

/// Input delivered by the host to the chart's modules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    MainPointerMove(PointerEvent),
    MainPointerLeave,
    SliderPointerDown {
        target: DragTarget,
        pointer: PointerEvent,
    },
    SliderPointerMove(PointerEvent),
    SliderPointerUp,
    ToggleSeries(usize),
    PixelRatioChanged(PixelRatio),
}

/// One independently rendered part of the chart.
///
/// Modules never write state directly: `handle_event` returns the next state
/// and the store applies it, which in turn calls `render` on every module.
pub trait ChartModule: Any {
    fn name(&self) -> &str;

    fn on_mount(&mut self, _state: &ChartState) {}

    fn on_unmount(&mut self) {}

    /// Gate consulted before `render` on every state write.
    fn should_render(&self, _state: &ChartState, _previous: &ChartState) -> bool {
        true
    }

    fn render(&mut self, state: &ChartState);

    fn handle_event(&mut self, _event: &ChartEvent, _state: &ChartState) -> Option<ChartState> {
        None
    }

    /// One scheduling quantum of the module's render loop.
    fn advance(&mut self, _timestamp_ms: f64, _renderer: &mut dyn Renderer) -> ChartResult<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

/// Ordered list of mounted modules; hooks run in registration order.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Box<dyn ChartModule>>,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.modules.iter().map(|module| module.name()))
            .finish()
    }
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module with a unique, non-empty name.
    pub fn register(&mut self, module: Box<dyn ChartModule>) -> ChartResult<()> {
        let name = module.name().to_owned();
        if name.is_empty() {
            return Err(ChartError::InvalidData(
                "module name must not be empty".to_owned(),
            ));
        }
        if self.has_module(&name) {
            return Err(ChartError::InvalidData(format!(
                "module `{name}` is already registered"
            )));
        }
        self.modules.push(module);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    #[must_use]
    pub fn has_module(&self, name: &str) -> bool {
        self.modules.iter().any(|module| module.name() == name)
    }

    /// Typed access to the first registered module of type `M`.
    #[must_use]
    pub fn get<M: ChartModule>(&self) -> Option<&M> {
        self.modules
            .iter()
            .find_map(|module| module.as_any().downcast_ref::<M>())
    }

    pub fn mount_all(&mut self, state: &ChartState) {
        for module in &mut self.modules {
            module.on_mount(state);
        }
    }

    pub fn unmount_all(&mut self) {
        for module in &mut self.modules {
            module.on_unmount();
        }
    }

    /// Runs the render hook of every module whose gate passes.
    pub fn notify(&mut self, state: &ChartState, previous: &ChartState) {
        for module in &mut self.modules {
            if module.should_render(state, previous) {
                module.render(state);
            }
        }
    }

    /// Renders every module unconditionally.
    pub fn render_all(&mut self, state: &ChartState) {
        for module in &mut self.modules {
            module.render(state);
        }
    }

    pub(super) fn handle_event_at(
        &mut self,
        index: usize,
        event: &ChartEvent,
        state: &ChartState,
    ) -> Option<ChartState> {
        self.modules
            .get_mut(index)
            .and_then(|module| module.handle_event(event, state))
    }

    pub fn advance(&mut self, timestamp_ms: f64, renderer: &mut dyn Renderer) -> ChartResult<()> {
        for module in &mut self.modules {
            module.advance(timestamp_ms, renderer)?;
        }
        Ok(())
    }
}
