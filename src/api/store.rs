use tracing::trace;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartEvent, ChartModule, ChartState, ModuleRegistry};

/// Single owner of the canonical `ChartState`.
///
/// `put_state` is the only write path. It replaces the state and then, before
/// returning, runs every registered module's gate and render hook in
/// registration order. Writes are neither batched nor deferred.
#[derive(Debug)]
pub struct Store {
    state: ChartState,
    registry: ModuleRegistry,
}

impl Store {
    #[must_use]
    pub fn new(state: ChartState) -> Self {
        Self {
            state,
            registry: ModuleRegistry::new(),
        }
    }

    #[must_use]
    pub fn get_state(&self) -> &ChartState {
        &self.state
    }

    pub fn put_state(&mut self, next: ChartState) {
        let previous = std::mem::replace(&mut self.state, next);
        trace!(
            start = self.state.window.start,
            end = self.state.window.end,
            hover = ?self.state.hover,
            "state write"
        );
        self.registry.notify(&self.state, &previous);
    }

    pub fn register(&mut self, module: Box<dyn ChartModule>) -> ChartResult<()> {
        self.registry.register(module)
    }

    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn mount_all(&mut self) {
        self.registry.mount_all(&self.state);
    }

    pub fn unmount_all(&mut self) {
        self.registry.unmount_all();
    }

    /// Renders every module against the current state, bypassing gates.
    pub fn render_all(&mut self) {
        self.registry.render_all(&self.state);
    }

    /// Offers `event` to each module in order.
    ///
    /// A module that answers with a new state has it written immediately, so
    /// later modules see the updated state.
    pub fn dispatch(&mut self, event: &ChartEvent) {
        for index in 0..self.registry.len() {
            if let Some(next) = self.registry.handle_event_at(index, event, &self.state) {
                self.put_state(next);
            }
        }
    }

    pub fn advance(&mut self, timestamp_ms: f64, renderer: &mut dyn Renderer) -> ChartResult<()> {
        self.registry.advance(timestamp_ms, renderer)
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::sync::{Arc, Mutex};

    use super::Store;
    use crate::api::{ChartEvent, ChartLayout, ChartModule, ChartState};
    use crate::core::{ChartData, PrimaryAxis, VisibleWindow};

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
        only_on_hover_change: bool,
    }

    impl ChartModule for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn should_render(&self, state: &ChartState, previous: &ChartState) -> bool {
            !self.only_on_hover_change || state.hover != previous.hover
        }

        fn render(&mut self, state: &ChartState) {
            self.log
                .lock()
                .expect("log lock")
                .push(format!("{}:{:?}", self.name, state.hover));
        }

        fn handle_event(&mut self, event: &ChartEvent, state: &ChartState) -> Option<ChartState> {
            match event {
                ChartEvent::MainPointerLeave if self.name == "first" => Some(state.with_hover(None)),
                ChartEvent::ToggleSeries(index) if self.name == "first" => {
                    Some(state.with_hover(Some(*index)))
                }
                _ => None,
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn store(log: &Log) -> Store {
        let data = ChartData {
            primary_axis: PrimaryAxis::new(vec![0.0, 1.0]).expect("axis"),
            series: Vec::new(),
        };
        let layout = ChartLayout::new(100, 100, 10).expect("layout");
        let mut store = Store::new(ChartState::new(data, VisibleWindow::default(), layout));
        store
            .register(Box::new(Recorder {
                name: "first",
                log: Arc::clone(log),
                only_on_hover_change: false,
            }))
            .expect("register first");
        store
            .register(Box::new(Recorder {
                name: "second",
                log: Arc::clone(log),
                only_on_hover_change: true,
            }))
            .expect("register second");
        store
    }

    #[test]
    fn put_state_fans_out_in_registration_order() {
        let log = Log::default();
        let mut store = store(&log);

        let next = store.get_state().with_hover(Some(1));
        store.put_state(next);
        let next = store.get_state().with_dark_theme(true);
        store.put_state(next);

        assert_eq!(
            *log.lock().expect("log lock"),
            vec!["first:Some(1)", "second:Some(1)", "first:Some(1)"]
        );
    }

    #[test]
    fn dispatched_state_is_written_before_returning() {
        let log = Log::default();
        let mut store = store(&log);

        store.dispatch(&ChartEvent::ToggleSeries(1));
        assert_eq!(store.get_state().hover, Some(1));
        store.dispatch(&ChartEvent::MainPointerLeave);
        assert_eq!(store.get_state().hover, None);
        assert_eq!(log.lock().expect("log lock").len(), 4);
    }

    #[test]
    fn duplicate_module_names_are_rejected() {
        let log = Log::default();
        let mut store = store(&log);
        let duplicate = Recorder {
            name: "first",
            log: Arc::clone(&log),
            only_on_hover_change: false,
        };
        assert!(store.register(Box::new(duplicate)).is_err());
        assert_eq!(store.registry().len(), 2);
        assert!(store.registry().get::<Recorder>().is_some());
    }
}
