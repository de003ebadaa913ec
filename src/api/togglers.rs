use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::render::Color;

use super::{ChartEvent, ChartModule, ChartState};

pub const TOGGLERS_MODULE: &str = "togglers";

/// One series switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TogglerView {
    pub name: String,
    pub color: Color,
    pub active: bool,
}

/// Series visibility switches.
#[derive(Debug, Clone, Default)]
pub struct TogglersModule {
    views: Vec<TogglerView>,
    mounted: bool,
}

impl TogglersModule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn views(&self) -> &[TogglerView] {
        &self.views
    }
}

impl ChartModule for TogglersModule {
    fn name(&self) -> &str {
        TOGGLERS_MODULE
    }

    fn on_mount(&mut self, _state: &ChartState) {
        self.mounted = true;
    }

    fn on_unmount(&mut self) {
        self.mounted = false;
        self.views.clear();
    }

    /// Only a new series list changes what the switches show.
    fn should_render(&self, state: &ChartState, previous: &ChartState) -> bool {
        !Arc::ptr_eq(&state.series, &previous.series)
    }

    fn render(&mut self, state: &ChartState) {
        if !self.mounted {
            return;
        }
        self.views = state
            .series
            .iter()
            .map(|series| TogglerView {
                name: series.name.clone(),
                color: series.color,
                active: !series.hidden,
            })
            .collect();
    }

    fn handle_event(&mut self, event: &ChartEvent, state: &ChartState) -> Option<ChartState> {
        let ChartEvent::ToggleSeries(index) = *event else {
            return None;
        };
        match state.with_series_toggled(index) {
            Some(next) => {
                debug!(index, hidden = next.series[index].hidden, "series toggled");
                Some(next)
            }
            None => {
                warn!(index, series = state.series.len(), "toggle for unknown series");
                None
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::TogglersModule;
    use crate::api::{ChartEvent, ChartLayout, ChartModule, ChartState};
    use crate::core::{ChartData, LineSeries, PrimaryAxis, SeriesId, VisibleWindow};
    use crate::render::Color;

    fn state() -> ChartState {
        let data = ChartData {
            primary_axis: PrimaryAxis::new(vec![0.0, 1.0]).expect("axis"),
            series: vec![
                LineSeries::new(SeriesId::new("y0"), "Joined", Color::RED, vec![1.0, 2.0]),
                LineSeries::new(SeriesId::new("y1"), "Left", Color::WHITE, vec![3.0, 4.0]),
            ],
        };
        ChartState::new(
            data,
            VisibleWindow::default(),
            ChartLayout::new(100, 100, 10).expect("layout"),
        )
    }

    #[test]
    fn toggle_flips_hidden_and_views_follow() {
        let mut togglers = TogglersModule::new();
        let state = state();
        togglers.on_mount(&state);
        togglers.render(&state);
        assert!(togglers.views().iter().all(|view| view.active));

        let next = togglers
            .handle_event(&ChartEvent::ToggleSeries(1), &state)
            .expect("toggled");
        assert!(togglers.should_render(&next, &state));
        togglers.render(&next);
        assert!(togglers.views()[0].active);
        assert!(!togglers.views()[1].active);
        assert_eq!(togglers.views()[1].name, "Left");
    }

    #[test]
    fn hover_changes_do_not_rerender() {
        let togglers = TogglersModule::new();
        let state = state();
        assert!(!togglers.should_render(&state.with_hover(Some(1)), &state));
    }

    #[test]
    fn unknown_series_is_ignored() {
        let mut togglers = TogglersModule::new();
        assert!(togglers.handle_event(&ChartEvent::ToggleSeries(5), &state()).is_none());
    }
}
