use serde::{Deserialize, Serialize};

use crate::core::format::{comma_separated, format_tooltip_date};
use crate::render::Color;

use super::ChartState;

/// Minimum gap between the tooltip and the left edge.
const TOOLTIP_LEFT_MARGIN_PX: f64 = 20.0;
/// Minimum gap between the tooltip and the right edge.
const TOOLTIP_RIGHT_MARGIN_PX: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipEntry {
    pub name: String,
    pub color: Color,
    pub value: String,
}

/// Content and placement of the hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipModel {
    pub date: String,
    pub entries: Vec<TooltipEntry>,
    /// Left edge in CSS pixels from the chart's left edge.
    pub left_px: f64,
}

impl TooltipModel {
    /// Builds the tooltip for the hovered sample, or `None` when nothing is
    /// hovered.
    #[must_use]
    pub fn from_state(state: &ChartState, tooltip_width_px: f64) -> Option<Self> {
        let index = state.hover?;
        let stamp = *state.primary_axis.data().get(index)?;

        let entries = state
            .visible_series()
            .filter_map(|series| {
                Some(TooltipEntry {
                    name: series.name.clone(),
                    color: series.color,
                    value: comma_separated(series.value_at(index)?),
                })
            })
            .collect();

        let (min_x, max_x) = state.domain_range();
        let x_scale = max_x - min_x;
        let container_width = f64::from(state.layout.width_px);
        let x = if x_scale == 0.0 {
            0.0
        } else {
            container_width * (stamp - min_x) / x_scale
        };

        Some(Self {
            date: format_tooltip_date(stamp),
            entries,
            left_px: place_tooltip(x, tooltip_width_px, container_width),
        })
    }
}

/// Centers the tooltip on `x`, kept inside the container margins. When the
/// container is too narrow for both margins the right one wins.
#[must_use]
pub fn place_tooltip(x: f64, tooltip_width_px: f64, container_width_px: f64) -> f64 {
    let low = TOOLTIP_LEFT_MARGIN_PX;
    let high = container_width_px - tooltip_width_px - TOOLTIP_RIGHT_MARGIN_PX;
    (x - tooltip_width_px / 2.0).max(low).min(high)
}
