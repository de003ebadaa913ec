use serde::{Deserialize, Serialize};

use crate::core::{MIN_WINDOW_SPAN, PixelRatio, TIME_TICK_SPACING_PX, VisibleWindow};
use crate::error::{ChartError, ChartResult};

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist and load chart setup as JSON. Missing
/// fields fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Device pixels per CSS pixel.
    pub pixel_ratio: f64,
    /// Initial chart width in CSS pixels.
    pub width_px: u32,
    pub main_height_px: u32,
    pub slider_height_px: u32,
    pub initial_window: VisibleWindow,
    pub min_window_span: f64,
    pub value_tick_count: usize,
    pub time_tick_spacing_px: f64,
    pub padding_top_px: f64,
    pub padding_bottom_px: f64,
    pub preview_padding_px: f64,
    /// Duration of value-axis and series transitions.
    pub animation_ms: f64,
    /// Duration of time-axis transitions and of the render countdown.
    pub long_animation_ms: f64,
    pub dark_theme: bool,
    /// Width reserved for the hover tooltip when clamping its placement.
    pub tooltip_width_px: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            width_px: 400,
            main_height_px: 300,
            slider_height_px: 50,
            initial_window: VisibleWindow::default(),
            min_window_span: MIN_WINDOW_SPAN,
            value_tick_count: 6,
            time_tick_spacing_px: TIME_TICK_SPACING_PX,
            padding_top_px: 20.0,
            padding_bottom_px: 20.0,
            preview_padding_px: 5.0,
            animation_ms: 100.0,
            long_animation_ms: 300.0,
            dark_theme: false,
            tooltip_width_px: 150.0,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_dark_theme(mut self, dark_theme: bool) -> Self {
        self.dark_theme = dark_theme;
        self
    }

    #[must_use]
    pub fn with_initial_window(mut self, window: VisibleWindow) -> Self {
        self.initial_window = window;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width_px: u32) -> Self {
        self.width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_heights(mut self, main_height_px: u32, slider_height_px: u32) -> Self {
        self.main_height_px = main_height_px;
        self.slider_height_px = slider_height_px;
        self
    }

    /// Validated device pixel ratio.
    pub fn device_pixel_ratio(&self) -> ChartResult<PixelRatio> {
        PixelRatio::new(self.pixel_ratio)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.device_pixel_ratio()?;

        if self.width_px == 0 || self.main_height_px == 0 || self.slider_height_px == 0 {
            return Err(ChartError::InvalidData(
                "width and surface heights must be > 0".to_owned(),
            ));
        }

        if !self.min_window_span.is_finite()
            || self.min_window_span <= 0.0
            || self.min_window_span > 1.0
        {
            return Err(ChartError::InvalidData(
                "min window span must be in (0, 1]".to_owned(),
            ));
        }

        let window = VisibleWindow::new(self.initial_window.start, self.initial_window.end)?;
        // Small tolerance: spans such as 0.8 - 0.7 land just under 0.1.
        if window.span() + 1e-9 < self.min_window_span {
            return Err(ChartError::InvalidData(format!(
                "initial window span {} is below the minimum {}",
                window.span(),
                self.min_window_span
            )));
        }

        if self.value_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "value tick count must be > 0".to_owned(),
            ));
        }

        if !self.time_tick_spacing_px.is_finite() || self.time_tick_spacing_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "time tick spacing must be finite and > 0".to_owned(),
            ));
        }

        for (name, value) in [
            ("padding_top_px", self.padding_top_px),
            ("padding_bottom_px", self.padding_bottom_px),
            ("preview_padding_px", self.preview_padding_px),
            ("tooltip_width_px", self.tooltip_width_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        for (name, value) in [
            ("animation_ms", self.animation_ms),
            ("long_animation_ms", self.long_animation_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }

        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::core::VisibleWindow;

    #[test]
    fn defaults_are_valid() {
        ChartConfig::default().validate().expect("default config");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            ChartConfig::from_json_str(r#"{"dark_theme": true, "pixel_ratio": 2.0}"#).expect("parse");
        assert!(config.dark_theme);
        assert_eq!(config.pixel_ratio, 2.0);
        assert_eq!(config.main_height_px, 300);
        assert_eq!(config.initial_window, VisibleWindow::default());
    }

    #[test]
    fn narrow_initial_window_is_rejected() {
        let config = ChartConfig {
            initial_window: VisibleWindow {
                start: 0.5,
                end: 0.55,
            },
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_pixel_ratio_is_rejected() {
        assert!(ChartConfig::default().with_pixel_ratio(0.0).validate().is_err());
        assert!(ChartConfig::from_json_str(r#"{"animation_ms": -1}"#).is_err());
    }
}
