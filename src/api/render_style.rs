use crate::core::PixelRatio;
use crate::render::Color;

const GRID_LIGHT: Color = Color::rgb(240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0);
const LABEL_LIGHT: Color = Color::rgb(195.0 / 255.0, 195.0 / 255.0, 195.0 / 255.0);

/// Theme-dependent colors of the main chart decorations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub grid: Color,
    pub labels: Color,
    pub crosshair: Color,
}

impl ThemePalette {
    /// Dark theme draws translucent white; light theme draws opaque greys.
    #[must_use]
    pub fn for_theme(dark_theme: bool) -> Self {
        if dark_theme {
            Self {
                grid: Color::WHITE.fade(0.05),
                labels: Color::WHITE.fade(0.15),
                crosshair: Color::WHITE.fade(0.1),
            }
        } else {
            Self {
                grid: GRID_LIGHT,
                labels: LABEL_LIGHT,
                crosshair: GRID_LIGHT,
            }
        }
    }
}

/// Stroke, font and marker sizes in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderMetrics {
    pub series_stroke: f64,
    pub preview_stroke: f64,
    pub grid_stroke: f64,
    pub crosshair_stroke: f64,
    pub marker_radius: f64,
    pub font_size: f64,
    /// Gap between a grid line and the value label sitting on it.
    pub value_label_lift: f64,
    /// Baseline of time labels below the top of the bottom padding.
    pub time_label_drop: f64,
}

impl RenderMetrics {
    #[must_use]
    pub fn scaled(pixel_ratio: PixelRatio) -> Self {
        Self {
            series_stroke: pixel_ratio.px(2.0),
            preview_stroke: pixel_ratio.px(1.0),
            grid_stroke: pixel_ratio.px(1.0),
            crosshair_stroke: pixel_ratio.px(1.0),
            marker_radius: pixel_ratio.px(3.0),
            font_size: pixel_ratio.px(12.0),
            value_label_lift: pixel_ratio.px(3.0),
            time_label_drop: pixel_ratio.px(14.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderMetrics, ThemePalette};
    use crate::core::PixelRatio;

    #[test]
    fn metrics_follow_pixel_ratio() {
        let metrics = RenderMetrics::scaled(PixelRatio::new(2.0).expect("ratio"));
        assert_eq!(metrics.series_stroke, 4.0);
        assert_eq!(metrics.font_size, 24.0);
        assert_eq!(metrics.marker_radius, 6.0);
    }

    #[test]
    fn dark_theme_uses_translucent_decorations() {
        let dark = ThemePalette::for_theme(true);
        assert!(dark.grid.alpha < 0.1);
        assert_eq!(ThemePalette::for_theme(false).grid.alpha, 1.0);
    }
}
