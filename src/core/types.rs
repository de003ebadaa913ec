use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Converts a CSS-pixel viewport into device pixels.
    #[must_use]
    pub fn to_device(self, pixel_ratio: PixelRatio) -> Self {
        let scale = pixel_ratio.get();
        Self {
            width: (f64::from(self.width) * scale).round() as u32,
            height: (f64::from(self.height) * scale).round() as u32,
        }
    }
}

/// Device pixel ratio applied uniformly to strokes, fonts and paddings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRatio(f64);

impl PixelRatio {
    pub fn new(value: f64) -> ChartResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Scales a CSS-pixel length into device pixels.
    #[must_use]
    pub fn px(self, css_px: f64) -> f64 {
        css_px * self.0
    }
}

impl Default for PixelRatio {
    fn default() -> Self {
        Self(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelRatio, Viewport};

    #[test]
    fn device_viewport_scales_and_rounds() {
        let ratio = PixelRatio::new(1.5).expect("valid ratio");
        assert_eq!(
            Viewport::new(301, 100).to_device(ratio),
            Viewport::new(452, 150)
        );
    }

    #[test]
    fn pixel_ratio_rejects_non_positive() {
        assert!(PixelRatio::new(0.0).is_err());
        assert!(PixelRatio::new(f64::NAN).is_err());
    }
}
