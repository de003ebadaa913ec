use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#RRGGBB` or `#RGB`.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidData(format!("invalid hex color `{input}`"));
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| -> ChartResult<f64> {
            let value = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
            Ok(f64::from(value) / 255.0)
        };

        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let expand = |index: usize| hex[index..=index].repeat(2);
                Ok(Self::rgb(
                    channel(&expand(0))?,
                    channel(&expand(1))?,
                    channel(&expand(2))?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Returns the color with its alpha multiplied by `factor` (clamped).
    #[must_use]
    pub fn fade(self, factor: f64) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            alpha: self.alpha * factor,
            ..self
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn check_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

fn check_stroke(stroke_width: f64) -> ChartResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(ChartError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        check_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        check_stroke(self.stroke_width)?;
        self.color.validate()
    }
}

/// Connected path stroked in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        for (x, y) in &self.points {
            check_finite(&[*x, *y], "polyline coordinates")?;
        }
        check_stroke(self.stroke_width)?;
        self.color.validate()
    }
}

/// Stroked circle outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl CirclePrimitive {
    pub fn validate(self) -> ChartResult<()> {
        check_finite(&[self.cx, self.cy], "circle center")?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        check_stroke(self.stroke_width)?;
        self.color.validate()
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        check_finite(&[self.x, self.y], "rectangle origin")?;
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidData(
                "rectangle size must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rectangle size must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label; `y` is the text baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        check_finite(&[self.x, self.y], "text coordinates")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Linear gradient between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn validate(&self) -> ChartResult<()> {
        check_finite(&[self.x0, self.y0, self.x1, self.y1], "gradient axis")?;
        if self.stops.is_empty() {
            return Err(ChartError::InvalidData(
                "gradient needs at least one stop".to_owned(),
            ));
        }
        let mut previous = 0.0;
        for stop in &self.stops {
            if !stop.offset.is_finite() || !(0.0..=1.0).contains(&stop.offset) {
                return Err(ChartError::InvalidData(
                    "gradient stop offset must be in [0, 1]".to_owned(),
                ));
            }
            if stop.offset < previous {
                return Err(ChartError::InvalidData(
                    "gradient stops must be sorted by offset".to_owned(),
                ));
            }
            previous = stop.offset;
            stop.color.validate()?;
        }
        Ok(())
    }
}

/// How a fill combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompositeMode {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Keep existing content only where the fill is opaque.
    DestinationIn,
}

#[cfg(test)]
mod tests {
    use super::{Color, GradientStop, LinearGradient};

    #[test]
    fn hex_colors_parse_long_and_short_forms() {
        let long = Color::from_hex("#F0F0F0").expect("long form");
        assert!((long.red - 240.0 / 255.0).abs() < 1e-12);
        assert_eq!(Color::from_hex("#fff").expect("short form"), Color::WHITE);
        assert!(Color::from_hex("F0F0F0").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#12345").is_err());
    }

    #[test]
    fn fade_scales_alpha() {
        let faded = Color::rgba(0.2, 0.4, 0.6, 0.5).fade(0.5);
        assert_eq!(faded.alpha, 0.25);
        assert_eq!(Color::WHITE.fade(f64::NAN).alpha, 0.0);
    }

    #[test]
    fn unsorted_gradient_stops_are_rejected() {
        let gradient = LinearGradient {
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 10.0,
            stops: vec![
                GradientStop {
                    offset: 0.5,
                    color: Color::WHITE,
                },
                GradientStop {
                    offset: 0.2,
                    color: Color::WHITE,
                },
            ],
        };
        assert!(gradient.validate().is_err());
    }
}
