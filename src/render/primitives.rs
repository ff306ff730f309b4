use serde::{Deserialize, Serialize};

use crate::core::{Path, Point};
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
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

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

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` (channels 0..=255, alpha 0..=1) and `transparent`.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let text = input.trim();
        let invalid = || ChartError::InvalidColor(input.to_owned());

        if text.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }

        if let Some(hex) = text.strip_prefix('#') {
            let digits: Vec<u8> = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            let byte = |hi: u8, lo: u8| f64::from(hi * 16 + lo) / 255.0;
            return match digits.as_slice() {
                [r, g, b] => Ok(Self::rgb(byte(*r, *r), byte(*g, *g), byte(*b, *b))),
                [r1, r2, g1, g2, b1, b2] => {
                    Ok(Self::rgb(byte(*r1, *r2), byte(*g1, *g2), byte(*b1, *b2)))
                }
                [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::rgba(
                    byte(*r1, *r2),
                    byte(*g1, *g2),
                    byte(*b1, *b2),
                    byte(*a1, *a2),
                )),
                _ => Err(invalid()),
            };
        }

        let lower = text.to_ascii_lowercase();
        let body = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let parts: Vec<f64> = body
            .split(',')
            .map(|p| p.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        let channel = |v: f64| (v / 255.0).clamp(0.0, 1.0);
        match parts.as_slice() {
            [r, g, b] => Ok(Self::rgb(channel(*r), channel(*g), channel(*b))),
            [r, g, b, a] => Ok(Self::rgba(
                channel(*r),
                channel(*g),
                channel(*b),
                a.clamp(0.0, 1.0),
            )),
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channel-wise interpolation; `t` is not clamped.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    /// Multiplies alpha by `opacity` (clamped to `[0, 1]`).
    #[must_use]
    pub fn faded(self, opacity: f64) -> Self {
        let opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.with_alpha(self.alpha * opacity)
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

/// Two-stop linear gradient between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub start_color: Color,
    pub end_color: Color,
}

impl LinearGradient {
    #[must_use]
    pub fn vertical(top: f64, bottom: f64, x: f64, start_color: Color, end_color: Color) -> Self {
        Self {
            start: Point::new(x, top),
            end: Point::new(x, bottom),
            start_color,
            end_color,
        }
    }

    #[must_use]
    pub fn faded(self, opacity: f64) -> Self {
        Self {
            start_color: self.start_color.faded(opacity),
            end_color: self.end_color.faded(opacity),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    Gradient(LinearGradient),
}

impl Paint {
    #[must_use]
    pub fn faded(self, opacity: f64) -> Self {
        match self {
            Self::Solid(color) => Self::Solid(color.faded(opacity)),
            Self::Gradient(gradient) => Self::Gradient(gradient.faded(opacity)),
        }
    }

    fn validate(self) -> ChartResult<()> {
        match self {
            Self::Solid(color) => color.validate(),
            Self::Gradient(gradient) => {
                if !gradient.start.is_finite() || !gradient.end.is_finite() {
                    return Err(ChartError::InvalidData(
                        "gradient endpoints must be finite".to_owned(),
                    ));
                }
                gradient.start_color.validate()?;
                gradient.end_color.validate()
            }
        }
    }
}

/// Draw command for one straight line in pixel space.
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
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathStyle {
    Fill,
    Stroke { width: f64 },
}

/// A [`Path`] painted as fill or stroke. Strokes use round caps and joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub path: Path,
    pub style: PathStyle,
    pub paint: Paint,
}

impl PathPrimitive {
    #[must_use]
    pub fn fill(path: Path, paint: Paint) -> Self {
        Self {
            path,
            style: PathStyle::Fill,
            paint,
        }
    }

    #[must_use]
    pub fn stroke(path: Path, width: f64, paint: Paint) -> Self {
        Self {
            path,
            style: PathStyle::Stroke { width },
            paint,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.path.is_finite() {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        if let PathStyle::Stroke { width } = self.style {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "path stroke width must be finite and > 0".to_owned(),
                ));
            }
        }
        self.paint.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
    pub border_color: Color,
    pub border_width: f64,
}

impl CirclePrimitive {
    #[must_use]
    pub fn filled(center: Point, radius: f64, fill: Color) -> Self {
        Self {
            center,
            radius,
            fill,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_border(mut self, color: Color, width: f64) -> Self {
        self.border_color = color;
        self.border_width = width;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.center.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "circle border width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        self.border_color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub paint: Paint,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, paint: Paint) -> Self {
        Self {
            x,
            y,
            width,
            height,
            corner_radius: 0.0,
            paint,
        }
    }

    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.paint.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space; `y` is the text top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Counter-clockwise rotation in radians around `(x, y)`.
    pub rotation: f64,
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
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
