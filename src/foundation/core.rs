use crate::foundation::error::{HeatmapError, HeatmapResult};

pub use kurbo::{Point, Rect, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with its alpha multiplied by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Premultiplied bytes (`r,g,b` already multiplied by `a`).
    pub fn to_premul_bytes(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            crate::foundation::math::mul_div255_u8(u16::from(self.r), a),
            crate::foundation::math::mul_div255_u8(u16::from(self.g), a),
            crate::foundation::math::mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

/// One observation: a position plus a non-negative weight.
///
/// The position is in real-world units straight out of the accessors and in canvas-local
/// pixels once it reaches the density grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeightedPoint {
    pub pos: Point,
    pub weight: f64,
}

impl WeightedPoint {
    pub fn new(x: f64, y: f64, weight: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            weight,
        }
    }

    /// Unit-weight point.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 1.0)
    }
}

/// Extent of the real-world coordinate system, centered on the origin, in feet.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RinkBounds {
    pub half_length: f64,
    pub half_width: f64,
}

impl RinkBounds {
    /// Regulation NHL rink: 200 x 85 ft.
    pub const NHL: Self = Self {
        half_length: 100.0,
        half_width: 42.5,
    };

    pub fn length(self) -> f64 {
        self.half_length * 2.0
    }

    pub fn width(self) -> f64 {
        self.half_width * 2.0
    }

    pub fn contains(self, x: f64, y: f64) -> bool {
        x.abs() <= self.half_length && y.abs() <= self.half_width
    }
}

impl Default for RinkBounds {
    fn default() -> Self {
        Self::NHL
    }
}

/// Pixel geometry of the drawing surface.
///
/// `width`/`height` are the outer surface size, `margin` is applied on every side and
/// `scale` is pixels per real-world unit. The canvas-local region (where the density grid
/// lives) starts at `(margin, margin)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub scale: f64,
    #[serde(default)]
    pub bounds: RinkBounds,
}

impl RenderDimensions {
    pub fn new(width: f64, height: f64, margin: f64, scale: f64) -> HeatmapResult<Self> {
        let dims = Self {
            width,
            height,
            margin,
            scale,
            bounds: RinkBounds::NHL,
        };
        dims.validate()?;
        Ok(dims)
    }

    /// Largest scale that fits the rink inside the margin-adjusted surface.
    pub fn fit(width: f64, height: f64, margin: f64) -> HeatmapResult<Self> {
        Self::fit_bounds(width, height, margin, RinkBounds::NHL)
    }

    pub fn fit_bounds(
        width: f64,
        height: f64,
        margin: f64,
        bounds: RinkBounds,
    ) -> HeatmapResult<Self> {
        let inner_w = width - 2.0 * margin;
        let inner_h = height - 2.0 * margin;
        let scale = (inner_w / bounds.length()).min(inner_h / bounds.width());
        let dims = Self {
            width,
            height,
            margin,
            scale,
            bounds,
        };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        for (name, v) in [
            ("width", self.width),
            ("height", self.height),
            ("margin", self.margin),
            ("scale", self.scale),
        ] {
            if !v.is_finite() {
                return Err(HeatmapError::validation(format!(
                    "render dimension {name} must be finite"
                )));
            }
        }
        if self.margin < 0.0 {
            return Err(HeatmapError::validation("margin must be >= 0"));
        }
        if self.scale <= 0.0 {
            return Err(HeatmapError::validation("scale must be > 0"));
        }
        if self.canvas_width() <= 0.0 || self.canvas_height() <= 0.0 {
            return Err(HeatmapError::validation(
                "margins leave no drawable canvas area",
            ));
        }
        if self.bounds.half_length <= 0.0 || self.bounds.half_width <= 0.0 {
            return Err(HeatmapError::validation("rink bounds must be > 0"));
        }
        Ok(())
    }

    /// Width of the margin-adjusted canvas, in pixels.
    pub fn canvas_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Height of the margin-adjusted canvas, in pixels.
    pub fn canvas_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.width - self.margin,
            self.height - self.margin,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
