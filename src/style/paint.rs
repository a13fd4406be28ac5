use crate::density::grid::DensityGrid;
use crate::foundation::core::{Rect, Rgba8, Vec2};
use crate::style::color::ColorScale;

pub const DEFAULT_THRESHOLD: f64 = 0.05;
pub const DEFAULT_MIN_OPACITY: f64 = 0.0;
pub const DEFAULT_MAX_OPACITY: f64 = 0.8;

/// How density values turn into colored, translucent cells.
#[derive(Clone, Debug)]
pub struct HeatmapStyle {
    /// Cells with `value / max_value` at or below this are not drawn.
    pub threshold: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub color_scale: ColorScale,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_opacity: DEFAULT_MIN_OPACITY,
            max_opacity: DEFAULT_MAX_OPACITY,
            color_scale: ColorScale::default(),
        }
    }
}

/// One cell to fill: rectangle in drawing-surface pixels, color, and final opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPaint {
    pub gx: usize,
    pub gy: usize,
    pub rect: Rect,
    pub color: Rgba8,
    pub opacity: f64,
}

impl HeatmapStyle {
    /// Color and opacity of a single cell, or `None` when it is gated out.
    ///
    /// `progress` is the eased animation fraction and scales the opacity.
    pub fn cell_paint(&self, value: f64, max_value: f64, progress: f64) -> Option<(Rgba8, f64)> {
        if max_value <= 0.0 {
            return None;
        }
        let normalized = value / max_value;
        if !normalized.is_finite() || normalized <= self.threshold {
            return None;
        }
        let opacity =
            (self.min_opacity + (self.max_opacity - self.min_opacity) * normalized) * progress;
        if opacity <= 0.0 {
            return None;
        }
        Some((self.color_scale.eval(value, max_value), opacity))
    }

    /// Every drawable cell of `grid`, offset from canvas-local into drawing-surface pixels.
    pub fn plan(&self, grid: &DensityGrid, offset: Vec2, progress: f64) -> Vec<CellPaint> {
        if grid.is_degenerate() {
            return Vec::new();
        }
        let max = grid.max_value();
        grid.cells()
            .filter_map(|(gx, gy, value)| {
                let (color, opacity) = self.cell_paint(value, max, progress)?;
                Some(CellPaint {
                    gx,
                    gy,
                    rect: grid.cell_rect(gx, gy) + offset,
                    color,
                    opacity,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/paint.rs"]
mod tests;
