//! Pointer position -> grid cell -> real-world location.

use serde::Serialize;

use crate::density::grid::DensityGrid;
use crate::foundation::core::{Point, RenderDimensions, Vec2};
use crate::transform::rink::{to_canvas_local, to_real_space};

/// Ratio between the surface's intrinsic pixel size and the size it is displayed at.
///
/// A 1000px-wide surface shown 500px wide has `scale_x = 2`: one on-screen pixel covers two
/// surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayScale {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl DisplayScale {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Scale for a surface of `intrinsic` size rendered at `displayed` size.
    pub fn from_sizes(intrinsic: Vec2, displayed: Vec2) -> Self {
        let ratio = |i: f64, d: f64| if d > 0.0 && d.is_finite() { i / d } else { 1.0 };
        Self {
            scale_x: ratio(intrinsic.x, displayed.x),
            scale_y: ratio(intrinsic.y, displayed.y),
        }
    }
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A pointer that landed on a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitResult {
    pub value: f64,
    pub real_x: f64,
    pub real_y: f64,
    pub cell_x: usize,
    pub cell_y: usize,
}

/// Resolve an on-screen pointer position against `grid`.
///
/// Returns `None` when the pointer maps outside the grid.
pub fn hit_test(
    grid: &DensityGrid,
    dims: &RenderDimensions,
    pointer: Point,
    display: DisplayScale,
) -> Option<HitResult> {
    let surface = Point::new(pointer.x * display.scale_x, pointer.y * display.scale_y);
    let (cell_x, cell_y) = grid.cell_at(to_canvas_local(surface, dims))?;
    let value = grid.value(cell_x, cell_y)?;
    let real = to_real_space(surface, dims);
    Some(HitResult {
        value,
        real_x: real.x,
        real_y: real.y,
        cell_x,
        cell_y,
    })
}

#[cfg(test)]
#[path = "../tests/unit/hit.rs"]
mod tests;
