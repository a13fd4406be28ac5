//! Real-world rink coordinates <-> pixel space.
//!
//! Real-world coordinates are center-origin with `y` pointing up; pixel coordinates have the
//! origin at the top-left of the drawing surface with `y` pointing down. "Canvas-local"
//! pixels are drawing-space pixels shifted by the margin, which is the frame the density
//! grid is built in.

use crate::foundation::core::{Point, RenderDimensions};

/// Map a real-world point onto the full drawing surface.
#[inline]
pub fn to_drawing_space(p: Point, dims: &RenderDimensions) -> Point {
    Point::new(
        dims.margin + (p.x + dims.bounds.half_length) * dims.scale,
        dims.margin + (dims.bounds.half_width - p.y) * dims.scale,
    )
}

/// Inverse of [`to_drawing_space`].
#[inline]
pub fn to_real_space(p: Point, dims: &RenderDimensions) -> Point {
    Point::new(
        (p.x - dims.margin) / dims.scale - dims.bounds.half_length,
        dims.bounds.half_width - (p.y - dims.margin) / dims.scale,
    )
}

/// Drawing-surface pixels to canvas-local pixels.
#[inline]
pub fn to_canvas_local(p: Point, dims: &RenderDimensions) -> Point {
    Point::new(p.x - dims.margin, p.y - dims.margin)
}

/// Canvas-local pixels to drawing-surface pixels.
#[inline]
pub fn from_canvas_local(p: Point, dims: &RenderDimensions) -> Point {
    Point::new(p.x + dims.margin, p.y + dims.margin)
}

/// Real-world point straight into canvas-local pixels.
#[inline]
pub fn real_to_canvas(p: Point, dims: &RenderDimensions) -> Point {
    to_canvas_local(to_drawing_space(p, dims), dims)
}

/// Canvas-local pixels straight back into real-world units.
#[inline]
pub fn canvas_to_real(p: Point, dims: &RenderDimensions) -> Point {
    to_real_space(from_canvas_local(p, dims), dims)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/rink.rs"]
mod tests;
