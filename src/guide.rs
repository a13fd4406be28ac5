//! # rink-heatmap guide
//!
//! A standalone walkthrough of how a heatmap gets from records to pixels, and which types
//! own each step.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`RenderDimensions`](crate::RenderDimensions): outer surface size, margin and scale
//!   (pixels per foot). The rink is 200 x 85 ft with the origin at center ice.
//! - [`WeightedPoint`](crate::WeightedPoint): a position plus a weight.
//! - [`PointRecord`](crate::PointRecord): the record layouts understood out of the box.
//! - [`PointAccessor`](crate::PointAccessor): how to read `x`, `y` and `weight` from your own
//!   types.
//! - [`DensityGrid`](crate::DensityGrid): the estimated density, one value per cell.
//! - [`HeatmapStyle`](crate::HeatmapStyle): threshold, opacity range and color scale.
//! - [`RenderDriver`](crate::RenderDriver): paints a grid, optionally as a fade-in.
//! - [`DrawSurface`](crate::DrawSurface): where paint goes. [`PixmapSurface`](crate::PixmapSurface)
//!   rasterizes on the CPU; [`RecordingSurface`](crate::RecordingSurface) just records calls.
//!
//! ---
//!
//! ## Coordinate frames
//!
//! Three frames show up in the API:
//!
//! 1. **Real-world** feet, `y` up, origin at center ice.
//! 2. **Drawing-surface** pixels, `y` down, origin at the surface's top-left corner.
//! 3. **Canvas-local** pixels: drawing-surface pixels minus the margin. The density grid lives
//!    here, so cell `(0, 0)` starts at the rink's top-left corner.
//!
//! [`transform::rink`](crate::transform::rink) converts between all three.
//!
//! ---
//!
//! ## Building the grid
//!
//! With `scale` pixels per foot and `gridResolution` cells per foot, cells are
//! `scale / gridResolution` pixels square and the grid covers the canvas, rounding up. Every
//! point adds `weight * exp(-d^2 / (2 sigma^2))` to each cell whose center lies within
//! `kernelCutoffSigmas * sigma`, where `sigma` is a third of the bandwidth in pixels. Points are
//! looked up through a bucket index, so cost scales with the points near each cell rather than
//! all of them. Set `kernelCutoffSigmas` to `null` to evaluate every point everywhere.
//!
//! ---
//!
//! ## Painting and animation
//!
//! A cell is drawn when `value / maxValue` exceeds `threshold`. Its color comes from the color
//! scale at that ratio, its opacity interpolates between `minOpacity` and `maxOpacity` and is
//! then multiplied by the eased animation progress.
//!
//! [`RenderDriver::begin`](crate::RenderDriver::begin) returns a
//! [`FrameTicket`](crate::FrameTicket) when it starts a fade-in. Feed it back to
//! [`RenderDriver::frame`](crate::RenderDriver::frame) on every display refresh until it reports
//! [`FrameStatus::Finished`](crate::FrameStatus::Finished). Starting another render bumps the
//! generation, and tickets from older cycles are answered with
//! [`FrameStatus::Stale`](crate::FrameStatus::Stale) without painting.
//!
//! ---
//!
//! ## Minimal example
//!
//! ```no_run
//! use std::time::Duration;
//! use rink_heatmap::{DensityConfig, DensityLayer, PixmapSurface, RenderDimensions, WeightedPoint};
//!
//! # fn main() -> rink_heatmap::HeatmapResult<()> {
//! let dims = RenderDimensions::fit(820.0, 370.0, 10.0)?;
//! let config = DensityConfig {
//!     animate: false,
//!     ..DensityConfig::default()
//! };
//! let mut layer = DensityLayer::new(config, dims)?;
//! layer.set_points(vec![WeightedPoint::at(80.0, -5.0), WeightedPoint::at(75.0, 8.0)]);
//!
//! let mut surface = PixmapSurface::new(820, 370)?;
//! layer.render(Duration::ZERO, &mut surface)?;
//! surface.frame().save_png(std::path::Path::new("heatmap.png"))?;
//! # Ok(())
//! # }
//! ```
