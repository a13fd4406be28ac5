//! Kernel-density heatmap overlays for hockey rink charts.
//!
//! The crate turns weighted observations on a rink (shots, passes, hits) into a smoothed
//! density grid and paints it as translucent colored cells on a drawing surface.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: caller records -> [`WeightedPoint`]s through a [`PointAccessor`]
//! 2. **Transform**: real-world feet -> canvas-local pixels ([`transform::rink`])
//! 3. **Estimate**: points -> [`DensityGrid`] (Gaussian kernel, truncated support)
//! 4. **Style**: grid cells -> colors and opacities ([`HeatmapStyle`])
//! 5. **Paint**: [`RenderDriver`] draws frames onto a [`DrawSurface`], fading in over time
//! 6. **Query**: [`hit_test`] maps a pointer back to a cell and a rink location
//!
//! [`DensityLayer`] wires all of the above together behind one object.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same points and configuration give bit-identical grids and paint
//!   calls, whether or not rows are built in parallel.
//! - **Degrade by omission**: unreadable records are skipped, empty grids draw nothing, and
//!   pointers outside the grid resolve to `None`. Only configuration and IO fail.
//!
//! For a walkthrough, see [`crate::guide`].
#![forbid(unsafe_code)]

mod animation;
mod config;
mod data;
mod density;
mod foundation;
mod hit;
mod layer;
mod render;
mod style;

/// Walkthrough of the concepts and the public API.
pub mod guide;
/// Real-world <-> pixel coordinate helpers.
pub mod transform;

pub use animation::ease::Ease;
pub use config::DensityConfig;
pub use data::accessor::{
    FnAccessor, PointAccessor, RecordAccessor, WeightSource, extract_points,
    extract_record_points, resolve_point,
};
pub use data::record::{DetailCoords, PlainCoords, PointRecord, parse_records};
pub use density::grid::{DensityGrid, DensityParams, MAX_GRID_CELLS};
pub use foundation::core::{Point, Rect, RenderDimensions, Rgba8, RinkBounds, Vec2, WeightedPoint};
pub use foundation::error::{HeatmapError, HeatmapResult};
pub use hit::{DisplayScale, HitResult, hit_test};
pub use layer::DensityLayer;
pub use render::cpu::{FrameRGBA, PixmapSurface};
pub use render::driver::{AnimationSettings, DriverState, FrameStatus, FrameTicket, RenderDriver};
pub use render::surface::{DrawSurface, PaintCall, RecordingSurface};
pub use style::color::{ColorScale, ColorScaleSpec, Palette, parse_hex};
pub use style::paint::{
    CellPaint, DEFAULT_MAX_OPACITY, DEFAULT_MIN_OPACITY, DEFAULT_THRESHOLD, HeatmapStyle,
};
