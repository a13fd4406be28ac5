use std::sync::Arc;
use std::time::Duration;

use crate::config::DensityConfig;
use crate::data::accessor::{PointAccessor, RecordAccessor, extract_points, extract_record_points};
use crate::data::record::PointRecord;
use crate::density::grid::DensityGrid;
use crate::foundation::core::{Point, RenderDimensions, Vec2, WeightedPoint};
use crate::foundation::error::HeatmapResult;
use crate::hit::{DisplayScale, HitResult, hit_test};
use crate::render::driver::{FrameStatus, FrameTicket, RenderDriver};
use crate::render::surface::DrawSurface;
use crate::transform::rink::real_to_canvas;

/// A kernel-density overlay on a rink chart.
///
/// Holds the observations (real-world units), the current geometry and the last built grid.
/// [`DensityLayer::render`] rebuilds the grid from scratch and starts a new render cycle;
/// updating points or dimensions discards the grid until the next render.
#[derive(Debug)]
pub struct DensityLayer {
    config: DensityConfig,
    dims: RenderDimensions,
    driver: RenderDriver,
    points: Vec<WeightedPoint>,
    grid: Option<Arc<DensityGrid>>,
}

impl DensityLayer {
    pub fn new(config: DensityConfig, dims: RenderDimensions) -> HeatmapResult<Self> {
        config.validate()?;
        dims.validate()?;
        let driver = RenderDriver::new(config.style()?, config.animation());
        Ok(Self {
            config,
            dims,
            driver,
            points: Vec::new(),
            grid: None,
        })
    }

    pub fn config(&self) -> &DensityConfig {
        &self.config
    }

    pub fn dimensions(&self) -> &RenderDimensions {
        &self.dims
    }

    pub fn points(&self) -> &[WeightedPoint] {
        &self.points
    }

    pub fn driver(&self) -> &RenderDriver {
        &self.driver
    }

    /// Last grid built by [`DensityLayer::render`], if still current.
    pub fn grid(&self) -> Option<&DensityGrid> {
        self.grid.as_deref()
    }

    /// Replace the observations with already-resolved real-world points.
    ///
    /// The last grid is discarded and frames of an animation still in flight go stale.
    pub fn set_points(&mut self, points: Vec<WeightedPoint>) {
        self.points = points;
        self.grid = None;
        self.driver.invalidate();
    }

    /// Replace the observations with caller records read through `accessor`.
    pub fn set_records<T, A: PointAccessor<T> + ?Sized>(&mut self, records: &[T], accessor: &A) {
        self.set_points(extract_points(records, accessor));
    }

    /// Replace the observations with parsed [`PointRecord`] slots.
    pub fn set_point_records(&mut self, records: &[Option<PointRecord>]) {
        let accessor = if self.config.use_record_weight {
            RecordAccessor::with_record_weight()
        } else {
            RecordAccessor::default()
        };
        self.set_points(extract_record_points(records, &accessor));
    }

    pub fn set_dimensions(&mut self, dims: RenderDimensions) -> HeatmapResult<()> {
        dims.validate()?;
        self.dims = dims;
        self.grid = None;
        self.driver.invalidate();
        Ok(())
    }

    /// Build the grid for the current points and paint it (the first frame, when animated).
    ///
    /// Returns the ticket for the next animation frame, if any.
    pub fn render(
        &mut self,
        now: Duration,
        surface: &mut dyn DrawSurface,
    ) -> HeatmapResult<Option<FrameTicket>> {
        let canvas_points: Vec<WeightedPoint> = self
            .points
            .iter()
            .filter(|p| {
                p.pos.x.is_finite() && p.pos.y.is_finite() && p.weight.is_finite() && p.weight >= 0.0
            })
            .map(|p| WeightedPoint {
                pos: real_to_canvas(p.pos, &self.dims),
                weight: p.weight,
            })
            .collect();
        let params = self.config.density_params(&self.dims);
        let grid = Arc::new(DensityGrid::build(&canvas_points, &params)?);
        self.grid = Some(Arc::clone(&grid));
        let offset = Vec2::new(self.dims.margin, self.dims.margin);
        self.driver.begin(grid, offset, now, surface)
    }

    pub fn frame(
        &mut self,
        ticket: FrameTicket,
        now: Duration,
        surface: &mut dyn DrawSurface,
    ) -> HeatmapResult<FrameStatus> {
        self.driver.frame(ticket, now, surface)
    }

    /// Render and run the animation to completion, one frame every `frame_interval`.
    ///
    /// `on_frame` sees the surface after each painted frame, with the frame's index. Returns
    /// the number of frames painted.
    pub fn render_to_completion<S: DrawSurface>(
        &mut self,
        start: Duration,
        frame_interval: Duration,
        surface: &mut S,
        mut on_frame: impl FnMut(usize, &S) -> HeatmapResult<()>,
    ) -> HeatmapResult<usize> {
        let interval = frame_interval.max(Duration::from_millis(1));
        let mut next = self.render(start, surface)?;
        on_frame(0, &*surface)?;
        let mut frames = 1;
        let mut now = start;
        while let Some(ticket) = next {
            now += interval;
            next = match self.frame(ticket, now, surface)? {
                FrameStatus::Continue(t) => Some(t),
                FrameStatus::Finished | FrameStatus::Stale => None,
            };
            on_frame(frames, &*surface)?;
            frames += 1;
        }
        Ok(frames)
    }

    /// Pointer lookup against the last built grid.
    pub fn hit_test(&self, pointer: Point, display: DisplayScale) -> Option<HitResult> {
        let grid = self.grid.as_deref()?;
        hit_test(grid, &self.dims, pointer, display)
    }

    /// Forget the grid and blank the surface.
    pub fn clear(&mut self, surface: &mut dyn DrawSurface) -> HeatmapResult<()> {
        self.grid = None;
        self.driver.clear(surface)
    }
}
