use std::sync::Arc;
use std::time::Duration;

use crate::animation::ease::Ease;
use crate::density::grid::DensityGrid;
use crate::foundation::core::Vec2;
use crate::foundation::error::HeatmapResult;
use crate::render::surface::DrawSurface;
use crate::style::paint::HeatmapStyle;

/// Animation settings of the progressive reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    pub enabled: bool,
    pub duration: Duration,
    pub ease: Ease,
}

impl AnimationSettings {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn animates(&self) -> bool {
        self.enabled && !self.duration.is_zero()
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: Self::DEFAULT_DURATION,
            ease: Ease::default(),
        }
    }
}

/// Handle for the next frame of one render cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

impl FrameTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// What a call to [`RenderDriver::frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Frame painted; schedule another one with the returned ticket.
    Continue(FrameTicket),
    /// Final frame painted; the driver is idle again.
    Finished,
    /// The ticket belongs to a superseded cycle; nothing was painted.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Animating { generation: u64, started_at: Duration },
}

/// Paints a density grid, optionally as a timed fade-in.
///
/// Each [`RenderDriver::begin`] starts a new generation. Frames carry the generation they were
/// issued for, and only the most recent generation may paint; older tickets come back
/// [`FrameStatus::Stale`]. Timestamps are caller-provided offsets from any fixed origin
/// (for example `Instant::elapsed` of a clock started at launch).
#[derive(Debug)]
pub struct RenderDriver {
    style: HeatmapStyle,
    animation: AnimationSettings,
    generation: u64,
    state: DriverState,
    grid: Option<Arc<DensityGrid>>,
    offset: Vec2,
}

impl RenderDriver {
    pub fn new(style: HeatmapStyle, animation: AnimationSettings) -> Self {
        Self {
            style,
            animation,
            generation: 0,
            state: DriverState::Idle,
            grid: None,
            offset: Vec2::ZERO,
        }
    }

    pub fn style(&self) -> &HeatmapStyle {
        &self.style
    }

    pub fn animation(&self) -> AnimationSettings {
        self.animation
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> Option<&Arc<DensityGrid>> {
        self.grid.as_ref()
    }

    /// Start a render cycle for `grid`.
    ///
    /// `offset` moves canvas-local cells into drawing-surface pixels (the margin). Without
    /// animation, or when the grid has nothing to draw, the grid is painted once at full
    /// opacity and `None` is returned; otherwise
    /// the first frame is painted at `now` and its follow-up ticket returned.
    pub fn begin(
        &mut self,
        grid: Arc<DensityGrid>,
        offset: Vec2,
        now: Duration,
        surface: &mut dyn DrawSurface,
    ) -> HeatmapResult<Option<FrameTicket>> {
        self.generation += 1;
        self.grid = Some(grid);
        self.offset = offset;

        let degenerate = self.grid.as_ref().is_none_or(|g| g.is_degenerate());
        if degenerate || !self.animation.animates() {
            self.state = DriverState::Idle;
            self.paint(1.0, surface)?;
            return Ok(None);
        }

        self.state = DriverState::Animating {
            generation: self.generation,
            started_at: now,
        };
        tracing::debug!(
            generation = self.generation,
            duration_ms = self.animation.duration.as_millis() as u64,
            "animation started"
        );
        let ticket = FrameTicket {
            generation: self.generation,
        };
        match self.frame(ticket, now, surface)? {
            FrameStatus::Continue(t) => Ok(Some(t)),
            FrameStatus::Finished | FrameStatus::Stale => Ok(None),
        }
    }

    /// Paint one animation frame at `now`.
    pub fn frame(
        &mut self,
        ticket: FrameTicket,
        now: Duration,
        surface: &mut dyn DrawSurface,
    ) -> HeatmapResult<FrameStatus> {
        let DriverState::Animating {
            generation,
            started_at,
        } = self.state
        else {
            return Ok(FrameStatus::Stale);
        };
        if ticket.generation != generation {
            tracing::trace!(
                ticket = ticket.generation,
                current = generation,
                "dropping stale frame"
            );
            return Ok(FrameStatus::Stale);
        }

        let elapsed = now.saturating_sub(started_at);
        let raw = (elapsed.as_secs_f64() / self.animation.duration.as_secs_f64()).min(1.0);
        let progress = self.animation.ease.apply(raw);
        self.paint(progress, surface)?;

        if raw >= 1.0 {
            self.state = DriverState::Idle;
            tracing::debug!(generation, "animation finished");
            Ok(FrameStatus::Finished)
        } else {
            Ok(FrameStatus::Continue(ticket))
        }
    }

    /// Repaint the current grid at full progress without touching the animation state.
    pub fn repaint(&self, surface: &mut dyn DrawSurface) -> HeatmapResult<()> {
        self.paint(1.0, surface)
    }

    /// Invalidate every outstanding ticket and drop the grid, leaving the surface as it is.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state = DriverState::Idle;
        self.grid = None;
    }

    /// Like [`RenderDriver::invalidate`], then blank the surface.
    pub fn clear(&mut self, surface: &mut dyn DrawSurface) -> HeatmapResult<()> {
        self.invalidate();
        surface.begin_frame()?;
        surface.end_frame()
    }

    fn paint(&self, progress: f64, surface: &mut dyn DrawSurface) -> HeatmapResult<()> {
        surface.begin_frame()?;
        if let Some(grid) = &self.grid {
            for cell in self.style.plan(grid, self.offset, progress) {
                surface.fill_rect(cell.rect, cell.color, cell.opacity)?;
            }
        }
        surface.end_frame()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
