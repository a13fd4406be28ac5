use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::HeatmapResult;

/// Something a heatmap frame can be painted onto.
///
/// Coordinates are drawing-surface pixels (margins included). A frame is always a
/// `begin_frame` followed by zero or more `fill_rect` calls and a closing `end_frame`.
pub trait DrawSurface {
    /// Start a frame; the surface discards whatever the previous frame painted.
    fn begin_frame(&mut self) -> HeatmapResult<()>;

    /// Fill `rect` with `color` at `opacity` in `[0, 1]`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8, opacity: f64) -> HeatmapResult<()>;

    /// Finish the frame and make it visible.
    fn end_frame(&mut self) -> HeatmapResult<()> {
        Ok(())
    }
}

/// A single recorded surface call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintCall {
    Begin,
    Fill {
        rect: Rect,
        color: Rgba8,
        opacity: f64,
    },
    End,
}

/// Surface that records every call; used for headless consumers and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<PaintCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[PaintCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<PaintCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of frames started.
    pub fn frame_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PaintCall::Begin))
            .count()
    }

    /// Fill calls of the most recent frame.
    pub fn last_frame_fills(&self) -> Vec<PaintCall> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, PaintCall::Begin))
            .map_or(0, |i| i + 1);
        self.calls[start..]
            .iter()
            .filter(|c| matches!(c, PaintCall::Fill { .. }))
            .copied()
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn begin_frame(&mut self) -> HeatmapResult<()> {
        self.calls.push(PaintCall::Begin);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8, opacity: f64) -> HeatmapResult<()> {
        self.calls.push(PaintCall::Fill {
            rect,
            color,
            opacity,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> HeatmapResult<()> {
        self.calls.push(PaintCall::End);
        Ok(())
    }
}
