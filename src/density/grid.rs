use rayon::prelude::*;
use serde::Serialize;

use crate::density::index::PointBuckets;
use crate::foundation::core::{Point, Rect, WeightedPoint};
use crate::foundation::error::{HeatmapError, HeatmapResult};

/// Upper bound on `grid_width * grid_height`.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Inputs of a density grid build. Lengths are in pixels unless noted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityParams {
    /// Kernel bandwidth in real-world units (feet).
    pub bandwidth: f64,
    /// Grid cells per real-world unit.
    pub grid_resolution: f64,
    /// Pixels per real-world unit.
    pub scale: f64,
    /// Canvas width, margins already removed.
    pub width: f64,
    /// Canvas height, margins already removed.
    pub height: f64,
    /// Kernel support radius in multiples of sigma; `None` evaluates every point for every cell.
    pub kernel_cutoff_sigmas: Option<f64>,
    /// Fill rows on the rayon pool.
    pub parallel: bool,
}

impl DensityParams {
    pub fn cell_size(&self) -> f64 {
        self.scale / self.grid_resolution
    }

    pub fn grid_dims(&self) -> (usize, usize) {
        let cs = self.cell_size();
        (
            (self.width / cs).ceil() as usize,
            (self.height / cs).ceil() as usize,
        )
    }

    /// Kernel spread in pixels: one third of the bandwidth.
    pub fn sigma_px(&self) -> f64 {
        self.bandwidth * self.scale / 3.0
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        for (name, v) in [
            ("bandwidth", self.bandwidth),
            ("grid_resolution", self.grid_resolution),
            ("scale", self.scale),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(HeatmapError::config(format!(
                    "density {name} must be finite and > 0"
                )));
            }
        }
        if let Some(c) = self.kernel_cutoff_sigmas
            && (!c.is_finite() || c <= 0.0)
        {
            return Err(HeatmapError::config(
                "kernel cutoff must be finite and > 0 sigmas",
            ));
        }
        let (w, h) = self.grid_dims();
        if w.saturating_mul(h) > MAX_GRID_CELLS {
            return Err(HeatmapError::config(format!(
                "density grid of {w}x{h} cells exceeds {MAX_GRID_CELLS} cells"
            )));
        }
        Ok(())
    }
}

/// Gaussian kernel density sampled on a regular grid of canvas cells.
///
/// Values are row-major, `height` rows of `width` cells. `min_value` is the smallest strictly
/// positive cell (0 when there is none) and `max_value` the largest cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityGrid {
    width: usize,
    height: usize,
    cell_width: f64,
    cell_height: f64,
    #[serde(skip)]
    values: Vec<f64>,
    min_value: f64,
    max_value: f64,
}

struct Kernel {
    sigma_sq2: f64,
    reach_sq: Option<f64>,
}

impl Kernel {
    #[inline]
    fn eval(&self, d2: f64) -> f64 {
        (-d2 / self.sigma_sq2).exp()
    }
}

impl DensityGrid {
    /// Build the grid for canvas-local `points`.
    #[tracing::instrument(skip(points), fields(points = points.len()))]
    pub fn build(points: &[WeightedPoint], params: &DensityParams) -> HeatmapResult<Self> {
        params.validate()?;

        let cell_size = params.cell_size();
        let (width, height) = params.grid_dims();
        let sigma = params.sigma_px();
        let kernel = Kernel {
            sigma_sq2: 2.0 * sigma * sigma,
            reach_sq: params.kernel_cutoff_sigmas.map(|c| (c * sigma) * (c * sigma)),
        };

        let mut values = vec![0.0f64; width * height];
        if !points.is_empty() && width > 0 {
            let buckets = params.kernel_cutoff_sigmas.map(|c| {
                PointBuckets::build(
                    points,
                    width as f64 * cell_size,
                    height as f64 * cell_size,
                    c * sigma,
                    cell_size,
                )
            });
            let reach = params.kernel_cutoff_sigmas.map_or(0.0, |c| c * sigma);
            let fill = |scratch: &mut Vec<u32>, (gy, row): (usize, &mut [f64])| {
                fill_row(
                    gy,
                    row,
                    cell_size,
                    points,
                    &kernel,
                    buckets.as_ref().map(|b| (b, reach)),
                    scratch,
                );
            };
            if params.parallel {
                values
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each_init(Vec::new, fill);
            } else {
                let mut scratch = Vec::new();
                for item in values.chunks_mut(width).enumerate() {
                    fill(&mut scratch, item);
                }
            }
        }

        let (min_value, max_value) = value_range(&values);
        tracing::debug!(width, height, cell_size, min_value, max_value, "density grid built");

        Ok(Self {
            width,
            height,
            cell_width: cell_size,
            cell_height: cell_size,
            values,
            min_value,
            max_value,
        })
    }

    /// Grid built from a raw row-major buffer.
    pub fn from_values(
        width: usize,
        height: usize,
        cell_width: f64,
        cell_height: f64,
        values: Vec<f64>,
    ) -> HeatmapResult<Self> {
        if values.len() != width * height {
            return Err(HeatmapError::validation(format!(
                "expected {} grid values, got {}",
                width * height,
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(HeatmapError::validation(
                "grid values must be finite and >= 0",
            ));
        }
        let (min_value, max_value) = value_range(&values);
        Ok(Self {
            width,
            height,
            cell_width,
            cell_height,
            values,
            min_value,
            max_value,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// True when nothing would be drawn: no cells or no positive density.
    pub fn is_degenerate(&self) -> bool {
        self.values.is_empty() || self.max_value <= 0.0
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, gx: usize, gy: usize) -> Option<f64> {
        if gx >= self.width || gy >= self.height {
            return None;
        }
        Some(self.values[gy * self.width + gx])
    }

    pub fn row(&self, gy: usize) -> &[f64] {
        &self.values[gy * self.width..(gy + 1) * self.width]
    }

    /// Iterate `(gx, gy, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let w = self.width.max(1);
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % w, i / w, *v))
    }

    /// Canvas-local rectangle covered by a cell.
    pub fn cell_rect(&self, gx: usize, gy: usize) -> Rect {
        let x0 = gx as f64 * self.cell_width;
        let y0 = gy as f64 * self.cell_height;
        Rect::new(x0, y0, x0 + self.cell_width, y0 + self.cell_height)
    }

    pub fn cell_center(&self, gx: usize, gy: usize) -> Point {
        Point::new(
            (gx as f64 + 0.5) * self.cell_width,
            (gy as f64 + 0.5) * self.cell_height,
        )
    }

    /// Grid coordinates of the cell holding a canvas-local point.
    pub fn cell_at(&self, p: Point) -> Option<(usize, usize)> {
        let gx = (p.x / self.cell_width).floor();
        let gy = (p.y / self.cell_height).floor();
        if !gx.is_finite() || !gy.is_finite() || gx < 0.0 || gy < 0.0 {
            return None;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        if gx >= self.width || gy >= self.height {
            return None;
        }
        Some((gx, gy))
    }
}

fn fill_row(
    gy: usize,
    row: &mut [f64],
    cell_size: f64,
    points: &[WeightedPoint],
    kernel: &Kernel,
    index: Option<(&PointBuckets, f64)>,
    scratch: &mut Vec<u32>,
) {
    let cy = (gy as f64 + 0.5) * cell_size;
    for (gx, cell) in row.iter_mut().enumerate() {
        let cx = (gx as f64 + 0.5) * cell_size;
        let mut sum = 0.0;
        match (index, kernel.reach_sq) {
            (Some((buckets, reach)), Some(reach_sq)) => {
                buckets.candidates(cx, cy, reach, scratch);
                for &i in scratch.iter() {
                    let p = &points[i as usize];
                    let d2 = (p.pos.x - cx).powi(2) + (p.pos.y - cy).powi(2);
                    if d2 <= reach_sq {
                        sum += p.weight * kernel.eval(d2);
                    }
                }
            }
            _ => {
                for p in points {
                    let d2 = (p.pos.x - cx).powi(2) + (p.pos.y - cy).powi(2);
                    sum += p.weight * kernel.eval(d2);
                }
            }
        }
        *cell = sum;
    }
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let mut min_pos = f64::INFINITY;
    let mut max = 0.0f64;
    for &v in values {
        if v > 0.0 && v < min_pos {
            min_pos = v;
        }
        if v > max {
            max = v;
        }
    }
    if min_pos.is_finite() {
        (min_pos, max)
    } else {
        (0.0, max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/density/grid.rs"]
mod tests;
