use crate::foundation::core::WeightedPoint;

/// Uniform bucket index over canvas-local points.
///
/// Buckets are at least one grid cell and at least `reach` pixels square, so the bucket count
/// is bounded by the grid size rather than by the canvas size. They cover `[0, extent_w) x [0, extent_h)`. Points
/// outside the extent by more than `reach` are dropped (they cannot touch any cell); points
/// within `reach` of the extent are clamped into the edge buckets. Each bucket lists point
/// indices in input order.
pub(crate) struct PointBuckets {
    bucket_size: f64,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<u32>>,
}

impl PointBuckets {
    pub(crate) fn build(
        points: &[WeightedPoint],
        extent_w: f64,
        extent_h: f64,
        reach: f64,
        cell_size: f64,
    ) -> Self {
        let bucket_size = reach.max(cell_size);
        let cols = ((extent_w / bucket_size).ceil() as usize).max(1);
        let rows = ((extent_h / bucket_size).ceil() as usize).max(1);
        let mut buckets = vec![Vec::new(); cols * rows];

        for (i, p) in points.iter().enumerate() {
            let (x, y) = (p.pos.x, p.pos.y);
            if x < -reach || y < -reach || x > extent_w + reach || y > extent_h + reach {
                continue;
            }
            let bx = Self::axis_bucket(x, bucket_size, cols);
            let by = Self::axis_bucket(y, bucket_size, rows);
            buckets[by * cols + bx].push(i as u32);
        }

        Self {
            bucket_size,
            cols,
            rows,
            buckets,
        }
    }

    fn axis_bucket(v: f64, size: f64, n: usize) -> usize {
        let b = (v / size).floor();
        if b <= 0.0 {
            0
        } else {
            (b as usize).min(n - 1)
        }
    }

    /// Indices of every point that may lie within `reach` of `(x, y)`, in input order.
    pub(crate) fn candidates(&self, x: f64, y: f64, reach: f64, out: &mut Vec<u32>) {
        out.clear();
        let x0 = Self::axis_bucket(x - reach, self.bucket_size, self.cols);
        let x1 = Self::axis_bucket(x + reach, self.bucket_size, self.cols);
        let y0 = Self::axis_bucket(y - reach, self.bucket_size, self.rows);
        let y1 = Self::axis_bucket(y + reach, self.bucket_size, self.rows);
        for by in y0..=y1 {
            for bx in x0..=x1 {
                out.extend_from_slice(&self.buckets[by * self.cols + bx]);
            }
        }
        // Summation order must not depend on bucket layout.
        out.sort_unstable();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/density/index.rs"]
mod tests;
