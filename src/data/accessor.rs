use crate::data::record::PointRecord;
use crate::foundation::core::WeightedPoint;

type FieldFn<T> = Box<dyn Fn(&T, usize) -> Option<f64> + Send + Sync>;

/// Pulls numeric `x`, `y` and `weight` out of a caller record.
///
/// Returning `None` (or a non-finite value) means "cannot extract"; the record is then left
/// out of the point set instead of failing the batch.
pub trait PointAccessor<T: ?Sized> {
    fn x(&self, record: &T, index: usize) -> Option<f64>;

    fn y(&self, record: &T, index: usize) -> Option<f64>;

    /// Defaults to a constant weight of 1.
    fn weight(&self, _record: &T, _index: usize) -> Option<f64> {
        Some(1.0)
    }
}

/// Where [`RecordAccessor`] takes weights from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum WeightSource {
    /// Every record weighs the same.
    #[default]
    Unit,
    /// Use the record's own `weight` field, falling back to 1 when absent.
    Record,
}

/// Accessor for the built-in [`PointRecord`] layouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordAccessor {
    pub weights: WeightSource,
}

impl RecordAccessor {
    pub fn with_record_weight() -> Self {
        Self {
            weights: WeightSource::Record,
        }
    }
}

impl PointAccessor<PointRecord> for RecordAccessor {
    fn x(&self, record: &PointRecord, _index: usize) -> Option<f64> {
        Some(record.xy().0)
    }

    fn y(&self, record: &PointRecord, _index: usize) -> Option<f64> {
        Some(record.xy().1)
    }

    fn weight(&self, record: &PointRecord, _index: usize) -> Option<f64> {
        match self.weights {
            WeightSource::Unit => Some(1.0),
            WeightSource::Record => Some(record.weight().unwrap_or(1.0)),
        }
    }
}

/// Accessor made of caller-supplied closures.
pub struct FnAccessor<T> {
    x: FieldFn<T>,
    y: FieldFn<T>,
    weight: Option<FieldFn<T>>,
}

impl<T> FnAccessor<T> {
    pub fn new(
        x: impl Fn(&T, usize) -> Option<f64> + Send + Sync + 'static,
        y: impl Fn(&T, usize) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            x: Box::new(x),
            y: Box::new(y),
            weight: None,
        }
    }

    pub fn with_weight(
        mut self,
        weight: impl Fn(&T, usize) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.weight = Some(Box::new(weight));
        self
    }
}

impl<T> PointAccessor<T> for FnAccessor<T> {
    fn x(&self, record: &T, index: usize) -> Option<f64> {
        (self.x)(record, index)
    }

    fn y(&self, record: &T, index: usize) -> Option<f64> {
        (self.y)(record, index)
    }

    fn weight(&self, record: &T, index: usize) -> Option<f64> {
        match &self.weight {
            Some(f) => f(record, index),
            None => Some(1.0),
        }
    }
}

impl<T> std::fmt::Debug for FnAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAccessor")
            .field("custom_weight", &self.weight.is_some())
            .finish()
    }
}

/// Resolve one record, or `None` when any component is missing or unusable.
pub fn resolve_point<T: ?Sized, A: PointAccessor<T> + ?Sized>(
    accessor: &A,
    record: &T,
    index: usize,
) -> Option<WeightedPoint> {
    let x = accessor.x(record, index).filter(|v| v.is_finite())?;
    let y = accessor.y(record, index).filter(|v| v.is_finite())?;
    let weight = accessor
        .weight(record, index)
        .filter(|w| w.is_finite() && *w >= 0.0)?;
    Some(WeightedPoint::new(x, y, weight))
}

/// Resolve every record, skipping the ones that cannot be extracted.
pub fn extract_points<T, A: PointAccessor<T> + ?Sized>(
    records: &[T],
    accessor: &A,
) -> Vec<WeightedPoint> {
    let out: Vec<WeightedPoint> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| resolve_point(accessor, r, i))
        .collect();
    let skipped = records.len() - out.len();
    if skipped > 0 {
        tracing::trace!(skipped, kept = out.len(), "records without usable coordinates");
    }
    out
}

/// Like [`extract_points`] for parsed slots, where unknown layouts are already `None`.
pub fn extract_record_points(
    records: &[Option<PointRecord>],
    accessor: &RecordAccessor,
) -> Vec<WeightedPoint> {
    let out: Vec<WeightedPoint> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.as_ref().and_then(|r| resolve_point(accessor, r, i)))
        .collect();
    let skipped = records.len() - out.len();
    if skipped > 0 {
        tracing::trace!(skipped, kept = out.len(), "records without usable coordinates");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/data/accessor.rs"]
mod tests;
