use crate::error::NbError;

/// Axis-aligned n-dimensional integer box with inclusive bounds.
///
/// An interval may be empty along an axis (`max == min - 1`), in which case its
/// volume is zero. Negative extents are rejected at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    min: Vec<i64>,
    max: Vec<i64>,
}

#[track_caller]
fn check_dim(d: usize, n: usize) {
    assert!(
        d < n,
        "dimension index {} out of range for a {}-dimensional interval",
        d,
        n
    );
}

impl Interval {
    /// Creates an interval from its inclusive corners.
    ///
    /// # Arguments
    ///
    /// * `min`: The lower corner.
    /// * `max`: The upper corner. Each `max[d]` must be at least `min[d] - 1`.
    pub fn new(min: Vec<i64>, max: Vec<i64>) -> Result<Self, NbError> {
        NbError::check_dimensions(min.len(), max.len())?;
        if let Some(d) = (0..min.len()).find(|&d| max[d] < min[d] - 1) {
            return Err(NbError::invalid_parameter(format!(
                "negative extent in dimension {}: min {} max {}",
                d, min[d], max[d]
            )));
        }
        Ok(Self { min, max })
    }

    /// Interval `[0, dims[d] - 1]` along every axis, the domain of an array with shape `dims`.
    pub fn from_dimensions(dims: &[usize]) -> Self {
        Self {
            min: vec![0; dims.len()],
            max: dims.iter().map(|&s| s as i64 - 1).collect(),
        }
    }

    /// Span `[-r, r]` along every axis.
    pub fn centered(radii: &[i64]) -> Result<Self, NbError> {
        Self::new(radii.iter().map(|r| -r).collect(), radii.to_vec())
    }

    pub fn num_dimensions(&self) -> usize {
        self.min.len()
    }

    #[track_caller]
    pub fn min(&self, d: usize) -> i64 {
        check_dim(d, self.min.len());
        self.min[d]
    }

    #[track_caller]
    pub fn max(&self, d: usize) -> i64 {
        check_dim(d, self.max.len());
        self.max[d]
    }

    /// Number of cells along axis `d`.
    #[track_caller]
    pub fn dimension(&self, d: usize) -> i64 {
        self.max(d) - self.min(d) + 1
    }

    pub fn mins(&self) -> &[i64] {
        &self.min
    }

    pub fn maxs(&self) -> &[i64] {
        &self.max
    }

    pub fn dimensions(&self) -> Vec<i64> {
        (0..self.num_dimensions()).map(|d| self.dimension(d)).collect()
    }

    /// Number of cells in the interval.
    pub fn size(&self) -> u64 {
        (0..self.num_dimensions())
            .map(|d| self.dimension(d).max(0) as u64)
            .product()
    }

    pub fn is_empty(&self) -> bool {
        (0..self.num_dimensions()).any(|d| self.max[d] < self.min[d])
    }

    pub fn contains_point(&self, position: &[i64]) -> bool {
        debug_assert_eq!(position.len(), self.num_dimensions());
        position
            .iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .all(|(p, (lo, hi))| lo <= p && p <= hi)
    }

    /// True if every cell of `other` lies inside `self`. An empty `other` is always contained.
    pub fn contains(&self, other: &Interval) -> bool {
        debug_assert_eq!(other.num_dimensions(), self.num_dimensions());
        if other.is_empty() {
            return true;
        }
        (0..self.num_dimensions())
            .all(|d| self.min[d] <= other.min[d] && other.max[d] <= self.max[d])
    }

    /// Grows (or shrinks, for negative amounts) the interval symmetrically.
    pub fn expand(&self, amount: &[i64]) -> Result<Self, NbError> {
        NbError::check_dimensions(self.num_dimensions(), amount.len())?;
        Self::new(
            self.min.iter().zip(amount).map(|(m, a)| m - a).collect(),
            self.max.iter().zip(amount).map(|(m, a)| m + a).collect(),
        )
    }

    /// Every position any window of shape `span` anchored inside `self` may touch.
    pub fn expand_by(&self, span: &Interval) -> Result<Self, NbError> {
        NbError::check_dimensions(self.num_dimensions(), span.num_dimensions())?;
        Self::new(
            self.min.iter().zip(&span.min).map(|(m, s)| m + s).collect(),
            self.max.iter().zip(&span.max).map(|(m, s)| m + s).collect(),
        )
    }

    /// Anchors whose window of shape `span` lies entirely inside `self`.
    ///
    /// When the span is at least as large as `self` along some axis the
    /// result is empty; the extent is clamped so it is never negative.
    pub fn shrink_by(&self, span: &Interval) -> Result<Self, NbError> {
        NbError::check_dimensions(self.num_dimensions(), span.num_dimensions())?;
        let min: Vec<i64> = self.min.iter().zip(&span.min).map(|(m, s)| m - s).collect();
        let max = self
            .max
            .iter()
            .zip(&span.max)
            .zip(&min)
            .map(|((m, s), lo)| (m - s).max(lo - 1))
            .collect();
        Self::new(min, max)
    }

    pub fn translate(&self, offset: &[i64]) -> Result<Self, NbError> {
        NbError::check_dimensions(self.num_dimensions(), offset.len())?;
        Ok(self.shifted(offset))
    }

    pub(crate) fn shifted(&self, offset: &[i64]) -> Self {
        Self {
            min: self.min.iter().zip(offset).map(|(m, o)| m + o).collect(),
            max: self.max.iter().zip(offset).map(|(m, o)| m + o).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;
    use crate::error::NbError;

    #[test]
    fn test_construction() {
        let interval = Interval::new(vec![0, -2], vec![9, 2]).unwrap();
        assert_eq!(interval.num_dimensions(), 2);
        assert_eq!(interval.dimensions(), vec![10, 5]);
        assert_eq!(interval.size(), 50);

        let empty = Interval::new(vec![3], vec![2]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.size(), 0);

        assert!(matches!(
            Interval::new(vec![3], vec![1]),
            Err(NbError::InvalidParameter(_))
        ));
        assert_eq!(
            Interval::new(vec![0, 0], vec![1]),
            Err(NbError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_from_dimensions_and_centered() {
        let interval = Interval::from_dimensions(&[4, 3, 2]);
        assert_eq!(interval.mins(), &[0, 0, 0]);
        assert_eq!(interval.maxs(), &[3, 2, 1]);

        let span = Interval::centered(&[1, 3]).unwrap();
        assert_eq!(span.mins(), &[-1, -3]);
        assert_eq!(span.maxs(), &[1, 3]);
        assert_eq!(span.size(), 21);
    }

    #[test]
    fn test_regions() {
        let access = Interval::from_dimensions(&[10, 6]);
        let span = Interval::new(vec![-1, -2], vec![3, 2]).unwrap();

        let source = access.expand_by(&span).unwrap();
        assert_eq!(source.mins(), &[-1, -2]);
        assert_eq!(source.maxs(), &[12, 7]);

        let inner = access.shrink_by(&span).unwrap();
        assert_eq!(inner.mins(), &[1, 2]);
        assert_eq!(inner.maxs(), &[6, 3]);
        assert!(access.contains(&inner));
    }

    #[test]
    fn test_shrink_to_empty() {
        let access = Interval::from_dimensions(&[3, 10]);
        let span = Interval::centered(&[2, 1]).unwrap();
        let inner = access.shrink_by(&span).unwrap();
        assert!(inner.is_empty());
        assert_eq!(inner.size(), 0);
        assert_eq!(inner.dimension(1), 8);
    }

    #[test]
    fn test_contains() {
        let interval = Interval::from_dimensions(&[5, 5]);
        assert!(interval.contains_point(&[0, 4]));
        assert!(!interval.contains_point(&[-1, 4]));
        assert!(!interval.contains_point(&[2, 5]));

        assert!(interval.contains(&interval));
        assert!(!interval.contains(&interval.expand(&[1, 0]).unwrap()));
        assert!(interval.contains(&interval.expand(&[-1, -1]).unwrap()));
    }

    #[test]
    fn test_translate() {
        let interval = Interval::centered(&[1, 1])
            .unwrap()
            .translate(&[5, -5])
            .unwrap();
        assert_eq!(interval.mins(), &[4, -6]);
        assert_eq!(interval.maxs(), &[6, -4]);
    }

    #[test]
    #[should_panic(expected = "dimension index 2 out of range")]
    fn test_dimension_out_of_range() {
        Interval::from_dimensions(&[4, 4]).min(2);
    }
}
