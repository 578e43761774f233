use serde_derive::{Deserialize, Serialize};

use crate::access::{RandomAccessible, RandomAccessibleInterval};
use crate::error::NbError;
use crate::interval::Interval;

use super::cursor::RectangleNeighborhoodCursor;
use super::random_access::RectangleNeighborhoodRandomAccess;
use super::rectangle::RectangleNeighborhoodFactory;

/// A hypercube window of radius `span` around each anchor.
///
/// Deserializes from operator configurations such as
/// `{"span": 2, "skip_center": true}`; missing fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleShape {
    pub span: i64,
    pub skip_center: bool,
}

impl Default for RectangleShape {
    fn default() -> Self {
        Self {
            span: 1,
            skip_center: false,
        }
    }
}

impl RectangleShape {
    pub fn new(span: i64, skip_center: bool) -> Self {
        Self { span, skip_center }
    }

    /// The window box `[-span, span]` in each of `n` dimensions.
    pub fn span_interval(&self, n: usize) -> Result<Interval, NbError> {
        if self.span < 0 {
            return Err(NbError::invalid_parameter(format!(
                "window radius must not be negative, got {}",
                self.span
            )));
        }
        Interval::centered(&vec![self.span; n])
    }

    pub fn factory(&self) -> RectangleNeighborhoodFactory {
        if self.skip_center {
            RectangleNeighborhoodFactory::skip_center()
        } else {
            RectangleNeighborhoodFactory::new()
        }
    }

    /// Scans every position of `source`.
    pub fn neighborhoods<'s, S>(
        &self,
        source: &'s S,
    ) -> Result<RectangleNeighborhoodCursor<S::Access<'s>>, NbError>
    where
        S: RandomAccessibleInterval + ?Sized + 's,
    {
        self.neighborhoods_within(source, source.interval().clone())
    }

    /// Scans the anchors in `interval`.
    pub fn neighborhoods_within<'s, S>(
        &self,
        source: &'s S,
        interval: Interval,
    ) -> Result<RectangleNeighborhoodCursor<S::Access<'s>>, NbError>
    where
        S: RandomAccessible + ?Sized + 's,
    {
        let span = self.span_interval(source.num_dimensions())?;
        RectangleNeighborhoodCursor::new(source, span, self.factory(), interval)
    }

    /// Windows at arbitrary anchors, always read through the checked path.
    pub fn neighborhoods_random_accessible<'s, S>(
        &self,
        source: &'s S,
    ) -> Result<RectangleNeighborhoodRandomAccess<S::Access<'s>>, NbError>
    where
        S: RandomAccessible + ?Sized + 's,
    {
        let span = self.span_interval(source.num_dimensions())?;
        RectangleNeighborhoodRandomAccess::new(source, span, self.factory(), None)
    }

    /// Windows at arbitrary anchors; anchors whose window fits in `interval`
    /// read through the unchecked path.
    pub fn neighborhoods_random_accessible_within<'s, S>(
        &self,
        source: &'s S,
        interval: Interval,
    ) -> Result<RectangleNeighborhoodRandomAccess<S::Access<'s>>, NbError>
    where
        S: RandomAccessible + ?Sized + 's,
    {
        let span = self.span_interval(source.num_dimensions())?;
        RectangleNeighborhoodRandomAccess::new(source, span, self.factory(), Some(interval))
    }
}
