use crate::access::{Localizable, RandomAccess, RandomAccessible};
use crate::error::NbError;
use crate::interval::Interval;

use super::rectangle::{Anchor, Neighborhood, RectangleNeighborhood, RectangleNeighborhoodFactory};

/// Region bookkeeping and the two reusable windows shared by the scan cursor
/// and the random-access sampler.
///
/// Given an access region (the anchors that will be visited) and a span:
///
/// * the source region is the access region expanded by the span, i.e. every
///   cell a window may touch;
/// * the inner region is the access region shrunk by the span, i.e. the
///   anchors whose window lies entirely inside the access region.
///
/// The checked window reads through an accessor valid over the source region.
/// The inner window reads through an accessor requested for the access region
/// only, which sources may serve without per-dimension bounds checks. Both
/// windows are viewed through the same [`Anchor`].
#[derive(Clone, Debug)]
pub struct RectangleNeighborhoodSampler<A> {
    span: Interval,
    access_interval: Option<Interval>,
    source_interval: Option<Interval>,
    inner_interval: Option<Interval>,
    pub(crate) anchor: Anchor,
    checked: RectangleNeighborhood<A>,
    inner: RectangleNeighborhood<A>,
}

impl<A: RandomAccess> RectangleNeighborhoodSampler<A> {
    /// # Arguments
    ///
    /// * `source`: The source the windows read from.
    /// * `span`: The window shape relative to its anchor.
    /// * `factory`: Builds the two windows.
    /// * `access_interval`: The anchors that will be visited. Without it the
    ///   regions are unknown and only the checked window is ever handed out.
    pub fn new<'s, S>(
        source: &'s S,
        span: Interval,
        factory: RectangleNeighborhoodFactory,
        access_interval: Option<Interval>,
    ) -> Result<Self, NbError>
    where
        S: RandomAccessible<Access<'s> = A> + ?Sized + 's,
    {
        let n = source.num_dimensions();
        if n == 0 {
            return Err(NbError::invalid_parameter(
                "neighborhoods need at least one dimension",
            ));
        }
        NbError::check_dimensions(n, span.num_dimensions())?;

        let anchor = Anchor::new(&span);
        let (checked, inner, source_interval, inner_interval) = match &access_interval {
            Some(access) => {
                NbError::check_dimensions(n, access.num_dimensions())?;
                let source_interval = access.expand_by(&span)?;
                let inner_interval = access.shrink_by(&span)?;
                tracing::debug!(
                    "neighborhood regions: access {:?}, source {:?}, inner {:?}",
                    access,
                    source_interval,
                    inner_interval
                );
                if inner_interval.is_empty() && !access.is_empty() {
                    tracing::debug!(
                        "inner region is empty for span {:?}: every window takes the checked path",
                        span
                    );
                }
                (
                    factory.create(&span, source.random_access_within(&source_interval)),
                    factory.create(&span, source.random_access_within(access)),
                    Some(source_interval),
                    Some(inner_interval),
                )
            }
            None => (
                factory.create(&span, source.random_access()),
                factory.create(&span, source.random_access()),
                None,
                None,
            ),
        };

        Ok(Self {
            span,
            access_interval,
            source_interval,
            inner_interval,
            anchor,
            checked,
            inner,
        })
    }

    pub fn span(&self) -> &Interval {
        &self.span
    }

    pub fn access_interval(&self) -> Option<&Interval> {
        self.access_interval.as_ref()
    }

    pub fn source_interval(&self) -> Option<&Interval> {
        self.source_interval.as_ref()
    }

    pub fn inner_interval(&self) -> Option<&Interval> {
        self.inner_interval.as_ref()
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// The anchor together with the span it is kept in lockstep with.
    #[inline]
    pub(crate) fn anchor_mut(&mut self) -> (&mut Anchor, &Interval) {
        (&mut self.anchor, &self.span)
    }

    /// The checked window at the current anchor.
    pub fn get(&self) -> Neighborhood<'_, A> {
        Neighborhood::new(&self.anchor, &self.checked)
    }

    /// The inner window when `safe`, the checked one otherwise.
    #[inline]
    pub(crate) fn neighborhood(&self, safe: bool) -> Neighborhood<'_, A> {
        if safe {
            Neighborhood::new(&self.anchor, &self.inner)
        } else {
            Neighborhood::new(&self.anchor, &self.checked)
        }
    }

    /// Starts a tracker over the inner region; an unknown region is empty.
    pub(crate) fn inner_tracker(&self) -> InnerTracker {
        let n = self.span.num_dimensions();
        match &self.inner_interval {
            Some(inner) => InnerTracker::new(inner.mins().to_vec(), inner.maxs().to_vec()),
            None => InnerTracker::new(vec![0; n], vec![-1; n]),
        }
    }
}

impl<A: RandomAccess> Localizable for RectangleNeighborhoodSampler<A> {
    fn num_dimensions(&self) -> usize {
        self.span.num_dimensions()
    }

    fn position(&self, d: usize) -> i64 {
        self.anchor.position()[d]
    }
}

/// Per-dimension inner-region membership of an anchor.
///
/// The anchor is inside the inner region iff no dimension is outside, so the
/// overall answer is a counter test, and moving along one dimension only
/// re-tests that dimension.
#[derive(Clone, Debug)]
pub(crate) struct InnerTracker {
    min: Vec<i64>,
    max: Vec<i64>,
    inside: Vec<bool>,
    outside: usize,
}

impl InnerTracker {
    fn new(min: Vec<i64>, max: Vec<i64>) -> Self {
        let n = min.len();
        Self {
            min,
            max,
            inside: vec![false; n],
            outside: n,
        }
    }

    /// Re-tests every dimension.
    pub(crate) fn reset(&mut self, position: &[i64]) {
        self.outside = 0;
        for (d, &p) in position.iter().enumerate() {
            self.inside[d] = self.min[d] <= p && p <= self.max[d];
            if !self.inside[d] {
                self.outside += 1;
            }
        }
    }

    /// Re-tests dimension `d` only.
    #[inline]
    pub(crate) fn update(&mut self, d: usize, p: i64) {
        let inside = self.min[d] <= p && p <= self.max[d];
        if inside != self.inside[d] {
            self.inside[d] = inside;
            if inside {
                self.outside -= 1;
            } else {
                self.outside += 1;
            }
        }
    }

    #[inline]
    pub(crate) fn is_inside(&self) -> bool {
        self.outside == 0
    }
}
