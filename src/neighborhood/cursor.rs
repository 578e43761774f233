use crate::access::{Localizable, RandomAccess, RandomAccessible};
use crate::error::NbError;
use crate::interval::Interval;

use super::rectangle::{Neighborhood, RectangleNeighborhoodFactory};
use super::sampler::{InnerTracker, RectangleNeighborhoodSampler};

/// Visits every anchor of an access region in raster order (dimension 0
/// fastest) and hands out the window at each one.
///
/// Anchors whose window lies inside the access region get the inner window,
/// which reads without per-dimension bounds checks; the rest get the checked
/// window. Both windows are built once, in the constructor, and re-anchored
/// in place as the cursor moves.
///
/// ```ignore
/// let mut cursor = RectangleNeighborhoodCursor::new(&source, span, factory, region)?;
/// while cursor.has_next() {
///     cursor.fwd();
///     let sum: u32 = cursor.get().into_iter().map(|v| *v as u32).sum();
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RectangleNeighborhoodCursor<A> {
    sampler: RectangleNeighborhoodSampler<A>,
    access_interval: Interval,
    volume: u64,
    index: i64,
    tracker: InnerTracker,
    safe: bool,
}

impl<A: RandomAccess> RectangleNeighborhoodCursor<A> {
    /// The cursor starts before the first anchor; call `fwd` before `get`.
    pub fn new<'s, S>(
        source: &'s S,
        span: Interval,
        factory: RectangleNeighborhoodFactory,
        access_interval: Interval,
    ) -> Result<Self, NbError>
    where
        S: RandomAccessible<Access<'s> = A> + ?Sized + 's,
    {
        let sampler =
            RectangleNeighborhoodSampler::new(source, span, factory, Some(access_interval.clone()))?;
        let tracker = sampler.inner_tracker();
        let mut cursor = Self {
            sampler,
            volume: access_interval.size(),
            access_interval,
            index: -1,
            tracker,
            safe: false,
        };
        cursor.reset();
        Ok(cursor)
    }

    /// Moves before the first anchor.
    pub fn reset(&mut self) {
        let (anchor, span) = self.sampler.anchor_mut();
        anchor.set_position(self.access_interval.mins(), span);
        anchor.shift(0, -1);
        self.tracker.reset(anchor.position());
        self.index = -1;
        self.safe = false;
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.volume as i64
    }

    /// Moves to the next anchor. Must only be called while `has_next`.
    #[inline]
    pub fn fwd(&mut self) {
        assert!(self.has_next(), "fwd() called past the last anchor");
        self.index += 1;

        let anchor = &mut self.sampler.anchor;
        anchor.shift(0, 1);
        let mut p0 = anchor.position()[0];
        if p0 > self.access_interval.max(0) {
            p0 = self.next_line();
        }
        self.tracker.update(0, p0);
        self.safe = self.tracker.is_inside();
    }

    /// Carries the overflow of dimension 0 into the higher dimensions and
    /// returns the new dimension-0 position.
    fn next_line(&mut self) -> i64 {
        let anchor = &mut self.sampler.anchor;
        let min0 = self.access_interval.min(0);
        let p0 = anchor.position()[0];
        anchor.shift(0, min0 - p0);
        for d in 1..self.access_interval.num_dimensions() {
            anchor.shift(d, 1);
            let p = anchor.position()[d];
            if p > self.access_interval.max(d) {
                let min = self.access_interval.min(d);
                anchor.shift(d, min - p);
                self.tracker.update(d, min);
            } else {
                self.tracker.update(d, p);
                break;
            }
        }
        self.access_interval.min(0)
    }

    /// Advances `steps` anchors at once, as if `fwd` had been called `steps`
    /// times.
    pub fn jump_fwd(&mut self, steps: u64) {
        if steps == 0 {
            return;
        }
        // Anchors left after the current one; the index is at least -1.
        let remaining = self.volume - (self.index + 1) as u64;
        assert!(
            steps <= remaining,
            "jump_fwd({}) moves past the last anchor",
            steps
        );
        self.index += steps as i64;

        // Decode the raster index, dimension 0 fastest.
        let (anchor, span) = self.sampler.anchor_mut();
        let mut rest = self.index as u64;
        for d in 0..self.access_interval.num_dimensions() {
            let extent = self.access_interval.dimension(d) as u64;
            let p = self.access_interval.min(d) + (rest % extent) as i64;
            anchor.set_position_dim(p, d, span);
            rest /= extent;
        }
        self.tracker.reset(anchor.position());
        self.safe = self.tracker.is_inside();
    }

    /// The window at the current anchor.
    #[inline]
    pub fn get(&self) -> Neighborhood<'_, A> {
        self.sampler.neighborhood(self.safe)
    }

    /// `fwd` followed by `get`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Neighborhood<'_, A> {
        self.fwd();
        self.get()
    }

    /// Calls `f` with the window at every remaining anchor.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(Neighborhood<'_, A>),
    {
        while self.has_next() {
            self.fwd();
            f(self.get());
        }
    }

    /// Whether the current window is read through the unchecked path.
    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// Raster index of the current anchor, `-1` before the first `fwd`.
    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn access_interval(&self) -> &Interval {
        &self.access_interval
    }

    pub fn sampler(&self) -> &RectangleNeighborhoodSampler<A> {
        &self.sampler
    }
}

impl<A: RandomAccess> Localizable for RectangleNeighborhoodCursor<A> {
    fn num_dimensions(&self) -> usize {
        self.access_interval.num_dimensions()
    }

    fn position(&self, d: usize) -> i64 {
        self.sampler.anchor.position()[d]
    }
}
