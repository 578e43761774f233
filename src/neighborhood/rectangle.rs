use crate::access::{Localizable, RandomAccess};
use crate::interval::Interval;

use super::LocalCursor;

/// Position state shared by the two windows of a sampler.
///
/// `min` and `max` always equal `position` translated by the span's min and
/// max; every mutator keeps the three arrays in lockstep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    position: Vec<i64>,
    min: Vec<i64>,
    max: Vec<i64>,
}

impl Anchor {
    /// Anchor at the origin.
    pub(crate) fn new(span: &Interval) -> Self {
        Self {
            position: vec![0; span.num_dimensions()],
            min: span.mins().to_vec(),
            max: span.maxs().to_vec(),
        }
    }

    pub fn position(&self) -> &[i64] {
        &self.position
    }

    pub fn min(&self) -> &[i64] {
        &self.min
    }

    pub fn max(&self) -> &[i64] {
        &self.max
    }

    pub(crate) fn set_position(&mut self, position: &[i64], span: &Interval) {
        for (d, &p) in position.iter().enumerate() {
            self.set_position_dim(p, d, span);
        }
    }

    #[inline]
    pub(crate) fn set_position_dim(&mut self, value: i64, d: usize, span: &Interval) {
        self.position[d] = value;
        self.min[d] = value + span.min(d);
        self.max[d] = value + span.max(d);
    }

    #[inline]
    pub(crate) fn shift(&mut self, d: usize, amount: i64) {
        self.position[d] += amount;
        self.min[d] += amount;
        self.max[d] += amount;
    }
}

/// Creates the windows a sampler reuses for a whole scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RectangleNeighborhoodFactory {
    skip_center: bool,
}

impl RectangleNeighborhoodFactory {
    /// Windows that visit every cell of their box.
    pub fn new() -> Self {
        Self { skip_center: false }
    }

    /// Windows that visit every cell of their box except the anchor.
    pub fn skip_center() -> Self {
        Self { skip_center: true }
    }

    pub fn skips_center(&self) -> bool {
        self.skip_center
    }

    /// Builds a window of shape `span` reading through `access`.
    ///
    /// The window holds no position of its own. It is paired with an
    /// [`Anchor`] each time it is viewed.
    ///
    /// # Arguments
    ///
    /// * `span`: The window's box relative to its anchor.
    /// * `access`: The accessor duplicated into every cursor's stencil.
    pub fn create<A: RandomAccess>(&self, span: &Interval, access: A) -> RectangleNeighborhood<A> {
        RectangleNeighborhood::new(span.clone(), self.skip_center, access)
    }
}

/// A rectangular window that is built once and re-anchored in place.
///
/// The window holds its shape and a template accessor but not its position:
/// the position lives in the [`Anchor`] of the sampler that owns it, and the
/// pair is handed out as a [`Neighborhood`].
#[derive(Clone, Debug)]
pub struct RectangleNeighborhood<A> {
    span: Interval,
    size: usize,
    center_index: Option<usize>,
    access: A,
}

impl<A: RandomAccess> RectangleNeighborhood<A> {
    fn new(span: Interval, skip_center: bool, access: A) -> Self {
        let volume = span.size() as usize;

        // Raster index of the anchor inside the box, dimension 0 fastest.
        let n = span.num_dimensions();
        let center_index = if skip_center && (0..n).all(|d| span.min(d) <= 0 && 0 <= span.max(d)) {
            let mut index = 0usize;
            let mut stride = 1usize;
            for d in 0..n {
                index += (-span.min(d)) as usize * stride;
                stride *= span.dimension(d) as usize;
            }
            Some(index)
        } else {
            None
        };

        Self {
            size: volume - center_index.map_or(0, |_| 1),
            span,
            center_index,
            access,
        }
    }

    /// Number of cells a cursor over this window visits.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn span(&self) -> &Interval {
        &self.span
    }

    pub fn skips_center(&self) -> bool {
        self.center_index.is_some()
    }

    pub(crate) fn center_index(&self) -> Option<usize> {
        self.center_index
    }

    pub(crate) fn access(&self) -> &A {
        &self.access
    }
}

/// A window viewed at the current anchor of its sampler.
///
/// Cheap to copy: it only borrows the sampler's window and position state.
/// Use [`Neighborhood::interval`] to keep the bounding box after the sampler
/// moves on.
#[derive(Debug)]
pub struct Neighborhood<'n, A> {
    anchor: &'n Anchor,
    window: &'n RectangleNeighborhood<A>,
}

impl<'n, A> Clone for Neighborhood<'n, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'n, A> Copy for Neighborhood<'n, A> {}

impl<'n, A: RandomAccess> Neighborhood<'n, A> {
    pub(crate) fn new(anchor: &'n Anchor, window: &'n RectangleNeighborhood<A>) -> Self {
        Self { anchor, window }
    }

    /// Number of cells in the window.
    pub fn size(&self) -> usize {
        self.window.size()
    }

    pub fn min(&self, d: usize) -> i64 {
        self.anchor.min[d]
    }

    pub fn max(&self, d: usize) -> i64 {
        self.anchor.max[d]
    }

    pub fn mins(&self) -> &'n [i64] {
        self.anchor.min()
    }

    pub fn maxs(&self) -> &'n [i64] {
        self.anchor.max()
    }

    /// Extent of the window along `d`.
    pub fn dimension(&self, d: usize) -> i64 {
        self.window.span.dimension(d)
    }

    pub fn span(&self) -> &'n Interval {
        self.window.span()
    }

    /// Snapshot of the window's absolute bounding box.
    pub fn interval(&self) -> Interval {
        self.window.span.shifted(&self.anchor.position)
    }

    pub(crate) fn anchor(&self) -> &'n Anchor {
        self.anchor
    }

    pub(crate) fn window(&self) -> &'n RectangleNeighborhood<A> {
        self.window
    }

    /// A fresh cursor over the window's cells, positioned before the first one.
    pub fn cursor(&self) -> LocalCursor<A> {
        LocalCursor::new(self)
    }

    /// Same as [`Neighborhood::cursor`]; raster order already tracks position.
    pub fn localizing_cursor(&self) -> LocalCursor<A> {
        self.cursor()
    }

    pub fn first_element(&self) -> Option<A::Item> {
        self.cursor().next()
    }
}

impl<'n, A: RandomAccess> Localizable for Neighborhood<'n, A> {
    fn num_dimensions(&self) -> usize {
        self.anchor.position.len()
    }

    fn position(&self, d: usize) -> i64 {
        self.anchor.position[d]
    }
}

impl<'n, A: RandomAccess> IntoIterator for Neighborhood<'n, A> {
    type Item = A::Item;
    type IntoIter = LocalCursor<A>;

    fn into_iter(self) -> LocalCursor<A> {
        self.cursor()
    }
}
