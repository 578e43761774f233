use std::ptr;
use std::rc::Rc;

use crate::access::{Localizable, RandomAccess};

use super::rectangle::RectangleNeighborhood;
use super::Neighborhood;

/// Iterates the cells of one window in raster order (dimension 0 fastest).
///
/// The cursor precomputes a stencil: one accessor per cell, positioned at
/// that cell when the cursor is built. [`LocalCursor::reset`] re-anchors the
/// cursor on a moved window by translating every stencil entry by the
/// difference between the new and the previous window minimum, so the
/// stencil is never rebuilt.
///
/// Clones share the stencil until one of them is re-anchored, at which point
/// that clone takes its own copy. Advancing or re-anchoring a clone never
/// affects the cursor it came from.
#[derive(Clone, Debug)]
pub struct LocalCursor<A> {
    // Identity of the window the stencil was laid out from; never dereferenced.
    window: *const RectangleNeighborhood<A>,
    stencil: Rc<Vec<A>>,
    index: isize,
    previous_min: Vec<i64>,
    delta: Vec<i64>,
}

impl<A: RandomAccess> LocalCursor<A> {
    pub(crate) fn new(neighborhood: &Neighborhood<'_, A>) -> Self {
        let anchor = neighborhood.anchor();
        let window = neighborhood.window();
        let (min, max) = (anchor.min(), anchor.max());
        let n = min.len();
        let volume = window.span().size() as usize;
        let center_index = window.center_index();

        let mut stencil = Vec::with_capacity(window.size());
        if volume > 0 {
            let mut access = window.access().clone();
            access.set_position(min);

            for index in 0..volume {
                if center_index != Some(index) {
                    stencil.push(access.clone());
                }

                access.fwd(0);
                if access.position(0) > max[0] {
                    access.set_position_dim(min[0], 0);
                    for d in 1..n {
                        access.fwd(d);
                        if access.position(d) > max[d] {
                            access.set_position_dim(min[d], d);
                        } else {
                            break;
                        }
                    }
                }
            }
        }

        Self {
            window: window as *const RectangleNeighborhood<A>,
            stencil: Rc::new(stencil),
            index: -1,
            previous_min: min.to_vec(),
            delta: vec![0; n],
        }
    }

    /// Number of cells the cursor visits.
    pub fn size(&self) -> usize {
        self.stencil.len()
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.stencil.len() as isize
    }

    #[inline]
    pub fn fwd(&mut self) {
        self.index += 1;
    }

    /// Advances `steps` cells at once. The target must be a cell of the window.
    pub fn jump_fwd(&mut self, steps: usize) {
        debug_assert!(
            steps <= self.len(),
            "jump_fwd({}) moves past the last cell",
            steps
        );
        self.index += steps as isize;
    }

    /// Value at the current cell. Must follow at least one `fwd`.
    #[inline]
    pub fn get(&self) -> A::Item {
        debug_assert!(self.index >= 0, "get() called before the first fwd()");
        self.stencil[self.index as usize].get()
    }

    /// Re-anchors the cursor on `neighborhood`, which must be a view of the
    /// window the cursor was built from, and moves it before the first cell.
    ///
    /// # Panics
    ///
    /// If `neighborhood` views a different window.
    pub fn reset(&mut self, neighborhood: &Neighborhood<'_, A>) {
        assert!(
            ptr::eq(self.window, neighborhood.window()),
            "reset() with a window the cursor was not built from"
        );
        self.index = -1;

        let min = neighborhood.mins();
        debug_assert_eq!(min.len(), self.previous_min.len());
        let mut moved = false;
        for (d, delta) in self.delta.iter_mut().enumerate() {
            *delta = min[d] - self.previous_min[d];
            moved |= *delta != 0;
        }
        if !moved {
            return;
        }

        self.previous_min.copy_from_slice(min);
        for access in Rc::make_mut(&mut self.stencil).iter_mut() {
            access.move_by(&self.delta);
        }
    }

    /// Moves before the first cell without re-anchoring.
    pub fn rewind(&mut self) {
        self.index = -1;
    }
}

impl<A: RandomAccess> Localizable for LocalCursor<A> {
    fn num_dimensions(&self) -> usize {
        self.previous_min.len()
    }

    fn position(&self, d: usize) -> i64 {
        self.stencil[self.index as usize].position(d)
    }

    fn localize(&self, position: &mut [i64]) {
        self.stencil[self.index as usize].localize(position)
    }
}

impl<A: RandomAccess> Iterator for LocalCursor<A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<A::Item> {
        if self.has_next() {
            self.fwd();
            Some(self.get())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.stencil.len() as isize - self.index - 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl<A: RandomAccess> ExactSizeIterator for LocalCursor<A> {}
