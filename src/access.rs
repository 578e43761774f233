//! Positioned access into n-dimensional sources.
//!
//! A source hands out [`RandomAccess`] instances; each one carries its own
//! position and can be moved absolutely or relatively and duplicated with
//! `Clone`. Duplicates share the source but never the position.

use crate::interval::Interval;

/// Anything that has an integer position in n-dimensional space.
pub trait Localizable {
    fn num_dimensions(&self) -> usize;

    /// Coordinate along dimension `d`.
    fn position(&self, d: usize) -> i64;

    /// Writes the full position into `position`.
    fn localize(&self, position: &mut [i64]) {
        for (d, p) in position.iter_mut().enumerate() {
            *p = self.position(d);
        }
    }

    /// Convenience copy of the current position.
    fn position_vec(&self) -> Vec<i64> {
        let mut position = vec![0; self.num_dimensions()];
        self.localize(&mut position);
        position
    }
}

/// A movable accessor yielding the value stored at its current position.
pub trait RandomAccess: Localizable + Clone {
    type Item;

    fn get(&self) -> Self::Item;

    fn set_position(&mut self, position: &[i64]);

    fn set_position_dim(&mut self, value: i64, d: usize);

    /// Moves one step forward along `d`.
    fn fwd(&mut self, d: usize);

    /// Moves one step backward along `d`.
    fn bck(&mut self, d: usize);

    /// Moves by a relative offset.
    fn move_by(&mut self, offset: &[i64]);
}

/// A source that can create accessors.
pub trait RandomAccessible {
    type Access<'s>: RandomAccess
    where
        Self: 's;

    fn num_dimensions(&self) -> usize;

    /// An accessor valid at every position of the source's domain.
    fn random_access(&self) -> Self::Access<'_>;

    /// An accessor that is only required to be valid inside `interval`.
    /// Implementations may return a faster accessor that skips per-dimension
    /// bounds checks when `interval` is known to be backed by storage.
    fn random_access_within(&self, interval: &Interval) -> Self::Access<'_>;
}

/// A source with a finite domain.
pub trait RandomAccessibleInterval: RandomAccessible {
    fn interval(&self) -> &Interval;
}
