use crate::access::{Localizable, RandomAccess, RandomAccessible};
use crate::error::NbError;
use crate::interval::Interval;

use super::rectangle::{Neighborhood, RectangleNeighborhoodFactory};
use super::sampler::{InnerTracker, RectangleNeighborhoodSampler};

/// Windows at arbitrary anchors.
///
/// Same double-window scheme as the scan cursor, but the anchor is moved
/// explicitly. When constructed with an access region, anchors inside the
/// region's inner part read through the unchecked window; without one every
/// window is checked.
#[derive(Clone, Debug)]
pub struct RectangleNeighborhoodRandomAccess<A> {
    sampler: RectangleNeighborhoodSampler<A>,
    tracker: InnerTracker,
}

impl<A: RandomAccess> RectangleNeighborhoodRandomAccess<A> {
    /// Starts at the origin.
    pub fn new<'s, S>(
        source: &'s S,
        span: Interval,
        factory: RectangleNeighborhoodFactory,
        access_interval: Option<Interval>,
    ) -> Result<Self, NbError>
    where
        S: RandomAccessible<Access<'s> = A> + ?Sized + 's,
    {
        let sampler = RectangleNeighborhoodSampler::new(source, span, factory, access_interval)?;
        let mut tracker = sampler.inner_tracker();
        tracker.reset(sampler.anchor().position());
        Ok(Self { sampler, tracker })
    }

    pub fn set_position(&mut self, position: &[i64]) {
        let (anchor, span) = self.sampler.anchor_mut();
        anchor.set_position(position, span);
        self.tracker.reset(position);
    }

    pub fn set_position_dim(&mut self, value: i64, d: usize) {
        let (anchor, span) = self.sampler.anchor_mut();
        anchor.set_position_dim(value, d, span);
        self.tracker.update(d, value);
    }

    pub fn fwd(&mut self, d: usize) {
        self.shift(d, 1);
    }

    pub fn bck(&mut self, d: usize) {
        self.shift(d, -1);
    }

    pub fn move_by(&mut self, offset: &[i64]) {
        for (d, &o) in offset.iter().enumerate() {
            if o != 0 {
                self.shift(d, o);
            }
        }
    }

    #[inline]
    fn shift(&mut self, d: usize, amount: i64) {
        self.sampler.anchor.shift(d, amount);
        self.tracker.update(d, self.sampler.anchor.position()[d]);
    }

    /// Whether the window at the current anchor reads through the unchecked path.
    pub fn is_safe(&self) -> bool {
        self.tracker.is_inside()
    }

    /// The window at the current anchor.
    pub fn get(&self) -> Neighborhood<'_, A> {
        self.sampler.neighborhood(self.tracker.is_inside())
    }

    pub fn sampler(&self) -> &RectangleNeighborhoodSampler<A> {
        &self.sampler
    }
}

impl<A: RandomAccess> Localizable for RectangleNeighborhoodRandomAccess<A> {
    fn num_dimensions(&self) -> usize {
        self.sampler.num_dimensions()
    }

    fn position(&self, d: usize) -> i64 {
        self.sampler.anchor.position()[d]
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, Array3};
    use rstest::rstest;

    use super::RectangleNeighborhoodRandomAccess;
    use crate::access::Localizable;
    use crate::interval::Interval;
    use crate::neighborhood::RectangleNeighborhoodFactory;
    use crate::source::{ArraySource, BorderMode};
    use crate::unit_test::{counter_volume, ramp_image};

    #[rstest]
    fn test_moves_and_reads(ramp_image: Array2<i32>) {
        let source = ArraySource::new(ramp_image.view())
            .unwrap()
            .with_border(BorderMode::Constant(-1));
        let mut access = RectangleNeighborhoodRandomAccess::new(
            &source,
            Interval::centered(&[1, 1]).unwrap(),
            RectangleNeighborhoodFactory::skip_center(),
            Some(Interval::from_dimensions(&[10, 10])),
        )
        .unwrap();
        assert_eq!(access.position_vec(), vec![0, 0]);
        assert!(!access.is_safe());

        access.set_position(&[4, 6]);
        assert!(access.is_safe());
        let values: Vec<i32> = access.get().into_iter().copied().collect();
        assert_eq!(values, vec![35, 45, 55, 36, 56, 37, 47, 57]);

        access.fwd(1);
        access.fwd(1);
        access.fwd(1);
        assert_eq!(access.position_vec(), vec![4, 9]);
        assert!(!access.is_safe());
        assert_eq!(access.get().first_element(), Some(&38));
        assert_eq!(access.get().into_iter().filter(|v| **v == -1).count(), 3);

        access.bck(1);
        assert!(access.is_safe());
        access.move_by(&[-4, -2]);
        assert_eq!(access.position_vec(), vec![0, 6]);
        assert!(!access.is_safe());

        access.set_position_dim(1, 0);
        assert!(access.is_safe());
        assert_eq!(access.get().mins(), &[0, 5]);
    }

    #[test]
    fn test_without_region_is_always_checked() {
        let array = Array2::<u8>::ones((5, 5));
        let source = ArraySource::new(array.view())
            .unwrap()
            .with_border(BorderMode::Constant(0));
        let mut access = RectangleNeighborhoodRandomAccess::new(
            &source,
            Interval::centered(&[1, 1]).unwrap(),
            RectangleNeighborhoodFactory::new(),
            None,
        )
        .unwrap();

        access.set_position(&[2, 2]);
        assert!(!access.is_safe());
        assert_eq!(access.get().into_iter().map(|v| *v as u32).sum::<u32>(), 9);

        access.set_position(&[-1, -1]);
        assert_eq!(access.get().into_iter().map(|v| *v as u32).sum::<u32>(), 1);
    }

    #[rstest]
    fn test_writes_through_cells(mut counter_volume: Array3<u16>) {
        {
            let source = ArraySource::new(counter_volume.cell_view()).unwrap();
            let mut access = RectangleNeighborhoodRandomAccess::new(
                &source,
                Interval::centered(&[1, 1, 1]).unwrap(),
                RectangleNeighborhoodFactory::new(),
                Some(Interval::from_dimensions(&[10, 10, 10])),
            )
            .unwrap();
            access.set_position(&[5, 5, 5]);
            assert!(access.is_safe());
            for cell in access.get() {
                cell.set(cell.get() + 1);
            }
            access.fwd(0);
            for cell in access.get() {
                cell.set(cell.get() + 1);
            }
        }
        assert_eq!(counter_volume.sum(), 54);
        assert_eq!(counter_volume[(5, 5, 5)], 2);
        assert_eq!(counter_volume[(4, 5, 5)], 1);
        assert_eq!(counter_volume[(7, 5, 5)], 1);
        assert_eq!(counter_volume[(8, 5, 5)], 0);
    }
}
