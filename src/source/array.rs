use ndarray::{ArrayView, Dimension};

use crate::access::{Localizable, RandomAccess, RandomAccessible, RandomAccessibleInterval};
use crate::error::NbError;
use crate::interval::Interval;

use super::border::{map_index, BorderMode};

/// An n-dimensional source backed by an ndarray view.
///
/// Position dimension `d` is the array's `Axis(d)`, and the domain is
/// `[0, shape[d] - 1]`. To write through windows, build the source over a
/// `cell_view()` so values are `MathCell`s.
#[derive(Debug, Clone)]
pub struct ArraySource<'a, T> {
    data: &'a [T],
    shape: Vec<usize>,
    strides: Vec<isize>,
    interval: Interval,
    border: Option<BorderMode<T>>,
}

impl<'a, T> ArraySource<'a, T> {
    /// Wraps a view. The view must be in standard layout.
    pub fn new<D: Dimension>(view: ArrayView<'a, T, D>) -> Result<Self, NbError> {
        let shape = view.shape().to_vec();
        let strides = view.strides().to_vec();
        let data = view.to_slice().ok_or(NbError::UnsupportedLayout)?;
        Ok(Self {
            data,
            interval: Interval::from_dimensions(&shape),
            shape,
            strides,
            border: None,
        })
    }

    /// Extends the source beyond its array with `border`.
    ///
    /// A `Constant` value is shared by every outside position; if it is a
    /// `MathCell`, writes through it are visible to all of them.
    pub fn with_border(mut self, border: BorderMode<T>) -> Self {
        self.border = Some(border);
        self
    }

    pub fn border(&self) -> Option<&BorderMode<T>> {
        self.border.as_ref()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn linear_offset(&self, position: &[i64]) -> isize {
        position
            .iter()
            .zip(&self.strides)
            .map(|(&p, &s)| p as isize * s)
            .sum()
    }

    fn get_checked(&self, position: &[i64], offset: isize) -> Option<&T> {
        let inside = position
            .iter()
            .zip(&self.shape)
            .all(|(&p, &len)| p >= 0 && (p as u64) < len as u64);
        if inside {
            return self.data.get(offset as usize);
        }

        match self.border.as_ref()? {
            BorderMode::Constant(value) => Some(value),
            mode => {
                let mut mapped = 0isize;
                for (d, &p) in position.iter().enumerate() {
                    mapped += map_index(p, self.shape[d], mode)? as isize * self.strides[d];
                }
                self.data.get(mapped as usize)
            }
        }
    }
}

impl<'a, T> RandomAccessible for ArraySource<'a, T> {
    type Access<'s> = ArrayAccess<'s, T> where Self: 's;

    fn num_dimensions(&self) -> usize {
        self.shape.len()
    }

    fn random_access(&self) -> ArrayAccess<'_, T> {
        ArrayAccess::new(self, true)
    }

    /// Skips the per-dimension bounds test when `interval` lies inside the array.
    fn random_access_within(&self, interval: &Interval) -> ArrayAccess<'_, T> {
        ArrayAccess::new(self, !self.interval.contains(interval))
    }
}

impl<'a, T> RandomAccessibleInterval for ArraySource<'a, T> {
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

/// Positioned accessor over an [`ArraySource`].
///
/// The accessor keeps a running linear offset next to its position, so
/// relative moves never recompute the full index. Unchecked accessors read
/// `data[offset]` directly; checked ones test every dimension first and
/// resolve outside positions through the source's border mode.
#[derive(Debug)]
pub struct ArrayAccess<'s, T> {
    source: &'s ArraySource<'s, T>,
    position: Vec<i64>,
    offset: isize,
    checked: bool,
}

impl<'s, T> Clone for ArrayAccess<'s, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            position: self.position.clone(),
            offset: self.offset,
            checked: self.checked,
        }
    }
}

impl<'s, T> ArrayAccess<'s, T> {
    fn new(source: &'s ArraySource<'s, T>, checked: bool) -> Self {
        Self {
            source,
            position: vec![0; source.shape.len()],
            offset: 0,
            checked,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Like `get`, but returns `None` instead of panicking when the position
    /// cannot be resolved.
    pub fn try_get(&self) -> Option<&'s T> {
        if self.checked {
            self.source.get_checked(&self.position, self.offset)
        } else {
            usize::try_from(self.offset)
                .ok()
                .and_then(|offset| self.source.data.get(offset))
        }
    }
}

impl<'s, T> Localizable for ArrayAccess<'s, T> {
    fn num_dimensions(&self) -> usize {
        self.position.len()
    }

    fn position(&self, d: usize) -> i64 {
        self.position[d]
    }

    fn localize(&self, position: &mut [i64]) {
        position.copy_from_slice(&self.position);
    }
}

impl<'s, T> RandomAccess for ArrayAccess<'s, T> {
    type Item = &'s T;

    #[inline]
    fn get(&self) -> &'s T {
        if !self.checked {
            return &self.source.data[self.offset as usize];
        }
        match self.source.get_checked(&self.position, self.offset) {
            Some(value) => value,
            None => panic!(
                "position {:?} is outside the source {:?} and no border mode is set",
                self.position, self.source.interval
            ),
        }
    }

    fn set_position(&mut self, position: &[i64]) {
        self.position.copy_from_slice(position);
        self.offset = self.source.linear_offset(position);
    }

    fn set_position_dim(&mut self, value: i64, d: usize) {
        self.offset += (value - self.position[d]) as isize * self.source.strides[d];
        self.position[d] = value;
    }

    #[inline]
    fn fwd(&mut self, d: usize) {
        self.position[d] += 1;
        self.offset += self.source.strides[d];
    }

    #[inline]
    fn bck(&mut self, d: usize) {
        self.position[d] -= 1;
        self.offset -= self.source.strides[d];
    }

    fn move_by(&mut self, offset: &[i64]) {
        for (d, &o) in offset.iter().enumerate() {
            self.position[d] += o;
            self.offset += o as isize * self.source.strides[d];
        }
    }
}
