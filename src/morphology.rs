//! Grayscale morphology over n-dimensional arrays.
//!
//! Every filter scans the input with a [`RectangleShape`] window and reduces
//! the window's values into the output cell at the anchor. The array border
//! is extended by clamping.

use ndarray::{ArrayD, IxDyn};

use crate::access::Localizable;
use crate::error::NbError;
use crate::memory::ArrayRecycle;
use crate::neighborhood::RectangleShape;
use crate::source::{ArraySource, BorderMode};

/// Folds each window of `source` with `f`, starting from `init`.
///
/// # Arguments
///
/// * `source`: Input array.
/// * `shape`: Window around every cell.
/// * `init`: Initial accumulator for each window.
/// * `f`: Reduction, called with the accumulator and one window value.
/// * `recycle`: Output buffer to reuse.
///
/// # Returns
///
/// An array with the shape of `source`.
pub fn reduce_neighborhoods<T, F>(
    source: &ArrayD<T>,
    shape: &RectangleShape,
    init: T,
    f: F,
    recycle: ArrayRecycle<T>,
) -> Result<ArrayD<T>, NbError>
where
    T: Copy + num::Zero,
    F: Fn(T, T) -> T,
{
    let mut output = recycle.get(source.shape());
    let standard = source.as_standard_layout();
    let array = ArraySource::new(standard.view())?.with_border(BorderMode::Clamp);

    let mut cursor = shape.neighborhoods(&array)?;
    let mut index = vec![0usize; source.ndim()];
    while cursor.has_next() {
        cursor.fwd();
        for (d, i) in index.iter_mut().enumerate() {
            *i = cursor.position(d) as usize;
        }
        output[IxDyn(&index)] = cursor.get().into_iter().fold(init, |acc, v| f(acc, *v));
    }

    Ok(output)
}

/// Minimum over each window.
pub fn erode<T>(
    source: &ArrayD<T>,
    shape: &RectangleShape,
    recycle: ArrayRecycle<T>,
) -> Result<ArrayD<T>, NbError>
where
    T: Copy + num::Zero + num::Bounded + PartialOrd,
{
    reduce_neighborhoods(
        source,
        shape,
        T::max_value(),
        |acc, v| if v < acc { v } else { acc },
        recycle,
    )
}

/// Maximum over each window.
pub fn dilate<T>(
    source: &ArrayD<T>,
    shape: &RectangleShape,
    recycle: ArrayRecycle<T>,
) -> Result<ArrayD<T>, NbError>
where
    T: Copy + num::Zero + num::Bounded + PartialOrd,
{
    reduce_neighborhoods(
        source,
        shape,
        T::min_value(),
        |acc, v| if v > acc { v } else { acc },
        recycle,
    )
}

/// Erosion followed by dilation; removes bright specks smaller than the window.
pub fn open<T>(source: &ArrayD<T>, shape: &RectangleShape) -> Result<ArrayD<T>, NbError>
where
    T: Copy + num::Zero + num::Bounded + PartialOrd,
{
    let eroded = erode(source, shape, ArrayRecycle::Empty)?;
    dilate(&eroded, shape, ArrayRecycle::Empty)
}

/// Dilation followed by erosion; fills dark holes smaller than the window.
pub fn close<T>(source: &ArrayD<T>, shape: &RectangleShape) -> Result<ArrayD<T>, NbError>
where
    T: Copy + num::Zero + num::Bounded + PartialOrd,
{
    let dilated = dilate(source, shape, ArrayRecycle::Empty)?;
    erode(&dilated, shape, ArrayRecycle::Empty)
}
