use ndarray::{ArrayD, IxDyn};

/// An output buffer that may be handed back for the next call.
///
/// `get` reuses the recycled array when its shape matches and allocates a
/// zeroed one otherwise. Reused arrays keep their previous contents.
#[derive(Clone, Debug)]
pub enum ArrayRecycle<T> {
    Empty,
    Recycle(ArrayD<T>),
}

impl<T> ArrayRecycle<T>
where
    T: num::Zero + Clone,
{
    pub fn get(self, required_shape: &[usize]) -> ArrayD<T> {
        match self {
            Self::Empty => ArrayD::<T>::zeros(IxDyn(required_shape)),
            Self::Recycle(current) => {
                if current.shape() != required_shape {
                    ArrayD::<T>::zeros(IxDyn(required_shape))
                } else {
                    current
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<T> Default for ArrayRecycle<T> {
    fn default() -> Self {
        Self::Empty
    }
}
