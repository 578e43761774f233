/// Main error type for the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NbError {
    /// Used when the user pass a logical invalid parameter to a function.
    InvalidParameter(String),
    /// Two inputs that must share the same number of dimensions do not.
    DimensionMismatch { expected: usize, actual: usize },
    /// The array backing a source is not in standard (row-major, contiguous) layout.
    UnsupportedLayout,
}

impl std::fmt::Display for NbError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            NbError::InvalidParameter(err) => write!(f, "Parameter error: {}", err),
            NbError::DimensionMismatch { expected, actual } => write!(
                f,
                "Dimension mismatch: expected {} dimensions, got {}",
                expected, actual
            ),
            NbError::UnsupportedLayout => {
                write!(f, "Layout error: source array must be in standard layout")
            }
        }
    }
}

impl NbError {
    /// Create a error with the kind `InvalidParameter`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn invalid_parameter<T: ToString>(msg: T) -> Self {
        NbError::InvalidParameter(msg.to_string())
    }

    /// Returns `DimensionMismatch` unless `actual == expected`.
    pub(crate) fn check_dimensions(expected: usize, actual: usize) -> Result<(), Self> {
        if expected != actual {
            Err(NbError::DimensionMismatch { expected, actual })
        } else {
            Ok(())
        }
    }
}

impl std::error::Error for NbError {}

#[cfg(test)]
mod tests {
    use super::NbError;

    #[test]
    fn test_display() {
        assert_eq!(
            NbError::invalid_parameter("negative extent").to_string(),
            "Parameter error: negative extent"
        );
        assert_eq!(
            NbError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
            .to_string(),
            "Dimension mismatch: expected 3 dimensions, got 2"
        );
    }

    #[test]
    fn test_check_dimensions() {
        assert!(NbError::check_dimensions(2, 2).is_ok());
        assert_eq!(
            NbError::check_dimensions(2, 1),
            Err(NbError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
