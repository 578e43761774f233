use serde_derive::{Deserialize, Serialize};

/// How a checked accessor resolves positions outside the backing array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BorderMode<T> {
    /// Repeat the nearest edge cell.
    Clamp,
    /// Every outside position reads this value.
    Constant(T),
    /// Mirror around the edge cells without repeating them.
    Reflect101,
}

/// Maps a possibly out-of-range coordinate into `[0, len)`.
///
/// Returns `None` for `Constant`, which has no in-array counterpart, and for
/// empty axes.
pub fn map_index<T>(i: i64, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => {
            if len == 0 {
                return None;
            }
            Some(i.clamp(0, len as i64 - 1) as usize)
        }
        BorderMode::Reflect101 => {
            if len == 0 {
                return None;
            }
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as i64;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some((2 * len - 2) - r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{map_index, BorderMode};

    #[test]
    fn test_clamp() {
        let mode = BorderMode::<u8>::Clamp;

        assert_eq!(map_index(-3, 5, &mode), Some(0));
        assert_eq!(map_index(0, 5, &mode), Some(0));
        assert_eq!(map_index(4, 5, &mode), Some(4));
        assert_eq!(map_index(99, 5, &mode), Some(4));
        assert_eq!(map_index(0, 0, &mode), None);
    }

    #[test]
    fn test_reflect101() {
        let mode = BorderMode::<u8>::Reflect101;

        for i in -4..=4 {
            assert_eq!(map_index(i, 1, &mode), Some(0));
        }

        let expected = [(-4, 4), (-2, 2), (-1, 1), (0, 0), (4, 4), (5, 3), (7, 1)];
        for (i, mapped) in expected {
            assert_eq!(map_index(i, 5, &mode), Some(mapped), "index {}", i);
        }
    }

    #[test]
    fn test_constant_has_no_mapping() {
        assert_eq!(map_index(-1, 5, &BorderMode::Constant(7u8)), None);
        assert_eq!(map_index(2, 5, &BorderMode::Constant(7u8)), None);
    }
}
