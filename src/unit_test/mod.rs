use ndarray::{Array2, Array3};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::fixture;

/// 10x10 image where the cell at `(row, col)` holds `10 * row + col`.
#[fixture]
pub fn ramp_image() -> Array2<i32> {
    Array2::from_shape_fn((10, 10), |(row, col)| (10 * row + col) as i32)
}

#[fixture]
pub fn counter_volume() -> Array3<u16> {
    Array3::zeros((10, 10, 10))
}

#[fixture]
pub fn random_volume() -> Array3<u8> {
    let mut rng = StdRng::seed_from_u64(17);
    Array3::random_using((12, 9, 7), Uniform::new_inclusive(0, 255), &mut rng)
}
