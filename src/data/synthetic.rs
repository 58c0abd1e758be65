//! Bars-and-stripes images and pattern corruption

use ndarray::{Array1, Array2};
use rand::seq::index::sample;
use rand::Rng;

use crate::error::{Error, Result};

/// Binary bars-and-stripes images, one flattened `side x side` image per row
///
/// Each image lights a random subset of whole rows (bars) or whole columns
/// (stripes). Images are never blank.
pub fn bars_and_stripes<R: Rng>(
    side: usize,
    num_samples: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if side == 0 {
        return Err(Error::Config("side must be positive".into()));
    }

    let mut data = Array2::zeros((num_samples, side * side));

    for mut image in data.rows_mut() {
        let horizontal = rng.gen::<bool>();
        let mut lines: Vec<bool> = (0..side).map(|_| rng.gen::<bool>()).collect();
        if !lines.iter().any(|&on| on) {
            let pick = rng.gen_range(0..side);
            lines[pick] = true;
        }

        for r in 0..side {
            for c in 0..side {
                let on = if horizontal { lines[r] } else { lines[c] };
                if on {
                    image[r * side + c] = 1.0;
                }
            }
        }
    }

    Ok(data)
}

/// Copy of a bipolar pattern with a fraction of its units flipped
///
/// Exactly `round(flip_fraction * n)` distinct positions are flipped.
pub fn corrupt_pattern<R: Rng>(
    pattern: &[f64],
    flip_fraction: f64,
    rng: &mut R,
) -> Result<Array1<f64>> {
    if !(0.0..=1.0).contains(&flip_fraction) {
        return Err(Error::Config(format!(
            "flip_fraction must be in [0, 1], got {}",
            flip_fraction
        )));
    }

    let n = pattern.len();
    let flips = (flip_fraction * n as f64).round() as usize;
    let mut corrupted = Array1::from_vec(pattern.to_vec());
    for i in sample(rng, n, flips.min(n)).iter() {
        corrupted[i] = -corrupted[i];
    }
    Ok(corrupted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hopfield::hamming_distance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bars_and_stripes_shape_and_structure() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = bars_and_stripes(4, 50, &mut rng).unwrap();
        assert_eq!(data.dim(), (50, 16));

        for image in data.rows() {
            assert!(image.iter().all(|&x| x == 0.0 || x == 1.0));
            assert!(image.sum() > 0.0);

            let rows_uniform = (0..4).all(|r| (0..4).all(|c| image[r * 4 + c] == image[r * 4]));
            let cols_uniform = (0..4).all(|c| (0..4).all(|r| image[r * 4 + c] == image[c]));
            assert!(rows_uniform || cols_uniform);
        }
    }

    #[test]
    fn test_corrupt_pattern_flips_exact_count() {
        let mut rng = StdRng::seed_from_u64(2);
        let pattern: Vec<f64> = (0..100).map(|i| if i % 3 == 0 { 1.0 } else { -1.0 }).collect();

        let corrupted = corrupt_pattern(&pattern, 0.2, &mut rng).unwrap();
        assert_eq!(hamming_distance(&pattern, corrupted.as_slice().unwrap()), 20);

        let untouched = corrupt_pattern(&pattern, 0.0, &mut rng).unwrap();
        assert_eq!(untouched.to_vec(), pattern);

        assert!(corrupt_pattern(&pattern, 1.5, &mut rng).is_err());
    }
}
