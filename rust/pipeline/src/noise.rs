// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-dimensional gradient noise

use rand::Rng;

/// Lattice size; the noise repeats with this period
pub const PERIOD: usize = 256;

/// Smooth pseudo-random function of one variable with values in `[-1, 1]`
///
/// Random slopes at integer lattice points, blended with a quintic fade, so
/// the curve and its first two derivatives are continuous.
#[derive(Debug, Clone)]
pub struct GradientNoise {
    gradients: Vec<f64>,
}

impl GradientNoise {
    /// Draw a fresh lattice from `rng`
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            gradients: (0..PERIOD).map(|_| rng.gen_range(-1.0..=1.0)).collect(),
        }
    }

    /// Sample the noise at `x`
    pub fn sample(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }

        let cell = x.floor();
        let t = x - cell;
        let i0 = (cell as i64).rem_euclid(PERIOD as i64) as usize;
        let i1 = (i0 + 1) % PERIOD;

        let n0 = self.gradients[i0] * t;
        let n1 = self.gradients[i1] * (t - 1.0);
        let fade = t * t * t * (t * (t * 6.0 - 15.0) + 10.0);

        // Raw range is [-0.5, 0.5]
        (n0 + fade * (n1 - n0)) * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = GradientNoise::new(&mut StdRng::seed_from_u64(1));
        for i in -3..10 {
            assert_eq!(noise.sample(i as f64), 0.0);
        }
    }

    #[test]
    fn test_bounded_and_continuous() {
        let noise = GradientNoise::new(&mut StdRng::seed_from_u64(2));
        let mut previous = noise.sample(0.0);
        for step in 1..5000 {
            let value = noise.sample(step as f64 * 0.01);
            assert!((-1.0..=1.0).contains(&value));
            assert!((value - previous).abs() < 0.1);
            previous = value;
        }
    }

    #[test]
    fn test_same_seed_same_noise() {
        let a = GradientNoise::new(&mut StdRng::seed_from_u64(42));
        let b = GradientNoise::new(&mut StdRng::seed_from_u64(42));
        let c = GradientNoise::new(&mut StdRng::seed_from_u64(43));
        assert_eq!(a.sample(3.7), b.sample(3.7));
        assert_ne!(a.sample(3.7), c.sample(3.7));
    }
}
