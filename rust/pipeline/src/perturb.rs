// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hand-drawn perturbation
//!
//! Subdivides each stroke and pushes the inserted points sideways by
//! coherent noise keyed on arc length. Original control points are kept
//! exactly, and a sine window fades the displacement to zero at both ends of
//! every original piece so neighbouring pieces join without kinks.

use crate::config::PerturbConfig;
use crate::error::{Error, Result};
use crate::noise::{GradientNoise, PERIOD};
use penline_geometry::{distance, Point2, Polyline, Vector2};
use rand::Rng;
use std::f64::consts::PI;

/// Pieces shorter than this are copied without subdivision
const MIN_PIECE: f64 = 1e-12;

/// Most points inserted into one original piece
pub const MAX_SUBDIVISIONS: usize = 100_000;

/// Perturb a raw point sequence
///
/// Fails with a precondition error for fewer than two points, and with
/// `InvalidConfig` when the spacing would split one piece into more than
/// [`MAX_SUBDIVISIONS`] parts. The random source only picks the noise phase,
/// so identical seeds give identical output.
pub fn perturb_points<R: Rng + ?Sized>(
    points: &[Point2<f64>],
    config: &PerturbConfig,
    noise: &GradientNoise,
    rng: &mut R,
) -> Result<Polyline> {
    if points.len() < 2 {
        return Err(penline_geometry::Error::DegeneratePolyline(points.len()).into());
    }

    let phase = rng.gen_range(0.0..PERIOD as f64);
    let mut arc = 0.0;
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = distance(&a, &b);
        if length < MIN_PIECE {
            out.push(b);
            continue;
        }

        let direction = (b - a) / length;
        let normal = Vector2::new(-direction.y, direction.x);
        let parts = (length / config.spacing).ceil();
        if !parts.is_finite() || parts > MAX_SUBDIVISIONS as f64 {
            return Err(Error::InvalidConfig(format!(
                "spacing {} splits a piece of length {} into more than {} parts",
                config.spacing, length, MAX_SUBDIVISIONS
            )));
        }
        let pieces = (parts as usize).max(1);

        for k in 1..pieces {
            let t = k as f64 / pieces as f64;
            let window = (PI * t).sin();
            let sample = noise.sample(phase + (arc + length * t) * config.frequency);
            let offset = sample * config.magnitude * window;
            out.push(a + (b - a) * t + normal * offset);
        }

        out.push(b);
        arc += length;
    }

    Ok(Polyline::new(out)?)
}

/// Perturb one polyline
pub fn perturb<R: Rng + ?Sized>(
    polyline: &Polyline,
    config: &PerturbConfig,
    noise: &GradientNoise,
    rng: &mut R,
) -> Result<Polyline> {
    perturb_points(polyline.points(), config, noise, rng)
}

/// Perturb every polyline with one noise lattice drawn from `rng`
pub fn perturb_all<R: Rng + ?Sized>(
    polylines: &[Polyline],
    config: &PerturbConfig,
    rng: &mut R,
) -> Result<Vec<Polyline>> {
    let noise = GradientNoise::new(rng);
    polylines
        .iter()
        .map(|polyline| perturb(polyline, config, &noise, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> PerturbConfig {
        PerturbConfig {
            spacing: 0.5,
            frequency: 0.3,
            magnitude: 0.25,
        }
    }

    fn zig_zag() -> Polyline {
        Polyline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 3.0),
            Point2::new(9.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_control_points_are_fixed() {
        let mut rng = StdRng::seed_from_u64(5);
        let noise = GradientNoise::new(&mut rng);
        let source = zig_zag();
        let result = perturb(&source, &config(), &noise, &mut rng).unwrap();

        assert!(result.len() > source.len());
        for control in source.points() {
            assert!(result.points().contains(control));
        }
        assert_eq!(result.first(), source.first());
        assert_eq!(result.last(), source.last());
    }

    #[test]
    fn test_displacement_is_bounded_and_perpendicular() {
        let mut rng = StdRng::seed_from_u64(9);
        let noise = GradientNoise::new(&mut rng);
        let line = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]).unwrap();
        let result = perturb(&line, &config(), &noise, &mut rng).unwrap();

        assert_eq!(result.len(), 21);
        for (k, point) in result.points().iter().enumerate() {
            assert!((point.x - k as f64 * 0.5).abs() < 1e-9);
            assert!(point.y.abs() <= 0.25 + 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            perturb_all(&[zig_zag()], &config(), &mut rng).unwrap()
        };
        assert_eq!(run(11), run(11));
        assert_ne!(run(11), run(12));
    }

    #[test]
    fn test_short_input_fails_fast() {
        let mut rng = StdRng::seed_from_u64(0);
        let noise = GradientNoise::new(&mut rng);
        let result = perturb_points(&[Point2::new(1.0, 1.0)], &config(), &noise, &mut rng);
        assert!(matches!(
            result,
            Err(Error::Geometry(penline_geometry::Error::DegeneratePolyline(1)))
        ));
    }

    #[test]
    fn test_tiny_spacing_is_refused() {
        let mut rng = StdRng::seed_from_u64(1);
        let noise = GradientNoise::new(&mut rng);
        let tiny = PerturbConfig {
            spacing: 1e-300,
            ..config()
        };
        let long = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(1e6, 0.0)]).unwrap();
        assert!(matches!(
            perturb(&long, &tiny, &noise, &mut rng),
            Err(Error::InvalidConfig(_))
        ));

        // Dense but under the cap
        let dense = PerturbConfig {
            spacing: 2.0 / MAX_SUBDIVISIONS as f64,
            ..config()
        };
        let unit = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).unwrap();
        assert!(perturb(&unit, &dense, &noise, &mut rng).is_ok());
    }

    #[test]
    fn test_zero_magnitude_only_subdivides() {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = GradientNoise::new(&mut rng);
        let flat = PerturbConfig {
            magnitude: 0.0,
            ..config()
        };
        let result = perturb(&zig_zag(), &flat, &noise, &mut rng).unwrap();
        assert!((result.length() - zig_zag().length()).abs() < 1e-9);
    }
}
