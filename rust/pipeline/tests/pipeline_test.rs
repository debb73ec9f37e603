// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use penline_geometry::{segment_intersection, Face, Point2, Point3, Polyline, Segment};
use penline_pipeline::{
    build_arrangement, consolidate, filter_hidden, optimize_order, parse_path_data,
    perturb_all, render, to_path_data, travel_distance, Error, FaceTable, PerturbConfig,
    PipelineConfig, PlotScale,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOLERANCE: f64 = 1e-3;

fn random_segments(rng: &mut StdRng, count: usize) -> Vec<Segment> {
    (0..count)
        .map(|_| {
            let start = Point2::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0));
            let end = Point2::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0));
            Segment::new(start, end)
        })
        .collect()
}

fn random_polylines(rng: &mut StdRng, count: usize) -> Vec<Polyline> {
    (0..count)
        .map(|_| {
            let points = (0..rng.gen_range(2..5))
                .map(|_| Point2::new(rng.gen_range(0.0..50.0), rng.gen_range(0.0..50.0)))
                .collect();
            Polyline::new(points).unwrap()
        })
        .collect()
}

fn unit_square_face(depth: f64) -> Face {
    Face::new(vec![
        Point3::new(-1.0, -1.0, depth),
        Point3::new(1.0, -1.0, depth),
        Point3::new(1.0, 1.0, depth),
        Point3::new(-1.0, 1.0, depth),
    ])
    .unwrap()
}

#[test]
fn test_arrangement_leaves_no_crossings() {
    let mut rng = StdRng::seed_from_u64(2024);
    let input = random_segments(&mut rng, 30);
    let arranged = build_arrangement(input, TOLERANCE, 10_000).unwrap();
    assert!(arranged.len() > 30);

    let slack = TOLERANCE + 1e-9;
    for (i, a) in arranged.iter().enumerate() {
        for b in &arranged[i + 1..] {
            if let Some(hit) = segment_intersection(&a.start, &a.end, &b.start, &b.end) {
                assert!(
                    a.has_endpoint_near(&hit, slack) && b.has_endpoint_near(&hit, slack),
                    "unresolved crossing at {:?}",
                    hit
                );
            }
        }
    }
}

#[test]
fn test_crossing_diagonals_split_into_four() {
    let input = vec![
        Segment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)),
        Segment::new(Point2::new(0.0, 2.0), Point2::new(2.0, 0.0)),
    ];
    let arranged = build_arrangement(input, TOLERANCE, 100).unwrap();
    assert_eq!(arranged.len(), 4);

    let center = Point2::new(1.0, 1.0);
    for segment in &arranged {
        assert!(segment.has_endpoint_near(&center, 1e-12));
        assert_relative_eq!(segment.length(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }
}

#[test]
fn test_consolidation_is_total_and_unbranched() {
    let mut rng = StdRng::seed_from_u64(7);
    let arranged = build_arrangement(random_segments(&mut rng, 25), TOLERANCE, 10_000).unwrap();
    let polylines = consolidate(&arranged, TOLERANCE, 0.0).unwrap();

    let total: usize = polylines.iter().map(|p| p.segment_count()).sum();
    assert_eq!(total, arranged.len());

    let interiors: Vec<Vec<Point2<f64>>> = polylines
        .iter()
        .map(|p| p.points()[1..p.len() - 1].to_vec())
        .collect();
    for (i, own) in interiors.iter().enumerate() {
        for other in &interiors[i + 1..] {
            for point in own {
                assert!(!other.contains(point), "{:?} is interior to two polylines", point);
            }
        }
    }
}

#[test]
fn test_perturbation_keeps_control_points() {
    let mut rng = StdRng::seed_from_u64(11);
    let source = random_polylines(&mut rng, 12);
    let config = PerturbConfig {
        spacing: 1.0,
        frequency: 0.2,
        magnitude: 0.8,
    };
    let perturbed = perturb_all(&source, &config, &mut rng).unwrap();

    assert_eq!(perturbed.len(), source.len());
    for (before, after) in source.iter().zip(&perturbed) {
        for control in before.points() {
            assert!(after.points().contains(control));
        }
    }
}

#[test]
fn test_ordering_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    let once = optimize_order(random_polylines(&mut rng, 40));
    let twice = optimize_order(once.clone());
    assert_eq!(once, twice);
    assert_eq!(travel_distance(&once), travel_distance(&twice));
}

#[test]
fn test_greedy_ordering_visits_nearest_first() {
    let unit = |x: f64| Polyline::new(vec![Point2::new(x, 0.0), Point2::new(x, 1.0)]).unwrap();
    let input = vec![unit(0.0), unit(10.0), unit(1.0)];
    let before = travel_distance(&input);
    let tour = optimize_order(input);

    let starts: Vec<f64> = tour.iter().map(|p| p.first().x).collect();
    assert_eq!(starts, vec![0.0, 1.0, 10.0]);
    assert!(travel_distance(&tour) < before);
}

#[test]
fn test_square_hides_segment_behind_it() {
    let table = FaceTable::new(&[unit_square_face(0.0)], 10).unwrap();
    let behind = Segment::from_spatial(Point3::new(-0.5, 0.0, 1.0), Point3::new(0.5, 0.0, 1.0));
    let beside_near = Segment::from_spatial(Point3::new(4.5, 5.0, -3.0), Point3::new(5.5, 5.0, -3.0));
    let beside_far = Segment::from_spatial(Point3::new(4.5, 5.0, 9.0), Point3::new(5.5, 5.0, 9.0));

    let visible = filter_hidden(vec![behind, beside_near.clone(), beside_far.clone()], &table, 1e-5);
    assert_eq!(visible, vec![beside_near, beside_far]);
}

#[test]
fn test_occlusion_without_faces_is_misuse() {
    assert!(FaceTable::new(&[], 10).is_err());
}

#[test]
fn test_path_data_round_trip() {
    let mut rng = StdRng::seed_from_u64(5);
    let scale = PlotScale::new(3.5, 15.0).unwrap();
    for source in random_polylines(&mut rng, 10) {
        let parsed = parse_path_data(&to_path_data(&source, &scale), &scale).unwrap();
        assert_eq!(parsed.len(), source.len());
        for (a, b) in source.points().iter().zip(parsed.points()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_render_cube_corner() {
    // Three visible faces of a unit cube seen corner-on, plus a frame
    let faces = vec![
        Face::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(4.0, 0.0, 1.0),
            Point3::new(4.0, 4.0, 1.0),
            Point3::new(0.0, 4.0, 1.0),
        ])
        .unwrap(),
        Face::new(vec![
            Point3::new(4.0, 0.0, 1.0),
            Point3::new(6.0, 2.0, 3.0),
            Point3::new(6.0, 6.0, 3.0),
            Point3::new(4.0, 4.0, 1.0),
        ])
        .unwrap(),
        Face::new(vec![
            Point3::new(0.0, 4.0, 1.0),
            Point3::new(4.0, 4.0, 1.0),
            Point3::new(6.0, 6.0, 3.0),
            Point3::new(2.0, 6.0, 3.0),
        ])
        .unwrap(),
    ];
    let frame = vec![vec![
        Point2::new(-1.0, -1.0),
        Point2::new(7.0, -1.0),
        Point2::new(7.0, 7.0),
        Point2::new(-1.0, 7.0),
        Point2::new(-1.0, -1.0),
    ]];

    let config = PipelineConfig {
        perturbation: Some(PerturbConfig::default()),
        seed: 42,
        ..Default::default()
    };
    let first = render(&faces, &frame, &config).unwrap();
    let second = render(&faces, &frame, &config).unwrap();

    assert_eq!(first.polylines, second.polylines);
    assert_eq!(first.stats.input_segments, 16);
    assert!(first.stats.visible_segments <= first.stats.arranged_segments);
    assert_eq!(first.stats.polylines, first.polylines.len());
}

#[test]
fn test_segment_limit_aborts_render() {
    let chains: Vec<Vec<Point2<f64>>> = (0..20)
        .map(|i| vec![Point2::new(i as f64, 0.0), Point2::new(i as f64, 1.0)])
        .collect();
    let config = PipelineConfig {
        max_segments: 10,
        ..Default::default()
    };
    assert!(render(&[], &chains, &config).is_err());

    let preview = PipelineConfig {
        fast_preview: true,
        ..config
    };
    assert_eq!(render(&[], &chains, &preview).unwrap().polylines.len(), 20);
}

#[test]
fn test_runaway_configurations_fail_fast() {
    let chains = vec![
        vec![Point2::new(0.3, 0.1), Point2::new(2.7, 2.9)],
        vec![Point2::new(0.1, 2.9), Point2::new(2.9, 0.3)],
    ];

    let exact = PipelineConfig {
        intersection_tolerance: 0.0,
        ..Default::default()
    };
    assert!(matches!(render(&[], &chains, &exact), Err(Error::InvalidConfig(_))));

    // The arrangement itself floors the tolerance and finishes
    let segments = chains
        .iter()
        .map(|chain| Segment::new(chain[0], chain[1]))
        .collect();
    assert_eq!(build_arrangement(segments, 0.0, 100).unwrap().len(), 4);

    let dense = PipelineConfig {
        perturbation: Some(PerturbConfig {
            spacing: 1e-300,
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(matches!(render(&[], &chains, &dense), Err(Error::InvalidConfig(_))));
}
