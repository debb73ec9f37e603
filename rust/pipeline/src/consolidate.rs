// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polyline consolidation
//!
//! Re-threads loose segments into continuous, non-branching polylines by
//! matching coincident endpoints through a spatial hash. Every input segment
//! ends up in exactly one polyline, and a junction point is passed through
//! by at most one polyline.

use crate::error::Result;
use crate::spatial::SpatialGrid;
use penline_geometry::{Point2, Polyline, Segment};

/// Chain segments whose endpoints coincide within `tolerance`
///
/// `cell_size` is clamped up to `tolerance` so neighborhood queries stay
/// complete.
pub fn consolidate(segments: &[Segment], tolerance: f64, cell_size: f64) -> Result<Vec<Polyline>> {
    let mut consolidator = Consolidator::new(segments, tolerance, cell_size);
    let mut polylines = Vec::new();

    for seed in 0..segments.len() {
        if consolidator.consumed[seed] {
            continue;
        }
        let chain = polylines.len();
        consolidator.take(seed);

        let mut points = vec![segments[seed].start, segments[seed].end];
        consolidator.extend(&mut points, chain);
        points.reverse();
        consolidator.extend(&mut points, chain);

        polylines.push(Polyline::new(points)?);
    }

    tracing::debug!(
        segments = segments.len(),
        polylines = polylines.len(),
        "Consolidated segments into polylines"
    );

    Ok(polylines)
}

struct Consolidator<'a> {
    segments: &'a [Segment],
    tolerance: f64,
    consumed: Vec<bool>,
    /// Both endpoints of every unconsumed segment
    endpoints: SpatialGrid<usize>,
    /// Points some polyline already passes through, tagged with its index
    interior: SpatialGrid<usize>,
}

impl<'a> Consolidator<'a> {
    fn new(segments: &'a [Segment], tolerance: f64, cell_size: f64) -> Self {
        let cell_size = cell_size.max(tolerance).max(1e-12);
        let mut endpoints = SpatialGrid::new(cell_size);
        for (id, segment) in segments.iter().enumerate() {
            endpoints.insert(segment.start, id);
            endpoints.insert(segment.end, id);
        }

        Self {
            segments,
            tolerance,
            consumed: vec![false; segments.len()],
            endpoints,
            interior: SpatialGrid::new(cell_size),
        }
    }

    fn take(&mut self, id: usize) {
        let segment = &self.segments[id];
        self.consumed[id] = true;
        self.endpoints.remove(&segment.start, id);
        self.endpoints.remove(&segment.end, id);
    }

    /// Grow `points` at its trailing end until no segment continues it
    fn extend(&mut self, points: &mut Vec<Point2<f64>>, chain: usize) {
        while let Some(&trailing) = points.last() {
            // Passing through would make this a shared interior vertex
            if self
                .interior
                .any_near(&trailing, self.tolerance, |owner| owner != chain)
            {
                break;
            }

            let (near, id) = match self.endpoints.nearest(&trailing, self.tolerance, |_| true) {
                Some(found) => found,
                None => break,
            };

            let segment = &self.segments[id];
            let far = if near == segment.start {
                segment.end
            } else {
                segment.start
            };

            self.take(id);
            self.interior.insert(trailing, chain);
            points.push(far);
        }
    }
}
