// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment arrangement
//!
//! Explodes point chains into atomic segments and splits them at mutual
//! crossings until segments meet only at shared endpoints.

use crate::error::{Error, Result};
use penline_geometry::{segment_intersection, Face, Point2, Segment};

/// Smallest endpoint tolerance used when splitting
///
/// A recomputed crossing drifts by a few ulps from the split point it came
/// from, so an exact-match tolerance would keep splitting forever.
pub const MIN_TOLERANCE: f64 = 1e-9;

/// Explode 2D chains into segments, dropping pieces shorter than `min_length`
///
/// Splitting is undefined for near-zero-length segments, so this is the
/// filter the arrangement relies on.
pub fn prepare_chains(chains: &[Vec<Point2<f64>>], min_length: f64) -> Vec<Segment> {
    let mut dropped = 0usize;
    let segments = chains
        .iter()
        .flat_map(|chain| chain.windows(2))
        .map(|pair| Segment::new(pair[0], pair[1]))
        .filter(|segment| {
            let keep = segment.length() >= min_length;
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(dropped, min_length, "Dropped short chain segments");
    }
    segments
}

/// Collect the boundary edges of every face, dropping short ones
pub fn prepare_faces(faces: &[Face], min_length: f64) -> Vec<Segment> {
    let mut dropped = 0usize;
    let mut segments = Vec::with_capacity(faces.iter().map(|f| f.points().len()).sum());
    for edge in faces.iter().flat_map(|face| face.edges()) {
        if edge.length() >= min_length {
            segments.push(edge);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, min_length, "Dropped short face edges");
    }
    segments
}

/// Split segments at their mutual crossings
///
/// A crossing within `tolerance` of a segment's own endpoint leaves that
/// segment whole, so segments that merely touch are not fragmented. Parallel
/// and collinear pairs never cross. Worst case is quadratic per segment.
///
/// `tolerance` is raised to [`MIN_TOLERANCE`]. Fails when the input, or the
/// output as it grows through splitting, exceeds `max_segments`.
pub fn build_arrangement(
    segments: Vec<Segment>,
    tolerance: f64,
    max_segments: usize,
) -> Result<Vec<Segment>> {
    if segments.len() > max_segments {
        return Err(Error::TooManySegments {
            count: segments.len(),
            limit: max_segments,
        });
    }

    let tolerance = tolerance.max(MIN_TOLERANCE);
    let input_count = segments.len();
    let mut pending = segments;
    let mut arranged = Vec::with_capacity(input_count);
    let mut splits = 0usize;

    // Every finished segment was scanned against all pending ones, and
    // pieces of a pending segment cannot cross what the whole did not.
    while let Some(mut current) = pending.pop() {
        let mut i = 0;
        while i < pending.len() {
            let other = &pending[i];
            let hit = match segment_intersection(&current.start, &current.end, &other.start, &other.end) {
                Some(hit) => hit,
                None => {
                    i += 1;
                    continue;
                }
            };

            let near_current = current.has_endpoint_near(&hit, tolerance);
            let near_other = other.has_endpoint_near(&hit, tolerance);

            if near_current && near_other {
                i += 1;
                continue;
            }

            if !near_other {
                let (head, tail) = pending.swap_remove(i).split_at(hit);
                pending.push(head);
                pending.push(tail);
                splits += 1;
            }

            if !near_current {
                let (head, tail) = current.split_at(hit);
                pending.push(tail);
                current = head;
                splits += 1;
                i = 0;
            }

            let count = arranged.len() + pending.len() + 1;
            if count > max_segments {
                tracing::warn!(count, max_segments, splits, "Arrangement outgrew segment limit");
                return Err(Error::TooManySegments {
                    count,
                    limit: max_segments,
                });
            }
            // Otherwise slot `i` now holds a segment not yet scanned.
        }
        arranged.push(current);
    }

    tracing::debug!(
        input = input_count,
        output = arranged.len(),
        splits,
        "Built segment arrangement"
    );

    Ok(arranged)
}
