// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Artistic stroke merging
//!
//! Splices otherwise disjoint polylines end-to-end into fewer, longer
//! strokes. This is lossy: the pen draws straight across each bridged gap,
//! so the output no longer matches the natural polylines of the drawing.

use crate::ordering::{nearest_candidate, take_candidate, Candidate, JOIN_SNAP};
use penline_geometry::Polyline;

/// Grow strokes at both ends by the nearest remaining polyline
///
/// A stroke keeps absorbing the polyline whose closer endpoint is nearest to
/// either of its ends, reversed as needed, while that gap is at most
/// `max_gap`. The next stroke is seeded from the earliest remaining input.
pub fn artistic_merge(polylines: Vec<Polyline>, max_gap: f64) -> Vec<Polyline> {
    let input_count = polylines.len();
    let max_gap_sq = max_gap * max_gap;
    let mut remaining: Vec<(usize, Polyline)> = polylines.into_iter().enumerate().collect();
    let mut strokes = Vec::new();

    while !remaining.is_empty() {
        let seed = remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, (order, _))| *order)
            .map(|(slot, _)| slot)
            .unwrap_or(0);
        let (_, mut stroke) = remaining.swap_remove(seed);

        loop {
            let at_tail = nearest_candidate(stroke.last(), &remaining)
                .filter(|c| c.distance_sq <= max_gap_sq);
            let at_head = nearest_candidate(stroke.first(), &remaining)
                .filter(|c| c.distance_sq <= max_gap_sq);

            stroke = match (at_tail, at_head) {
                (Some(tail), Some(head)) if head.distance_sq < tail.distance_sq => {
                    prepend(stroke, &mut remaining, head)
                }
                (Some(tail), _) => {
                    let next = take_candidate(&mut remaining, tail);
                    stroke.join(next, JOIN_SNAP)
                }
                (None, Some(head)) => prepend(stroke, &mut remaining, head),
                (None, None) => break,
            };
        }

        strokes.push(stroke);
    }

    tracing::debug!(
        input = input_count,
        output = strokes.len(),
        max_gap,
        "Merged strokes"
    );

    strokes
}

/// Splice a candidate before `stroke` so its chosen endpoint meets the head
fn prepend(
    stroke: Polyline,
    remaining: &mut Vec<(usize, Polyline)>,
    candidate: Candidate,
) -> Polyline {
    // Oriented to start at the head; flip so it ends there instead.
    let before = take_candidate(remaining, candidate).reversed();
    before.join(stroke, JOIN_SNAP)
}
