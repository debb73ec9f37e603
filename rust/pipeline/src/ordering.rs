// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pen travel optimization
//!
//! Greedy nearest-neighbor tour over stroke endpoints. Not optimal, but
//! stable: ties go to the earlier input stroke and to the unreversed
//! orientation, so re-ordering a tour leaves it unchanged.

use penline_geometry::{distance, distance_squared, Point2, Polyline};

/// Points this close are the same point when splicing strokes
pub(crate) const JOIN_SNAP: f64 = 1e-9;

/// The best next stroke from some pen position
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    /// Position in the remaining set
    pub slot: usize,
    /// The stroke's far endpoint is the closer one
    pub reversed: bool,
    pub distance_sq: f64,
}

/// Scan the remaining strokes for the endpoint nearest to `from`
///
/// Each entry carries its original input index for tie-breaking, so the
/// remaining set may be reordered freely by swap-removal.
pub(crate) fn nearest_candidate(
    from: &Point2<f64>,
    remaining: &[(usize, Polyline)],
) -> Option<Candidate> {
    let mut best: Option<(Candidate, usize)> = None;

    for (slot, (order, polyline)) in remaining.iter().enumerate() {
        let to_first = distance_squared(from, polyline.first());
        let to_last = distance_squared(from, polyline.last());
        let reversed = to_last < to_first;
        let distance_sq = if reversed { to_last } else { to_first };

        let better = match &best {
            None => true,
            Some((current, current_order)) => {
                distance_sq < current.distance_sq
                    || (distance_sq == current.distance_sq && order < current_order)
            }
        };
        if better {
            best = Some((
                Candidate {
                    slot,
                    reversed,
                    distance_sq,
                },
                *order,
            ));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Take a candidate out of the remaining set, oriented to start at the pen
pub(crate) fn take_candidate(remaining: &mut Vec<(usize, Polyline)>, candidate: Candidate) -> Polyline {
    let (_, polyline) = remaining.swap_remove(candidate.slot);
    if candidate.reversed {
        polyline.reversed()
    } else {
        polyline
    }
}

/// Reorder strokes to shorten pen-up travel
///
/// The tour starts with the first stroke; each step appends the unplaced
/// stroke with an endpoint nearest the pen, reversed when its far end was
/// nearer. O(n²).
pub fn optimize_order(polylines: Vec<Polyline>) -> Vec<Polyline> {
    let mut remaining: Vec<(usize, Polyline)> = polylines.into_iter().enumerate().collect();
    if remaining.is_empty() {
        return Vec::new();
    }

    let (_, first) = remaining.remove(0);
    let mut tour = Vec::with_capacity(remaining.len() + 1);
    tour.push(first);

    loop {
        let pen = match tour.last() {
            Some(last) => *last.last(),
            None => break,
        };
        let candidate = match nearest_candidate(&pen, &remaining) {
            Some(candidate) => candidate,
            None => break,
        };
        tour.push(take_candidate(&mut remaining, candidate));
    }

    tour
}

/// Splice consecutive tour entries whose gap is below `threshold`
pub fn merge_adjacent(tour: Vec<Polyline>, threshold: f64) -> Vec<Polyline> {
    let mut merged: Vec<Polyline> = Vec::with_capacity(tour.len());

    for polyline in tour {
        match merged.pop() {
            Some(previous) if distance(previous.last(), polyline.first()) < threshold => {
                merged.push(previous.join(polyline, JOIN_SNAP));
            }
            Some(previous) => {
                merged.push(previous);
                merged.push(polyline);
            }
            None => merged.push(polyline),
        }
    }

    merged
}

/// Total pen-up distance between consecutive strokes
///
/// Diagnostic only; the ordering heuristic never consults it.
pub fn travel_distance(polylines: &[Polyline]) -> f64 {
    polylines
        .windows(2)
        .map(|pair| distance(pair[0].last(), pair[1].first()))
        .sum()
}
