// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial hash for tolerance-based endpoint lookup.
//!
//! The grid divides the drawing plane into square cells of side `cell_size`.
//! Lookups check the 9 neighboring cells (3x3 neighborhood), so any entry
//! within `cell_size` of the query point is found.

use penline_geometry::Point2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

type Bucket<T> = SmallVec<[(Point2<f64>, T); 4]>;

/// A 2D spatial hash grid of point-tagged values.
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    cell_size: f64,
    grid: FxHashMap<(i64, i64), Bucket<T>>,
    len: usize,
}

impl<T: Copy + PartialEq> SpatialGrid<T> {
    /// Creates an empty grid with the given cell size.
    ///
    /// `cell_size` should be >= the tolerance used for queries.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            grid: FxHashMap::default(),
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` at `point`.
    pub fn insert(&mut self, point: Point2<f64>, value: T) {
        let cell = self.cell_coords(&point);
        self.grid.entry(cell).or_default().push((point, value));
        self.len += 1;
    }

    /// Removes every entry of `value` registered at `point`.
    pub fn remove(&mut self, point: &Point2<f64>, value: T) {
        let cell = self.cell_coords(point);
        if let Some(bucket) = self.grid.get_mut(&cell) {
            let before = bucket.len();
            bucket.retain(|(p, v)| !(*v == value && p == point));
            self.len -= before - bucket.len();
            if bucket.is_empty() {
                self.grid.remove(&cell);
            }
        }
    }

    /// Visits every entry in the 3x3 cell neighborhood of `point`.
    pub fn for_each_near<F>(&self, point: &Point2<f64>, mut visit: F)
    where
        F: FnMut(&Point2<f64>, T),
    {
        let (cx, cy) = self.cell_coords(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.grid.get(&(cx + dx, cy + dy)) {
                    for (p, v) in bucket {
                        visit(p, *v);
                    }
                }
            }
        }
    }

    /// Finds the entry nearest to `point` within `tolerance` that passes `accept`.
    ///
    /// Ties keep the entry visited first. For complete results the tolerance
    /// should be <= `cell_size`.
    pub fn nearest<F>(&self, point: &Point2<f64>, tolerance: f64, mut accept: F) -> Option<(Point2<f64>, T)>
    where
        F: FnMut(T) -> bool,
    {
        let tol_sq = tolerance * tolerance;
        let mut best: Option<(Point2<f64>, T, f64)> = None;

        self.for_each_near(point, |p, v| {
            let dist_sq = (p - point).norm_squared();
            if dist_sq > tol_sq || !accept(v) {
                return;
            }
            if best.map_or(true, |(_, _, d)| dist_sq < d) {
                best = Some((*p, v, dist_sq));
            }
        });

        best.map(|(p, v, _)| (p, v))
    }

    /// Checks whether any accepted entry lies within `tolerance` of `point`.
    pub fn any_near<F>(&self, point: &Point2<f64>, tolerance: f64, accept: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        self.nearest(point, tolerance, accept).is_some()
    }

    fn cell_coords(&self, point: &Point2<f64>) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
        )
    }
}
