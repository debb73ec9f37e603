// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector helpers, line intersection and axis-aligned bounds

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Determinants below this magnitude are treated as parallel lines
const PARALLEL_EPSILON: f64 = 1e-12;

/// Slack on the segment parameters when testing whether an intersection
/// lies inside both segments
const PARAM_EPSILON: f64 = 1e-9;

/// Euclidean distance between two 2D points
#[inline]
pub fn distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (b - a).norm()
}

/// Squared distance, for comparisons that don't need the root
#[inline]
pub fn distance_squared(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (b - a).norm_squared()
}

#[inline]
pub fn lerp2(a: &Point2<f64>, b: &Point2<f64>, t: f64) -> Point2<f64> {
    a + (b - a) * t
}

#[inline]
pub fn lerp3(a: &Point3<f64>, b: &Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}

#[inline]
pub fn midpoint2(a: &Point2<f64>, b: &Point2<f64>) -> Point2<f64> {
    lerp2(a, b, 0.5)
}

#[inline]
pub fn midpoint3(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    lerp3(a, b, 0.5)
}

/// Intersect the infinite lines through `p1-p2` and `p3-p4`
///
/// Returns the intersection point together with the parameters `t` along
/// the first line and `u` along the second, or `None` when the lines are
/// parallel or collinear (the determinant vanishes).
pub fn line_intersection(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    p3: &Point2<f64>,
    p4: &Point2<f64>,
) -> Option<(Point2<f64>, f64, f64)> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    if !t.is_finite() || !u.is_finite() {
        return None;
    }

    Some((lerp2(p1, p2, t), t, u))
}

/// Intersect two segments, accepting hits on (or a hair beyond) either end
pub fn segment_intersection(
    a_start: &Point2<f64>,
    a_end: &Point2<f64>,
    b_start: &Point2<f64>,
    b_end: &Point2<f64>,
) -> Option<Point2<f64>> {
    let (point, t, u) = line_intersection(a_start, a_end, b_start, b_end)?;
    let inside = |s: f64| (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&s);
    if inside(t) && inside(u) {
        Some(point)
    } else {
        None
    }
}

/// Axis-aligned 2D bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds2 {
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self { min, max }
    }

    /// Compute the bounds of a point set, `None` when empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2<f64>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Grow the box so it contains `point`
    pub fn include(&mut self, point: &Point2<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Inclusive point-in-box test
    #[inline]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Check if two bounding boxes overlap
    #[inline]
    pub fn overlaps(&self, other: &Bounds2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// A box with no extent along either axis contains no area
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.width() <= epsilon || self.height() <= epsilon
    }
}
