// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core entities flowing through the pipeline

use crate::error::{Error, Result};
use crate::primitives::{distance, distance_squared, lerp3, midpoint2, midpoint3};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// A straight drawing segment
///
/// Segments derived from projected faces carry their paired 3D endpoints so
/// later stages can compare depths; synthetic segments (frames, overlays)
/// carry none and are never occluded.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    /// Projected 3D endpoints matching `start` and `end`
    pub spatial: Option<(Point3<f64>, Point3<f64>)>,
}

impl Segment {
    /// Create a flat segment with no depth context
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self {
            start,
            end,
            spatial: None,
        }
    }

    /// Create a segment from projected 3D endpoints
    pub fn from_spatial(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self {
            start: start.xy(),
            end: end.xy(),
            spatial: Some((start, end)),
        }
    }

    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    pub fn midpoint(&self) -> Point2<f64> {
        midpoint2(&self.start, &self.end)
    }

    /// 3D midpoint, `None` for flat segments
    pub fn spatial_midpoint(&self) -> Option<Point3<f64>> {
        self.spatial.map(|(a, b)| midpoint3(&a, &b))
    }

    /// Check if either endpoint lies within `tolerance` of `point`
    pub fn has_endpoint_near(&self, point: &Point2<f64>, tolerance: f64) -> bool {
        let tol_sq = tolerance * tolerance;
        distance_squared(&self.start, point) <= tol_sq || distance_squared(&self.end, point) <= tol_sq
    }

    /// Split the segment at a point on it
    ///
    /// Depth context is interpolated linearly along the original edge using
    /// the split's position along the 2D segment.
    pub fn split_at(&self, point: Point2<f64>) -> (Segment, Segment) {
        let length = self.length();
        let t = if length > 0.0 {
            (distance(&self.start, &point) / length).clamp(0.0, 1.0)
        } else {
            0.0
        };

        match self.spatial {
            Some((a, b)) => {
                let mut mid = lerp3(&a, &b, t);
                mid.x = point.x;
                mid.y = point.y;
                (
                    Segment {
                        start: self.start,
                        end: point,
                        spatial: Some((a, mid)),
                    },
                    Segment {
                        start: point,
                        end: self.end,
                        spatial: Some((mid, b)),
                    },
                )
            }
            None => (Segment::new(self.start, point), Segment::new(point, self.end)),
        }
    }

    /// The same segment traversed end to start
    pub fn reversed(&self) -> Segment {
        Segment {
            start: self.end,
            end: self.start,
            spatial: self.spatial.map(|(a, b)| (b, a)),
        }
    }
}

/// An opaque planar polygon in projected space, used for occlusion only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point3<f64>>", into = "Vec<Point3<f64>>")]
pub struct Face {
    points: Vec<Point3<f64>>,
}

impl Face {
    /// Create a face from at least three projected vertices
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::DegenerateFace(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Outline on the drawing plane
    pub fn outline(&self) -> Vec<Point2<f64>> {
        self.points.iter().map(|p| p.xy()).collect()
    }

    /// Boundary edges as a closed loop of depth-carrying segments
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::from_spatial(self.points[i], self.points[(i + 1) % n]))
    }
}

impl TryFrom<Vec<Point3<f64>>> for Face {
    type Error = Error;

    fn try_from(points: Vec<Point3<f64>>) -> Result<Self> {
        Face::new(points)
    }
}

impl From<Face> for Vec<Point3<f64>> {
    fn from(face: Face) -> Self {
        face.points
    }
}

/// A connected, non-branching pen stroke of at least two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2<f64>>", into = "Vec<Point2<f64>>")]
pub struct Polyline {
    points: Vec<Point2<f64>>,
}

impl Polyline {
    /// Create a polyline from at least two points
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::DegeneratePolyline(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2<f64>> {
        self.points
    }

    pub fn first(&self) -> &Point2<f64> {
        &self.points[0]
    }

    pub fn last(&self) -> &Point2<f64> {
        &self.points[self.points.len() - 1]
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a polyline holds at least two points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of straight pieces
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Total drawn length
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }

    /// Append `other` after this polyline
    ///
    /// The pen draws straight across any gap between the two. A leading point
    /// of `other` within `snap` of this polyline's last point is dropped
    /// instead of duplicated.
    pub fn join(mut self, other: Polyline, snap: f64) -> Self {
        let mut rest = other.points.into_iter().peekable();
        if let Some(head) = rest.peek() {
            if distance_squared(self.last(), head) <= snap * snap {
                rest.next();
            }
        }
        self.points.extend(rest);
        self
    }
}

impl TryFrom<Vec<Point2<f64>>> for Polyline {
    type Error = Error;

    fn try_from(points: Vec<Point2<f64>>) -> Result<Self> {
        Polyline::new(points)
    }
}

impl From<Polyline> for Vec<Point2<f64>> {
    fn from(polyline: Polyline) -> Self {
        polyline.points
    }
}
