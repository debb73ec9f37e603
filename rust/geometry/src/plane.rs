// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face planes used to evaluate depth under a projected point

use crate::types::Face;
use nalgebra::{Point3, Vector3};

/// Normals shorter than this come from collinear vertices
const DEGENERATE_NORMAL: f64 = 1e-12;

/// Plane in implicit form `normal · p + offset = 0`
///
/// Coordinates are in projected space: `x`/`y` on the drawing plane and `z`
/// the retained depth, smaller values nearer the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vector3<f64>,
    /// Offset along the normal
    pub offset: f64,
}

impl Plane {
    /// Build a plane through three points, `None` when they are collinear
    pub fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        let length = normal.norm();
        if !length.is_finite() || length < DEGENERATE_NORMAL {
            return None;
        }

        let normal = normal / length;
        Some(Self {
            normal,
            offset: -normal.dot(&a.coords),
        })
    }

    /// Build the plane of a face from its first non-collinear vertex fan
    pub fn from_face(face: &Face) -> Option<Self> {
        let points = face.points();
        let anchor = &points[0];
        points
            .windows(2)
            .skip(1)
            .find_map(|pair| Self::from_points(anchor, &pair[0], &pair[1]))
    }

    /// Calculate signed distance from point to plane
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) + self.offset
    }

    /// Depth of the plane above the drawing-plane point `(x, y)`
    ///
    /// Returns `None` for planes seen edge-on, where the depth is undefined.
    pub fn depth_at(&self, x: f64, y: f64) -> Option<f64> {
        if self.normal.z.abs() < DEGENERATE_NORMAL {
            return None;
        }
        Some(-(self.normal.x * x + self.normal.y * y + self.offset) / self.normal.z)
    }
}
