// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Penline Geometry
//!
//! Geometry primitives and the data model shared by every stage of the
//! line-art pipeline: segments with optional depth context, opaque faces,
//! planes for depth evaluation, and the polylines handed to the plotter.

pub mod error;
pub mod plane;
pub mod polygon;
pub mod primitives;
pub mod types;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use plane::Plane;
pub use polygon::{is_convex, point_in_polygon, signed_area};
pub use primitives::{
    distance, distance_squared, lerp2, lerp3, line_intersection, midpoint2, midpoint3,
    segment_intersection, Bounds2,
};
pub use types::{Face, Polyline, Segment};
