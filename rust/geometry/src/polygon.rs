// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon queries on projected face outlines

use nalgebra::Point2;

/// Cross products below this magnitude count as collinear turns
const COLLINEAR_EPSILON: f64 = 1e-10;

/// Check if a point is inside a polygon using ray casting
///
/// Counts crossings of a horizontal ray with the polygon edges. A point that
/// coincides exactly with a vertex is reported as inside.
pub fn point_in_polygon(point: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    if polygon.iter().any(|v| v == point) {
        return true;
    }

    let mut inside = false;
    let n = polygon.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Compute the signed area of a polygon
/// Positive = counter-clockwise, Negative = clockwise
pub fn signed_area(polygon: &[Point2<f64>]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let n = polygon.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += polygon[i].x * polygon[j].y;
        area -= polygon[j].x * polygon[i].y;
    }

    area * 0.5
}

/// Check if a polygon is convex (all turns share one sign)
///
/// Collinear vertices are ignored.
pub fn is_convex(polygon: &[Point2<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let n = polygon.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &polygon[i];
        let p1 = &polygon[(i + 1) % n];
        let p2 = &polygon[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > COLLINEAR_EPSILON {
            let current = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current;
            } else if sign != current {
                return false;
            }
        }
    }

    true
}
