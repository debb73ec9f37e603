// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hidden-surface filtering
//!
//! A segment is hidden when some face covers its 2D midpoint and that face's
//! plane lies nearer the viewer than the segment's own midpoint depth.
//! Smaller depth values are nearer. Each test only reads the precomputed face
//! table, so segments are tested in parallel on native targets.

use crate::error::{Error, Result};
use penline_geometry::{is_convex, point_in_polygon, Bounds2, Face, Plane, Point2, Segment};

/// Bounding boxes thinner than this cannot cover a point
const DEGENERATE_EXTENT: f64 = 1e-12;

/// Per-face data precomputed once per render
#[derive(Debug, Clone)]
pub struct FaceRecord {
    pub plane: Plane,
    pub bounds: Bounds2,
    pub outline: Vec<Point2<f64>>,
    pub convex: bool,
}

impl FaceRecord {
    /// Precompute plane, bounds and outline; `None` for faces that cannot
    /// occlude anything (collinear vertices or zero projected extent)
    pub fn new(face: &Face) -> Option<Self> {
        let plane = Plane::from_face(face)?;
        let outline = face.outline();
        let bounds = Bounds2::from_points(&outline)?;
        if bounds.is_degenerate(DEGENERATE_EXTENT) {
            return None;
        }
        let convex = is_convex(&outline);
        Some(Self {
            plane,
            bounds,
            outline,
            convex,
        })
    }

    /// Check if this face hides a point at `depth` under `point`
    #[inline]
    pub fn hides(&self, point: &Point2<f64>, depth: f64, epsilon: f64) -> bool {
        if !self.bounds.contains(point) || !point_in_polygon(point, &self.outline) {
            return false;
        }
        match self.plane.depth_at(point.x, point.y) {
            Some(face_depth) => face_depth < depth - epsilon,
            None => false,
        }
    }
}

/// Immutable table of occluding faces shared by every segment test
#[derive(Debug, Clone)]
pub struct FaceTable {
    records: Vec<FaceRecord>,
    skipped: usize,
}

impl FaceTable {
    /// Build the table, failing on an empty face list or more than `max_faces`
    pub fn new(faces: &[Face], max_faces: usize) -> Result<Self> {
        if faces.is_empty() {
            return Err(Error::EmptyFaces);
        }
        if faces.len() > max_faces {
            return Err(Error::TooManyFaces {
                count: faces.len(),
                limit: max_faces,
            });
        }

        let records: Vec<FaceRecord> = faces.iter().filter_map(FaceRecord::new).collect();
        let skipped = faces.len() - records.len();
        let table = Self { records, skipped };

        if skipped > 0 {
            tracing::debug!(skipped, "Skipped degenerate faces");
        }
        let non_convex = table.non_convex_count();
        if non_convex > 0 {
            tracing::warn!(non_convex, total = faces.len(), "Non-convex faces in occlusion set");
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FaceRecord] {
        &self.records
    }

    /// Faces dropped as degenerate when the table was built
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Number of faces whose projected outline is not convex
    ///
    /// Occlusion uses a general point-in-polygon test, so these are only
    /// reported.
    pub fn non_convex_count(&self) -> usize {
        self.records.iter().filter(|r| !r.convex).count()
    }

    /// A table holding only the faces whose bounds overlap `region`
    pub fn faces_overlapping(&self, region: &Bounds2) -> FaceTable {
        FaceTable {
            records: self
                .records
                .iter()
                .filter(|r| r.bounds.overlaps(region))
                .cloned()
                .collect(),
            skipped: 0,
        }
    }

    /// Check if any face hides a point at `depth` under `point`
    pub fn occludes(&self, point: &Point2<f64>, depth: f64, epsilon: f64) -> bool {
        self.records.iter().any(|r| r.hides(point, depth, epsilon))
    }

    /// Check if a segment's midpoint is visible
    ///
    /// Segments without depth context are drawn over everything.
    pub fn is_visible(&self, segment: &Segment, epsilon: f64) -> bool {
        match segment.spatial_midpoint() {
            Some(mid) => !self.occludes(&mid.xy(), mid.z, epsilon),
            None => true,
        }
    }
}

/// Keep only the segments no face hides, preserving input order
pub fn filter_hidden(segments: Vec<Segment>, table: &FaceTable, epsilon: f64) -> Vec<Segment> {
    #[cfg(not(target_arch = "wasm32"))]
    use rayon::prelude::*;

    let input_count = segments.len();

    // On native: use parallel iteration for multi-core speedup
    // On WASM: use sequential iteration (no threads available)
    #[cfg(not(target_arch = "wasm32"))]
    let visible: Vec<bool> = segments
        .par_iter()
        .map(|segment| table.is_visible(segment, epsilon))
        .collect();

    #[cfg(target_arch = "wasm32")]
    let visible: Vec<bool> = segments
        .iter()
        .map(|segment| table.is_visible(segment, epsilon))
        .collect();

    let kept: Vec<Segment> = segments
        .into_iter()
        .zip(visible)
        .filter_map(|(segment, keep)| keep.then_some(segment))
        .collect();

    tracing::debug!(
        input = input_count,
        visible = kept.len(),
        faces = table.len(),
        "Filtered hidden segments"
    );

    kept
}
