// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render driver
//!
//! One render is one synchronous pass: prepare, arrange, hide, consolidate,
//! style, order. Each stage consumes the previous stage's output. Renders
//! share no state, so a host may run several at once.

use crate::arrangement::{build_arrangement, prepare_chains, prepare_faces};
use crate::config::PipelineConfig;
use crate::consolidate::consolidate;
use crate::error::Result;
use crate::merge::artistic_merge;
use crate::occlusion::{filter_hidden, FaceTable};
use crate::ordering::{merge_adjacent, optimize_order, travel_distance};
use crate::perturb::perturb_all;
use penline_geometry::{Bounds2, Face, Point2, Polyline, Segment};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Counters collected during one render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Segments after exploding faces and chains
    pub input_segments: usize,
    /// Segments after splitting at crossings
    pub arranged_segments: usize,
    /// Segments surviving the hidden-surface filter
    pub visible_segments: usize,
    /// Strokes handed to the plotter
    pub polylines: usize,
    /// Pen-up travel in consolidation order
    pub travel_before: f64,
    /// Pen-up travel after ordering
    pub travel_after: f64,
    /// Wall time of the whole render (ms)
    pub elapsed_ms: u64,
}

/// Output of one render
#[derive(Debug, Clone)]
pub struct Rendering {
    /// Ordered strokes, ready for serialization
    pub polylines: Vec<Polyline>,
    pub stats: RenderStats,
}

/// Turn projected faces and extra 2D chains into ordered pen strokes
///
/// `faces` are both drawn (their outlines) and used as occluders. `chains`
/// are drawn on top and never hidden. Identical inputs and seed give
/// identical strokes.
pub fn render(
    faces: &[Face],
    chains: &[Vec<Point2<f64>>],
    config: &PipelineConfig,
) -> Result<Rendering> {
    let total_start = std::time::Instant::now();
    config.validate()?;

    tracing::info!(
        faces = faces.len(),
        chains = chains.len(),
        seed = config.seed,
        fast_preview = config.fast_preview,
        "Starting render"
    );

    let mut segments = prepare_faces(faces, config.min_segment_length);
    segments.extend(prepare_chains(chains, config.min_segment_length));
    let input_segments = segments.len();

    let (arranged_segments, visible) = if config.fast_preview {
        (input_segments, segments)
    } else {
        let arranged = build_arrangement(
            segments,
            config.intersection_tolerance,
            config.max_segments,
        )?;
        let arranged_segments = arranged.len();
        let visible = hide_occluded(arranged, faces, config)?;
        (arranged_segments, visible)
    };
    let visible_segments = visible.len();

    let mut polylines = consolidate(
        &visible,
        config.coincidence_tolerance,
        config.effective_cell_size(),
    )?;

    if let Some(max_gap) = config.artistic_merge_gap {
        polylines = artistic_merge(polylines, max_gap);
    }

    if let Some(perturbation) = &config.perturbation {
        let mut rng = StdRng::seed_from_u64(config.seed);
        polylines = perturb_all(&polylines, perturbation, &mut rng)?;
    }

    let travel_before = travel_distance(&polylines);
    polylines = optimize_order(polylines);
    if let Some(gap) = config.merge_gap {
        polylines = merge_adjacent(polylines, gap);
    }
    let travel_after = travel_distance(&polylines);

    let total_time = total_start.elapsed();

    tracing::info!(
        input_segments,
        arranged_segments,
        visible_segments,
        polylines = polylines.len(),
        travel_before,
        travel_after,
        total_time_ms = total_time.as_millis(),
        "Render complete"
    );

    let stats = RenderStats {
        input_segments,
        arranged_segments,
        visible_segments,
        polylines: polylines.len(),
        travel_before,
        travel_after,
        elapsed_ms: total_time.as_millis() as u64,
    };

    Ok(Rendering { polylines, stats })
}

/// Run the hidden-surface filter against the faces overlapping the drawing
fn hide_occluded(
    segments: Vec<Segment>,
    faces: &[Face],
    config: &PipelineConfig,
) -> Result<Vec<Segment>> {
    if faces.is_empty() {
        return Ok(segments);
    }

    let table = FaceTable::new(faces, config.max_faces)?;
    let extent = Bounds2::from_points(segments.iter().flat_map(|s| [&s.start, &s.end]));
    let table = match extent {
        Some(extent) => table.faces_overlapping(&extent),
        None => return Ok(segments),
    };
    if table.is_empty() {
        return Ok(segments);
    }

    Ok(filter_hidden(segments, &table, config.depth_epsilon))
}
