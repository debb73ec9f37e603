// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Penline Pipeline
//!
//! Turns projected, overlapping polygon edges into clean pen strokes for a
//! plotter.
//!
//! ## Stages
//!
//! - **Arrangement**: split segments at every mutual crossing
//! - **Occlusion**: drop segments hidden behind a nearer opaque face
//! - **Consolidation**: re-thread loose segments into maximal polylines
//! - **Perturbation**: optional hand-drawn wobble from seeded noise
//! - **Ordering**: greedy nearest-endpoint tour to cut pen-up travel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use penline_pipeline::{render, PipelineConfig};
//! use penline_geometry::{Face, Point3};
//!
//! let face = Face::new(vec![
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(10.0, 0.0, 1.0),
//!     Point3::new(10.0, 10.0, 1.0),
//! ])?;
//! let rendering = render(&[face], &[], &PipelineConfig::default())?;
//! println!("{} strokes", rendering.polylines.len());
//! # Ok::<(), penline_pipeline::Error>(())
//! ```

pub mod arrangement;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod merge;
pub mod noise;
pub mod occlusion;
pub mod ordering;
pub mod path_data;
pub mod perturb;
pub mod render;
pub mod spatial;

pub use arrangement::{build_arrangement, prepare_chains, prepare_faces};
pub use config::{PerturbConfig, PipelineConfig};
pub use consolidate::consolidate;
pub use error::{Error, Result};
pub use merge::artistic_merge;
pub use noise::GradientNoise;
pub use occlusion::{filter_hidden, FaceRecord, FaceTable};
pub use ordering::{merge_adjacent, optimize_order, travel_distance};
pub use path_data::{parse_path_data, to_path_data, PlotScale};
pub use perturb::{perturb, perturb_all, perturb_points};
pub use render::{render, RenderStats, Rendering};
pub use spatial::SpatialGrid;
