// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render configuration
//!
//! Every render receives its configuration explicitly; nothing here is read
//! from global state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters for one pass through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Distance under which a crossing counts as landing on an existing endpoint
    pub intersection_tolerance: f64,
    /// Distance under which two segment endpoints are chained together
    pub coincidence_tolerance: f64,
    /// Segments shorter than this are dropped before arrangement
    pub min_segment_length: f64,
    /// A face must be nearer than a segment by more than this to hide it
    pub depth_epsilon: f64,
    /// Spatial hash cell size for consolidation (0 = derive from tolerance)
    pub hash_cell_size: f64,
    /// Hand-drawn displacement, disabled when `None`
    pub perturbation: Option<PerturbConfig>,
    /// Seed for every random draw of the render
    pub seed: u64,
    /// Skip arrangement and hidden-surface filtering entirely
    pub fast_preview: bool,
    /// Splice consecutive strokes closer than this into one after ordering
    pub merge_gap: Option<f64>,
    /// Splice strokes end-to-end before ordering, bridging gaps up to this
    pub artistic_merge_gap: Option<f64>,
    /// Maximum number of segments accepted by the arrangement builder
    pub max_segments: usize,
    /// Maximum number of faces accepted by the occlusion filter
    pub max_faces: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intersection_tolerance: 1e-3,
            coincidence_tolerance: 1e-3,
            min_segment_length: 1e-6,
            depth_epsilon: 1e-5,
            hash_cell_size: 0.0,
            perturbation: None,
            seed: 0,
            fast_preview: false,
            merge_gap: None,
            artistic_merge_gap: None,
            max_segments: 20_000,
            max_faces: 20_000,
        }
    }
}

impl PipelineConfig {
    /// Check value ranges before any work starts
    pub fn validate(&self) -> Result<()> {
        check_positive("intersection_tolerance", self.intersection_tolerance)?;
        check_non_negative("coincidence_tolerance", self.coincidence_tolerance)?;
        check_non_negative("min_segment_length", self.min_segment_length)?;
        check_non_negative("depth_epsilon", self.depth_epsilon)?;
        check_non_negative("hash_cell_size", self.hash_cell_size)?;
        if let Some(gap) = self.merge_gap {
            check_non_negative("merge_gap", gap)?;
        }
        if let Some(gap) = self.artistic_merge_gap {
            check_non_negative("artistic_merge_gap", gap)?;
        }
        if let Some(perturbation) = &self.perturbation {
            perturbation.validate()?;
        }
        if self.max_segments == 0 {
            return Err(Error::InvalidConfig("max_segments must be positive".into()));
        }
        if self.max_faces == 0 {
            return Err(Error::InvalidConfig("max_faces must be positive".into()));
        }
        Ok(())
    }

    /// Cell size used by the consolidation spatial hash
    pub fn effective_cell_size(&self) -> f64 {
        if self.hash_cell_size > 0.0 {
            self.hash_cell_size.max(self.coincidence_tolerance)
        } else {
            (self.coincidence_tolerance * 4.0).max(1e-9)
        }
    }
}

/// Hand-drawn perturbation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbConfig {
    /// Target distance between inserted points
    pub spacing: f64,
    /// Noise frequency per unit of arc length
    pub frequency: f64,
    /// Peak perpendicular displacement
    pub magnitude: f64,
}

impl Default for PerturbConfig {
    fn default() -> Self {
        Self {
            spacing: 2.0,
            frequency: 0.05,
            magnitude: 0.6,
        }
    }
}

impl PerturbConfig {
    pub fn validate(&self) -> Result<()> {
        check_positive("perturbation spacing", self.spacing)?;
        check_non_negative("perturbation frequency", self.frequency)?;
        check_non_negative("perturbation magnitude", self.magnitude)
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be finite and positive, got {}",
            name, value
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be finite and non-negative, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let config = PipelineConfig {
            coincidence_tolerance: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_intersection_tolerance() {
        let config = PipelineConfig {
            intersection_tolerance: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_spacing() {
        let config = PipelineConfig {
            perturbation: Some(PerturbConfig {
                spacing: 0.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_nan_and_zero_limits() {
        let config = PipelineConfig {
            depth_epsilon: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            max_faces: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"seed": 7, "perturbation": {"magnitude": 1.5}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_segments, 20_000);
        let perturbation = config.perturbation.unwrap();
        assert_eq!(perturbation.magnitude, 1.5);
        assert_eq!(perturbation.spacing, 2.0);
    }
}
