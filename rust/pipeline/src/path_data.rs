// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Path data at the plotting boundary
//!
//! Converts polylines between drawing units and the physical millimetres a
//! vector document is written in. Only absolute `M` and `L` commands are
//! produced or understood.

use crate::error::{Error, Result};
use penline_geometry::{Point2, Polyline};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Mapping from drawing units to millimetres on paper
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotScale {
    /// Drawing units per millimetre (`k`)
    pub units_per_mm: f64,
    /// Offset added on both axes after scaling
    pub margin_mm: f64,
}

impl Default for PlotScale {
    fn default() -> Self {
        Self {
            units_per_mm: 1.0,
            margin_mm: 0.0,
        }
    }
}

impl PlotScale {
    pub fn new(units_per_mm: f64, margin_mm: f64) -> Result<Self> {
        if !(units_per_mm.is_finite() && units_per_mm > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "units_per_mm must be positive, got {}",
                units_per_mm
            )));
        }
        if !margin_mm.is_finite() {
            return Err(Error::InvalidConfig("margin_mm must be finite".into()));
        }
        Ok(Self {
            units_per_mm,
            margin_mm,
        })
    }

    #[inline]
    pub fn to_mm(&self, value: f64) -> f64 {
        value / self.units_per_mm + self.margin_mm
    }

    #[inline]
    pub fn from_mm(&self, value: f64) -> f64 {
        (value - self.margin_mm) * self.units_per_mm
    }
}

/// Emit an SVG path `d` attribute for one polyline, in millimetres
pub fn to_path_data(polyline: &Polyline, scale: &PlotScale) -> String {
    let mut data = String::with_capacity(polyline.len() * 24);
    for (i, point) in polyline.points().iter().enumerate() {
        if i > 0 {
            data.push(' ');
        }
        let command = if i == 0 { 'M' } else { 'L' };
        // Writing into a String cannot fail
        let _ = write!(
            data,
            "{} {} {}",
            command,
            scale.to_mm(point.x),
            scale.to_mm(point.y)
        );
    }
    data
}

/// Parse path data produced by [`to_path_data`] back into drawing units
///
/// Accepts `M`/`L` commands with coordinates separated by whitespace or
/// commas, and implicit `L` for extra coordinate pairs. Anything else is an
/// error.
pub fn parse_path_data(data: &str, scale: &PlotScale) -> Result<Polyline> {
    let mut points = Vec::new();
    let mut tokens = data
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty());
    let mut started = false;

    while let Some(token) = tokens.next() {
        let x_token = match token {
            "M" => {
                if started {
                    return Err(Error::PathData("multiple subpaths".into()));
                }
                started = true;
                next_token(&mut tokens)?
            }
            "L" => {
                if !started {
                    return Err(Error::PathData("line before move".into()));
                }
                next_token(&mut tokens)?
            }
            other if started => other,
            other => {
                return Err(Error::PathData(format!("unexpected token '{}'", other)));
            }
        };

        let x = parse_number(x_token)?;
        let y = parse_number(next_token(&mut tokens)?)?;
        points.push(Point2::new(scale.from_mm(x), scale.from_mm(y)));
    }

    Ok(Polyline::new(points)?)
}

fn next_token<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<&'a str> {
    tokens
        .next()
        .ok_or_else(|| Error::PathData("missing coordinate".into()))
}

fn parse_number(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::PathData(format!("invalid number '{}'", token)))
}
