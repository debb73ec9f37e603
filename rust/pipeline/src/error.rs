// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for pipeline operations.

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a render.
///
/// Degenerate geometry never lands here; stages skip it locally. These
/// variants cover caller misuse and inputs too large to process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An entity broke its construction invariant.
    #[error(transparent)]
    Geometry(#[from] penline_geometry::Error),

    /// Occlusion testing needs at least one face.
    #[error("occlusion test requires at least one face")]
    EmptyFaces,

    /// Arrangement input exceeds the configured segment limit.
    #[error("{count} segments exceed the arrangement limit of {limit}")]
    TooManySegments { count: usize, limit: usize },

    /// Occlusion input exceeds the configured face limit.
    #[error("{count} faces exceed the occlusion limit of {limit}")]
    TooManyFaces { count: usize, limit: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Path data could not be parsed back into a polyline.
    #[error("malformed path data: {0}")]
    PathData(String),
}
