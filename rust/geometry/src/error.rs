// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a caller builds an entity that breaks its invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("polyline needs at least 2 points, got {0}")]
    DegeneratePolyline(usize),

    #[error("face needs at least 3 vertices, got {0}")]
    DegenerateFace(usize),
}
