//! # Visualisation marker messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{serde::ts_milliseconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A renderable marker for the visualisation tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// UTC timestamp at which the marker was built
    #[serde(with = "ts_milliseconds")]
    pub stamp: DateTime<Utc>,

    /// Name of the frame the pose is expressed in
    pub frame_id: String,

    pub kind: MarkerKind,

    /// Position of the marker's centre, units: meters
    pub position_m: [f64; 3],

    /// Scale along each axis, units: meters
    pub scale_m: [f64; 3],

    pub color: Rgba,

    /// Text shown by [`MarkerKind::TextViewFacing`] markers, empty otherwise
    #[serde(default)]
    pub text: String,
}

/// Colour with alpha, each channel in the range [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Cylinder,
    TextViewFacing,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}
