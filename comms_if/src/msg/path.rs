//! # Track path message

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The global path describing one lap of the track.
///
/// All fields are parallel vectors, sample `i` being made of the `i`th element of each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackPath {
    /// Arc-length along the centreline.
    ///
    /// Units: meters
    pub s: Vec<f64>,

    /// Centreline position in the map frame.
    ///
    /// Units: meters
    pub x: Vec<f64>,

    /// Centreline position in the map frame.
    ///
    /// Units: meters
    pub y: Vec<f64>,

    /// Heading of the centreline.
    ///
    /// Units: radians
    pub psi_c: Vec<f64>,

    /// Lower (right hand) lateral bound of the drivable corridor.
    ///
    /// Units: meters
    pub dlb: Vec<f64>,

    /// Upper (left hand) lateral bound of the drivable corridor.
    ///
    /// Units: meters
    pub dub: Vec<f64>,
}

impl TrackPath {
    /// Number of samples in the path, or `None` if the field vectors don't all have the same
    /// length.
    pub fn num_samples(&self) -> Option<usize> {
        let n = self.s.len();

        let lens = [
            self.x.len(),
            self.y.len(),
            self.psi_c.len(),
            self.dlb.len(),
            self.dub.len(),
        ];

        if lens.iter().all(|&l| l == n) {
            Some(n)
        } else {
            None
        }
    }
}
