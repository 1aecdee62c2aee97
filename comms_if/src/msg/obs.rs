//! # Obstacle messages

use serde::{Deserialize, Serialize};

/// Set of obstacles published to the planner.
///
/// Fields are parallel vectors, obstacle `i` being made of the `i`th element of each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Obstacles {
    /// Arc-length positions, units: meters
    pub s: Vec<f64>,

    /// Lateral offsets, units: meters
    pub d: Vec<f64>,

    /// Physical radii, units: meters
    pub r: Vec<f64>,

    /// Radii including the safety margin, units: meters
    pub r_mgn: Vec<f64>,
}
