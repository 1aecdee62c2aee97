//! # Vehicle state messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Estimated state of the ego vehicle in the Frenet frame of the track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EgoState {
    /// Arc-length position, unbounded (it keeps increasing lap after lap).
    ///
    /// Units: meters
    pub s: f64,

    /// Lateral offset from the centreline, positive to the left.
    ///
    /// Units: meters
    pub d: f64,

    /// Longitudinal speed.
    ///
    /// Units: meters/second
    pub vx: f64,
}

/// Status published by the upstream trajectory planner.
///
/// The experiment manager only keeps the latest copy of this, it is not used for any decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerStatus {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub traj_cost: Option<f64>,
}
