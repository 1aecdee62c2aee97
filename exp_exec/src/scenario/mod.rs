//! # Scenario control-mode state machine
//!
//! Each scripted scenario is a policy deciding the control mode and the obstacle visibility from
//! the latest vehicle state. The scenarios are:
//!
//! - `PopUpObstacle` (id 1) - cruise until up to speed, then track. A single obstacle is always
//!   published, its marker only becomes opaque once the vehicle reaches the pop-up position.
//! - `ReducedMuTurn` (id 2) - cruise from standstill, track once up to speed. No obstacle.
//! - `Racing` (id 3, and any unknown id) - always track.
//! - `PopUpVariant` (id 4) - same behaviour as `PopUpObstacle`.
//!
//! The decision is recomputed from scratch every cycle, nothing is latched between cycles. Whatever
//! the scenario decides, leaving the corridor forces [`CtrlMode::Stop`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod pop_up;
mod racing;
mod reduced_mu;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub mod policies {
    pub use super::pop_up::PopUp;
    pub use super::racing::Racing;
    pub use super::reduced_mu::ReducedMuTurn;
}

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Display;

use comms_if::msg::CtrlMode;
use policies::*;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Speed above which the cruising scenarios hand over to full tracking.
///
/// Units: meters/second
pub const DEFAULT_SPEED_THRESHOLD_MS: f64 = 5.0;

/// Marker opacity of an obstacle the vehicle hasn't reached yet.
pub const UNDETECTED_OBS_ALPHA: f64 = 0.3;

/// Marker opacity of an obstacle once the vehicle has passed the pop-up position.
pub const DETECTED_OBS_ALPHA: f64 = 1.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Data each policy decides from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioInput {
    /// Unwrapped arc-length position of the vehicle.
    ///
    /// Units: meters
    pub s_m: f64,

    /// Longitudinal speed of the vehicle.
    ///
    /// Units: meters/second
    pub vx_ms: f64,

    /// Verdict of the corridor safety monitor for this cycle.
    pub out_of_corridor: bool,
}

/// The decision made by a scenario for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioDecision {
    pub ctrl_mode: CtrlMode,

    pub obstacle: ObstacleVisibility,
}

/// Parameters shared by the scenario policies.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioParams {
    /// Vehicle position at which the pop-up obstacle is detected.
    ///
    /// Units: meters
    pub s_ego_at_popup_m: f64,

    /// Speed above which cruise hands over to tracking.
    ///
    /// Units: meters/second
    pub speed_threshold_ms: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Visibility of the scenario's obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleVisibility {
    /// The scenario has no obstacle, nothing is published.
    Absent,

    /// The obstacle is published but has not been detected yet.
    Undetected,

    /// The obstacle is published and has been detected.
    Detected,
}

/// The scenario being run, selected once at startup.
#[derive(Debug, Clone)]
pub enum Scenario {
    PopUpObstacle(PopUp),
    ReducedMuTurn(ReducedMuTurn),
    Racing(Racing),
    PopUpVariant(PopUp),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ObstacleVisibility {
    /// Opacity of the obstacle marker, or `None` if there is no obstacle to show.
    pub fn alpha(&self) -> Option<f64> {
        match self {
            ObstacleVisibility::Absent => None,
            ObstacleVisibility::Undetected => Some(UNDETECTED_OBS_ALPHA),
            ObstacleVisibility::Detected => Some(DETECTED_OBS_ALPHA),
        }
    }
}

impl Scenario {
    /// Select the scenario from its configured id.
    pub fn from_id(id: i64, params: &ScenarioParams) -> Self {
        match id {
            1 => Scenario::PopUpObstacle(PopUp::new(params)),
            2 => Scenario::ReducedMuTurn(ReducedMuTurn::new(params)),
            4 => Scenario::PopUpVariant(PopUp::new(params)),
            _ => Scenario::Racing(Racing),
        }
    }

    /// Returns `true` if this scenario publishes an obstacle.
    pub fn has_obstacle(&self) -> bool {
        matches!(self, Scenario::PopUpObstacle(_) | Scenario::PopUpVariant(_))
    }

    /// Decide the control mode and obstacle visibility for this cycle.
    ///
    /// The scenario's own policy is evaluated first, then the corridor override is applied on top
    /// of it.
    pub fn decide(&self, input: &ScenarioInput) -> ScenarioDecision {
        let mut decision = match self {
            Scenario::PopUpObstacle(p) | Scenario::PopUpVariant(p) => p.step(input),
            Scenario::ReducedMuTurn(r) => r.step(input),
            Scenario::Racing(r) => r.step(input),
        };

        if input.out_of_corridor {
            decision.ctrl_mode = CtrlMode::Stop;
        }

        decision
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::PopUpObstacle(_) => write!(f, "Scenario::PopUpObstacle"),
            Scenario::ReducedMuTurn(_) => write!(f, "Scenario::ReducedMuTurn"),
            Scenario::Racing(_) => write!(f, "Scenario::Racing"),
            Scenario::PopUpVariant(_) => write!(f, "Scenario::PopUpVariant"),
        }
    }
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            s_ego_at_popup_m: 0.0,
            speed_threshold_ms: DEFAULT_SPEED_THRESHOLD_MS,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
