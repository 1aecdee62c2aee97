//! # Reduced friction turn scenario

use comms_if::msg::CtrlMode;

use super::{ObstacleVisibility, ScenarioDecision, ScenarioInput, ScenarioParams};

/// Reduced friction turn policy.
///
/// Cruise control gets the vehicle up to speed from standstill, tracking takes over above the
/// speed threshold.
#[derive(Debug, Clone)]
pub struct ReducedMuTurn {
    speed_threshold_ms: f64,
}

impl ReducedMuTurn {
    pub fn new(params: &ScenarioParams) -> Self {
        Self {
            speed_threshold_ms: params.speed_threshold_ms,
        }
    }

    pub fn step(&self, input: &ScenarioInput) -> ScenarioDecision {
        let ctrl_mode = if input.vx_ms > self.speed_threshold_ms {
            CtrlMode::Tracking
        } else {
            CtrlMode::Cruise
        };

        ScenarioDecision {
            ctrl_mode,
            obstacle: ObstacleVisibility::Absent,
        }
    }
}
