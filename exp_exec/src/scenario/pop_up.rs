//! # Pop-up obstacle scenario

use comms_if::msg::CtrlMode;

use super::{ObstacleVisibility, ScenarioDecision, ScenarioInput, ScenarioParams};

/// Pop-up obstacle policy.
///
/// The obstacle is known to the planner for the whole run, only its visualisation changes once the
/// vehicle reaches `s_ego_at_popup_m`, showing an observer the moment it would have been detected.
#[derive(Debug, Clone)]
pub struct PopUp {
    s_ego_at_popup_m: f64,
    speed_threshold_ms: f64,
}

impl PopUp {
    pub fn new(params: &ScenarioParams) -> Self {
        Self {
            s_ego_at_popup_m: params.s_ego_at_popup_m,
            speed_threshold_ms: params.speed_threshold_ms,
        }
    }

    pub fn step(&self, input: &ScenarioInput) -> ScenarioDecision {
        let ctrl_mode = if input.vx_ms > self.speed_threshold_ms {
            CtrlMode::Tracking
        } else {
            CtrlMode::Cruise
        };

        let obstacle = if input.s_m >= self.s_ego_at_popup_m {
            ObstacleVisibility::Detected
        } else {
            ObstacleVisibility::Undetected
        };

        ScenarioDecision { ctrl_mode, obstacle }
    }
}
