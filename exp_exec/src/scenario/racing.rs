//! # Racing scenario

use comms_if::msg::CtrlMode;

use super::{ObstacleVisibility, ScenarioDecision, ScenarioInput};

/// Racing policy, full tracking from the moment the experiment is activated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Racing;

impl Racing {
    pub fn step(&self, _input: &ScenarioInput) -> ScenarioDecision {
        ScenarioDecision {
            ctrl_mode: CtrlMode::Tracking,
            obstacle: ObstacleVisibility::Absent,
        }
    }
}
