//! # ExpMgr Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::{corridor::DEFAULT_CORRIDOR_SLACK_M, scenario::DEFAULT_SPEED_THRESHOLD_MS};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters of the experiment manager, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpMgrParams {

    // ---- TIMING ----

    /// Experiment time after which the scenario starts running.
    ///
    /// Units: seconds
    pub t_activate_s: f64,

    /// Period of one cycle.
    ///
    /// Units: seconds
    #[serde(default = "default_cycle_period_s")]
    pub cycle_period_s: f64,

    /// Maximum time to wait for the first track path at startup, unbounded if not given.
    ///
    /// Units: seconds
    #[serde(default)]
    pub track_wait_timeout_s: Option<f64>,

    // ---- SCENARIO ----

    /// Scenario to run: 1 pop-up obstacle, 2 reduced friction turn, 3 racing, 4 pop-up variant.
    pub scenario_id: i64,

    /// Whether the downstream controller adapts to the track friction, only reported.
    pub traction_adaptive: bool,

    /// Speed above which the cruising scenarios switch to tracking.
    ///
    /// Units: meters/second
    #[serde(default = "default_speed_threshold_ms")]
    pub speed_threshold_ms: f64,

    // ---- POP-UP OBSTACLE ----

    /// Vehicle position at which the obstacle is detected.
    ///
    /// Units: meters
    pub s_ego_at_popup_m: f64,

    /// Obstacle arc-length position.
    ///
    /// Units: meters
    pub s_obs_at_popup_m: f64,

    /// Obstacle lateral offset.
    ///
    /// Units: meters
    pub d_obs_at_popup_m: f64,

    /// Units: meters
    #[serde(default = "default_obs_radius_m")]
    pub obs_radius_m: f64,

    /// Extra clearance added to the obstacle's safety margin.
    ///
    /// Units: meters
    #[serde(default = "default_obs_wiggle_room_m")]
    pub obs_wiggle_room_m: f64,

    // ---- TRACK ----

    pub track_name: String,

    /// Arc-length at which each friction segment begins, the first being 0.
    ///
    /// Units: meters
    pub s_begin_mu_segments_m: Vec<f64>,

    /// Friction coefficient of each segment.
    pub mu_segment_values: Vec<f64>,

    /// Slack allowed outside the corridor bounds before the vehicle is stopped.
    ///
    /// Units: meters
    #[serde(default = "default_corridor_slack_m")]
    pub corridor_slack_m: f64,

    // ---- VEHICLE ----

    pub robot_name: String,

    /// Units: meters
    pub vehicle_width_m: f64,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn default_cycle_period_s() -> f64 {
    0.01
}

fn default_speed_threshold_ms() -> f64 {
    DEFAULT_SPEED_THRESHOLD_MS
}

fn default_obs_radius_m() -> f64 {
    0.5
}

fn default_obs_wiggle_room_m() -> f64 {
    1.0
}

fn default_corridor_slack_m() -> f64 {
    DEFAULT_CORRIDOR_SLACK_M
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let p: ExpMgrParams = util::params::from_str(
            r#"
            t_activate_s = 2.0
            scenario_id = 1
            traction_adaptive = true
            s_ego_at_popup_m = 20.0
            s_obs_at_popup_m = 45.0
            d_obs_at_popup_m = 0.5
            track_name = "oval"
            s_begin_mu_segments_m = [0.0, 40.0, 70.0]
            mu_segment_values = [0.9, 0.5, 0.8]
            robot_name = "rhino"
            vehicle_width_m = 1.7
            "#,
        )
        .unwrap();

        assert_eq!(p.cycle_period_s, 0.01);
        assert_eq!(p.track_wait_timeout_s, None);
        assert_eq!(p.speed_threshold_ms, 5.0);
        assert_eq!(p.obs_radius_m, 0.5);
        assert_eq!(p.obs_wiggle_room_m, 1.0);
        assert_eq!(p.corridor_slack_m, 1.0);
    }
}
