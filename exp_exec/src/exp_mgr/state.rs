//! Implementations for the ExpMgr state structure

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use chrono::Utc;
use log::{debug, info, trace, warn};
use serde::Serialize;

// Internal
use super::{tm, ExpMgrError, ExpMgrParams};
use crate::{
    corridor,
    friction::FrictionSegmentTable,
    obstacle::ObstacleSpec,
    scenario::{Scenario, ScenarioInput, ScenarioParams},
    track::TrackModel,
};
use comms_if::msg::{CtrlMode, EgoState, Marker, Obstacles, OutputMsg, PlannerStatus, TrackPath};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Experiment manager state
pub struct ExpMgr {
    params: ExpMgrParams,

    scenario: Scenario,

    friction: FrictionSegmentTable,

    /// Model of the latest track path, `None` until the first path is set.
    track: Option<TrackModel>,

    /// Built from the first track path and never changed afterwards.
    obstacle: Option<ObstacleSpec>,

    planner_status: Option<PlannerStatus>,

    /// Number of cycles processed so far.
    num_cycles: u64,

    /// Number of cycles in one second, used to throttle periodic log messages.
    cycles_per_second: u64,

    report: StatusReport,
    arch_report: Option<Archiver>,
}

/// Input data to the experiment manager, the latest snapshots at the start of the cycle.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    /// A track path received since the last cycle, `None` if the path hasn't changed.
    pub new_track_path: Option<TrackPath>,

    /// Latest estimate of the vehicle's state.
    pub ego_state: EgoState,

    /// Latest planner status, if one has been received since the last cycle.
    pub planner_status: Option<PlannerStatus>,
}

/// Outputs produced by one active cycle.
#[derive(Debug, Clone)]
pub struct OutputData {
    pub ctrl_mode: CtrlMode,

    /// Obstacle set, only for scenarios with an obstacle.
    pub obstacles: Option<Obstacles>,

    /// Obstacle marker whose opacity shows whether the obstacle has been detected.
    pub obstacle_marker: Option<Marker>,

    pub status_text: Marker,
}

/// Status report for ExpMgr processing.
///
/// Flat so it can be archived as a CSV row.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    pub exp_time_s: f64,

    /// `true` once the activation time has elapsed.
    pub active: bool,

    pub s_m: f64,
    pub d_m: f64,
    pub vx_ms: f64,

    pub dlb_m: f64,
    pub dub_m: f64,
    pub out_of_corridor: bool,

    pub mu_segment_idx: usize,
    pub mu: f64,

    pub ctrl_mode: i16,

    /// Opacity of the obstacle marker, `None` when no obstacle is shown.
    pub obs_alpha: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl State for ExpMgr {
    type InitData = &'static str;
    type InitError = ExpMgrError;

    type InputData = InputData;
    type OutputData = Option<OutputData>;
    type StatusReport = StatusReport;
    type ProcError = ExpMgrError;

    /// Initialise the ExpMgr module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(init_data: Self::InitData, session: &Session) -> Result<Self, Self::InitError> {
        let params: ExpMgrParams = params::load(init_data)
            .map_err(ExpMgrError::ParamLoadError)?;

        let mut exp_mgr = Self::new(params)?;

        exp_mgr.arch_report = Some(
            Archiver::from_path(session, "exp_mgr/status_report.csv")
                .map_err(ExpMgrError::ArchiveError)?
        );

        Ok(exp_mgr)
    }

    /// Perform one cycle of the experiment.
    ///
    /// Returns `None` as output data until the activation time has elapsed.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        if let Some(ref status) = input_data.planner_status {
            self.planner_status = Some(status.clone());
        }

        // A rejected path keeps the previous model, the cycle still runs
        if let Some(ref path) = input_data.new_track_path {
            if let Err(e) = self.set_track_path(path.clone()) {
                warn!("Rejected track path update, keeping the previous path: {}", e);
            }
        }

        if self.track.is_none() {
            return Err(ExpMgrError::NoTrackPath);
        }

        let is_1_hz_cycle = self.num_cycles % self.cycles_per_second == 0;
        let exp_time_s = self.exp_time_s();

        let output = if exp_time_s >= self.params.t_activate_s {
            let (output, report) = self.run_experiment(&input_data.ego_state, exp_time_s)?;

            if report.out_of_corridor && !self.report.out_of_corridor {
                warn!(
                    "Vehicle left the corridor (d = {:.3} m, bounds [{:.3}, {:.3}] m), stopping",
                    report.d_m, report.dlb_m, report.dub_m
                );
            }
            if is_1_hz_cycle {
                info!("Running experiment, ctrl mode = {}", report.ctrl_mode);
            }

            self.report = report;
            Some(output)
        }
        else {
            if is_1_hz_cycle {
                info!(
                    "Experiment starting in {} seconds",
                    (self.params.t_activate_s - exp_time_s) as i64
                );
            }

            self.report = StatusReport {
                exp_time_s,
                ..Default::default()
            };
            None
        };

        self.num_cycles += 1;

        Ok((output, self.report))
    }
}

impl Archived for ExpMgr {
    fn write(&mut self) -> Result<(), ArchiveError> {
        match self.arch_report {
            Some(ref mut a) => a.serialise(self.report),
            None => Ok(()),
        }
    }
}

impl ExpMgr {
    /// Create a new experiment manager from the given parameters, without any archiving.
    ///
    /// Fails if the friction segment table or the cycle period are invalid.
    pub fn new(params: ExpMgrParams) -> Result<Self, ExpMgrError> {
        if !(params.cycle_period_s > 0.0) {
            return Err(ExpMgrError::InvalidParam("cycle_period_s must be positive"));
        }
        if !(params.corridor_slack_m >= 0.0) {
            return Err(ExpMgrError::InvalidParam("corridor_slack_m must not be negative"));
        }

        let friction = FrictionSegmentTable::new(
            params.s_begin_mu_segments_m.clone(),
            params.mu_segment_values.clone(),
        )
        .map_err(ExpMgrError::FrictionTable)?;

        let scenario = Scenario::from_id(
            params.scenario_id,
            &ScenarioParams {
                s_ego_at_popup_m: params.s_ego_at_popup_m,
                speed_threshold_ms: params.speed_threshold_ms,
            },
        );

        let cycles_per_second = ((1.0 / params.cycle_period_s).round() as u64).max(1);

        info!(
            "ExpMgr running {} (id {}) on track \"{}\" with {}, {} friction segments",
            scenario,
            params.scenario_id,
            params.track_name,
            params.robot_name,
            friction.len()
        );

        Ok(Self {
            params,
            scenario,
            friction,
            track: None,
            obstacle: None,
            planner_status: None,
            num_cycles: 0,
            cycles_per_second,
            report: StatusReport::default(),
            arch_report: None,
        })
    }

    /// Replace the track path.
    ///
    /// The lap length is recomputed for every new path, the obstacle position is only computed
    /// from the first one.
    pub fn set_track_path(&mut self, path: TrackPath) -> Result<(), ExpMgrError> {
        let track = TrackModel::new(path).map_err(ExpMgrError::Track)?;

        if self.obstacle.is_none() {
            let obs = ObstacleSpec::new(
                self.params.s_obs_at_popup_m,
                self.params.d_obs_at_popup_m,
                self.params.obs_radius_m,
                self.params.vehicle_width_m,
                self.params.obs_wiggle_room_m,
                &track,
            );
            info!(
                "Obstacle placed at s = {:.3} m, d = {:.3} m, (X, Y) = ({:.3}, {:.3}) m",
                obs.s_m, obs.d_m, obs.position_m_map.x, obs.position_m_map.y
            );
            self.obstacle = Some(obs);
        }

        debug!(
            "New track path with {} samples, lap length {:.3} m",
            track.path().s.len(),
            track.lap_length()
        );
        self.track = Some(track);

        Ok(())
    }

    pub fn params(&self) -> &ExpMgrParams {
        &self.params
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn obstacle(&self) -> Option<&ObstacleSpec> {
        self.obstacle.as_ref()
    }

    /// The latest upstream planner status, kept for telemetry only.
    pub fn planner_status(&self) -> Option<&PlannerStatus> {
        self.planner_status.as_ref()
    }

    /// Experiment time, the number of cycles processed multiplied by the cycle period.
    ///
    /// Units: seconds
    pub fn exp_time_s(&self) -> f64 {
        self.num_cycles as f64 * self.params.cycle_period_s
    }

    pub fn is_active(&self) -> bool {
        self.exp_time_s() >= self.params.t_activate_s
    }

    /// Make the decisions for one active cycle.
    fn run_experiment(
        &self,
        ego: &EgoState,
        exp_time_s: f64,
    ) -> Result<(OutputData, StatusReport), ExpMgrError> {
        let track = self.track.as_ref().ok_or(ExpMgrError::NoTrackPath)?;

        let (mu_segment_idx, mu) = self.friction.lookup(ego.s, track.lap_length());

        let (dlb_m, dub_m) = track.corridor_bounds(ego.s);
        let out_of_corridor = corridor::is_out_of_corridor(
            ego.d,
            dlb_m,
            dub_m,
            self.params.corridor_slack_m,
        );

        let decision = self.scenario.decide(&ScenarioInput {
            s_m: ego.s,
            vx_ms: ego.vx,
            out_of_corridor,
        });

        let stamp = Utc::now();
        let obs_alpha = decision.obstacle.alpha();

        let (obstacles, obstacle_marker) = match (obs_alpha, &self.obstacle) {
            (Some(alpha), Some(obs)) => (Some(obs.to_obstacles()), Some(obs.marker(alpha, stamp))),
            _ => (None, None),
        };

        let status_text = tm::status_text_marker(
            tm::status_text(self.params.traction_adaptive, ego.s, ego.vx, mu),
            stamp,
        );

        trace!(
            "ExpMgr decision: s = {:.3}, d = {:.3}, vx = {:.3}, mu[{}] = {:.3}, mode = {:?}, \
             obstacle = {:?}",
            ego.s, ego.d, ego.vx, mu_segment_idx, mu, decision.ctrl_mode, decision.obstacle
        );

        let report = StatusReport {
            exp_time_s,
            active: true,
            s_m: ego.s,
            d_m: ego.d,
            vx_ms: ego.vx,
            dlb_m,
            dub_m,
            out_of_corridor,
            mu_segment_idx,
            mu,
            ctrl_mode: decision.ctrl_mode.into(),
            obs_alpha: obstacle_marker.as_ref().map(|m| m.color.a),
        };

        Ok((
            OutputData {
                ctrl_mode: decision.ctrl_mode,
                obstacles,
                obstacle_marker,
                status_text,
            },
            report,
        ))
    }
}

impl OutputData {
    /// Split the outputs into the messages to publish, control mode first.
    pub fn to_msgs(&self) -> Vec<OutputMsg> {
        let mut msgs = vec![OutputMsg::CtrlMode(self.ctrl_mode)];

        if let Some(ref obs) = self.obstacles {
            msgs.push(OutputMsg::Obstacles(obs.clone()));
        }
        if let Some(ref marker) = self.obstacle_marker {
            msgs.push(OutputMsg::ObstacleMarker(marker.clone()));
        }
        msgs.push(OutputMsg::StatusText(self.status_text.clone()));

        msgs
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::track::test::straight_path;

    pub(crate) fn params(scenario_id: i64) -> ExpMgrParams {
        ExpMgrParams {
            t_activate_s: 0.055,
            cycle_period_s: 0.01,
            track_wait_timeout_s: None,
            scenario_id,
            traction_adaptive: true,
            speed_threshold_ms: 5.0,
            s_ego_at_popup_m: 20.0,
            s_obs_at_popup_m: 25.0,
            d_obs_at_popup_m: 0.5,
            obs_radius_m: 0.5,
            obs_wiggle_room_m: 1.0,
            track_name: "straight".into(),
            s_begin_mu_segments_m: vec![0.0, 10.0, 20.0],
            mu_segment_values: vec![0.9, 0.5, 0.8],
            corridor_slack_m: 1.0,
            robot_name: "test".into(),
            vehicle_width_m: 1.0,
        }
    }

    pub(crate) fn ego(s: f64, d: f64, vx: f64) -> EgoState {
        EgoState { s, d, vx }
    }

    /// Build a manager with the straight track set and step it until it is active.
    fn active_mgr(scenario_id: i64) -> ExpMgr {
        let mut mgr = ExpMgr::new(params(scenario_id)).unwrap();
        mgr.set_track_path(straight_path()).unwrap();

        while !mgr.is_active() {
            mgr.proc(&InputData::default()).unwrap();
        }

        mgr
    }

    fn step(mgr: &mut ExpMgr, ego_state: EgoState) -> (OutputData, StatusReport) {
        let (out, report) = mgr
            .proc(&InputData {
                ego_state,
                ..Default::default()
            })
            .unwrap();

        (out.expect("Expected an active cycle"), report)
    }

    #[test]
    fn test_no_output_before_activation() {
        let mut mgr = ExpMgr::new(params(1)).unwrap();
        mgr.set_track_path(straight_path()).unwrap();

        // t_activate is 0.055 s with 0.01 s cycles, so cycles 0 to 5 are silent
        for i in 0..6 {
            let (out, report) = mgr
                .proc(&InputData {
                    ego_state: ego(25.0, 0.0, 6.0),
                    ..Default::default()
                })
                .unwrap();

            assert!(out.is_none(), "Output produced on cycle {}", i);
            assert!(!report.active);
        }

        let (out, report) = mgr.proc(&InputData::default()).unwrap();
        assert!(out.is_some());
        assert!(report.active);
        assert!((report.exp_time_s - 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_no_track_path() {
        let mut mgr = ExpMgr::new(params(3)).unwrap();
        assert!(matches!(mgr.proc(&InputData::default()), Err(ExpMgrError::NoTrackPath)));

        // The path can also arrive through the input data
        let input = InputData {
            new_track_path: Some(straight_path()),
            ..Default::default()
        };
        assert!(mgr.proc(&input).is_ok());
    }

    #[test]
    fn test_pop_up_obstacle() {
        let mut mgr = active_mgr(1);

        let (out, report) = step(&mut mgr, ego(10.0, 0.0, 3.0));
        assert_eq!(out.ctrl_mode, CtrlMode::Cruise);
        assert_eq!(out.obstacle_marker.as_ref().unwrap().color.a, 0.3);
        assert_eq!(report.obs_alpha, Some(0.3));

        // Published before detection
        let obs = out.obstacles.unwrap();
        assert_eq!(obs.s, vec![25.0]);
        assert_eq!(obs.r_mgn, vec![0.25 + 0.5 + 1.0]);

        let (out, _) = step(&mut mgr, ego(25.0, 0.0, 6.0));
        assert_eq!(out.ctrl_mode, CtrlMode::Tracking);
        assert_eq!(out.obstacle_marker.as_ref().unwrap().color.a, 1.0);
        assert!(out.obstacles.is_some());

        let msgs = out.to_msgs();
        assert_eq!(msgs.len(), 4);
        assert!(matches!(msgs[0], OutputMsg::CtrlMode(CtrlMode::Tracking)));
    }

    #[test]
    fn test_no_obstacle_outside_pop_up() {
        for id in [2, 3].iter() {
            let mut mgr = active_mgr(*id);
            let (out, report) = step(&mut mgr, ego(25.0, 0.0, 6.0));

            assert!(out.obstacles.is_none());
            assert!(out.obstacle_marker.is_none());
            assert_eq!(report.obs_alpha, None);
            assert_eq!(out.to_msgs().len(), 2);
        }
    }

    #[test]
    fn test_corridor_override() {
        for id in [1, 2, 3, 4].iter() {
            let mut mgr = active_mgr(*id);

            // Corridor is [-2, 2] at s = 5, with 1 m slack
            let (out, _) = step(&mut mgr, ego(5.0, 2.9, 8.0));
            assert_ne!(out.ctrl_mode, CtrlMode::Stop);

            let (out, report) = step(&mut mgr, ego(5.0, 3.1, 8.0));
            assert_eq!(out.ctrl_mode, CtrlMode::Stop);
            assert!(report.out_of_corridor);

            let (out, _) = step(&mut mgr, ego(5.0, -3.1, 8.0));
            assert_eq!(out.ctrl_mode, CtrlMode::Stop);

            // Back inside, the scenario decides again
            let (out, _) = step(&mut mgr, ego(5.0, 0.0, 8.0));
            assert_eq!(out.ctrl_mode, CtrlMode::Tracking);
        }
    }

    #[test]
    fn test_corridor_uses_unwrapped_s() {
        // Lap length is 60 m, at s = 75 the path end bounds [-1, 1] apply rather than the bounds at
        // the wrapped s = 15
        let mut mgr = active_mgr(3);

        let (out, report) = step(&mut mgr, ego(75.0, 2.5, 8.0));
        assert_eq!((report.dlb_m, report.dub_m), (-1.0, 1.0));
        assert_eq!(out.ctrl_mode, CtrlMode::Stop);
    }

    #[test]
    fn test_status_text_and_friction() {
        let mut mgr = active_mgr(3);

        // Lap length is 60 m, 70 m wraps to 10 m which starts the second segment
        let (out, report) = step(&mut mgr, ego(70.0, 0.0, 4.0));
        assert_eq!(report.mu_segment_idx, 1);
        assert_eq!(report.mu, 0.5);
        assert_eq!(
            out.status_text.text,
            "traction_adapt: on\ns: 70.000\nvx: 4.000\nmu: 0.500"
        );
    }

    #[test]
    fn test_obstacle_fixed_by_first_path() {
        let mut mgr = ExpMgr::new(params(1)).unwrap();
        mgr.set_track_path(straight_path()).unwrap();
        let first = mgr.obstacle().unwrap().position_m_map;

        // Shift the whole track, the obstacle must stay where it was
        let mut shifted = straight_path();
        shifted.y = vec![10.0; 4];
        mgr.set_track_path(shifted).unwrap();

        assert_eq!(mgr.obstacle().unwrap().position_m_map, first);
    }

    #[test]
    fn test_invalid_params() {
        let mut p = params(1);
        p.mu_segment_values.clear();
        assert!(matches!(ExpMgr::new(p), Err(ExpMgrError::FrictionTable(_))));

        let mut p = params(1);
        p.cycle_period_s = 0.0;
        assert!(matches!(ExpMgr::new(p), Err(ExpMgrError::InvalidParam(_))));

        let mut mgr = ExpMgr::new(params(1)).unwrap();
        let mut path = straight_path();
        path.s.reverse();
        assert!(matches!(mgr.set_track_path(path), Err(ExpMgrError::Track(_))));
    }

    #[test]
    fn test_planner_status_kept() {
        let mut mgr = active_mgr(3);
        assert!(mgr.planner_status().is_none());

        let status = PlannerStatus {
            status: "optimal".into(),
            traj_cost: Some(12.0),
        };
        mgr.proc(&InputData {
            planner_status: Some(status.clone()),
            ..Default::default()
        })
        .unwrap();
        mgr.proc(&InputData::default()).unwrap();

        assert_eq!(mgr.planner_status(), Some(&status));
    }

    #[test]
    fn test_bad_track_path_keeps_cycle() {
        let mut mgr = active_mgr(3);
        let exp_time_s = mgr.exp_time_s();

        let mut bad_path = straight_path();
        bad_path.s.reverse();
        let status = PlannerStatus {
            status: "optimal".into(),
            traj_cost: None,
        };

        // Out of the corridor in the same cycle as the rejected path
        let (out, report) = mgr
            .proc(&InputData {
                new_track_path: Some(bad_path),
                ego_state: ego(5.0, 9.0, 8.0),
                planner_status: Some(status.clone()),
            })
            .unwrap();

        let out = out.expect("Expected an active cycle");
        assert_eq!(out.ctrl_mode, CtrlMode::Stop);
        assert!(report.out_of_corridor);
        assert!(mgr.exp_time_s() > exp_time_s);
        assert_eq!(mgr.planner_status(), Some(&status));

        // The previous path is still in use
        let (out, report) = step(&mut mgr, ego(5.0, 0.0, 8.0));
        assert_eq!((report.dlb_m, report.dub_m), (-2.0, 2.0));
        assert_eq!(out.ctrl_mode, CtrlMode::Tracking);
    }
}
