//! # Messages
//!
//! Every message crossing a socket is wrapped in either [`InputMsg`] (sent to the experiment
//! manager) or [`OutputMsg`] (published by it), and encoded as JSON.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod ctrl_mode;
mod marker;
mod obs;
mod path;
mod state;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use ctrl_mode::*;
pub use marker::*;
pub use obs::*;
pub use path::*;
pub use state::*;

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Snapshots received from the external collaborators (path server, estimator, planner).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InputMsg {
    TrackPath(TrackPath),
    EgoState(EgoState),
    PlannerStatus(PlannerStatus),
}

/// Outputs published once per cycle after activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputMsg {
    CtrlMode(CtrlMode),
    Obstacles(Obstacles),
    ObstacleMarker(Marker),
    StatusText(Marker),
}

#[derive(Debug, thiserror::Error)]
pub enum MsgParseError {
    #[error("Could not parse the message JSON: {0}")]
    JsonError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl InputMsg {
    pub fn from_json(json: &str) -> Result<Self, MsgParseError> {
        serde_json::from_str(json).map_err(MsgParseError::JsonError)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl OutputMsg {
    pub fn from_json(json: &str) -> Result<Self, MsgParseError> {
        serde_json::from_str(json).map_err(MsgParseError::JsonError)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_input_msg_parse() {
        let msg = InputMsg::from_json(r#"{"EgoState":{"s":12.5,"d":-0.25,"vx":4.0}}"#).unwrap();

        match msg {
            InputMsg::EgoState(s) => assert_eq!(s, EgoState { s: 12.5, d: -0.25, vx: 4.0 }),
            m => panic!("Expected an EgoState, got {:?}", m),
        }

        assert!(InputMsg::from_json(r#"{"Odometry":{}}"#).is_err());
    }

    #[test]
    fn test_track_path_num_samples() {
        let mut path = TrackPath {
            s: vec![0.0, 1.0],
            x: vec![0.0, 1.0],
            y: vec![0.0, 0.0],
            psi_c: vec![0.0, 0.0],
            dlb: vec![-2.0, -2.0],
            dub: vec![2.0, 2.0],
        };
        assert_eq!(path.num_samples(), Some(2));

        path.dub.pop();
        assert_eq!(path.num_samples(), None);
    }
}
