//! # State Client
//!
//! The StateClient subscribes to the snapshots published by the external collaborators:
//!
//! - Track path, from the path server - `track_path`.
//! - Vehicle state estimate - `ego_state`.
//! - Planner status - `planner_status`.
//!
//! Each is a latest-value cell: a newer message simply replaces the older one. The socket is
//! drained without blocking once per cycle from the main loop, so no locking is needed.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, warn};

use comms_if::{
    msg::{EgoState, InputMsg, MsgParseError, PlannerStatus, TrackPath},
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct StateClient {
    socket: MonitoredSocket,
    cells: InputCells,
}

/// Latest value of each input.
#[derive(Debug, Default)]
pub struct InputCells {
    track_path: Option<TrackPath>,

    /// Set when a track path arrives, cleared when it's taken.
    track_path_is_new: bool,

    ego_state: Option<EgoState>,

    /// Cleared when taken, so each status is only forwarded once.
    planner_status: Option<PlannerStatus>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StateClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not recieve a message: {0}")]
    RecvError(zmq::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl StateClient {
    /// Create a new instance of the StateClient.
    ///
    /// This function will not block until the publisher connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, StateClientError> {
        let socket_options = SocketOptions {
            connect_timeout: 1000,
            linger: 1,
            recv_timeout: 0,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(
            ctx,
            zmq::SUB,
            socket_options,
            &params.input_endpoint
        ).map_err(StateClientError::SocketError)?;

        Ok(Self {
            socket,
            cells: InputCells::default(),
        })
    }

    /// Check if the client is connected to the publisher
    pub fn is_connected(&self) -> bool {
        self.socket.connected()
    }

    /// Recieve every pending message, updating the latest-value cells.
    ///
    /// Returns the number of messages recieved. Messages which can't be parsed are logged and
    /// dropped.
    pub fn poll(&mut self) -> Result<usize, StateClientError> {
        let mut num_msgs = 0;

        loop {
            let msg_str = match self.socket.recv_string(zmq::DONTWAIT) {
                Ok(Ok(s)) => s,
                Ok(Err(_)) => {
                    warn!("StateClient recieved a non UTF-8 message");
                    continue
                },
                // Nothing left to read
                Err(zmq::Error::EAGAIN) => break,
                Err(e) => return Err(StateClientError::RecvError(e))
            };

            num_msgs += 1;

            if let Err(e) = self.cells.handle_json(&msg_str) {
                warn!("Could not parse input message: {}", e);
            }
        }

        Ok(num_msgs)
    }

    pub fn cells_mut(&mut self) -> &mut InputCells {
        &mut self.cells
    }
}

impl InputCells {
    /// Parse a JSON encoded [`InputMsg`] and store it.
    pub fn handle_json(&mut self, json: &str) -> Result<(), MsgParseError> {
        let msg = InputMsg::from_json(json)?;
        self.handle(msg);
        Ok(())
    }

    /// Store the message in its cell, replacing the previous value.
    pub fn handle(&mut self, msg: InputMsg) {
        match msg {
            InputMsg::TrackPath(p) => {
                debug!("Track path recieved with {} samples", p.s.len());
                self.track_path = Some(p);
                self.track_path_is_new = true;
            },
            InputMsg::EgoState(s) => self.ego_state = Some(s),
            InputMsg::PlannerStatus(s) => self.planner_status = Some(s),
        }
    }

    /// Take the track path if one has arrived since the last call.
    pub fn take_new_track_path(&mut self) -> Option<TrackPath> {
        if self.track_path_is_new {
            self.track_path_is_new = false;
            self.track_path.clone()
        }
        else {
            None
        }
    }

    /// The latest vehicle state, or the default (at rest at the origin) if none has arrived yet.
    pub fn ego_state(&self) -> EgoState {
        self.ego_state.unwrap_or_default()
    }

    pub fn take_planner_status(&mut self) -> Option<PlannerStatus> {
        self.planner_status.take()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::test::straight_path;

    #[test]
    fn test_latest_value_cells() {
        let mut cells = InputCells::default();
        assert_eq!(cells.ego_state(), EgoState::default());

        cells.handle_json(r#"{"EgoState":{"s":1.0,"d":0.0,"vx":2.0}}"#).unwrap();
        cells.handle_json(r#"{"EgoState":{"s":3.0,"d":0.5,"vx":4.0}}"#).unwrap();
        assert_eq!(cells.ego_state(), EgoState { s: 3.0, d: 0.5, vx: 4.0 });

        // Bad messages leave the cells alone
        assert!(cells.handle_json("not json").is_err());
        assert_eq!(cells.ego_state().s, 3.0);
    }

    #[test]
    fn test_track_path_taken_once() {
        let mut cells = InputCells::default();
        assert!(cells.take_new_track_path().is_none());

        cells.handle(InputMsg::TrackPath(straight_path()));
        assert_eq!(cells.take_new_track_path(), Some(straight_path()));
        assert!(cells.take_new_track_path().is_none());

        // A repeated path counts as new again
        cells.handle(InputMsg::TrackPath(straight_path()));
        assert!(cells.take_new_track_path().is_some());
    }

    #[test]
    fn test_planner_status_taken_once() {
        let mut cells = InputCells::default();
        cells.handle(InputMsg::PlannerStatus(PlannerStatus {
            status: "ok".into(),
            traj_cost: None,
        }));

        assert!(cells.take_planner_status().is_some());
        assert!(cells.take_planner_status().is_none());
    }
}
