//! # Output Server
//!
//! Publishes the experiment manager's outputs, one JSON encoded [`OutputMsg`] per message.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    msg::OutputMsg,
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

use crate::exp_mgr::OutputData;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Output server
pub struct OutServer {
    socket: MonitoredSocket
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum OutServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send output: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the output: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OutServer {
    /// Create a new instance of the output server.
    ///
    /// This function will not block until a subscriber connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, OutServerError> {
        let socket_options = SocketOptions {
            bind: true,
            connect_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(
            ctx,
            zmq::PUB,
            socket_options,
            &params.output_endpoint
        ).map_err(OutServerError::SocketError)?;

        Ok(Self {
            socket
        })
    }

    /// Publish every output of one cycle.
    pub fn send(&mut self, output: &OutputData) -> Result<(), OutServerError> {
        for msg in output.to_msgs() {
            self.send_msg(&msg)?;
        }

        Ok(())
    }

    pub fn send_msg(&mut self, msg: &OutputMsg) -> Result<(), OutServerError> {
        let msg_string = msg.to_json()
            .map_err(OutServerError::SerializationError)?;

        self.socket.send(&msg_string, 0)
            .map_err(OutServerError::SendError)
    }
}
