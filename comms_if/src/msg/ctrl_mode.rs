//! # Control mode message

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Operating regime of the downstream motion controller.
///
/// Sent over the wire as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum CtrlMode {
    /// Bring the vehicle to a standstill
    Stop = 0,

    /// Speed-hold cruise control
    Cruise = 1,

    /// Full trajectory tracking
    Tracking = 2,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid control mode value {0}, expected 0, 1 or 2")]
pub struct InvalidCtrlMode(pub i16);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for CtrlMode {
    fn default() -> Self {
        CtrlMode::Stop
    }
}

impl From<CtrlMode> for i16 {
    fn from(mode: CtrlMode) -> Self {
        mode as i16
    }
}

impl TryFrom<i16> for CtrlMode {
    type Error = InvalidCtrlMode;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CtrlMode::Stop),
            1 => Ok(CtrlMode::Cruise),
            2 => Ok(CtrlMode::Tracking),
            v => Err(InvalidCtrlMode(v)),
        }
    }
}
