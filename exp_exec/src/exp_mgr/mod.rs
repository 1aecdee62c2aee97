//! # Experiment manager module
//!
//! The experiment manager ([`ExpMgr`]) supervises one scripted scenario run on the test harness.
//! Every cycle it:
//!
//! 1. Finds the friction segment the vehicle is on,
//! 2. Checks the vehicle is still inside the drivable corridor,
//! 3. Asks the scenario policy for the control mode and obstacle visibility, with the corridor
//!    override applied last,
//! 4. Produces the control mode, obstacle and status text outputs.
//!
//! Nothing is produced until the activation time has elapsed. The experiment time is counted in
//! cycles, not wall-clock time, so a run is fully determined by its inputs.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;
mod state;
pub mod tm;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use params::ExpMgrParams;
pub use state::*;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the experiment manager.
#[derive(Debug, thiserror::Error)]
pub enum ExpMgrError {
    #[error("Failed to load ExpMgrParams: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid parameter: {0}")]
    InvalidParam(&'static str),

    #[error("Invalid friction segment table: {0}")]
    FrictionTable(crate::friction::FrictionTableError),

    #[error("Invalid track path: {0}")]
    Track(crate::track::TrackError),

    #[error("Could not open the archive: {0}")]
    ArchiveError(util::archive::ArchiveError),

    #[error("No track path has been received yet")]
    NoTrackPath,
}
