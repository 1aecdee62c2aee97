//! # Experiment manager library.
//!
//! This library allows other crates in the workspace, and the benchmarks, to access items defined
//! inside the experiment manager crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Bring-up barrier - waits for the first track path before the experiment starts
pub mod bringup;

/// Corridor safety monitor - checks the vehicle is still on the drivable track
pub mod corridor;

/// Global data store for the executable
pub mod data_store;

/// Experiment manager - supervises the scenario and produces the per-cycle outputs
pub mod exp_mgr;

/// Friction segment locator - finds which friction segment the vehicle is on
pub mod friction;

/// Pop-up obstacle geometry and marker
pub mod obstacle;

/// Output server - publishes the experiment manager's outputs
pub mod out_server;

/// Scenario policies - decide the control mode and obstacle visibility
pub mod scenario;

/// State client - recieves the track path, vehicle state and planner status
pub mod state_client;

/// Track model - arc-length geometry of the track
pub mod track;
