//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the experiment manager software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Message definitions exchanged with the rest of the test harness
pub mod msg;

/// Network module
pub mod net;
