//! Main experiment manager executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the experiment manager and the network
//!     - Wait for the first track path
//!     - Main loop:
//!         - Drain the input socket into the latest-value cells
//!         - Experiment manager processing
//!         - Publish the outputs
//!         - Write archives
//!
//! # Modules
//!
//! All modules (e.g. `exp_mgr`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use comms_if::net::NetParams;
use exp_lib::{
    bringup,
    data_store::DataStore,
    exp_mgr::ExpMgr,
    out_server::OutServer,
    state_client::StateClient,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{error, info, trace, warn};
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::WrapErr};

// Internal
use util::{
    archive::Archived,
    module::State,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of consecutive cycle overruns after which an error is logged every second.
const MAX_CONSEC_CYCLE_OVERRUNS: u64 = 100;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new(
        "exp_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Experiment Manager Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let net_params: NetParams = util::params::load(
        "net.toml"
    ).wrap_err("Could not load net params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    let mut exp_mgr = ExpMgr::init("exp_mgr.toml", &session)
        .wrap_err("Failed to initialise ExpMgr")?;
    info!("ExpMgr init complete");

    let cycle_period_s = exp_mgr.params().cycle_period_s;
    let cycle_frequency_hz = 1.0 / cycle_period_s;

    info!("Module initialisation complete\n");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let mut state_client = {
        let c = StateClient::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise StateClient")?;
        info!("StateClient initialised");
        c
    };

    let mut out_server = {
        let s = OutServer::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise OutServer")?;
        info!("OutServer initialised");
        s
    };

    info!("Network initialisation complete\n");

    // ---- BRING-UP ----

    let track_path = bringup::wait_for_track_path(
        || {
            if let Err(e) = state_client.poll() {
                warn!("StateClient error: {}", e);
            }
            state_client.cells_mut().take_new_track_path()
        },
        Duration::from_secs_f64(cycle_period_s),
        exp_mgr.params().track_wait_timeout_s
    ).wrap_err("Bring-up failed")?;

    exp_mgr.set_track_path(track_path)
        .wrap_err("The first track path is invalid")?;

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(cycle_frequency_hz);

        // ---- DATA INPUT ----

        match state_client.poll() {
            Ok(n) => trace!("{} input messages recieved", n),
            Err(e) => warn!("StateClient error: {}", e)
        }

        if ds.is_1_hz_cycle && !state_client.is_connected() {
            warn!("StateClient is not connected to the input publisher");
        }

        {
            let cells = state_client.cells_mut();
            ds.exp_mgr_input.new_track_path = cells.take_new_track_path();
            ds.exp_mgr_input.ego_state = cells.ego_state();
            ds.exp_mgr_input.planner_status = cells.take_planner_status();
        }

        // ---- EXPERIMENT PROCESSING ----

        match exp_mgr.proc(&ds.exp_mgr_input) {
            Ok((o, r)) => {
                ds.exp_mgr_output = o;
                ds.exp_mgr_status_rpt = r;
            },
            Err(e) => return Err(e).wrap_err("Error during ExpMgr processing")
        };

        // ---- OUTPUT ----

        if let Some(ref output) = ds.exp_mgr_output {
            match out_server.send(output) {
                Ok(_) => (),
                Err(e) => warn!("OutServer error: {}", e)
            };
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = exp_mgr.write() {
            warn!("Could not write the ExpMgr archive: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(cycle_period_s)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period_s
                );
                ds.num_consec_cycle_overruns += 1;

                if ds.is_1_hz_cycle && ds.num_consec_cycle_overruns > MAX_CONSEC_CYCLE_OVERRUNS {
                    error!(
                        "{} consecutive cycle overruns, experiment time is running slow",
                        ds.num_consec_cycle_overruns
                    );
                }
            }
        }

        ds.cycle_end();
    }
}
