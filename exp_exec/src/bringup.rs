//! # Bring-up barrier
//!
//! Nothing in the experiment can be computed without a track, so at startup the executable polls
//! its inputs until the first track path arrives.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{thread, time::{Duration, Instant}};
use log::info;

use comms_if::msg::TrackPath;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BringupError {
    #[error("No track path was received within {0} s")]
    TrackPathTimeout(f64),
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Block until `poll` returns a track path.
///
/// `poll` is called once every `period`. If `timeout_s` is `None` this waits forever, otherwise a
/// [`BringupError::TrackPathTimeout`] is returned once `timeout_s` seconds have passed without a
/// path.
pub fn wait_for_track_path<F>(
    mut poll: F,
    period: Duration,
    timeout_s: Option<f64>,
) -> Result<TrackPath, BringupError>
where
    F: FnMut() -> Option<TrackPath>,
{
    let start = Instant::now();
    let mut last_log: Option<Instant> = None;

    loop {
        if let Some(path) = poll() {
            info!(
                "Track path received after {:.02} s",
                start.elapsed().as_secs_f64()
            );
            return Ok(path);
        }

        if let Some(t) = timeout_s {
            if start.elapsed().as_secs_f64() >= t {
                return Err(BringupError::TrackPathTimeout(t));
            }
        }

        if last_log.map_or(true, |l| l.elapsed() >= Duration::from_secs(1)) {
            info!("Waiting for track path");
            last_log = Some(Instant::now());
        }

        thread::sleep(period);
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
