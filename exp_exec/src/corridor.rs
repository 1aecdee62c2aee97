//! # Corridor safety monitor

/// Default slack allowed outside the corridor bounds before the vehicle is considered off track.
///
/// Units: meters
pub const DEFAULT_CORRIDOR_SLACK_M: f64 = 1.0;

/// Returns `true` if the lateral offset `d_m` is further than `slack_m` outside the corridor
/// `[dlb_m, dub_m]`.
pub fn is_out_of_corridor(d_m: f64, dlb_m: f64, dub_m: f64, slack_m: f64) -> bool {
    d_m < dlb_m - slack_m || d_m > dub_m + slack_m
}
