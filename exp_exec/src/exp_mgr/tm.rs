//! # Status text telemetry

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use comms_if::msg::{Marker, MarkerKind, Rgba};

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// The text floats above and to the side of the vehicle.
const TEXT_MARKER_POSITION_M: [f64; 3] = [0.0, 7.5, 5.0];

const TEXT_MARKER_FRAME: &str = "base_link";

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Format the human readable status shown next to the vehicle.
pub fn status_text(traction_adaptive: bool, s_m: f64, vx_ms: f64, mu: f64) -> String {
    let traction_adaptive_str = match traction_adaptive {
        true => "on",
        false => "off",
    };

    format!(
        "traction_adapt: {}\ns: {:.3}\nvx: {:.3}\nmu: {:.3}",
        traction_adaptive_str, s_m, vx_ms, mu
    )
}

/// Wrap the status text into a marker attached to the vehicle.
pub fn status_text_marker(text: String, stamp: DateTime<Utc>) -> Marker {
    Marker {
        stamp,
        frame_id: TEXT_MARKER_FRAME.into(),
        kind: MarkerKind::TextViewFacing,
        position_m: TEXT_MARKER_POSITION_M,
        scale_m: [1.0, 1.0, 1.0],
        color: Rgba::new(0.0, 0.0, 0.0, 1.0),
        text,
    }
}
