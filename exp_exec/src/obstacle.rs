//! # Pop-up obstacle
//!
//! The obstacle's geometry is fixed at startup, from the parameters and the first track path
//! received. Only its visibility changes afterwards.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use comms_if::msg::{Marker, MarkerKind, Obstacles, Rgba};
use nalgebra::Vector2;

use crate::track::TrackModel;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Height of the cylinder used to draw the obstacle.
///
/// Units: meters
const OBS_MARKER_HEIGHT_M: f64 = 1.75;

/// Frame the obstacle marker is expressed in.
const OBS_MARKER_FRAME: &str = "map";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single pop-up obstacle.
#[derive(Debug, Clone)]
pub struct ObstacleSpec {
    /// Arc-length position, units: meters
    pub s_m: f64,

    /// Lateral offset, units: meters
    pub d_m: f64,

    /// Physical radius, units: meters
    pub radius_m: f64,

    /// Radius including the vehicle's half width and the wiggle room, units: meters
    pub margin_m: f64,

    /// Position in the map frame, units: meters
    pub position_m_map: Vector2<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ObstacleSpec {
    /// Build the obstacle, using the track to find its position in the map frame.
    pub fn new(
        s_m: f64,
        d_m: f64,
        radius_m: f64,
        vehicle_width_m: f64,
        wiggle_room_m: f64,
        track: &TrackModel,
    ) -> Self {
        Self {
            s_m,
            d_m,
            radius_m,
            margin_m: 0.5 * radius_m + 0.5 * vehicle_width_m + wiggle_room_m,
            position_m_map: track.frenet_to_cartesian(s_m, d_m),
        }
    }

    /// The obstacle set message containing only this obstacle.
    pub fn to_obstacles(&self) -> Obstacles {
        Obstacles {
            s: vec![self.s_m],
            d: vec![self.d_m],
            r: vec![self.radius_m],
            r_mgn: vec![self.margin_m],
        }
    }

    /// A red cylinder marker standing on the ground at the obstacle's position.
    pub fn marker(&self, alpha: f64, stamp: DateTime<Utc>) -> Marker {
        Marker {
            stamp,
            frame_id: OBS_MARKER_FRAME.into(),
            kind: MarkerKind::Cylinder,
            position_m: [
                self.position_m_map.x,
                self.position_m_map.y,
                OBS_MARKER_HEIGHT_M / 2.0,
            ],
            scale_m: [self.radius_m, self.radius_m, OBS_MARKER_HEIGHT_M],
            color: Rgba::new(1.0, 0.0, 0.0, alpha),
            text: String::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::test::straight_path;

    #[test]
    fn test_obstacle_spec() {
        let track = TrackModel::new(straight_path()).unwrap();
        let obs = ObstacleSpec::new(15.0, -0.5, 0.5, 1.2, 1.0, &track);

        assert!((obs.margin_m - (0.25 + 0.6 + 1.0)).abs() < 1e-12);
        assert!((obs.position_m_map - Vector2::new(15.0, -0.5)).norm() < 1e-9);

        let msg = obs.to_obstacles();
        assert_eq!(msg.r_mgn.len(), 1);
        assert_eq!(msg.s, vec![15.0]);
        assert_eq!(msg.d, vec![-0.5]);
        assert_eq!(msg.r, vec![0.5]);

        let m = obs.marker(0.3, Utc::now());
        assert_eq!(m.kind, MarkerKind::Cylinder);
        assert_eq!(m.color.a, 0.3);
        assert_eq!(m.position_m[2], 0.875);
        assert_eq!(m.scale_m, [0.5, 0.5, 1.75]);
    }
}
