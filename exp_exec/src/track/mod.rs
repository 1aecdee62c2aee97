//! # Arc-length track model
//!
//! Wraps a validated [`TrackPath`] and answers questions about the track as a function of the
//! arc-length position `s`: the length of one lap, the lateral corridor bounds, and the map frame
//! position of a Frenet `(s, d)` coordinate.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::msg::TrackPath;
use nalgebra::Vector2;
use util::maths;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A validated track path with its derived lap length.
#[derive(Debug, Clone)]
pub struct TrackModel {
    path: TrackPath,

    /// Centreline heading with the +/-pi jumps removed, so it can be interpolated linearly.
    psi_c_unwrapped: Vec<f64>,

    lap_length_m: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Invalid track data: {0}")]
    InvalidTrackData(&'static str),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TrackModel {
    /// Build a new model from the given path.
    ///
    /// The path must contain at least one sample, all its fields must have the same length, and
    /// `s` must be strictly increasing.
    pub fn new(path: TrackPath) -> Result<Self, TrackError> {
        let num_samples = path
            .num_samples()
            .ok_or(TrackError::InvalidTrackData("path fields have different lengths"))?;

        if num_samples == 0 {
            return Err(TrackError::InvalidTrackData("path contains no samples"));
        }

        if path.s.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(TrackError::InvalidTrackData("s is not strictly increasing"));
        }

        // The lap closes with a straight line from the last sample back to the first
        let last = num_samples - 1;
        let closing_gap_m = (Vector2::new(path.x[0], path.y[0])
            - Vector2::new(path.x[last], path.y[last]))
        .norm();
        let lap_length_m = path.s[last] + closing_gap_m;

        let mut psi_c_unwrapped = Vec::with_capacity(num_samples);
        psi_c_unwrapped.push(path.psi_c[0]);
        for w in path.psi_c.windows(2) {
            let prev = psi_c_unwrapped[psi_c_unwrapped.len() - 1];
            psi_c_unwrapped.push(prev + maths::wrap_to_pi(w[1] - w[0]));
        }

        Ok(Self {
            path,
            psi_c_unwrapped,
            lap_length_m,
        })
    }

    /// Length of one lap of the track.
    ///
    /// Units: meters
    pub fn lap_length(&self) -> f64 {
        self.lap_length_m
    }

    /// Lower and upper corridor bounds `(dlb, dub)` at the given arc-length.
    ///
    /// `s_m` is used as given, it is not wrapped into one lap. Positions outside the path take the
    /// bounds of the nearest end sample.
    pub fn corridor_bounds(&self, s_m: f64) -> (f64, f64) {
        (
            self.interp(s_m, &self.path.dlb),
            self.interp(s_m, &self.path.dub),
        )
    }

    /// Convert a Frenet `(s, d)` coordinate into a position in the map frame.
    ///
    /// The centreline point at `s_m` is offset by `d_m` along the left hand normal of the
    /// centreline heading.
    pub fn frenet_to_cartesian(&self, s_m: f64, d_m: f64) -> Vector2<f64> {
        let centre = Vector2::new(
            self.interp(s_m, &self.path.x),
            self.interp(s_m, &self.path.y),
        );
        let psi_c = self.interp(s_m, &self.psi_c_unwrapped);

        centre + d_m * Vector2::new(-psi_c.sin(), psi_c.cos())
    }

    /// The underlying path.
    pub fn path(&self) -> &TrackPath {
        &self.path
    }

    fn interp(&self, s_m: f64, field: &[f64]) -> f64 {
        // Lengths are checked in new() so this can't fail
        maths::interp(s_m, &self.path.s, field).unwrap_or(std::f64::NAN)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use std::f64::consts::PI;

    /// A straight track along the x axis with 10 m samples, 4 m wide corridor narrowing to 2 m at
    /// the end.
    pub(crate) fn straight_path() -> TrackPath {
        TrackPath {
            s: vec![0.0, 10.0, 20.0, 30.0],
            x: vec![0.0, 10.0, 20.0, 30.0],
            y: vec![0.0; 4],
            psi_c: vec![0.0; 4],
            dlb: vec![-2.0, -2.0, -1.0, -1.0],
            dub: vec![2.0, 2.0, 1.0, 1.0],
        }
    }

    /// A circular track of the given radius, centred on the origin, driven anticlockwise.
    pub(crate) fn circle_path(radius_m: f64, num_samples: usize) -> TrackPath {
        let mut path = TrackPath::default();

        for i in 0..num_samples {
            let theta = 2.0 * PI * (i as f64) / (num_samples as f64);
            path.s.push(radius_m * theta);
            path.x.push(radius_m * theta.cos());
            path.y.push(radius_m * theta.sin());
            path.psi_c.push(maths::wrap_to_pi(theta + PI / 2.0));
            path.dlb.push(-3.0);
            path.dub.push(3.0);
        }

        path
    }

    #[test]
    fn test_lap_length() {
        // Closing the straight back to the origin adds another 30 m
        let track = TrackModel::new(straight_path()).unwrap();
        assert!((track.lap_length() - 60.0).abs() < 1e-9);

        // A circle's closing chord is short, the lap is close to the circumference
        let track = TrackModel::new(circle_path(50.0, 360)).unwrap();
        assert!((track.lap_length() - 2.0 * PI * 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_corridor_bounds() {
        let track = TrackModel::new(straight_path()).unwrap();

        assert_eq!(track.corridor_bounds(5.0), (-2.0, 2.0));
        assert_eq!(track.corridor_bounds(15.0), (-1.5, 1.5));

        // Outside the sample range the end values are used
        assert_eq!(track.corridor_bounds(-4.0), (-2.0, 2.0));
        assert_eq!(track.corridor_bounds(75.0), (-1.0, 1.0));
    }

    #[test]
    fn test_frenet_to_cartesian() {
        let track = TrackModel::new(straight_path()).unwrap();
        let p = track.frenet_to_cartesian(12.0, 1.5);
        assert!((p - Vector2::new(12.0, 1.5)).norm() < 1e-9);

        // On the circle a positive d points towards the centre
        let track = TrackModel::new(circle_path(50.0, 360)).unwrap();
        let quarter_s = 50.0 * PI / 2.0;
        let p = track.frenet_to_cartesian(quarter_s, 2.0);
        assert!((p - Vector2::new(0.0, 48.0)).norm() < 1e-2);

        // Heading wraps from +pi to -pi just before the quarter lap, interpolation must not swing
        // through zero
        let wrap_s = quarter_s - 0.3;
        let p = track.frenet_to_cartesian(wrap_s, 0.0);
        assert!((p.norm() - 50.0).abs() < 1e-2);
        let p = track.frenet_to_cartesian(wrap_s, 1.0);
        assert!((p.norm() - 49.0).abs() < 1e-2);
    }

    #[test]
    fn test_invalid_track_data() {
        assert!(matches!(
            TrackModel::new(TrackPath::default()),
            Err(TrackError::InvalidTrackData(_))
        ));

        let mut path = straight_path();
        path.s[2] = 10.0;
        assert!(matches!(TrackModel::new(path), Err(TrackError::InvalidTrackData(_))));

        let mut path = straight_path();
        path.psi_c.pop();
        assert!(matches!(TrackModel::new(path), Err(TrackError::InvalidTrackData(_))));
    }
}
