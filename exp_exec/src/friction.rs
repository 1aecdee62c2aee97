//! # Friction segment locator
//!
//! The track is split into consecutive arc-length segments, each with a single road friction
//! coefficient. This module finds which segment the vehicle is currently on.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use util::maths;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Table of friction segments for one lap of the track.
#[derive(Debug, Clone)]
pub struct FrictionSegmentTable {
    /// Arc-length at which each segment begins, starting at zero.
    ///
    /// Units: meters
    s_begin_m: Vec<f64>,

    /// Friction coefficient of each segment.
    mu: Vec<f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FrictionTableError {
    #[error("The friction segment table is empty")]
    Empty,

    #[error("Found {0} segment boundaries but {1} friction values")]
    LengthMismatch(usize, usize),

    #[error("Segment boundaries must be strictly increasing")]
    NotIncreasing,

    #[error("The first segment must begin at s = 0, found {0}")]
    FirstNotZero(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FrictionSegmentTable {
    pub fn new(s_begin_m: Vec<f64>, mu: Vec<f64>) -> Result<Self, FrictionTableError> {
        if s_begin_m.is_empty() {
            return Err(FrictionTableError::Empty);
        }
        if s_begin_m.len() != mu.len() {
            return Err(FrictionTableError::LengthMismatch(s_begin_m.len(), mu.len()));
        }
        if s_begin_m[0] != 0.0 {
            return Err(FrictionTableError::FirstNotZero(s_begin_m[0]));
        }
        if s_begin_m.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(FrictionTableError::NotIncreasing);
        }

        Ok(Self { s_begin_m, mu })
    }

    /// Number of segments in the table.
    pub fn len(&self) -> usize {
        self.mu.len()
    }

    /// Get the active segment index and its friction coefficient at the given position.
    pub fn lookup(&self, s_m: f64, s_lap_m: f64) -> (usize, f64) {
        let idx = segment_index(s_m, s_lap_m, &self.s_begin_m);
        (idx, self.mu[idx])
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Find the index of the friction segment containing `s_m`.
///
/// `s_m` is first wrapped into one lap `[0, s_lap_m)`. The boundary pairs are then scanned in order
/// and the first segment `i` with `boundaries[i] <= s < boundaries[i + 1]` is returned. A position
/// exactly on a boundary therefore belongs to the segment starting there. Positions at or past the
/// last boundary belong to the last segment.
///
/// `boundaries` must be non-empty.
pub fn segment_index(s_m: f64, s_lap_m: f64, boundaries: &[f64]) -> usize {
    let s_wrapped = maths::rem_euclid(s_m, s_lap_m);
    let last = boundaries.len().saturating_sub(1);

    if s_wrapped >= boundaries[last] {
        return last;
    }

    boundaries
        .windows(2)
        .position(|w| w[0] <= s_wrapped && s_wrapped < w[1])
        .unwrap_or(0)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn table() -> FrictionSegmentTable {
        FrictionSegmentTable::new(vec![0.0, 40.0, 70.0], vec![0.9, 0.5, 0.8]).unwrap()
    }

    #[test]
    fn test_lookup_examples() {
        let t = table();

        assert_eq!(t.lookup(40.0, 100.0), (1, 0.5));
        assert_eq!(t.lookup(99.9, 100.0), (2, 0.8));
        assert_eq!(t.lookup(10.0, 100.0), (0, 0.9));

        // Positions wrap around the lap, including negative ones
        assert_eq!(t.lookup(240.0, 100.0), (1, 0.5));
        assert_eq!(t.lookup(-5.0, 100.0), (2, 0.8));
    }

    #[test]
    fn test_boundary_tie_break() {
        let boundaries = [0.0, 40.0, 70.0];

        for (i, b) in boundaries.iter().enumerate() {
            assert_eq!(segment_index(*b, 100.0, &boundaries), i);
        }
    }

    #[test]
    fn test_index_range_and_monotonic() {
        let boundaries = [0.0, 12.5, 40.0, 41.0, 70.0];
        let s_lap_m = 100.0;

        let mut last_idx = 0;
        for i in 0..10_000 {
            let s = (i as f64) * 0.01;
            let idx = segment_index(s, s_lap_m, &boundaries);

            assert!(idx < boundaries.len());
            assert!(idx >= last_idx, "index decreased at s = {}", s);
            last_idx = idx;
        }
        assert_eq!(last_idx, boundaries.len() - 1);
    }

    #[test]
    fn test_single_segment() {
        let t = FrictionSegmentTable::new(vec![0.0], vec![0.6]).unwrap();
        assert_eq!(t.lookup(0.0, 50.0), (0, 0.6));
        assert_eq!(t.lookup(123.4, 50.0), (0, 0.6));
    }

    #[test]
    fn test_invalid_tables() {
        assert!(matches!(
            FrictionSegmentTable::new(vec![], vec![]),
            Err(FrictionTableError::Empty)
        ));
        assert!(matches!(
            FrictionSegmentTable::new(vec![0.0, 10.0], vec![0.9]),
            Err(FrictionTableError::LengthMismatch(2, 1))
        ));
        assert!(matches!(
            FrictionSegmentTable::new(vec![0.0, 10.0, 10.0], vec![0.9, 0.5, 0.8]),
            Err(FrictionTableError::NotIncreasing)
        ));
        assert!(matches!(
            FrictionSegmentTable::new(vec![5.0, 10.0], vec![0.9, 0.5]),
            Err(FrictionTableError::FirstNotZero(_))
        ));
    }
}
