//! # Data Store

use crate::exp_mgr;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    // ExpMgr
    pub exp_mgr_input: exp_mgr::InputData,
    pub exp_mgr_output: Option<exp_mgr::OutputData>,
    pub exp_mgr_status_rpt: exp_mgr::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        let cycles_per_second = (cycle_frequency_hz.round() as u128).max(1);
        self.is_1_hz_cycle = self.num_cycles % cycles_per_second == 0;

        self.exp_mgr_input = exp_mgr::InputData::default();
        self.exp_mgr_output = None;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_1_hz_cycle() {
        let mut ds = DataStore::default();
        let mut num_1_hz = 0;

        for _ in 0..250 {
            ds.cycle_start(100.0);
            if ds.is_1_hz_cycle {
                num_1_hz += 1;
            }
            ds.cycle_end();
        }

        assert_eq!(num_1_hz, 3);
        assert_eq!(ds.num_cycles, 250);
    }
}
