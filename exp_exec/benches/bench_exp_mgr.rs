//! # Experiment Manager Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use comms_if::msg::{EgoState, TrackPath};
use exp_lib::exp_mgr::{ExpMgr, ExpMgrParams, InputData};
use util::module::State;

fn exp_mgr_benchmark(c: &mut Criterion) {
    // ---- Build an oval-ish track with 1 m samples ----

    let radius_m = 50.0;
    let num_samples = 314;
    let mut path = TrackPath::default();
    for i in 0..num_samples {
        let theta = 2.0 * std::f64::consts::PI * (i as f64) / (num_samples as f64);
        path.s.push(radius_m * theta);
        path.x.push(radius_m * theta.cos());
        path.y.push(radius_m * theta.sin());
        path.psi_c.push(theta + std::f64::consts::FRAC_PI_2);
        path.dlb.push(-3.0);
        path.dub.push(3.0);
    }

    let params = ExpMgrParams {
        t_activate_s: 0.0,
        cycle_period_s: 0.01,
        track_wait_timeout_s: None,
        scenario_id: 1,
        traction_adaptive: true,
        speed_threshold_ms: 5.0,
        s_ego_at_popup_m: 120.0,
        s_obs_at_popup_m: 150.0,
        d_obs_at_popup_m: 0.5,
        obs_radius_m: 0.5,
        obs_wiggle_room_m: 1.0,
        track_name: "bench_circle".into(),
        s_begin_mu_segments_m: (0..20).map(|i| (i as f64) * 15.0).collect(),
        mu_segment_values: (0..20).map(|i| 0.5 + 0.02 * (i as f64)).collect(),
        corridor_slack_m: 1.0,
        robot_name: "bench".into(),
        vehicle_width_m: 1.7,
    };

    let mut exp_mgr = ExpMgr::new(params).unwrap();
    exp_mgr.set_track_path(path).unwrap();

    let mut s = 0.0;

    c.bench_function("ExpMgr::proc", |b| {
        b.iter(|| {
            s += 0.1;
            exp_mgr
                .proc(&InputData {
                    ego_state: EgoState { s, d: 0.2, vx: 10.0 },
                    ..Default::default()
                })
                .unwrap()
        })
    });
}

criterion_group!(benches, exp_mgr_benchmark);
criterion_main!(benches);
