use helio_animation::{AnimationScheduler, Easing, KeyframeLoop, LoopClock};

#[test]
fn many_small_frames_match_one_large_step() {
    let mut stepped = LoopClock::new(2400.0);
    for _ in 0..310 {
        stepped.advance(16.0);
    }

    let mut jumped = LoopClock::new(2400.0);
    jumped.advance(310.0 * 16.0);

    assert!((stepped.phase() - jumped.phase()).abs() < 1e-3);
    assert_eq!(stepped.loops(), jumped.loops());
    assert_eq!(jumped.loops(), 2);
}

#[test]
fn staggered_durations_drift_apart() {
    let base = 2400.0_f32;
    let count = 6;
    let mut scheduler = AnimationScheduler::new();
    let ids: Vec<_> = (0..count)
        .map(|i| scheduler.add_clock(LoopClock::new(base + base / count as f32 * i as f32)))
        .collect();

    scheduler.tick(1200.0);

    let phases: Vec<f32> = ids.iter().map(|id| scheduler.phase(*id).unwrap()).collect();
    assert!(phases.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn pulse_track_stays_within_its_bounds() {
    let mut track = KeyframeLoop::ping_pong(0.7, 1.3, 950.0, Easing::EaseInOut);
    for _ in 0..500 {
        track.advance(7.0);
        let v = track.value();
        assert!((0.7 - 1e-4..=1.3 + 1e-4).contains(&v), "value {v} escaped");
    }
}
