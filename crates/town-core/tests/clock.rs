use town_core::{DayClock, TickContext};

#[test]
fn clock_wraps_and_counts_days() {
    let mut clock = DayClock::new(22.0, 24.0);
    clock.advance(3.0);
    assert!((clock.time() - 1.0).abs() < 1e-5);
    assert_eq!(clock.days(), 1);

    clock.advance(48.0);
    assert!((clock.time() - 1.0).abs() < 1e-4);
    assert_eq!(clock.days(), 3);
}

#[test]
fn bad_periods_are_refused() {
    assert_eq!(DayClock::try_new(6.0, 0.0), None);
    assert_eq!(DayClock::try_new(6.0, -24.0), None);
    assert_eq!(DayClock::try_new(6.0, f32::NAN), None);
    assert_eq!(DayClock::try_new(f32::INFINITY, 24.0), None);

    let clock = DayClock::try_new(-1.0, 24.0).expect("valid period");
    assert_eq!(clock.time(), 23.0);
}

#[test]
#[should_panic(expected = "day period")]
fn zero_period_panics() {
    let _ = DayClock::new(0.0, 0.0);
}

#[test]
fn clock_ignores_negative_advance() {
    let mut clock = DayClock::new(5.0, 24.0);
    clock.advance(-2.0);
    assert_eq!(clock.time(), 5.0);
}

#[test]
fn window_checks_handle_wraparound() {
    let clock = DayClock::new(8.0, 24.0);
    assert!(clock.in_window(7.0, 17.0));
    assert!(!clock.in_window(17.0, 7.0));

    let night = DayClock::new(23.0, 24.0);
    assert!(night.in_window(22.0, 6.0));
    assert!(!night.in_window(7.0, 17.0));
}

#[test]
fn movement_scale_combines_dt_and_speed() {
    let ctx = TickContext::new(0, 0.5, 0.0).with_speed_multiplier(4.0);
    assert_eq!(ctx.movement_scale(), 2.0);

    let paused = TickContext::new(0, -1.0, 0.0).with_speed_multiplier(4.0);
    assert_eq!(paused.movement_scale(), 0.0);
}
