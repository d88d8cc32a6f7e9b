use town_core::SplitMix64;
use town_commute::{CommutePhase, Schedule, TravelMode};

#[test]
fn cycle_visits_every_phase_once() {
    let mut phase = CommutePhase::AtHomeAsleep;
    let mut seen = Vec::new();
    for _ in 0..CommutePhase::ALL.len() {
        seen.push(phase);
        phase = phase.next();
    }
    assert_eq!(phase, CommutePhase::AtHomeAsleep);
    assert_eq!(seen, CommutePhase::ALL.to_vec());
}

#[test]
fn only_the_two_drives_use_the_road_graph() {
    let road: Vec<CommutePhase> = CommutePhase::ALL
        .into_iter()
        .filter(|p| p.is_road_bound())
        .collect();
    assert_eq!(
        road,
        vec![CommutePhase::OnRoad, CommutePhase::ReturningHomeOnRoad]
    );
    for p in road {
        assert_eq!(p.travel_mode(), TravelMode::InVehicle);
    }
}

#[test]
fn clock_gates_only_sleep_and_work() {
    for p in CommutePhase::ALL {
        let expected = matches!(p, CommutePhase::AtHomeAsleep | CommutePhase::AtWork);
        assert_eq!(p.is_time_triggered(), expected, "{p}");
    }
    assert_eq!(CommutePhase::AtHomeAsleep.travel_mode(), TravelMode::Indoors);
    assert_eq!(CommutePhase::EnteringHome.travel_mode(), TravelMode::OnFoot);
}

#[test]
fn phase_names_are_snake_case() {
    assert_eq!(CommutePhase::ReturningHomeOnRoad.to_string(), "returning_home_on_road");
    assert_eq!(CommutePhase::default(), CommutePhase::AtHomeAsleep);
}

#[test]
fn schedule_sampling_is_clamped() {
    let fixed = Schedule::new(12.0, 0.0, 5.0, 9.0);
    let mut rng = SplitMix64::new(3);
    assert_eq!(fixed.sample(&mut rng), 9.0);

    let wide = Schedule::new(7.0, 50.0, 5.0, 9.0);
    for _ in 0..200 {
        let t = wide.sample(&mut rng);
        assert!((5.0..=9.0).contains(&t));
    }
}
