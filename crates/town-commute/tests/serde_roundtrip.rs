#![cfg(feature = "serde")]

use town_commute::{CommuteConfig, CommuteEvent, CommutePhase, Schedule};
use town_nav::Vec2;

#[test]
fn partial_config_keeps_defaults() {
    let config: CommuteConfig =
        serde_json::from_str(r#"{"walk_speed": 12.0}"#).expect("parse");
    assert_eq!(config.walk_speed, 12.0);
    assert_eq!(config.drive_speed, CommuteConfig::default().drive_speed);
    assert_eq!(config.wake, CommuteConfig::default().wake);
}

#[test]
fn partial_schedules_fill_from_their_own_defaults() {
    let config: CommuteConfig =
        serde_json::from_str(r#"{"wake": {"mean": 6.0}, "leave": {"latest": 20.0}}"#)
            .expect("parse");
    assert_eq!(config.wake, Schedule::new(6.0, 1.0, 5.0, 9.0));
    assert_eq!(config.leave, Schedule::new(17.0, 1.0, 15.0, 20.0));

    let encoded = serde_json::to_string(&config).expect("serialize");
    let decoded: CommuteConfig = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, config);
}

#[test]
fn events_are_tagged_by_kind() {
    let event = CommuteEvent::RouteFailed {
        tick: 3,
        agent: 9,
        phase: CommutePhase::OnRoad,
        from: Vec2::new(0.0, 0.0),
        to: Vec2::new(10.0, 10.0),
        attempts: 1,
    };
    let encoded = serde_json::to_value(&event).expect("serialize");
    assert_eq!(encoded["kind"], "route_failed");
    assert_eq!(encoded["phase"], "on_road");

    let decoded: CommuteEvent = serde_json::from_value(encoded).expect("deserialize");
    assert_eq!(decoded, event);
}
