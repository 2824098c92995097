// Input throttle tests

use bizkit::throttle::InputThrottle;
use chrono::{Duration, TimeZone, Utc};

#[test]
fn test_burst_is_thinned_to_interval() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut throttle = InputThrottle::starting_at(start, 200);

    // an event every 50 ms for one second
    let accepted = (1..=20)
        .map(|i| start + Duration::milliseconds(i * 50))
        .filter(|t| throttle.allow(*t))
        .count();

    // accepted at 250, 500, 750 and 1000 ms
    assert_eq!(accepted, 4);
    assert_eq!(
        throttle.last_accepted(),
        start + Duration::milliseconds(1000)
    );
}

#[test]
fn test_exact_interval_is_rejected() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut throttle = InputThrottle::starting_at(start, 200);
    assert!(!throttle.allow(start + Duration::milliseconds(200)));
    assert!(throttle.allow(start + Duration::milliseconds(201)));
}

#[test]
fn test_default_throttle_rejects_immediate_input() {
    let mut throttle = InputThrottle::default();
    assert!(!throttle.allow_now());
}

#[test]
fn test_throttle_built_from_settings() {
    let settings =
        bizkit::config::Settings::from_yaml_with_env("throttle:\n  interval_ms: 50\n").unwrap();
    let throttle = InputThrottle::from_config(&settings.throttle);
    assert_eq!(throttle.interval_ms(), 50);
}
