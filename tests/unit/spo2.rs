//! Unit tests for SpO2 estimation through the monitor

use crate::common::{assert_float_eq, create_mock_monitor};
use vitals_fusion::SPO2_INVALID;

#[test]
fn test_no_reading_before_any_samples() {
    let (mut monitor, _optical, _motion) = create_mock_monitor();
    assert_eq!(monitor.current_spo2(), SPO2_INVALID);
    assert_eq!(monitor.compute_spo2(), SPO2_INVALID);
}

#[test]
fn test_known_ratio_through_window() {
    let (mut monitor, _optical, _motion) = create_mock_monitor();

    // red/IR ratio 0.8: 100 - 5 * (0.8 - 0.75) = 99.75
    for _ in 0..10 {
        monitor.push_optical_sample(80_000, 100_000);
    }

    assert_float_eq(monitor.compute_spo2(), 99.75, 1e-3);
    assert_float_eq(monitor.current_spo2(), 99.75, 1e-3);
}

#[test]
fn test_zero_red_channel_is_sentinel() {
    let (mut monitor, _optical, _motion) = create_mock_monitor();

    for _ in 0..10 {
        monitor.push_optical_sample(0, 100_000);
    }

    assert_eq!(monitor.compute_spo2(), SPO2_INVALID);
    assert_eq!(monitor.current_spo2(), SPO2_INVALID);
}

#[test]
fn test_rising_red_mean_lowers_estimate() {
    let (mut monitor, _optical, _motion) = create_mock_monitor();

    for _ in 0..10 {
        monitor.push_optical_sample(80_000, 100_000);
    }
    let first = monitor.compute_spo2();

    // A fresh window with a higher red mean must estimate lower
    monitor.reset();
    for _ in 0..10 {
        monitor.push_optical_sample(120_000, 100_000);
    }
    let second = monitor.compute_spo2();

    assert!(second < first);
    assert!((0.0..=100.0).contains(&second));
}

#[test]
fn test_stale_cache_replaced_by_invalid_pass() {
    let (mut monitor, _optical, _motion) = create_mock_monitor();

    for _ in 0..10 {
        monitor.push_optical_sample(80_000, 100_000);
    }
    assert!(monitor.compute_spo2() > 0.0);

    // Window turns unusable: the cache must not keep advertising the old value
    monitor.reset();
    assert_eq!(monitor.compute_spo2(), SPO2_INVALID);
    assert_eq!(monitor.current_spo2(), SPO2_INVALID);
}

#[test]
fn test_mixed_window_uses_means() {
    let (mut monitor, _optical, _motion) = create_mock_monitor();

    // Means: red 75_000, IR 100_000 -> ratio 0.75 -> exactly 100
    monitor.push_optical_sample(50_000, 90_000);
    monitor.push_optical_sample(100_000, 110_000);

    assert_float_eq(monitor.compute_spo2(), 100.0, 1e-3);
}
