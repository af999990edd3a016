//! Unit tests for gyroscope bias calibration

use crate::common::{MockDelay, MockReadError, assert_float_eq, create_mock_monitor};
use vitals_fusion::{DEFAULT_CALIBRATION_SAMPLES, Error};

#[test]
fn test_calibrate_basic() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    // Simulate the device at rest with a small constant drift
    motion.set_gyro(0.5, -0.3, 0.2);

    monitor.begin(100, &mut MockDelay).unwrap();

    let bias = monitor.gyro_bias();
    assert_float_eq(bias.x, 0.5, 1e-4);
    assert_float_eq(bias.y, -0.3, 1e-4);
    assert_float_eq(bias.z, 0.2, 1e-4);

    // Exactly the requested number of gyro reads
    assert_eq!(motion.gyro_reads(), 100);
}

#[test]
fn test_calibrate_averages_varying_readings() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    // Alternating drift around a mean of (2.0, -1.0, 0.0)
    motion.set_gyro_sequence(vec![[1.0, -2.0, 0.5], [3.0, 0.0, -0.5]]);

    monitor.begin(100, &mut MockDelay).unwrap();

    let bias = monitor.gyro_bias();
    assert_float_eq(bias.x, 2.0, 1e-4);
    assert_float_eq(bias.y, -1.0, 1e-4);
    assert_float_eq(bias.z, 0.0, 1e-4);
}

#[test]
fn test_calibrate_negative_offsets() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    motion.set_gyro(-2.0, -1.5, -1.0);
    monitor.begin(50, &mut MockDelay).unwrap();

    let bias = monitor.gyro_bias();
    assert_float_eq(bias.x, -2.0, 1e-4);
    assert_float_eq(bias.y, -1.5, 1e-4);
    assert_float_eq(bias.z, -1.0, 1e-4);
}

#[test]
fn test_calibrate_zero_samples_rejected() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    let result = monitor.begin(0, &mut MockDelay);
    assert_eq!(result, Err(Error::InvalidConfig));
    assert_eq!(motion.gyro_reads(), 0);
}

#[test]
fn test_calibrate_read_failure_propagates() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    motion.set_gyro(1.0, 1.0, 1.0);
    motion.fail_next_read();

    let result = monitor.begin(100, &mut MockDelay);
    assert_eq!(result, Err(Error::Source(MockReadError)));

    // No bias installed from the aborted run
    let bias = monitor.gyro_bias();
    assert_float_eq(bias.x, 0.0, 1e-6);
    assert_float_eq(bias.y, 0.0, 1e-6);
    assert_float_eq(bias.z, 0.0, 1e-6);
}

#[test]
fn test_recalibrate_overwrites_previous_bias() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    motion.set_gyro(1.0, -0.5, 0.25);
    monitor.begin(50, &mut MockDelay).unwrap();
    assert_float_eq(monitor.gyro_bias().x, 1.0, 1e-4);

    motion.set_gyro(2.0, -1.0, 0.5);
    monitor.recalibrate(50, &mut MockDelay).unwrap();

    let bias = monitor.gyro_bias();
    assert_float_eq(bias.x, 2.0, 1e-4);
    assert_float_eq(bias.y, -1.0, 1e-4);
    assert_float_eq(bias.z, 0.5, 1e-4);
}

#[test]
fn test_calibration_cancels_drift_in_updates() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    // Constant drift on every axis while resting flat
    motion.set_gyro(1.5, -0.75, 2.0);
    monitor.begin(DEFAULT_CALIBRATION_SAMPLES, &mut MockDelay).unwrap();

    for _ in 0..200 {
        monitor.update_motion(0.01).unwrap();
    }

    let (x, y, z) = monitor.current_angles();
    assert_float_eq(x, 0.0, 1e-3);
    assert_float_eq(y, 0.0, 1e-3);
    assert_float_eq(z, 0.0, 1e-3);
}

#[test]
fn test_reset_preserves_bias() {
    let (mut monitor, _optical, motion) = create_mock_monitor();

    motion.set_gyro(0.8, 0.0, -0.4);
    monitor.begin(100, &mut MockDelay).unwrap();

    monitor.reset();

    let bias = monitor.gyro_bias();
    assert_float_eq(bias.x, 0.8, 1e-4);
    assert_float_eq(bias.z, -0.4, 1e-4);
}
