//! Test utilities and helper functions

use crate::common::mock_source::{MockMotion, MockOptical};
use vitals_fusion::VitalsMonitor;

/// No-op delay provider for tests where pacing is irrelevant
#[derive(Debug, Clone, Copy)]
pub struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    fn delay_us(&mut self, _us: u32) {
        // No-op for testing
    }

    fn delay_ms(&mut self, _ms: u32) {
        // No-op for testing
    }
}

/// Create a monitor over fresh mocks
///
/// Returns (monitor, optical, motion) where the mock handles share state with
/// the providers the monitor owns.
pub fn create_mock_monitor() -> (VitalsMonitor<MockOptical, MockMotion>, MockOptical, MockMotion) {
    let optical = MockOptical::new();
    let motion = MockMotion::new();
    let monitor = VitalsMonitor::new(optical.clone(), motion.clone());
    (monitor, optical, motion)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
