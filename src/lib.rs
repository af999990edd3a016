#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod monitor;
pub mod motion;
pub mod optical;
pub mod ring;
pub mod source;

// Re-export main types
pub use monitor::VitalsMonitor;
pub use motion::{
    DEFAULT_CALIBRATION_SAMPLES, FilterConfig, GyroBias, OrientationFilter, SmoothedAngles,
};
pub use optical::{
    HeartRateConfig, HeartRateEstimator, OpticalConfig, PPG_WINDOW_SIZE, PpgSample,
    RATE_HISTORY_SIZE, Spo2Estimator,
};
pub use ring::SampleRing;
pub use source::{AccelSample, GyroSample, MotionSource, OpticalSource};

/// Sentinel returned by [`VitalsMonitor::current_heart_rate`] while no reading
/// has been accepted.
pub const HEART_RATE_INVALID: i32 = -1;

/// Sentinel returned by [`VitalsMonitor::current_spo2`] while the optical
/// window cannot produce a valid percentage.
pub const SPO2_INVALID: f32 = -1.0;

/// Estimation errors
///
/// Estimator-internal conditions (too few peaks, out-of-range rate, empty
/// window) are never errors - they surface as "no reading this tick". This
/// enum only carries failures of the sensor provider or configuration misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The sensor provider failed to deliver a sample
    Source(E),
    /// Invalid configuration parameter (e.g. zero calibration samples)
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Source(error)
    }
}
