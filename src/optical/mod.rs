//! Heart-rate and SpO2 estimation from pulse-oximetry samples
//!
//! Both estimators scan the same fixed window of red/IR pairs: heart rate
//! from the spacing of IR peaks, SpO2 from the windowed red/IR mean ratio.

pub mod heart_rate;
pub mod spo2;

pub use heart_rate::{HeartRateConfig, HeartRateEstimator, MAX_PEAKS, find_peaks};
pub use spo2::Spo2Estimator;

/// Capacity of the shared red/IR sample window
pub const PPG_WINDOW_SIZE: usize = 50;

/// Capacity of the accepted-BPM smoothing history
pub const RATE_HISTORY_SIZE: usize = 10;

/// One pulse-oximetry reading: paired red and infrared ADC counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PpgSample {
    /// Red-LED ADC count
    pub red: i32,
    /// Infrared-LED ADC count
    pub ir: i32,
}

impl PpgSample {
    /// Create a sample from red and IR counts
    #[must_use]
    pub const fn new(red: i32, ir: i32) -> Self {
        Self { red, ir }
    }
}

/// Optical front-end tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OpticalConfig {
    /// IR count at or above which a finger is considered present
    pub finger_threshold: i32,
    /// A fresh aggregate estimate is due every this many pushed samples
    pub estimate_interval: usize,
}

impl Default for OpticalConfig {
    fn default() -> Self {
        Self {
            finger_threshold: 50_000,
            estimate_interval: 5,
        }
    }
}
