//! Ratio-based SpO2 approximation
//!
//! Oxygenated and deoxygenated hemoglobin absorb red and infrared light
//! differently; the red/IR mean ratio over the sample window maps to a
//! saturation percentage through a fixed empirical line.

use crate::optical::PpgSample;

// Empirical ratio-to-percentage line, tuned against reference readings.
const RATIO_REFERENCE: f32 = 0.75;
const RATIO_SLOPE: f32 = 5.0;

/// Windowed red/IR ratio SpO2 estimator
///
/// Stateless apart from the cache of the most recent result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spo2Estimator {
    last: Option<f32>,
}

impl Spo2Estimator {
    /// Create an estimator with an empty result cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently computed percentage, if the last pass was valid
    #[must_use]
    pub fn last_value(&self) -> Option<f32> {
        self.last
    }

    /// Estimate SpO2 over the sample window
    ///
    /// Returns a percentage clamped to `[0, 100]`, or `None` when the window
    /// is empty or either channel mean is non-positive (an unlit or saturated
    /// front end). The result never contains NaN or infinities.
    pub fn process(&mut self, window: &[PpgSample]) -> Option<f32> {
        self.last = Self::estimate(window);
        self.last
    }

    fn estimate(window: &[PpgSample]) -> Option<f32> {
        if window.is_empty() {
            return None;
        }

        let mut total_red: i64 = 0;
        let mut total_ir: i64 = 0;
        for sample in window {
            total_red += i64::from(sample.red);
            total_ir += i64::from(sample.ir);
        }

        let n = window.len() as i64;
        let mean_red = total_red / n;
        let mean_ir = total_ir / n;
        if mean_red <= 0 || mean_ir <= 0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let ratio = mean_red as f32 / mean_ir as f32;
        Some((100.0 - RATIO_SLOPE * (ratio - RATIO_REFERENCE)).clamp(0.0, 100.0))
    }

    /// Drop the cached result
    pub fn reset(&mut self) {
        self.last = None;
    }
}
