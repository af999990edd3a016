//! Peak-based heart-rate extraction
//!
//! The IR channel pulses with blood volume; beats show up as local maxima in
//! the sample window. The estimator converts the mean spacing of those maxima
//! to BPM through fixed cadence constants, smooths against recently accepted
//! values, and gates the result to a physiological range plus a maximum
//! tick-to-tick jump.

use crate::optical::{PPG_WINDOW_SIZE, PpgSample, RATE_HISTORY_SIZE};
use crate::ring::SampleRing;

/// Upper bound on detectable peaks in one window
///
/// Strict local maxima cannot occupy adjacent slots, so a window holds at
/// most half its capacity.
pub const MAX_PEAKS: usize = PPG_WINDOW_SIZE / 2;

/// Heart-rate extraction tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeartRateConfig {
    /// Seconds represented by one inter-sample gap
    ///
    /// Empirical constant tuned to the optical sampling cadence, not derived
    /// from the nominal sensor rate.
    pub sample_interval: f32,
    /// Multiplicative correction applied after the gap-to-BPM conversion
    pub calibration_factor: f32,
    /// Lowest smoothed BPM accepted as physiological
    pub min_bpm: i32,
    /// Highest smoothed BPM accepted as physiological
    pub max_bpm: i32,
    /// Largest allowed jump from the previously surfaced value, in BPM
    pub max_jump: i32,
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            sample_interval: 0.4,
            calibration_factor: 2.3,
            min_bpm: 60,
            max_bpm: 300,
            max_jump: 30,
        }
    }
}

/// Indices of strict local IR maxima, in window order
///
/// Scans interior positions only; the first and last samples of the window
/// can never qualify. The window is storage order, not chronological order -
/// the wrap point introduces at most one spurious discontinuity, which the
/// averaging over all gaps absorbs.
#[must_use]
pub fn find_peaks(window: &[PpgSample]) -> heapless::Vec<usize, MAX_PEAKS> {
    let mut peaks = heapless::Vec::new();
    if window.len() < 3 {
        return peaks;
    }

    for i in 1..window.len() - 1 {
        if window[i].ir > window[i - 1].ir && window[i].ir > window[i + 1].ir {
            // Capacity suffices for any window up to 2*MAX_PEAKS+1 samples
            let _ = peaks.push(i);
        }
    }
    peaks
}

/// Windowed peak-spacing heart-rate estimator
///
/// Owns the smoothing history and the last surfaced value; one instance per
/// optical channel, living for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct HeartRateEstimator {
    config: HeartRateConfig,
    history: SampleRing<i32, RATE_HISTORY_SIZE>,
    last_rate: Option<i32>,
}

impl HeartRateEstimator {
    /// Create an estimator with the given tuning
    #[must_use]
    pub fn new(config: HeartRateConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The estimator tuning
    #[must_use]
    pub fn config(&self) -> HeartRateConfig {
        self.config
    }

    /// The last surfaced heart rate, if any
    #[must_use]
    pub fn last_rate(&self) -> Option<i32> {
        self.last_rate
    }

    /// Run one extraction pass over the sample window
    ///
    /// Returns the surfaced BPM, or `None` when the window yields no valid
    /// reading this tick (fewer than two peaks, smoothed rate outside the
    /// physiological range, or a jump beyond `max_jump` from the previously
    /// surfaced value). Range-accepted values enter the smoothing history
    /// even when the jump gate subsequently withholds them.
    pub fn process(&mut self, window: &[PpgSample]) -> Option<i32> {
        let peaks = find_peaks(window);
        if peaks.len() < 2 {
            return None;
        }

        let gap_sum: usize = peaks.windows(2).map(|pair| pair[1] - pair[0]).sum();
        #[allow(clippy::cast_precision_loss)]
        let avg_gap = gap_sum as f32 / (peaks.len() - 1) as f32;

        #[allow(clippy::cast_possible_truncation)]
        let raw_bpm =
            ((60.0 / (avg_gap * self.config.sample_interval)) * self.config.calibration_factor)
                as i32;

        // Average with the accepted history, new value included in the count
        let mut sum = raw_bpm;
        let mut count = 0;
        for &rate in self.history.iter() {
            if rate != 0 {
                sum += rate;
                count += 1;
            }
        }
        let smoothed = sum / (count + 1);

        if smoothed < self.config.min_bpm || smoothed > self.config.max_bpm {
            #[cfg(feature = "defmt")]
            defmt::debug!("heart rate {} outside physiological range", smoothed);
            return None;
        }

        self.history.push(smoothed);

        match self.last_rate {
            Some(last) if (last - smoothed).abs() >= self.config.max_jump => None,
            _ => {
                self.last_rate = Some(smoothed);
                Some(smoothed)
            }
        }
    }

    /// Clear the smoothing history and the last surfaced value
    pub fn reset(&mut self) {
        self.history.reset();
        self.last_rate = None;
    }
}
