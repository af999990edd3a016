//! Combined vitals facade over one optical and one motion provider
//!
//! [`VitalsMonitor`] owns the sample windows, the estimators and the cached
//! outputs; the transport layer polls results through accessors instead of
//! reading shared globals. One periodic tick on the caller's side drives
//! sampling and (on the fixed cadence) re-estimation.

use crate::motion::{FilterConfig, GyroBias, OrientationFilter, compute_gyro_bias};
use crate::optical::{
    HeartRateConfig, HeartRateEstimator, OpticalConfig, PPG_WINDOW_SIZE, PpgSample, Spo2Estimator,
};
use crate::ring::SampleRing;
use crate::source::{AccelSample, GyroSample, MotionSource, OpticalSource};
use crate::{Error, HEART_RATE_INVALID, SPO2_INVALID};
use embedded_hal::delay::DelayNs;

/// Owner of the estimation pipeline for one optical + one motion provider
///
/// Construction does not touch the providers; call
/// [`begin`](VitalsMonitor::begin) once (device stationary) before trusting
/// orientation output.
pub struct VitalsMonitor<O, M> {
    optical_source: O,
    motion_source: M,
    optical_config: OpticalConfig,
    window: SampleRing<PpgSample, PPG_WINDOW_SIZE>,
    optical_pushes: u32,
    heart_rate: HeartRateEstimator,
    spo2: Spo2Estimator,
    filter: OrientationFilter,
}

impl<O, M> VitalsMonitor<O, M>
where
    O: OpticalSource,
    M: MotionSource,
{
    /// Create a monitor with default tuning
    pub fn new(optical_source: O, motion_source: M) -> Self {
        Self::with_config(
            optical_source,
            motion_source,
            OpticalConfig::default(),
            HeartRateConfig::default(),
            FilterConfig::default(),
        )
    }

    /// Create a monitor with explicit tuning for every stage
    pub fn with_config(
        optical_source: O,
        motion_source: M,
        optical_config: OpticalConfig,
        heart_rate_config: HeartRateConfig,
        filter_config: FilterConfig,
    ) -> Self {
        Self {
            optical_source,
            motion_source,
            optical_config,
            window: SampleRing::new(),
            optical_pushes: 0,
            heart_rate: HeartRateEstimator::new(heart_rate_config),
            spo2: Spo2Estimator::new(),
            filter: OrientationFilter::new(filter_config),
        }
    }

    /// Calibrate the gyro bias and start from clean state
    ///
    /// Samples the gyro `samples` times at a fixed cadence, blocking until
    /// done; the device must be stationary. Readiness gates on this call -
    /// there is no background variant and no cancellation.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for `samples == 0`; [`Error::Source`] if a
    /// gyro read fails, in which case no bias is installed.
    pub fn begin<D: DelayNs>(
        &mut self,
        samples: u16,
        delay: &mut D,
    ) -> Result<(), Error<M::Error>> {
        let bias = compute_gyro_bias(&mut self.motion_source, samples, delay)?;
        self.reset();
        self.filter.set_bias(bias);
        Ok(())
    }

    /// Read one accel/gyro pair from the provider and advance the filter
    ///
    /// # Errors
    ///
    /// [`Error::Source`] if either read fails; the filter state is untouched.
    pub fn update_motion(&mut self, dt: f32) -> Result<(), Error<M::Error>> {
        let accel = self.motion_source.read_accel()?;
        let gyro = self.motion_source.read_gyro()?;
        self.push_motion_sample(accel, gyro, dt);
        Ok(())
    }

    /// Advance the orientation filter with an externally sourced sample
    ///
    /// `dt` is seconds since the previous motion sample; non-positive ticks
    /// are ignored.
    pub fn push_motion_sample(&mut self, accel: AccelSample, gyro: GyroSample, dt: f32) {
        self.filter.update(accel, gyro, dt);
    }

    /// Read one red/IR pair from the provider and store it
    ///
    /// Mirrors the device tick: the sample is pushed first; if the IR level
    /// then shows no finger on the sensor, the optical window, the rate
    /// history and the cached vitals are all cleared and `false` is returned
    /// (stale readings from a removed finger must not feed later estimates).
    ///
    /// # Errors
    ///
    /// [`Error::Source`] if either read fails; nothing is pushed.
    pub fn update_optical(&mut self) -> Result<bool, Error<O::Error>> {
        let red = self.optical_source.read_red()?;
        let ir = self.optical_source.read_ir()?;
        let due = self.push_optical_sample(red, ir);

        if !self.is_finger_present() {
            self.clear_optical();
            return Ok(false);
        }
        Ok(due)
    }

    /// Store an externally sourced red/IR pair
    ///
    /// Returns whether a fresh aggregate estimate is due - true on every
    /// `estimate_interval`-th pushed sample.
    pub fn push_optical_sample(&mut self, red: i32, ir: i32) -> bool {
        self.window.push(PpgSample::new(red, ir));
        self.optical_pushes = self.optical_pushes.wrapping_add(1);

        let interval = self.optical_config.estimate_interval.max(1) as u32;
        self.optical_pushes % interval == 0
    }

    /// Run heart-rate extraction over the current window
    ///
    /// Returns the surfaced BPM or [`HEART_RATE_INVALID`]; the value is also
    /// retained for [`current_heart_rate`](VitalsMonitor::current_heart_rate).
    pub fn compute_heart_rate(&mut self) -> i32 {
        self.heart_rate
            .process(self.window.window())
            .unwrap_or(HEART_RATE_INVALID)
    }

    /// Run SpO2 estimation over the current window
    ///
    /// Returns the percentage or [`SPO2_INVALID`]; the value is also retained
    /// for [`current_spo2`](VitalsMonitor::current_spo2).
    pub fn compute_spo2(&mut self) -> f32 {
        self.spo2
            .process(self.window.window())
            .unwrap_or(SPO2_INVALID)
    }

    /// Last fused orientation angles in degrees
    #[must_use]
    pub fn current_angles(&self) -> (f32, f32, f32) {
        let angles = self.filter.angles();
        (angles.x, angles.y, angles.z)
    }

    /// Last accepted heart rate, or [`HEART_RATE_INVALID`]
    #[must_use]
    pub fn current_heart_rate(&self) -> i32 {
        self.heart_rate.last_rate().unwrap_or(HEART_RATE_INVALID)
    }

    /// Last valid SpO2 percentage, or [`SPO2_INVALID`]
    #[must_use]
    pub fn current_spo2(&self) -> f32 {
        self.spo2.last_value().unwrap_or(SPO2_INVALID)
    }

    /// Whether the most recent IR sample is at or above the finger threshold
    ///
    /// False while no optical sample has been stored.
    #[must_use]
    pub fn is_finger_present(&self) -> bool {
        self.window
            .last()
            .is_some_and(|sample| sample.ir >= self.optical_config.finger_threshold)
    }

    /// The installed gyro bias
    #[must_use]
    pub fn gyro_bias(&self) -> GyroBias {
        self.filter.bias()
    }

    /// Clear every buffer, history, angle and cached value
    ///
    /// The gyro bias survives; use [`recalibrate`](VitalsMonitor::recalibrate)
    /// to recompute it.
    pub fn reset(&mut self) {
        self.clear_optical();
        self.filter.reset();
    }

    /// Reset and recompute the gyro bias
    ///
    /// # Errors
    ///
    /// Same conditions as [`begin`](VitalsMonitor::begin); on a failed read
    /// the previous bias stays installed but buffers are already cleared.
    pub fn recalibrate<D: DelayNs>(
        &mut self,
        samples: u16,
        delay: &mut D,
    ) -> Result<(), Error<M::Error>> {
        self.reset();
        let bias = compute_gyro_bias(&mut self.motion_source, samples, delay)?;
        self.filter.set_bias(bias);
        Ok(())
    }

    /// Consume the monitor and return the provider handles
    pub fn release(self) -> (O, M) {
        (self.optical_source, self.motion_source)
    }

    fn clear_optical(&mut self) {
        self.window.reset();
        self.optical_pushes = 0;
        self.heart_rate.reset();
        self.spo2.reset();
    }
}
