//! Complementary orientation filter with motion-adaptive blending
//!
//! Gyro integration is smooth but drifts; accelerometer tilt is drift-free
//! but noisy. Each tick blends the two with a coefficient derived from the
//! measured acceleration magnitude. Z has no gravity reference and stays
//! gyro-only.

use crate::motion::calibration::GyroBias;
use crate::source::{AccelSample, GyroSample};

const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Complementary filter tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterConfig {
    /// Blend coefficient applied when the acceleration magnitude is 1g
    pub alpha_start: f32,
    /// Lower clamp for the blend coefficient
    pub alpha_min: f32,
    /// Magnitude departure from 1g (in g) that drives the coefficient from
    /// `alpha_start` down to `alpha_min`
    pub motion_threshold: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            alpha_start: 0.8,
            alpha_min: 0.1,
            motion_threshold: 0.1,
        }
    }
}

impl FilterConfig {
    /// Compute the blend coefficient for a given acceleration magnitude
    ///
    /// Weights the gyro term of the blend: at exactly 1g the result is
    /// `alpha_start`, and it slides linearly toward `alpha_min` as the
    /// magnitude exceeds 1g by up to `motion_threshold`. Magnitudes below 1g
    /// clamp back to `alpha_start`. This mapping is deliberate tuning carried
    /// from the deployed device; changing its direction changes which sensor
    /// is trusted under motion.
    #[must_use]
    pub fn blend_coefficient(&self, accel_magnitude: f32) -> f32 {
        let raw = self.alpha_start
            + (self.alpha_min - self.alpha_start) * (accel_magnitude - 1.0) / self.motion_threshold;
        raw.clamp(self.alpha_min, self.alpha_start)
    }
}

/// Fused orientation state in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmoothedAngles {
    /// Rotation about the X axis in degrees
    pub x: f32,
    /// Rotation about the Y axis in degrees
    pub y: f32,
    /// Rotation about the Z axis in degrees
    pub z: f32,
}

/// Per-tick complementary filter over accel/gyro samples
///
/// Consumes one `(accel, gyro, dt)` tuple per tick and maintains the smoothed
/// angle triple. The gyro bias must be set (via
/// [`set_bias`](OrientationFilter::set_bias)) before readings are meaningful;
/// an unset bias behaves as zero correction.
#[derive(Debug, Clone, Default)]
pub struct OrientationFilter {
    config: FilterConfig,
    bias: GyroBias,
    smoothed: SmoothedAngles,
    // Pure gyro integration per axis; Z is surfaced directly from here.
    integrated: [f32; 3],
}

impl OrientationFilter {
    /// Create a filter with the given tuning and zero bias
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Install a calibrated gyro bias
    pub fn set_bias(&mut self, bias: GyroBias) {
        self.bias = bias;
    }

    /// The currently installed gyro bias
    #[must_use]
    pub fn bias(&self) -> GyroBias {
        self.bias
    }

    /// The filter tuning
    #[must_use]
    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Current fused orientation
    #[must_use]
    pub fn angles(&self) -> SmoothedAngles {
        self.smoothed
    }

    /// Advance the filter by one sample
    ///
    /// `dt` is the time since the previous sample in seconds and must be
    /// strictly positive; non-positive ticks are ignored.
    pub fn update(&mut self, accel: AccelSample, gyro: GyroSample, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let gyro = self.bias.apply(gyro);

        // Gravity gives tilt about X and Y only; Z is unobservable from the
        // accelerometer.
        let accel_angle_x = libm::atan2f(
            accel.y,
            libm::sqrtf(accel.x * accel.x + accel.z * accel.z),
        ) * RAD_TO_DEG;
        let accel_angle_y = libm::atan2f(
            -accel.x,
            libm::sqrtf(accel.y * accel.y + accel.z * accel.z),
        ) * RAD_TO_DEG;

        self.integrated[0] += gyro.x * dt;
        self.integrated[1] += gyro.y * dt;
        self.integrated[2] += gyro.z * dt;

        let alpha = self.config.blend_coefficient(accel.magnitude());

        self.smoothed.x =
            alpha * (self.smoothed.x + gyro.x * dt) + (1.0 - alpha) * accel_angle_x;
        self.smoothed.y =
            alpha * (self.smoothed.y + gyro.y * dt) + (1.0 - alpha) * accel_angle_y;
        self.smoothed.z = self.integrated[2];
    }

    /// Zero the smoothed and integrated angles, keeping the bias
    ///
    /// Recalibration is a separate explicit step; see
    /// [`VitalsMonitor::recalibrate`](crate::VitalsMonitor::recalibrate).
    pub fn reset(&mut self) {
        self.smoothed = SmoothedAngles::default();
        self.integrated = [0.0; 3];
    }
}
