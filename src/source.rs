//! Sensor-provider capability traits
//!
//! The estimators never touch hardware registers. They hold a handle to a
//! provider implementing one of these traits - typically a thin adapter over
//! the vendor driver for a MAX3010x optical front end or an MPU-6050 class
//! IMU. Tests substitute in-memory mocks for the same traits.

/// Provider of digitized red/infrared pulse-oximetry readings
///
/// Values are unit-less ADC counts. `read_ir` alone drives finger presence
/// and peak timing; both channels feed the SpO2 ratio.
pub trait OpticalSource {
    /// Provider error type
    type Error;

    /// Read the latest red-LED sample
    fn read_red(&mut self) -> Result<i32, Self::Error>;

    /// Read the latest infrared-LED sample
    fn read_ir(&mut self) -> Result<i32, Self::Error>;
}

/// Provider of digitized accelerometer/gyroscope readings
pub trait MotionSource {
    /// Provider error type
    type Error;

    /// Read one accelerometer triple in units of g
    fn read_accel(&mut self) -> Result<AccelSample, Self::Error>;

    /// Read one gyroscope triple in degrees per second
    fn read_gyro(&mut self) -> Result<GyroSample, Self::Error>;
}

/// One accelerometer reading in units of g
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelSample {
    /// Create a sample from per-axis values in g
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Magnitude of the acceleration vector in g
    ///
    /// Close to 1.0 when the device is at rest; departs from 1.0 under
    /// linear acceleration.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// One gyroscope reading in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroSample {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroSample {
    /// Create a sample from per-axis rates in °/s
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Magnitude of the rotation rate vector in °/s
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
