//! Orientation estimation from accelerometer/gyroscope samples
//!
//! A one-shot averaging calibration produces the gyro bias; the
//! [`OrientationFilter`] then fuses bias-corrected gyro integration with
//! accelerometer-derived tilt through a complementary blend whose coefficient
//! adapts to the measured acceleration magnitude.

pub mod calibration;
pub mod orientation;

pub use calibration::{
    CALIBRATION_INTERVAL_US, DEFAULT_CALIBRATION_SAMPLES, GyroBias, compute_gyro_bias,
};
pub use orientation::{FilterConfig, OrientationFilter, SmoothedAngles};
