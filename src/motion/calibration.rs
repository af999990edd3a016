//! Gyroscope bias calibration
//!
//! MEMS gyroscopes report a non-zero rate even when perfectly still. The bias
//! is measured once at startup by averaging a fixed number of readings taken
//! at a fast cadence, and subtracted from every subsequent sample. The device
//! must be stationary for the duration; the routine is intentionally blocking
//! since nothing downstream is meaningful before it completes.

use crate::source::{GyroSample, MotionSource};
use crate::Error;
use embedded_hal::delay::DelayNs;

/// Default number of readings averaged into the bias
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 1000;

/// Pause between calibration readings in microseconds
pub const CALIBRATION_INTERVAL_US: u32 = 1000;

/// Per-axis gyro offset in °/s, subtracted from every reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroBias {
    /// X-axis offset in °/s
    pub x: f32,
    /// Y-axis offset in °/s
    pub y: f32,
    /// Z-axis offset in °/s
    pub z: f32,
}

impl GyroBias {
    /// Subtract the bias from a raw gyro sample
    #[must_use]
    pub fn apply(&self, raw: GyroSample) -> GyroSample {
        GyroSample {
            x: raw.x - self.x,
            y: raw.y - self.y,
            z: raw.z - self.z,
        }
    }
}

/// Measure the gyro bias by averaging `samples` readings
///
/// No accelerometer bias is computed - the tilt derivation is referenced to
/// gravity and assumed zeroed by device mounting.
///
/// # Arguments
///
/// * `source` - the motion provider to sample
/// * `samples` - number of readings to average (more samples = better accuracy)
/// * `delay` - delay provider pacing the sampling loop
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for `samples == 0`, or [`Error::Source`]
/// if any read fails. A failed read aborts calibration rather than folding a
/// bad sample into the average.
pub fn compute_gyro_bias<M, D>(
    source: &mut M,
    samples: u16,
    delay: &mut D,
) -> Result<GyroBias, Error<M::Error>>
where
    M: MotionSource,
    D: DelayNs,
{
    if samples == 0 {
        return Err(Error::InvalidConfig);
    }

    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut sum_z = 0.0f32;

    for _ in 0..samples {
        let reading = source.read_gyro()?;
        sum_x += reading.x;
        sum_y += reading.y;
        sum_z += reading.z;
        delay.delay_us(CALIBRATION_INTERVAL_US);
    }

    let n = f32::from(samples);
    let bias = GyroBias {
        x: sum_x / n,
        y: sum_y / n,
        z: sum_z / n,
    };

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "gyro bias from {} samples: x={} y={} z={}",
        samples,
        bias.x,
        bias.y,
        bias.z
    );

    Ok(bias)
}
