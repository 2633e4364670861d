//! Startup bias calibration
//!
//! The gyro must be stationary for the whole sampling window. Movement during
//! the window is not detected; it shows up as a wrong center and a drifting
//! heading afterwards.

use crate::accumulator::Accumulator;

/// Calibration timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    /// Settling time before sampling starts, in milliseconds
    pub settle_ms: u32,
    /// Length of the averaging window, in milliseconds
    pub window_ms: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            window_ms: 5000,
        }
    }
}

/// Measure the zero-rate bias and apply it as the accumulator center
///
/// Blocks on `delay` for `settle_ms + window_ms`. On return the running sum is
/// zero and every new sample is corrected by the returned center.
pub fn calibrate<A, D>(accumulator: &mut A, delay: &mut D, config: &CalibrationConfig) -> i32
where
    A: Accumulator + ?Sized,
    D: embedded_hal::delay::DelayNs,
{
    delay.delay_ms(config.settle_ms);

    accumulator.set_center(0);
    accumulator.reset();

    delay.delay_ms(config.window_ms);

    // `as` truncates toward zero and saturates at the i32 bounds
    #[allow(clippy::cast_possible_truncation)]
    let center = accumulator.average() as i32;

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "Calibration: {} samples, center {}",
        accumulator.count(),
        center
    );

    accumulator.set_center(center);
    accumulator.reset();

    center
}
