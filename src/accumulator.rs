//! Sample accumulator model
//!
//! The platform samples the rate register continuously in the background,
//! subtracts a programmable center from each sample and keeps a running sum.
//! The driver never integrates on its own; it reads snapshots of that state
//! through the [`Accumulator`] trait and converts them to physical units.
//!
//! [`SampleAccumulator`] is a reference implementation for platforms that
//! drive the sampling from a timer interrupt or task: feed it each raw
//! response frame with [`SampleAccumulator::push_frame`]. To share it
//! between that task and the driver, put it in a
//! [`SharedSampleAccumulator`] and hand the driver a reference.

use crate::DEGREES_PER_SECOND_PER_LSB;
use core::cell::RefCell;
use critical_section::Mutex;

/// Fixed sampling and extraction parameters for the background accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccumulatorConfig {
    /// Seconds between samples
    pub sample_period: f64,
    /// Command word sent for each sample
    pub command: u32,
    /// Bytes per transfer
    pub transfer_size: u8,
    /// Bits checked to accept a sample
    pub valid_mask: u32,
    /// Required value of the masked bits
    pub valid_value: u32,
    /// Position of the data field
    pub data_shift: u8,
    /// Width of the data field in bits
    pub data_size: u8,
    /// Data field is two's complement
    pub is_signed: bool,
    /// Transfer is big-endian
    pub big_endian: bool,
    /// Center applied at enable time
    pub initial_center: i32,
}

impl AccumulatorConfig {
    /// Parameters for the ADXRS450 rate channel
    ///
    /// The command requests sensor data (`SQ1` set) and a sample is valid
    /// when the status bits read as a sensor-data response.
    pub const ADXRS450: Self = Self {
        sample_period: 0.001,
        command: 0x2000_0000,
        transfer_size: 4,
        valid_mask: 0x0C00_000E,
        valid_value: 0x0400_0000,
        data_shift: 10,
        data_size: 16,
        is_signed: true,
        big_endian: true,
        initial_center: 0,
    };

    /// Extract the data field from a raw transfer word
    ///
    /// Returns `None` if the word fails the validity check or the data
    /// field starts past the end of the word.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn extract(&self, word: u32) -> Option<i32> {
        if word & self.valid_mask != self.valid_value {
            return None;
        }
        let Some(shifted) = word.checked_shr(self.data_shift as u32) else {
            return None;
        };
        let mask = if self.data_size >= 32 {
            u32::MAX
        } else {
            (1u32 << self.data_size) - 1
        };
        let data = shifted & mask;
        if self.is_signed && self.data_size > 0 && self.data_size < 32 {
            let unused = 32 - self.data_size as u32;
            Some(((data << unused) as i32) >> unused)
        } else {
            Some(data as i32)
        }
    }
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self::ADXRS450
    }
}

/// Running sum of center-corrected rate samples
///
/// Implementations are snapshots of state updated elsewhere; reads may lag
/// the newest sample by up to one sample period.
pub trait Accumulator {
    /// Enable accumulation with the given parameters
    fn init(&mut self, config: &AccumulatorConfig);

    /// Set the value subtracted from every future sample
    fn set_center(&mut self, center: i32);

    /// Zero the running sum and sample count, keeping the center
    fn reset(&mut self);

    /// Running sum since the last reset
    fn value(&self) -> i64;

    /// Most recent center-corrected sample
    fn last_value(&self) -> i32;

    /// Number of samples since the last reset
    fn count(&self) -> u32;

    /// Mean sample since the last reset, 0.0 if nothing was accumulated
    fn average(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let sum = self.value() as f64;
        sum / f64::from(count)
    }
}

impl<A: Accumulator + ?Sized> Accumulator for &mut A {
    fn init(&mut self, config: &AccumulatorConfig) {
        (**self).init(config);
    }

    fn set_center(&mut self, center: i32) {
        (**self).set_center(center);
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn value(&self) -> i64 {
        (**self).value()
    }

    fn last_value(&self) -> i32 {
        (**self).last_value()
    }

    fn count(&self) -> u32 {
        (**self).count()
    }

    fn average(&self) -> f64 {
        (**self).average()
    }
}

/// Integrated angle in degrees for an accumulated sum
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn angle_degrees(value: i64, sample_period: f64) -> f32 {
    (value as f64 * DEGREES_PER_SECOND_PER_LSB * sample_period) as f32
}

/// Rotation rate in °/s for a single sample
#[must_use]
pub fn rate_degrees_per_second(last_value: i32) -> f64 {
    f64::from(last_value) * DEGREES_PER_SECOND_PER_LSB
}

/// Software accumulator fed with raw sample frames
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleAccumulator {
    config: Option<AccumulatorConfig>,
    center: i32,
    value: i64,
    count: u32,
    last_value: i32,
    rejected: u32,
}

impl SampleAccumulator {
    /// Create a disabled accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: None,
            center: 0,
            value: 0,
            count: 0,
            last_value: 0,
            rejected: 0,
        }
    }

    /// Active configuration, `None` until enabled
    #[must_use]
    pub const fn config(&self) -> Option<&AccumulatorConfig> {
        self.config.as_ref()
    }

    /// `true` once [`Accumulator::init`] has run
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Current center
    #[must_use]
    pub const fn center(&self) -> i32 {
        self.center
    }

    /// Frames dropped by the validity check since enable
    #[must_use]
    pub const fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Accumulate one raw transfer
    ///
    /// Frames shorter than the configured transfer size, or that fail the
    /// validity check, are dropped. Ignored while disabled.
    pub fn push_frame(&mut self, frame: &[u8]) {
        let Some(config) = self.config else {
            return;
        };
        let size = usize::from(config.transfer_size).min(4);
        if frame.len() < size {
            self.rejected = self.rejected.wrapping_add(1);
            return;
        }

        let word = frame[..size].iter().enumerate().fold(0u32, |acc, (i, &b)| {
            if config.big_endian {
                (acc << 8) | u32::from(b)
            } else {
                acc | (u32::from(b) << (8 * i))
            }
        });

        match config.extract(word) {
            Some(data) => self.push_sample(data),
            None => self.rejected = self.rejected.wrapping_add(1),
        }
    }

    /// Accumulate one already-extracted sample
    ///
    /// Ignored while disabled.
    pub fn push_sample(&mut self, data: i32) {
        if self.config.is_none() {
            return;
        }
        let corrected = data.wrapping_sub(self.center);
        self.value += i64::from(corrected);
        self.count = self.count.wrapping_add(1);
        self.last_value = corrected;
    }
}

impl Accumulator for SampleAccumulator {
    fn init(&mut self, config: &AccumulatorConfig) {
        self.config = Some(*config);
        self.center = config.initial_center;
        self.value = 0;
        self.count = 0;
        self.last_value = 0;
        self.rejected = 0;
    }

    fn set_center(&mut self, center: i32) {
        self.center = center;
    }

    fn reset(&mut self) {
        self.value = 0;
        self.count = 0;
        self.last_value = 0;
    }

    fn value(&self) -> i64 {
        self.value
    }

    fn last_value(&self) -> i32 {
        self.last_value
    }

    fn count(&self) -> u32 {
        self.count
    }
}

/// [`SampleAccumulator`] behind a critical-section mutex
///
/// Lives in a `static` so a timer interrupt can feed it while the driver
/// holds a `&SharedSampleAccumulator` as its accumulator.
///
/// ```ignore
/// static GYRO_SAMPLES: SharedSampleAccumulator = SharedSampleAccumulator::new();
///
/// // Timer interrupt, every millisecond
/// GYRO_SAMPLES.push_frame(&response);
///
/// let gyro = Adxrs450::new(spi_device, &GYRO_SAMPLES, &mut delay)?;
/// ```
pub struct SharedSampleAccumulator {
    inner: Mutex<RefCell<SampleAccumulator>>,
}

impl SharedSampleAccumulator {
    /// Create a disabled accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SampleAccumulator::new())),
        }
    }

    /// Run `f` with the accumulator locked
    pub fn with<R>(&self, f: impl FnOnce(&mut SampleAccumulator) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Accumulate one raw transfer, see [`SampleAccumulator::push_frame`]
    pub fn push_frame(&self, frame: &[u8]) {
        self.with(|acc| acc.push_frame(frame));
    }

    /// Accumulate one extracted sample, see [`SampleAccumulator::push_sample`]
    pub fn push_sample(&self, data: i32) {
        self.with(|acc| acc.push_sample(data));
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> SampleAccumulator {
        self.with(|acc| acc.clone())
    }
}

impl Default for SharedSampleAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for &SharedSampleAccumulator {
    fn init(&mut self, config: &AccumulatorConfig) {
        self.with(|acc| acc.init(config));
    }

    fn set_center(&mut self, center: i32) {
        self.with(|acc| acc.set_center(center));
    }

    fn reset(&mut self) {
        self.with(SampleAccumulator::reset);
    }

    fn value(&self) -> i64 {
        self.with(|acc| acc.value())
    }

    fn last_value(&self) -> i32 {
        self.with(|acc| acc.last_value())
    }

    fn count(&self) -> u32 {
        self.with(|acc| acc.count())
    }

    fn average(&self) -> f64 {
        self.with(|acc| acc.average())
    }
}
