//! High-level driver API for the ADXRS450
//!
//! Construction walks the device through a fixed sequence:
//!
//! ```text
//! Unconfigured -> BusConfigured -> IdentityChecked -> AccumulatorReady -> Calibrated
//!                                \-> IdentityRejected
//! ```
//!
//! Heading and rate queries read the background accumulator and are only
//! meaningful once the driver is [`DriverState::Calibrated`].

use crate::accumulator::{self, Accumulator, AccumulatorConfig};
use crate::calibration::{self, CalibrationConfig};
use crate::interface::SpiInterface;
use crate::registers::Adxrs450Registers as RegisterDevice;
use crate::telemetry::{Port, SensorDescriptor};
use crate::{Error, PART_ID_VALUE, Register};

/// Construction progress of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Nothing done yet
    Unconfigured,
    /// SPI bus handed over with the required settings
    BusConfigured,
    /// Part ID matched
    IdentityChecked,
    /// Background accumulator enabled
    AccumulatorReady,
    /// Bias center measured and applied
    Calibrated,
    /// Part ID did not match; the accumulator was never enabled
    IdentityRejected {
        /// Full `PID` register value that was read
        part_id: u16,
    },
}

/// Main driver for the ADXRS450
pub struct Adxrs450<SPI, A> {
    device: RegisterDevice<SpiInterface<SPI>>,
    accumulator: A,
    config: AccumulatorConfig,
    port: Port,
    state: DriverState,
    center: i32,
}

impl<SPI, A, E> Adxrs450<SPI, A>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
    A: Accumulator,
{
    /// Create and calibrate a gyro on the default port
    ///
    /// The SPI device must be configured per [`BUS_CONFIG`](crate::BUS_CONFIG). The gyro has to
    /// stay still for the calibration window (about 5.1 s).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `PID` register does not identify an ADXRS450
    pub fn new<D>(spi: SPI, accumulator: A, delay: &mut D) -> Result<Self, Error<E>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        Self::new_with_port(spi, accumulator, Port::default(), delay)
    }

    /// Create and calibrate a gyro on `port`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `PID` register does not identify an ADXRS450
    pub fn new_with_port<D>(
        spi: SPI,
        accumulator: A,
        port: Port,
        delay: &mut D,
    ) -> Result<Self, Error<E>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let driver = Self::new_tolerant(spi, accumulator, port, delay)?;
        if let DriverState::IdentityRejected { part_id } = driver.state {
            return Err(Error::InvalidDevice(part_id));
        }
        Ok(driver)
    }

    /// Create a gyro that survives a part-ID mismatch
    ///
    /// On a mismatch the driver is returned in
    /// [`DriverState::IdentityRejected`] with the accumulator untouched, so a
    /// larger control program can keep running without the heading. Check
    /// [`state`](Self::state) before trusting [`angle`](Self::angle).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn new_tolerant<D>(
        spi: SPI,
        accumulator: A,
        port: Port,
        delay: &mut D,
    ) -> Result<Self, Error<E>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let mut driver = Self {
            device: RegisterDevice::new(SpiInterface::new(spi)),
            accumulator,
            config: AccumulatorConfig::ADXRS450,
            port,
            state: DriverState::Unconfigured,
            center: 0,
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("ADXRS450 on {}: bus {}", port, crate::interface::BUS_CONFIG);
        driver.state = DriverState::BusConfigured;

        let part_id = driver.read_part_id()?;
        if part_id.to_be_bytes()[0] != PART_ID_VALUE {
            #[cfg(feature = "defmt")]
            defmt::error!("could not find ADXRS450 gyro (PID {=u16:#x})", part_id);
            driver.state = DriverState::IdentityRejected { part_id };
            return Ok(driver);
        }
        driver.state = DriverState::IdentityChecked;

        driver.accumulator.init(&driver.config);
        driver.state = DriverState::AccumulatorReady;

        driver.calibrate(delay);

        Ok(driver)
    }

    /// Re-measure the bias center
    ///
    /// The gyro must be stationary. Blocks for the full calibration window and
    /// leaves the heading at zero. Returns the applied center.
    pub fn calibrate<D>(&mut self, delay: &mut D) -> i32
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.calibrate_with(delay, &CalibrationConfig::default())
    }

    /// Re-measure the bias center with custom timing
    pub fn calibrate_with<D>(&mut self, delay: &mut D, config: &CalibrationConfig) -> i32
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.center = calibration::calibrate(&mut self.accumulator, delay, config);
        if matches!(
            self.state,
            DriverState::AccumulatorReady | DriverState::Calibrated
        ) {
            self.state = DriverState::Calibrated;
        }
        self.center
    }

    /// Read a register
    ///
    /// Returns 0 when the device flags a frame error; a genuine zero and a
    /// frame error are indistinguishable here.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, register: Register) -> Result<u16, Error<E>> {
        self.device.interface.read(register)
    }

    /// Read the full `PID` register
    ///
    /// The high byte is the part ID (0x52), the low byte the revision.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_part_id(&mut self) -> Result<u16, Error<E>> {
        let pid = self.device.pid().read()?;
        Ok(u16::from_be_bytes([pid.part_id(), pid.revision()]))
    }

    /// Read the 32-bit serial number
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn serial_number(&mut self) -> Result<u32, Error<E>> {
        let high = self.device.sn_high().read()?.value();
        let low = self.device.sn_low().read()?.value();
        Ok((u32::from(high) << 16) | u32::from(low))
    }

    /// Read the raw rate register directly, bypassing the accumulator
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_rate_raw(&mut self) -> Result<i16, Error<E>> {
        let rate = self.device.rate().read()?;
        Ok(rate.rate() as i16)
    }

    /// Read the raw 10-bit temperature field
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_raw(&mut self) -> Result<u16, Error<E>> {
        let tem = self.device.tem().read()?;
        Ok(tem.temperature())
    }

    /// Read the fault flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_fault(&mut self) -> Result<u16, Error<E>> {
        Ok(self.device.fault().read()?.flags())
    }

    /// Zero the heading, keeping the bias center
    pub fn reset(&mut self) {
        self.accumulator.reset();
    }

    /// Heading in degrees
    ///
    /// The angle is continuous: it carries on from 360 to 361 rather than
    /// wrapping back to 0.
    #[must_use]
    pub fn angle(&self) -> f32 {
        accumulator::angle_degrees(self.accumulator.value(), self.config.sample_period)
    }

    /// Rotation rate in °/s, from the most recent sample
    #[must_use]
    pub fn rate(&self) -> f64 {
        accumulator::rate_degrees_per_second(self.accumulator.last_value())
    }
}

impl<SPI, A> Adxrs450<SPI, A> {
    /// Construction progress
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// `true` once the bias center has been applied
    pub const fn is_calibrated(&self) -> bool {
        matches!(self.state, DriverState::Calibrated)
    }

    /// Port the gyro is attached to
    pub const fn port(&self) -> Port {
        self.port
    }

    /// Bias center applied by the last calibration
    pub const fn center(&self) -> i32 {
        self.center
    }

    /// Accumulator parameters in use
    pub const fn accumulator_config(&self) -> &AccumulatorConfig {
        &self.config
    }

    /// Identity to hand to a [`TelemetryRegistry`](crate::TelemetryRegistry)
    pub const fn descriptor(&self) -> SensorDescriptor {
        SensorDescriptor::new(self.port)
    }

    /// Get a reference to the accumulator
    pub const fn accumulator(&self) -> &A {
        &self.accumulator
    }

    /// Consume the driver and return the SPI device and accumulator
    pub fn release(self) -> (SPI, A) {
        (self.device.interface.release(), self.accumulator)
    }
}
