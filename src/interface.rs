//! SPI bus interface for the ADXRS450
//!
//! This module implements the `device-driver` register interface on top of
//! the framed command/response protocol.

use crate::command::CommandWord;
use crate::frame::ResponseFrame;
use crate::{Error, Register};
use device_driver::RegisterInterface;
use embedded_hal::spi::{MODE_0, MODE_1, MODE_2, MODE_3, Mode};

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// Clock edge on which data is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleEdge {
    /// Sample on the rising edge
    Rising,
    /// Sample on the falling edge
    Falling,
}

/// Clock level while the bus is idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockPolarity {
    /// Clock idles low
    IdleLow,
    /// Clock idles high
    IdleHigh,
}

/// SPI bus settings required by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Clock frequency in Hz
    pub clock_hz: u32,
    /// Bit order
    pub bit_order: BitOrder,
    /// Data sampling edge
    pub sample_edge: SampleEdge,
    /// Clock idle level
    pub clock_polarity: ClockPolarity,
    /// Chip select is active low
    pub chip_select_active_low: bool,
}

impl BusConfig {
    /// The equivalent `embedded-hal` SPI mode
    ///
    /// The data is sampled on the leading edge for phase 0 and on the
    /// trailing edge for phase 1. With an idle-high clock the leading edge
    /// falls.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match (self.clock_polarity, self.sample_edge) {
            (ClockPolarity::IdleLow, SampleEdge::Rising) => MODE_0,
            (ClockPolarity::IdleLow, SampleEdge::Falling) => MODE_1,
            (ClockPolarity::IdleHigh, SampleEdge::Falling) => MODE_2,
            (ClockPolarity::IdleHigh, SampleEdge::Rising) => MODE_3,
        }
    }
}

/// Bus settings for the ADXRS450
///
/// `embedded-hal` SPI devices fix their mode and frequency when they are
/// created, so build the device with [`BusConfig::mode`] and
/// [`BusConfig::clock_hz`] before handing it to the driver.
pub const BUS_CONFIG: BusConfig = BusConfig {
    clock_hz: 3_000_000,
    bit_order: BitOrder::MsbFirst,
    sample_edge: SampleEdge::Rising,
    clock_polarity: ClockPolarity::IdleHigh,
    chip_select_active_low: true,
};

/// SPI interface for the ADXRS450
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which manages
/// the chip select (CS) pin automatically. Each register read is two separate
/// chip-select frames: the 4-byte command, then the 4-byte response.
///
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    /// Send a command word and read back the raw response frame
    ///
    /// # Errors
    ///
    /// Returns an error if the SPI transfer fails.
    pub fn exchange(&mut self, command: CommandWord) -> Result<ResponseFrame, Error<E>> {
        let mut buf = command.to_be_bytes();
        self.spi.write(&buf).map_err(Error::Bus)?;
        self.spi.read(&mut buf).map_err(Error::Bus)?;
        Ok(ResponseFrame::new(buf))
    }

    /// Read a register, returning 0 if the device reported a frame error
    ///
    /// # Errors
    ///
    /// Returns an error if the SPI transfer fails.
    pub fn read(&mut self, register: Register) -> Result<u16, Error<E>> {
        let frame = self.exchange(CommandWord::read(register))?;
        if frame.is_error() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Frame error reading {}: {}", register, frame);
        }
        Ok(frame.value())
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let register = Register::from_address(address).ok_or(Error::InvalidRegister(address))?;
        let value = self.read(register)?;

        let bytes = value.to_be_bytes();
        let len = read_data.len().min(bytes.len());
        read_data[..len].copy_from_slice(&bytes[..len]);
        Ok(())
    }

    fn write_register(
        &mut self,
        _address: Self::AddressType,
        _size_bits: u32,
        _write_data: &[u8],
    ) -> Result<(), Self::Error> {
        Err(Error::ReadOnly)
    }
}
