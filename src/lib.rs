#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod accumulator;
pub mod calibration;
pub mod command;
pub mod device;
pub mod frame;
pub mod interface;
pub mod registers;
pub mod telemetry;

// Re-export main types
pub use accumulator::{Accumulator, AccumulatorConfig, SampleAccumulator, SharedSampleAccumulator};
pub use calibration::CalibrationConfig;
pub use command::{CommandWord, calc_parity};
pub use device::{Adxrs450, DriverState};
pub use frame::ResponseFrame;
pub use interface::{BUS_CONFIG, BitOrder, BusConfig, ClockPolarity, SampleEdge, SpiInterface};
pub use telemetry::{Port, SensorDescriptor, TelemetryRegistry};

/// Expected high byte of the `PID` register for an ADXRS450
pub const PART_ID_VALUE: u8 = 0x52;

/// Rate scale factor in °/s per LSB
pub const DEGREES_PER_SECOND_PER_LSB: f64 = 0.0125;

/// Device registers
///
/// The address is the 7-bit field placed in bits 17..=23 of the command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Rate output
    Rate = 0x00,
    /// Temperature
    Temperature = 0x02,
    /// Low continuous self-test
    LowSelfTest = 0x04,
    /// High continuous self-test
    HighSelfTest = 0x06,
    /// Quadrature
    Quadrature = 0x08,
    /// Fault flags
    Fault = 0x0A,
    /// Part identification
    PartId = 0x0C,
    /// Serial number, upper 16 bits
    SerialNumberHigh = 0x0E,
    /// Serial number, lower 16 bits
    SerialNumberLow = 0x10,
}

impl Register {
    /// Every register, in address order
    pub const ALL: [Self; 9] = [
        Self::Rate,
        Self::Temperature,
        Self::LowSelfTest,
        Self::HighSelfTest,
        Self::Quadrature,
        Self::Fault,
        Self::PartId,
        Self::SerialNumberHigh,
        Self::SerialNumberLow,
    ];

    /// Register address
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Look up a register by address
    #[must_use]
    pub const fn from_address(address: u8) -> Option<Self> {
        match address {
            0x00 => Some(Self::Rate),
            0x02 => Some(Self::Temperature),
            0x04 => Some(Self::LowSelfTest),
            0x06 => Some(Self::HighSelfTest),
            0x08 => Some(Self::Quadrature),
            0x0A => Some(Self::Fault),
            0x0C => Some(Self::PartId),
            0x0E => Some(Self::SerialNumberHigh),
            0x10 => Some(Self::SerialNumberLow),
            _ => None,
        }
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.address()
    }
}

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `PID` register value (contains the full 16-bit value read)
    InvalidDevice(u16),
    /// Write attempted on the read-only register map
    ReadOnly,
    /// Register address outside the device register map
    InvalidRegister(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
