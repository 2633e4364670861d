//! Telemetry registration
//!
//! The driver does not register itself anywhere. The composing application
//! takes a [`SensorDescriptor`] from the driver and hands it to whatever
//! registry it uses.

/// SPI chip-select the gyro is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Onboard chip select 0 (default)
    #[default]
    OnboardCs0,
    /// Onboard chip select 1
    OnboardCs1,
    /// Onboard chip select 2
    OnboardCs2,
    /// Onboard chip select 3
    OnboardCs3,
    /// Expansion port
    Mxp,
}

/// Identity of a constructed sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorDescriptor {
    /// Sensor type name
    pub name: &'static str,
    /// Port the sensor is attached to
    pub port: Port,
}

impl SensorDescriptor {
    /// Type name reported for this driver
    pub const NAME: &'static str = "ADXRS450_Gyro";

    /// Descriptor for a gyro on `port`
    #[must_use]
    pub const fn new(port: Port) -> Self {
        Self {
            name: Self::NAME,
            port,
        }
    }
}

/// A sink that tracks constructed sensors
pub trait TelemetryRegistry {
    /// Record a sensor
    fn add_sensor(&mut self, descriptor: SensorDescriptor);
}
