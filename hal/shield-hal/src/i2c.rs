//! Two-wire (I2C) bus abstraction
//!
//! The shield only ever writes to its I2C peripherals, so the trait is
//! limited to bus start-up and addressed writes.

/// I2C bus master
pub trait TwoWireBus {
    /// Error type for I2C operations
    type Error;

    /// Bring up the bus peripheral at the given clock
    ///
    /// Called once, before the first transaction. Platforms whose bus is
    /// already running can keep the default no-op.
    fn begin(&mut self, _config: I2cConfig) {}

    /// Write a complete transaction to a device
    ///
    /// Equivalent to begin-transmission, one write per byte, then
    /// end-transmission. Blocks until the stop condition has been sent.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address (the R/W bit is added by the bus)
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: TwoWireBus + ?Sized> TwoWireBus for &mut T {
    type Error = T::Error;

    fn begin(&mut self, config: I2cConfig) {
        T::begin(self, config)
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };
}
