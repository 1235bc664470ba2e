//! Adapters from `embedded-hal` 1.0 buses
//!
//! Lets any platform with an `embedded-hal` I2C or SPI implementation
//! drive the shield without writing its own [`TwoWireBus`] or
//! [`FourWireBus`].

use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiBus;

use crate::i2c::TwoWireBus;
use crate::spi::{wire_to_word, word_to_wire, FourWireBus, SpiSettings};

/// [`TwoWireBus`] over an `embedded_hal::i2c::I2c` master
#[derive(Debug)]
pub struct I2cAdapter<I2C> {
    i2c: I2C,
}

impl<I2C> I2cAdapter<I2C> {
    /// Wrap an already configured I2C master
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the I2C master back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> TwoWireBus for I2cAdapter<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data)
    }
}

/// [`FourWireBus`] over an `embedded_hal::spi::SpiBus<u8>`
///
/// `embedded-hal` buses carry their clock and mode from construction, so
/// only the bit order of [`SpiSettings`] is applied here. The platform
/// configures the bus with [`bus_mode`](Self::bus_mode) and
/// [`settings`](Self::settings).
#[derive(Debug)]
pub struct SpiAdapter<SPI> {
    spi: SPI,
    settings: SpiSettings,
}

impl<SPI> SpiAdapter<SPI> {
    /// Wrap an already configured SPI bus
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            settings: SpiSettings::default(),
        }
    }

    /// Settings of the current (or last) transaction
    pub fn settings(&self) -> SpiSettings {
        self.settings
    }

    /// Clock mode the bus must run in for the current transaction
    pub fn bus_mode(&self) -> embedded_hal::spi::Mode {
        self.settings.mode.into()
    }

    /// Give the SPI bus back
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> FourWireBus for SpiAdapter<SPI> {
    type Error = SPI::Error;

    fn begin_transaction(&mut self, settings: SpiSettings) {
        self.settings = settings;
    }

    fn transfer16(&mut self, word: u16) -> Result<u16, Self::Error> {
        let bit_order = self.settings.bit_order;
        let write = word_to_wire(word, bit_order);
        let mut read = [0u8; 2];
        self.spi.transfer(&mut read, &write)?;
        // Chip select is released right after this returns
        self.spi.flush()?;
        Ok(wire_to_word(read, bit_order))
    }

    fn end_transaction(&mut self) {}
}
