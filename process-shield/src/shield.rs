//! The process shield driver
//!
//! [`ProcessShield`] owns the platform resources and turns accessor calls
//! into pin operations and bus transactions. Each call is independent:
//! nothing is cached, so two identical calls issue two identical
//! transactions.

use shield_hal::{AnalogIn, DigitalIo, FourWireBus, Level, PinMode, TwoWireBus};

use crate::config::BoardConfig;
use crate::convert::{self, Written};
use crate::dac;
use crate::digipot::{self, Channel, Digipot};
use crate::error::ShieldError;

/// Status LEDs on the shield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    /// LED D1
    D1,
    /// LED D2
    D2,
    /// LED D3
    D3,
}

/// Analog inputs on the shield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogInput {
    /// Potentiometer RV1
    Potentiometer,
    /// Integrator output (A0)
    IntegratorOutput,
    /// Pre-integrator output (A1)
    OutputA1,
}

/// Result type of bus operations
pub type Result<T, I2C, SPI> =
    core::result::Result<T, ShieldError<<I2C as TwoWireBus>::Error, <SPI as FourWireBus>::Error>>;

/// Analog process-simulator shield
///
/// # Type parameters
/// - `IO`: digital and analog pins
/// - `I2C`: bus of the U5/U6 digital potentiometers
/// - `SPI`: bus of the U4 DAC
pub struct ProcessShield<IO, I2C, SPI> {
    io: IO,
    i2c: I2C,
    spi: SPI,
    config: BoardConfig,
}

impl<IO, I2C, SPI> ProcessShield<IO, I2C, SPI>
where
    IO: DigitalIo + AnalogIn,
    I2C: TwoWireBus,
    SPI: FourWireBus,
{
    /// Create the driver for a [`BoardConfig::REV_A`] shield
    ///
    /// Configures the pins and brings up both buses.
    pub fn new(io: IO, i2c: I2C, spi: SPI) -> Self {
        Self::with_config(io, i2c, spi, BoardConfig::REV_A)
    }

    /// Create the driver for a shield with a custom pin and bus layout
    pub fn with_config(io: IO, i2c: I2C, spi: SPI, config: BoardConfig) -> Self {
        let mut shield = Self {
            io,
            i2c,
            spi,
            config,
        };
        shield.init();
        shield
    }

    fn init(&mut self) {
        let digital = self.config.digital;

        for pin in [digital.led_d1, digital.led_d2, digital.led_d3] {
            self.io.pin_mode(pin, PinMode::Output);
        }

        if let Some(pin) = digital.builtin_led {
            self.io.pin_mode(pin, PinMode::Output);
            self.io.set_low(pin);
        }

        self.io.pin_mode(digital.button_sw1, PinMode::Input);

        self.i2c.begin(self.config.two_wire.bus);

        self.spi.begin();
        let cs = self.config.four_wire.chip_select;
        self.io.pin_mode(cs, PinMode::Output);
        // Deselected until the first transfer
        self.io.set_high(cs);

        #[cfg(feature = "defmt")]
        defmt::debug!("Process shield initialized");
    }

    /// Board configuration in use
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Give back the pins and buses
    pub fn release(self) -> (IO, I2C, SPI) {
        (self.io, self.i2c, self.spi)
    }

    // -----------------------------------------------------------------------
    // Digital I/O
    // -----------------------------------------------------------------------

    /// Switch an LED on or off
    pub fn set_led(&mut self, led: Led, on: bool) {
        let digital = &self.config.digital;
        let pin = match led {
            Led::D1 => digital.led_d1,
            Led::D2 => digital.led_d2,
            Led::D3 => digital.led_d3,
        };
        self.io.digital_write(pin, Level::from(on));
    }

    /// Switch LED D1 on or off
    pub fn set_led_d1(&mut self, on: bool) {
        self.set_led(Led::D1, on);
    }

    /// Switch LED D2 on or off
    pub fn set_led_d2(&mut self, on: bool) {
        self.set_led(Led::D2, on);
    }

    /// Switch LED D3 on or off
    pub fn set_led_d3(&mut self, on: bool) {
        self.set_led(Led::D3, on);
    }

    /// Check whether push-button SW1 is held down
    ///
    /// The button pulls its pin low when pressed.
    pub fn button_pressed(&mut self) -> bool {
        self.io
            .digital_read(self.config.digital.button_sw1)
            .is_low()
    }

    // -----------------------------------------------------------------------
    // Analog inputs
    // -----------------------------------------------------------------------

    fn analog_pin(&self, input: AnalogInput) -> u8 {
        let analog = &self.config.analog;
        match input {
            AnalogInput::Potentiometer => analog.potentiometer_rv1,
            AnalogInput::IntegratorOutput => analog.integrator_output,
            AnalogInput::OutputA1 => analog.output_a1,
        }
    }

    /// Sample an analog pin as a fraction of full scale (`0.0..=1.0`)
    pub fn read_fraction(&mut self, pin: u8) -> f32 {
        convert::raw_to_fraction(self.io.analog_read(pin))
    }

    /// Sample an analog pin as a voltage (`0.0..=5.0`)
    pub fn read_voltage(&mut self, pin: u8) -> f32 {
        convert::raw_to_voltage(self.io.analog_read(pin))
    }

    /// Sample one of the shield's inputs as a fraction of full scale
    pub fn input_fraction(&mut self, input: AnalogInput) -> f32 {
        let pin = self.analog_pin(input);
        self.read_fraction(pin)
    }

    /// Sample one of the shield's inputs as a voltage
    pub fn input_voltage(&mut self, input: AnalogInput) -> f32 {
        let pin = self.analog_pin(input);
        self.read_voltage(pin)
    }

    /// Potentiometer RV1 position (`0.0..=1.0`)
    pub fn potentiometer_fraction(&mut self) -> f32 {
        self.input_fraction(AnalogInput::Potentiometer)
    }

    /// Potentiometer RV1 wiper voltage
    pub fn potentiometer_voltage(&mut self) -> f32 {
        self.input_voltage(AnalogInput::Potentiometer)
    }

    /// Integrator output (A0) as a fraction of full scale
    pub fn integrator_output_fraction(&mut self) -> f32 {
        self.input_fraction(AnalogInput::IntegratorOutput)
    }

    /// Integrator output (A0) voltage
    pub fn integrator_output_voltage(&mut self) -> f32 {
        self.input_voltage(AnalogInput::IntegratorOutput)
    }

    /// Pre-integrator output (A1) as a fraction of full scale
    pub fn output_a1_fraction(&mut self) -> f32 {
        self.input_fraction(AnalogInput::OutputA1)
    }

    /// Pre-integrator output (A1) voltage
    pub fn output_a1_voltage(&mut self) -> f32 {
        self.input_voltage(AnalogInput::OutputA1)
    }

    // -----------------------------------------------------------------------
    // Digital potentiometers (U5, U6)
    // -----------------------------------------------------------------------

    fn digipot_write(&mut self, chip: Digipot, bytes: [u8; 2]) -> Result<(), I2C, SPI> {
        let address = chip.address(&self.config.two_wire);

        #[cfg(feature = "defmt")]
        defmt::trace!("{} <- {=[u8]:#x}", chip, &bytes[..]);

        self.i2c
            .write(address, &bytes)
            .map_err(ShieldError::TwoWire)
    }

    /// Set the raw wiper level (0-255) of a channel
    ///
    /// Level 0 is 100 kOhm and level 255 is 0 Ohm between terminals A and
    /// W. Channels outside `1..=4` are clamped to the nearest one.
    pub fn set_channel_level(
        &mut self,
        chip: Digipot,
        channel: u8,
        level: u8,
    ) -> Result<Written<u8>, I2C, SPI> {
        let (channel, clamped) = Channel::clamped(channel);
        let written = Written::exact(level).or_clamped(clamped);

        #[cfg(feature = "defmt")]
        if clamped {
            defmt::warn!("{}: channel clamped to {}", chip, channel.number());
        }

        self.digipot_write(chip, digipot::write_rdac(channel, level))?;
        Ok(written)
    }

    /// Set the resistance between terminals A and W of a channel
    ///
    /// Resistances are clamped to `0..=100_000` ohms and anything under
    /// 60 ohms drives the wiper to its end stop. Channels outside `1..=4`
    /// are clamped to the nearest one.
    pub fn set_channel_resistance(
        &mut self,
        chip: Digipot,
        channel: u8,
        ohms: f32,
    ) -> Result<Written<u8>, I2C, SPI> {
        let requested = convert::resistance_level(ohms);

        #[cfg(feature = "defmt")]
        if requested.clamped {
            defmt::warn!("{}: resistance clamped to level {}", chip, requested.level);
        }

        let written = self.set_channel_level(chip, channel, requested.level)?;
        Ok(written.or_clamped(requested.clamped))
    }

    /// Set the resistance of a U5 channel
    pub fn set_u5_channel_resistance(
        &mut self,
        channel: u8,
        ohms: f32,
    ) -> Result<Written<u8>, I2C, SPI> {
        self.set_channel_resistance(Digipot::U5, channel, ohms)
    }

    /// Set the resistance of a U6 channel
    pub fn set_u6_channel_resistance(
        &mut self,
        channel: u8,
        ohms: f32,
    ) -> Result<Written<u8>, I2C, SPI> {
        self.set_channel_resistance(Digipot::U6, channel, ohms)
    }

    /// Persist all four wiper levels of a chip to its EEPROM
    ///
    /// Returns once the command is on the bus. The EEPROM write itself
    /// takes several milliseconds and the chip does not acknowledge its
    /// completion; wait before sending it the next command.
    pub fn store_to_non_volatile(&mut self, chip: Digipot) -> Result<(), I2C, SPI> {
        self.digipot_write(chip, digipot::store_eeprom())
    }

    /// Restore all four wiper levels of a chip from its EEPROM
    pub fn load_from_non_volatile(&mut self, chip: Digipot) -> Result<(), I2C, SPI> {
        self.digipot_write(chip, digipot::load_eeprom())
    }

    /// Persist the U5 wiper levels
    pub fn store_u5_eeprom(&mut self) -> Result<(), I2C, SPI> {
        self.store_to_non_volatile(Digipot::U5)
    }

    /// Persist the U6 wiper levels
    pub fn store_u6_eeprom(&mut self) -> Result<(), I2C, SPI> {
        self.store_to_non_volatile(Digipot::U6)
    }

    /// Restore the U5 wiper levels
    pub fn load_u5_eeprom(&mut self) -> Result<(), I2C, SPI> {
        self.load_from_non_volatile(Digipot::U5)
    }

    /// Restore the U6 wiper levels
    pub fn load_u6_eeprom(&mut self) -> Result<(), I2C, SPI> {
        self.load_from_non_volatile(Digipot::U6)
    }

    // -----------------------------------------------------------------------
    // Output DAC (U4)
    // -----------------------------------------------------------------------

    /// Set the DAC to a raw 12-bit level
    ///
    /// Levels above 4095 are clamped.
    pub fn set_raw_level(&mut self, level: u16) -> Result<Written<u16>, I2C, SPI> {
        let written = convert::dac_level(level);
        let word = dac::write_word(written.level);
        let cs = self.config.four_wire.chip_select;

        self.spi.begin_transaction(self.config.four_wire.settings);
        self.io.set_low(cs);
        let result = self.spi.transfer16(word);
        // Released even if the transfer failed
        self.io.set_high(cs);
        self.spi.end_transaction();

        #[cfg(feature = "defmt")]
        defmt::trace!("U4 <- {=u16:#x}", word);

        result.map_err(ShieldError::FourWire)?;
        Ok(written)
    }

    /// Set the DAC output voltage
    ///
    /// Clamped to `0.0..=5.0` volts; the level is truncated, so 2.5 V
    /// gives level 2047.
    pub fn set_voltage(&mut self, volts: f32) -> Result<Written<u16>, I2C, SPI> {
        let requested = convert::voltage_level(volts);

        #[cfg(feature = "defmt")]
        if requested.clamped {
            defmt::warn!("U4: voltage clamped to level {}", requested.level);
        }

        self.set_raw_level(requested.level)
            .map(|written| written.or_clamped(requested.clamped))
    }

    /// Set the DAC output as a fraction of full scale
    ///
    /// Clamped to `0.0..=1.0`; the level is truncated.
    pub fn set_fraction(&mut self, fraction: f32) -> Result<Written<u16>, I2C, SPI> {
        let requested = convert::fraction_level(fraction);

        #[cfg(feature = "defmt")]
        if requested.clamped {
            defmt::warn!("U4: fraction clamped to level {}", requested.level);
        }

        self.set_raw_level(requested.level)
            .map(|written| written.or_clamped(requested.clamped))
    }
}
