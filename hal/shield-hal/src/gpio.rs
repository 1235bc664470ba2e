//! Digital pin abstractions
//!
//! Pins are addressed by their board number, the way the host platform's
//! pin primitives address them. The driver never holds per-pin handles so
//! that a board revision only has to change its pin table.

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if the level is low
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Self::Output {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Direction of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Push-pull output
    Output,
    /// Floating input
    Input,
}

/// Numbered digital I/O
///
/// Implementations map board pin numbers onto the chip's GPIO registers.
/// Operations cannot fail: an unknown pin number is the implementation's
/// problem to ignore.
pub trait DigitalIo {
    /// Configure the direction of a pin
    fn pin_mode(&mut self, pin: u8, mode: PinMode);

    /// Drive an output pin to a level
    fn digital_write(&mut self, pin: u8, level: Level);

    /// Sample the level of an input pin
    fn digital_read(&mut self, pin: u8) -> Level;

    /// Drive an output pin high
    fn set_high(&mut self, pin: u8) {
        self.digital_write(pin, Level::High);
    }

    /// Drive an output pin low
    fn set_low(&mut self, pin: u8) {
        self.digital_write(pin, Level::Low);
    }
}

impl<T: DigitalIo + ?Sized> DigitalIo for &mut T {
    fn pin_mode(&mut self, pin: u8, mode: PinMode) {
        T::pin_mode(self, pin, mode)
    }

    fn digital_write(&mut self, pin: u8, level: Level) {
        T::digital_write(self, pin, level)
    }

    fn digital_read(&mut self, pin: u8) -> Level {
        T::digital_read(self, pin)
    }
}
