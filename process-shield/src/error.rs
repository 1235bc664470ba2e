//! Error types

/// Bus failure reported by the platform
///
/// Out-of-range inputs never produce an error; they are clamped and
/// flagged in [`Written`](crate::Written). Only the buses can fail, and
/// only if the platform detects it. A platform that cannot detect bus
/// failures uses [`core::convert::Infallible`] for both parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShieldError<I2cE, SpiE> {
    /// I2C transaction to a digital potentiometer failed
    TwoWire(I2cE),
    /// SPI transfer to the DAC failed
    FourWire(SpiE),
}
