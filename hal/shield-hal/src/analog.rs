//! Analog input abstraction

/// Numbered analog inputs sampled by a 10-bit ADC
pub trait AnalogIn {
    /// Read one sample from an analog input
    ///
    /// # Returns
    /// A raw conversion result in `0..=1023`.
    fn analog_read(&mut self, pin: u8) -> u16;
}

impl<T: AnalogIn + ?Sized> AnalogIn for &mut T {
    fn analog_read(&mut self, pin: u8) -> u16 {
        T::analog_read(self, pin)
    }
}
