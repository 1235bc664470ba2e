//! Unit conversions between engineering values and register levels
//!
//! All functions here are pure. Out-of-range inputs are pulled to the
//! nearest boundary and reported through [`Written::clamped`], never
//! rejected.

/// Lowest voltage the DAC can produce and the ADC can measure
pub const MIN_VOLTAGE: f32 = 0.0;

/// Highest voltage the DAC can produce and the ADC can measure
pub const MAX_VOLTAGE: f32 = 5.0;

/// Highest 12-bit DAC level
pub const DAC_MAX_LEVEL: u16 = 4095;

/// Highest 10-bit ADC sample
pub const ADC_MAX_LEVEL: u16 = 1023;

/// Highest 8-bit wiper level
pub const WIPER_MAX_LEVEL: u8 = 255;

/// End-to-end resistance of a digital potentiometer channel (R_AB)
pub const FULL_SCALE_OHMS: f32 = 100_000.0;

/// Below this resistance the chip is driven into its bottom-scale end stop
pub const BOTTOM_SCALE_OHMS: f32 = 60.0;

/// A level issued to a peripheral
///
/// `clamped` is set when the requested value had to be pulled into the
/// valid range before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Written<L> {
    /// Register level sent on the bus
    pub level: L,
    /// The request was out of range and was clamped
    pub clamped: bool,
}

impl<L> Written<L> {
    /// A level that needed no clamping
    pub const fn exact(level: L) -> Self {
        Self {
            level,
            clamped: false,
        }
    }

    /// Merge in the clamp status of another input of the same request
    pub fn or_clamped(self, clamped: bool) -> Self {
        Self {
            level: self.level,
            clamped: self.clamped || clamped,
        }
    }
}

/// Clamp into `[min, max]`, treating NaN as `min`
fn clamp_f32(value: f32, min: f32, max: f32) -> (f32, bool) {
    if value.is_nan() || value < min {
        (min, true)
    } else if value > max {
        (max, true)
    } else {
        (value, false)
    }
}

/// Wiper level for a resistance between terminals A and W
///
/// `level = round(255 * (1 - ohms / 100000))`, with requests under
/// [`BOTTOM_SCALE_OHMS`] collapsed to 0 ohms (level 255).
///
/// Rounds half up, so 50 kOhm gives 128. The vendor's Arduino library
/// truncates instead and writes 127 for the same request; boards
/// programmed by both can differ by one wiper step.
pub fn resistance_level(ohms: f32) -> Written<u8> {
    let (ohms, clamped) = clamp_f32(ohms, 0.0, FULL_SCALE_OHMS);
    let ohms = if ohms < BOTTOM_SCALE_OHMS { 0.0 } else { ohms };

    let scaled = WIPER_MAX_LEVEL as f32 * (1.0 - ohms / FULL_SCALE_OHMS);
    // scaled is in [0, 255]; adding a half then truncating rounds half up
    Written {
        level: (scaled + 0.5) as u8,
        clamped,
    }
}

/// Wiper level for a resistance, without the clamp report
pub fn ohms_to_level(ohms: f32) -> u8 {
    resistance_level(ohms).level
}

/// DAC level for an output voltage
///
/// Truncates toward zero: 2.5 V gives 2047, not 2048.
pub fn voltage_level(volts: f32) -> Written<u16> {
    let (volts, clamped) = clamp_f32(volts, MIN_VOLTAGE, MAX_VOLTAGE);
    let level = (volts - MIN_VOLTAGE) * DAC_MAX_LEVEL as f32 / (MAX_VOLTAGE - MIN_VOLTAGE);
    Written {
        level: level as u16,
        clamped,
    }
}

/// DAC level for a fraction of full scale (`0.0..=1.0`)
///
/// Truncates toward zero like [`voltage_level`].
pub fn fraction_level(fraction: f32) -> Written<u16> {
    let (fraction, clamped) = clamp_f32(fraction, 0.0, 1.0);
    Written {
        level: (fraction * DAC_MAX_LEVEL as f32) as u16,
        clamped,
    }
}

/// Limit a raw DAC level to 12 bits
pub fn dac_level(level: u16) -> Written<u16> {
    if level > DAC_MAX_LEVEL {
        Written {
            level: DAC_MAX_LEVEL,
            clamped: true,
        }
    } else {
        Written::exact(level)
    }
}

/// Fraction of full scale for a raw ADC sample
pub fn raw_to_fraction(raw: u16) -> f32 {
    raw.min(ADC_MAX_LEVEL) as f32 / ADC_MAX_LEVEL as f32
}

/// Voltage for a raw ADC sample
///
/// Multiplies before dividing so that a full-scale sample maps to exactly
/// [`MAX_VOLTAGE`].
pub fn raw_to_voltage(raw: u16) -> f32 {
    let span = MAX_VOLTAGE - MIN_VOLTAGE;
    raw.min(ADC_MAX_LEVEL) as f32 * span / ADC_MAX_LEVEL as f32 + MIN_VOLTAGE
}
