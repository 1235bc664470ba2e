//! Board configuration
//!
//! Pin assignments, bus addresses and bus settings of the shield, grouped
//! by subsystem. [`BoardConfig::REV_A`] describes the board as built; a
//! different revision only needs a different value here.

use shield_hal::spi::{BitOrder, Mode};
use shield_hal::{I2cConfig, SpiSettings};

/// Digital pin assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitalIoConfig {
    /// LED D1 output pin
    pub led_d1: u8,
    /// LED D2 output pin
    pub led_d2: u8,
    /// LED D3 output pin
    pub led_d3: u8,
    /// Push-button SW1 input pin (active-low)
    pub button_sw1: u8,
    /// LED on the host board itself, switched off at start-up
    pub builtin_led: Option<u8>,
}

/// Analog input assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogConfig {
    /// Potentiometer RV1
    pub potentiometer_rv1: u8,
    /// Integrator output (A0)
    pub integrator_output: u8,
    /// Pre-integrator output (A1)
    pub output_a1: u8,
}

/// I2C bus settings and digital potentiometer addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TwoWireConfig {
    /// Bus clock
    pub bus: I2cConfig,
    /// 7-bit address of digital potentiometer U5
    pub address_u5: u8,
    /// 7-bit address of digital potentiometer U6
    pub address_u6: u8,
}

/// SPI settings for the output DAC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FourWireConfig {
    /// Chip-select pin of DAC U4 (active-low)
    pub chip_select: u8,
    /// Clock, bit order and mode for every DAC transaction
    pub settings: SpiSettings,
}

/// Complete shield configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Digital pins
    pub digital: DigitalIoConfig,
    /// Analog inputs
    pub analog: AnalogConfig,
    /// I2C bus
    pub two_wire: TwoWireConfig,
    /// SPI bus
    pub four_wire: FourWireConfig,
}

impl BoardConfig {
    /// The shield on an Uno-footprint host
    pub const REV_A: Self = Self {
        digital: DigitalIoConfig {
            led_d1: 3,
            led_d2: 4,
            led_d3: 5,
            button_sw1: 2,
            builtin_led: Some(13),
        },
        analog: AnalogConfig {
            potentiometer_rv1: 2,
            integrator_output: 0,
            output_a1: 1,
        },
        two_wire: TwoWireConfig {
            bus: I2cConfig::STANDARD,
            address_u5: 0b010_1010,
            address_u6: 0b010_1011,
        },
        four_wire: FourWireConfig {
            chip_select: 10,
            settings: SpiSettings {
                frequency: 1_000_000, // 1 MHz
                bit_order: BitOrder::MsbFirst,
                mode: Mode::Mode0,
            },
        },
    };
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::REV_A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_rev_a() {
        assert_eq!(BoardConfig::default(), BoardConfig::REV_A);
    }

    #[test]
    fn test_rev_a_pins_are_distinct() {
        let d = BoardConfig::REV_A.digital;
        let mut pins = [d.led_d1, d.led_d2, d.led_d3, d.button_sw1, 10];
        pins.sort_unstable();
        assert!(pins.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_rev_a_digipot_addresses() {
        let bus = BoardConfig::REV_A.two_wire;
        assert_eq!(bus.address_u5, 0x2A);
        assert_eq!(bus.address_u6, 0x2B);
    }
}
