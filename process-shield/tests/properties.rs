//! Property tests for conversions and bus traffic

use process_shield::convert::{
    self, ADC_MAX_LEVEL, BOTTOM_SCALE_OHMS, DAC_MAX_LEVEL, FULL_SCALE_OHMS, MAX_VOLTAGE,
};
use process_shield::dac::SHIELD_CONFIG;
use process_shield::{Digipot, ProcessShield};
use proptest::prelude::*;
use shield_hal::mock::{Event, MockBoard};
use shield_hal::Level;

fn chip() -> impl Strategy<Value = Digipot> {
    prop_oneof![Just(Digipot::U5), Just(Digipot::U6)]
}

proptest! {
    #[test]
    fn resistance_level_is_monotonic(a in 0.0f32..=100_000.0, b in 0.0f32..=100_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(convert::ohms_to_level(lo) >= convert::ohms_to_level(hi));
    }

    #[test]
    fn resistance_level_rounds_to_nearest(ohms in BOTTOM_SCALE_OHMS..=FULL_SCALE_OHMS) {
        let exact = 255.0 * (1.0 - ohms / FULL_SCALE_OHMS);
        let level = convert::resistance_level(ohms);
        prop_assert!(!level.clamped);
        prop_assert!((f32::from(level.level) - exact).abs() <= 0.5 + 1e-3);
    }

    #[test]
    fn resistance_below_bottom_scale_hits_end_stop(ohms in 0.0f32..BOTTOM_SCALE_OHMS) {
        prop_assert_eq!(convert::resistance_level(ohms).level, 255);
    }

    #[test]
    fn resistance_out_of_range_is_clamped(ohms in prop_oneof![-1e9f32..-0.001, 100_001.0f32..1e9]) {
        let written = convert::resistance_level(ohms);
        prop_assert!(written.clamped);
        prop_assert!(written.level == 0 || written.level == 255);
    }

    #[test]
    fn voltage_level_stays_in_range(volts in any::<f32>()) {
        let written = convert::voltage_level(volts);
        prop_assert!(written.level <= DAC_MAX_LEVEL);
        let in_range = (0.0..=MAX_VOLTAGE).contains(&volts);
        prop_assert_eq!(written.clamped, !in_range);
    }

    #[test]
    fn fraction_level_truncates(fraction in 0.0f32..=1.0) {
        let written = convert::fraction_level(fraction);
        let exact = fraction * f32::from(DAC_MAX_LEVEL);
        prop_assert!(f32::from(written.level) <= exact + 1e-3);
        prop_assert!(exact - f32::from(written.level) < 1.0 + 1e-3);
    }

    #[test]
    fn adc_readings_stay_in_range(raw in any::<u16>()) {
        let volts = convert::raw_to_voltage(raw);
        let fraction = convert::raw_to_fraction(raw);
        prop_assert!((0.0..=MAX_VOLTAGE).contains(&volts));
        prop_assert!((0.0..=1.0).contains(&fraction));
        if raw >= ADC_MAX_LEVEL {
            prop_assert_eq!(volts, MAX_VOLTAGE);
            prop_assert_eq!(fraction, 1.0);
        }
    }

    #[test]
    fn digipot_write_is_one_well_formed_command(
        chip in chip(),
        channel in any::<u8>(),
        ohms in -1e6f32..1e6,
    ) {
        let board = MockBoard::new();
        let mut shield = ProcessShield::new(board.io(), board.i2c(), board.spi());
        board.take_events();

        let written = shield.set_channel_resistance(chip, channel, ohms).unwrap();

        let writes = board.i2c_writes();
        prop_assert_eq!(writes.len(), 1);
        let (address, payload) = &writes[0];
        let expected_address = match chip {
            Digipot::U5 => 0x2A,
            Digipot::U6 => 0x2B,
        };
        prop_assert_eq!(*address, expected_address);
        prop_assert_eq!(payload.len(), 2);
        prop_assert_eq!(payload[0] & 0xF0, 0x10);
        prop_assert!((payload[0] & 0x0F) < 4);
        prop_assert_eq!(payload[1], written.level);
        prop_assert!(board.spi_transfers().is_empty());
    }

    #[test]
    fn dac_write_keeps_config_and_releases_chip_select(level in any::<u16>()) {
        let board = MockBoard::new();
        let mut shield = ProcessShield::new(board.io(), board.i2c(), board.spi());
        board.take_events();

        let written = shield.set_raw_level(level).unwrap();
        prop_assert_eq!(written.level, level.min(DAC_MAX_LEVEL));
        prop_assert_eq!(written.clamped, level > DAC_MAX_LEVEL);

        let words = board.spi_transfers();
        prop_assert_eq!(&words[..], &[SHIELD_CONFIG | written.level][..]);
        prop_assert_eq!(board.output_level(10), Some(Level::High));
        let events = board.events();
        prop_assert_eq!(events.last(), Some(&Event::SpiEndTransaction));
        prop_assert!(board.i2c_writes().is_empty());
    }
}

/// Typical lab session: set the process time constants, persist them,
/// then step the process input while watching the outputs.
#[test]
fn test_step_response_session() {
    let board = MockBoard::new();
    let mut shield = ProcessShield::new(board.io(), board.i2c(), board.spi());
    board.take_events();

    for channel in 1..=4 {
        shield.set_u5_channel_resistance(channel, 20_000.0).unwrap();
        shield.set_u6_channel_resistance(channel, 80_000.0).unwrap();
    }
    shield.store_u5_eeprom().unwrap();
    shield.store_u6_eeprom().unwrap();

    let writes = board.i2c_writes();
    assert_eq!(writes.len(), 10);
    assert_eq!(&writes[0].1[..], &[0x10, 204]);
    assert_eq!(&writes[1].1[..], &[0x10, 51]);
    assert_eq!(&writes[7].1[..], &[0x13, 51]);
    assert_eq!((writes[8].0, &writes[8].1[..]), (0x2A, &[0x78, 0x01][..]));
    assert_eq!((writes[9].0, &writes[9].1[..]), (0x2B, &[0x78, 0x01][..]));

    shield.set_led_d1(true);
    shield.set_voltage(0.0).unwrap();
    shield.set_voltage(5.0).unwrap();
    assert_eq!(&board.spi_transfers()[..], &[0x3000, 0x3FFF][..]);
    assert_eq!(board.output_level(3), Some(Level::High));

    board.set_analog_input(0, 1023);
    board.set_analog_input(1, 0);
    assert_eq!(shield.integrator_output_voltage(), 5.0);
    assert_eq!(shield.output_a1_voltage(), 0.0);
    assert!(!board.overflowed());
}
