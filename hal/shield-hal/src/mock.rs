//! In-memory board for host-side tests
//!
//! [`MockBoard`] records every pin and bus operation into one ordered log
//! and serves scripted input levels and ADC samples. It hands out cheap
//! handles implementing each capability trait, so a driver can own "its"
//! resources while the test keeps inspecting the shared log.
//!
//! Only built with the `mock` feature (and for this crate's own unit
//! tests). Dependent crates enable it from `[dev-dependencies]`.

use core::cell::RefCell;

use heapless::Vec;

use crate::analog::AnalogIn;
use crate::gpio::{DigitalIo, Level, PinMode};
use crate::i2c::{I2cConfig, TwoWireBus};
use crate::spi::{FourWireBus, SpiSettings};

/// Maximum number of events kept in the log
pub const MAX_EVENTS: usize = 64;

/// Maximum payload of a single recorded I2C write
pub const MAX_I2C_PAYLOAD: usize = 8;

/// Number of digital pins the mock serves
pub const DIGITAL_PINS: usize = 32;

/// Number of analog inputs the mock serves
pub const ANALOG_PINS: usize = 8;

/// One recorded operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `pin_mode` call
    PinMode { pin: u8, mode: PinMode },
    /// `digital_write` call
    DigitalWrite { pin: u8, level: Level },
    /// I2C bus brought up
    I2cBegin(I2cConfig),
    /// Complete I2C write transaction
    I2cWrite {
        address: u8,
        data: Vec<u8, MAX_I2C_PAYLOAD>,
    },
    /// SPI bus brought up
    SpiBegin,
    /// SPI bus claimed
    SpiBeginTransaction(SpiSettings),
    /// 16-bit SPI transfer
    SpiTransfer(u16),
    /// SPI bus released
    SpiEndTransaction,
}

/// Errors injected by the mock buses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockBusError {
    /// The addressed device did not acknowledge
    Nack,
    /// A write was larger than [`MAX_I2C_PAYLOAD`]
    PayloadTooLarge,
}

struct State {
    events: Vec<Event, MAX_EVENTS>,
    overflowed: bool,
    digital_inputs: [Level; DIGITAL_PINS],
    analog_inputs: [u16; ANALOG_PINS],
    fail_next_i2c: bool,
    fail_next_spi: bool,
    spi_response: u16,
}

impl State {
    fn record(&mut self, event: Event) {
        if self.events.push(event).is_err() {
            self.overflowed = true;
        }
    }
}

/// Recording board shared by the capability handles
pub struct MockBoard {
    state: RefCell<State>,
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBoard {
    /// Create a board with all inputs low and all ADC samples at zero
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                events: Vec::new(),
                overflowed: false,
                digital_inputs: [Level::Low; DIGITAL_PINS],
                analog_inputs: [0; ANALOG_PINS],
                fail_next_i2c: false,
                fail_next_spi: false,
                spi_response: 0,
            }),
        }
    }

    /// Handle implementing [`DigitalIo`] and [`AnalogIn`]
    pub fn io(&self) -> MockIo<'_> {
        MockIo { board: self }
    }

    /// Handle implementing [`TwoWireBus`]
    pub fn i2c(&self) -> MockI2c<'_> {
        MockI2c { board: self }
    }

    /// Handle implementing [`FourWireBus`]
    pub fn spi(&self) -> MockSpi<'_> {
        MockSpi { board: self }
    }

    /// Script the level an input pin reads back
    pub fn set_digital_input(&self, pin: u8, level: Level) {
        if let Some(slot) = self.state.borrow_mut().digital_inputs.get_mut(pin as usize) {
            *slot = level;
        }
    }

    /// Script the raw sample an analog input reads back
    pub fn set_analog_input(&self, pin: u8, raw: u16) {
        if let Some(slot) = self.state.borrow_mut().analog_inputs.get_mut(pin as usize) {
            *slot = raw;
        }
    }

    /// Make the next I2C write fail with [`MockBusError::Nack`]
    pub fn fail_next_i2c(&self) {
        self.state.borrow_mut().fail_next_i2c = true;
    }

    /// Make the next SPI transfer fail with [`MockBusError::Nack`]
    pub fn fail_next_spi(&self) {
        self.state.borrow_mut().fail_next_spi = true;
    }

    /// Word returned by every SPI transfer
    pub fn set_spi_response(&self, word: u16) {
        self.state.borrow_mut().spi_response = word;
    }

    /// Snapshot of the log
    pub fn events(&self) -> Vec<Event, MAX_EVENTS> {
        self.state.borrow().events.clone()
    }

    /// Drain the log
    pub fn take_events(&self) -> Vec<Event, MAX_EVENTS> {
        let mut state = self.state.borrow_mut();
        state.overflowed = false;
        core::mem::take(&mut state.events)
    }

    /// Check whether events were dropped because the log was full
    pub fn overflowed(&self) -> bool {
        self.state.borrow().overflowed
    }

    /// Completed I2C writes in order, as `(address, payload)`
    pub fn i2c_writes(&self) -> Vec<(u8, Vec<u8, MAX_I2C_PAYLOAD>), MAX_EVENTS> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::I2cWrite { address, data } => Some((*address, data.clone())),
                _ => None,
            })
            .collect()
    }

    /// Words shifted out on SPI in order
    pub fn spi_transfers(&self) -> Vec<u16, MAX_EVENTS> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::SpiTransfer(word) => Some(*word),
                _ => None,
            })
            .collect()
    }

    /// Last level written to an output pin, if any
    pub fn output_level(&self, pin: u8) -> Option<Level> {
        self.state
            .borrow()
            .events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::DigitalWrite { pin: p, level } if *p == pin => Some(*level),
                _ => None,
            })
    }

    /// Last mode configured for a pin, if any
    pub fn pin_mode_of(&self, pin: u8) -> Option<PinMode> {
        self.state
            .borrow()
            .events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::PinMode { pin: p, mode } if *p == pin => Some(*mode),
                _ => None,
            })
    }
}

/// Digital and analog pins of a [`MockBoard`]
pub struct MockIo<'a> {
    board: &'a MockBoard,
}

impl DigitalIo for MockIo<'_> {
    fn pin_mode(&mut self, pin: u8, mode: PinMode) {
        self.board
            .state
            .borrow_mut()
            .record(Event::PinMode { pin, mode });
    }

    fn digital_write(&mut self, pin: u8, level: Level) {
        self.board
            .state
            .borrow_mut()
            .record(Event::DigitalWrite { pin, level });
    }

    fn digital_read(&mut self, pin: u8) -> Level {
        self.board
            .state
            .borrow()
            .digital_inputs
            .get(pin as usize)
            .copied()
            .unwrap_or(Level::Low)
    }
}

impl AnalogIn for MockIo<'_> {
    fn analog_read(&mut self, pin: u8) -> u16 {
        self.board
            .state
            .borrow()
            .analog_inputs
            .get(pin as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// I2C bus of a [`MockBoard`]
pub struct MockI2c<'a> {
    board: &'a MockBoard,
}

impl TwoWireBus for MockI2c<'_> {
    type Error = MockBusError;

    fn begin(&mut self, config: I2cConfig) {
        self.board
            .state
            .borrow_mut()
            .record(Event::I2cBegin(config));
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.board.state.borrow_mut();
        if state.fail_next_i2c {
            state.fail_next_i2c = false;
            return Err(MockBusError::Nack);
        }

        let data = Vec::from_slice(data).map_err(|_| MockBusError::PayloadTooLarge)?;
        state.record(Event::I2cWrite { address, data });
        Ok(())
    }
}

/// SPI bus of a [`MockBoard`]
pub struct MockSpi<'a> {
    board: &'a MockBoard,
}

impl FourWireBus for MockSpi<'_> {
    type Error = MockBusError;

    fn begin(&mut self) {
        self.board.state.borrow_mut().record(Event::SpiBegin);
    }

    fn begin_transaction(&mut self, settings: SpiSettings) {
        self.board
            .state
            .borrow_mut()
            .record(Event::SpiBeginTransaction(settings));
    }

    fn transfer16(&mut self, word: u16) -> Result<u16, Self::Error> {
        let mut state = self.board.state.borrow_mut();
        if state.fail_next_spi {
            state.fail_next_spi = false;
            return Err(MockBusError::Nack);
        }

        state.record(Event::SpiTransfer(word));
        Ok(state.spi_response)
    }

    fn end_transaction(&mut self) {
        self.board
            .state
            .borrow_mut()
            .record(Event::SpiEndTransaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let board = MockBoard::new();
        let mut io = board.io();
        let mut spi = board.spi();

        io.pin_mode(10, PinMode::Output);
        io.digital_write(10, Level::Low);
        spi.transfer16(0x1234).unwrap();
        io.digital_write(10, Level::High);

        let expected = [
            Event::PinMode {
                pin: 10,
                mode: PinMode::Output,
            },
            Event::DigitalWrite {
                pin: 10,
                level: Level::Low,
            },
            Event::SpiTransfer(0x1234),
            Event::DigitalWrite {
                pin: 10,
                level: Level::High,
            },
        ];
        assert_eq!(&board.events()[..], &expected[..]);
        assert_eq!(board.output_level(10), Some(Level::High));
        assert_eq!(board.pin_mode_of(10), Some(PinMode::Output));
    }

    #[test]
    fn test_i2c_write_logged() {
        let board = MockBoard::new();
        let mut i2c = board.i2c();

        i2c.write(0x2A, &[0x10, 0x80]).unwrap();

        let writes = board.i2c_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, 0x2A);
        assert_eq!(&writes[0].1[..], &[0x10, 0x80]);
        assert!(matches!(
            board.events()[0],
            Event::I2cWrite { address: 0x2A, .. }
        ));
    }

    #[test]
    fn test_spi_response() {
        let board = MockBoard::new();
        let mut spi = board.spi();

        assert_eq!(spi.transfer16(0x3000), Ok(0));

        board.set_spi_response(0xBEEF);
        assert_eq!(spi.transfer16(0x3FFF), Ok(0xBEEF));
        assert_eq!(spi.transfer16(0x3001), Ok(0xBEEF));

        assert_eq!(&board.spi_transfers()[..], &[0x3000, 0x3FFF, 0x3001][..]);
    }

    #[test]
    fn test_scripted_inputs() {
        let board = MockBoard::new();
        let mut io = board.io();

        assert_eq!(io.digital_read(2), Level::Low);
        board.set_digital_input(2, Level::High);
        assert_eq!(io.digital_read(2), Level::High);

        board.set_analog_input(1, 512);
        assert_eq!(io.analog_read(1), 512);
        assert_eq!(io.analog_read(0), 0);
    }

    #[test]
    fn test_fail_next_i2c_recovers() {
        let board = MockBoard::new();
        let mut i2c = board.i2c();

        board.fail_next_i2c();
        assert_eq!(i2c.write(0x2A, &[1, 2]), Err(MockBusError::Nack));
        assert!(board.i2c_writes().is_empty());

        assert_eq!(i2c.write(0x2A, &[1, 2]), Ok(()));
        assert_eq!(board.i2c_writes().len(), 1);
    }

    #[test]
    fn test_oversized_i2c_write_rejected() {
        let board = MockBoard::new();
        let mut i2c = board.i2c();

        let payload = [0u8; MAX_I2C_PAYLOAD + 1];
        assert_eq!(
            i2c.write(0x2B, &payload),
            Err(MockBusError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_take_events_clears_log() {
        let board = MockBoard::new();
        board.spi().begin();

        assert_eq!(board.take_events().len(), 1);
        assert!(board.events().is_empty());
    }
}
