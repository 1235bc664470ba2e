//! Four-wire (SPI) bus abstraction
//!
//! Chip select is not part of the bus: the driver drives it as an ordinary
//! digital output around each transfer.

/// SPI bus master
pub trait FourWireBus {
    /// Error type for SPI operations
    type Error;

    /// Bring up the bus peripheral
    ///
    /// Called once, before the first transaction.
    fn begin(&mut self) {}

    /// Claim the bus and apply clock, bit order and mode settings
    fn begin_transaction(&mut self, settings: SpiSettings);

    /// Shift one 16-bit word out while shifting the response in
    fn transfer16(&mut self, word: u16) -> Result<u16, Self::Error>;

    /// Release the bus
    fn end_transaction(&mut self);
}

impl<T: FourWireBus + ?Sized> FourWireBus for &mut T {
    type Error = T::Error;

    fn begin(&mut self) {
        T::begin(self)
    }

    fn begin_transaction(&mut self, settings: SpiSettings) {
        T::begin_transaction(self, settings)
    }

    fn transfer16(&mut self, word: u16) -> Result<u16, Self::Error> {
        T::transfer16(self, word)
    }

    fn end_transaction(&mut self) {
        T::end_transaction(self)
    }
}

/// Per-transaction SPI settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiSettings {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Order in which the bits of each byte are shifted out
    pub bit_order: BitOrder,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
            bit_order: BitOrder::MsbFirst,
            mode: Mode::Mode0,
        }
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// SPI mode (clock polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for embedded_hal::spi::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => embedded_hal::spi::MODE_0,
            Mode::Mode1 => embedded_hal::spi::MODE_1,
            Mode::Mode2 => embedded_hal::spi::MODE_2,
            Mode::Mode3 => embedded_hal::spi::MODE_3,
        }
    }
}

/// Split a word into the two bytes that go on the wire, in send order
///
/// With [`BitOrder::LsbFirst`] the low byte leads and each byte is
/// bit-reversed, so a bus that always shifts MSB first emits the same bit
/// stream an LSB-first peripheral would.
pub fn word_to_wire(word: u16, bit_order: BitOrder) -> [u8; 2] {
    match bit_order {
        BitOrder::MsbFirst => word.to_be_bytes(),
        BitOrder::LsbFirst => {
            let [lo, hi] = word.to_le_bytes();
            [lo.reverse_bits(), hi.reverse_bits()]
        }
    }
}

/// Reassemble a word received in send order (inverse of [`word_to_wire`])
pub fn wire_to_word(bytes: [u8; 2], bit_order: BitOrder) -> u16 {
    match bit_order {
        BitOrder::MsbFirst => u16::from_be_bytes(bytes),
        BitOrder::LsbFirst => {
            u16::from_le_bytes([bytes[0].reverse_bits(), bytes[1].reverse_bits()])
        }
    }
}
