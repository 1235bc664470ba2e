//! AD5144 quad digital potentiometer (I2C)
//!
//! The shield carries two of these, U5 and U6, identical apart from their
//! bus address. Every command is two bytes:
//!
//! - Command byte: opcode in the high nibble, channel address in the low
//!   nibble
//! - Data byte
//!
//! Datasheet: <https://www.analog.com/media/en/technical-documentation/data-sheets/AD5124_5144_5144A.pdf>

use crate::config::TwoWireConfig;

/// AD5144 command bytes
pub mod cmd {
    /// Write the data byte to the RDAC (wiper) register of a channel
    pub const WRITE_RDAC: u8 = 0b0001_0000;
    /// Copy between RDAC and EEPROM; direction given by the data byte
    pub const ACCESS_EEPROM: u8 = 0b0111_0000;
    /// Channel address selecting all four channels
    pub const ALL_CHANNELS: u8 = 0b0000_1000;
    /// `ACCESS_EEPROM` data byte: RDAC to EEPROM
    pub const EEPROM_STORE: u8 = 0b0000_0001;
    /// `ACCESS_EEPROM` data byte: EEPROM to RDAC
    pub const EEPROM_LOAD: u8 = 0b0000_0000;
}

/// Number of channels per chip
pub const CHANNEL_COUNT: u8 = 4;

/// One of the two digital potentiometers on the shield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digipot {
    /// Digital potentiometer U5
    U5,
    /// Digital potentiometer U6
    U6,
}

impl Digipot {
    /// Bus address of this chip on the given board
    pub fn address(self, config: &TwoWireConfig) -> u8 {
        match self {
            Digipot::U5 => config.address_u5,
            Digipot::U6 => config.address_u6,
        }
    }
}

/// Channel of a digital potentiometer
///
/// Channels are numbered 1 to 4 as printed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel 1 (RDAC1)
    Ch1,
    /// Channel 2 (RDAC2)
    Ch2,
    /// Channel 3 (RDAC3)
    Ch3,
    /// Channel 4 (RDAC4)
    Ch4,
}

impl Channel {
    /// Every channel, in board order
    pub const ALL: [Channel; CHANNEL_COUNT as usize] =
        [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4];

    /// Channel for a board channel number
    ///
    /// Returns `None` outside `1..=CHANNEL_COUNT`.
    pub fn from_number(number: u8) -> Option<Self> {
        let index = usize::from(number).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Channel for a board channel number, clamping into `1..=CHANNEL_COUNT`
    ///
    /// The flag is `true` when the number had to be clamped.
    pub fn clamped(number: u8) -> (Self, bool) {
        let clamped = number.clamp(1, CHANNEL_COUNT);
        (Self::ALL[usize::from(clamped - 1)], clamped != number)
    }

    /// Board channel number (1-4)
    pub fn number(self) -> u8 {
        self.index() + 1
    }

    /// Zero-based channel address used in command bytes
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Command setting the wiper of `channel` to `level`
pub fn write_rdac(channel: Channel, level: u8) -> [u8; 2] {
    [cmd::WRITE_RDAC | channel.index(), level]
}

/// Command persisting all four wiper levels to EEPROM
pub fn store_eeprom() -> [u8; 2] {
    [cmd::ACCESS_EEPROM | cmd::ALL_CHANNELS, cmd::EEPROM_STORE]
}

/// Command restoring all four wiper levels from EEPROM
pub fn load_eeprom() -> [u8; 2] {
    [cmd::ACCESS_EEPROM | cmd::ALL_CHANNELS, cmd::EEPROM_LOAD]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    #[test]
    fn test_channel_numbering() {
        assert_eq!(Channel::from_number(1), Some(Channel::Ch1));
        assert_eq!(Channel::from_number(4), Some(Channel::Ch4));
        assert_eq!(Channel::from_number(0), None);
        assert_eq!(Channel::from_number(5), None);

        assert_eq!(Channel::Ch1.index(), 0);
        assert_eq!(Channel::Ch4.index(), 3);
        assert_eq!(Channel::Ch3.number(), 3);
    }

    #[test]
    fn test_channel_clamping() {
        assert_eq!(Channel::clamped(0), (Channel::Ch1, true));
        assert_eq!(Channel::clamped(2), (Channel::Ch2, false));
        assert_eq!(Channel::clamped(5), (Channel::Ch4, true));
        assert_eq!(Channel::clamped(255), (Channel::Ch4, true));
    }

    #[test]
    fn test_all_channels_match_count() {
        assert_eq!(Channel::ALL.len(), usize::from(CHANNEL_COUNT));
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(usize::from(channel.index()), i);
            assert_eq!(Channel::from_number(channel.number()), Some(*channel));
        }
        assert_eq!(Channel::clamped(CHANNEL_COUNT + 1), (Channel::Ch4, true));
    }

    #[test]
    fn test_write_rdac_encoding() {
        assert_eq!(write_rdac(Channel::Ch1, 128), [0x10, 128]);
        assert_eq!(write_rdac(Channel::Ch4, 0), [0x13, 0]);
    }

    #[test]
    fn test_eeprom_commands() {
        assert_eq!(store_eeprom(), [0x78, 0x01]);
        assert_eq!(load_eeprom(), [0x78, 0x00]);
    }

    #[test]
    fn test_addresses() {
        let config = BoardConfig::REV_A.two_wire;
        assert_eq!(Digipot::U5.address(&config), 0x2A);
        assert_eq!(Digipot::U6.address(&config), 0x2B);
    }
}
