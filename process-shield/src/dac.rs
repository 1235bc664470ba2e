//! MCP4921 12-bit DAC (SPI)
//!
//! Each write is one 16-bit word, MSB first:
//!
//! ```text
//! 15    14    13    12    11 ............ 0
//! A/B   BUF   GA    SHDN  D11 .......... D0
//! ```
//!
//! Datasheet: <http://ww1.microchip.com/downloads/en/devicedoc/21897b.pdf>

use crate::convert::DAC_MAX_LEVEL;

/// Configuration bits of the write command
pub mod cfg {
    /// Select DAC B (MCP4922 only; always clear on the shield)
    pub const CHANNEL_B: u16 = 1 << 15;
    /// Buffer the reference input
    pub const BUFFERED: u16 = 1 << 14;
    /// Output gain 1x (clear for 2x)
    pub const GAIN_1X: u16 = 1 << 13;
    /// Output enabled (clear to shut the output down)
    pub const ACTIVE: u16 = 1 << 12;
}

/// Configuration used by the shield: channel A, unbuffered, 1x gain, active
pub const SHIELD_CONFIG: u16 = cfg::GAIN_1X | cfg::ACTIVE;

/// Bits of the word carrying the level
const DATA_MASK: u16 = DAC_MAX_LEVEL;

/// Word setting the output to `level` with the shield configuration
///
/// Bits above the 12-bit level are discarded, so the config field can
/// never be overwritten.
pub fn write_word(level: u16) -> u16 {
    SHIELD_CONFIG | (level & DATA_MASK)
}
