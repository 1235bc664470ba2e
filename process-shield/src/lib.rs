//! Process-simulator shield driver
//!
//! Driver for the analog process-simulator shield used in control
//! engineering labs. The shield carries:
//!
//! - Three status LEDs (D1-D3) and a push-button (SW1)
//! - Potentiometer RV1 and two analog process outputs (A0, A1)
//! - Two AD5144 quad digital potentiometers (U5, U6) on I2C
//! - An MCP4921 12-bit DAC (U4) on SPI driving the process input
//!
//! [`ProcessShield`] converts physical quantities (ohms, volts, fractions
//! of full scale) into device levels and issues the bus transactions.
//! Out-of-range requests are clamped, never rejected, and every write
//! reports the level actually sent in a [`Written`].
//!
//! ```
//! use process_shield::{Digipot, ProcessShield};
//! use shield_hal::mock::MockBoard;
//!
//! let board = MockBoard::new();
//! let mut shield = ProcessShield::new(board.io(), board.i2c(), board.spi());
//!
//! shield.set_led_d1(true);
//! let written = shield.set_channel_resistance(Digipot::U5, 1, 50_000.0).unwrap();
//! assert_eq!(written.level, 128);
//!
//! let written = shield.set_voltage(2.5).unwrap();
//! assert_eq!(written.level, 2047);
//! ```
//!
//! # Features
//!
//! - `defmt` - Derive `defmt::Format` and log clamped requests

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod convert;
pub mod dac;
pub mod digipot;
pub mod error;
pub mod shield;

pub use config::BoardConfig;
pub use convert::Written;
pub use digipot::{Channel, Digipot};
pub use error::ShieldError;
pub use shield::{AnalogInput, Led, ProcessShield};
