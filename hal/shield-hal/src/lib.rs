//! Process Shield Hardware Abstraction Layer
//!
//! This crate defines the platform capabilities the process-simulator
//! shield driver needs from its host microcontroller. A board support
//! package implements them once; the driver and its conversions can then
//! run on any chip, or on the host against [`mock::MockBoard`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / control loop             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  process-shield (ProcessShield driver)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  shield-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │   MockBoard   │
//! │   adapters    │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalIo`] - Pin modes, digital writes and reads
//! - [`analog::AnalogIn`] - 10-bit analog samples
//! - [`i2c::TwoWireBus`] - Addressed I2C write transactions
//! - [`spi::FourWireBus`] - 16-bit SPI transactions
//!
//! # Features
//!
//! - `defmt` - Derive `defmt::Format` on the public types
//! - `mock` - Enable the [`mock`] module

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod analog;
pub mod eh;
pub mod gpio;
pub mod i2c;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use analog::AnalogIn;
pub use gpio::{DigitalIo, Level, PinMode};
pub use i2c::{I2cConfig, TwoWireBus};
pub use spi::{BitOrder, FourWireBus, Mode, SpiSettings};
