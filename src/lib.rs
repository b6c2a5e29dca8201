//! ILI9341 Init Sequence Interpreter
//!
//! Table-driven bring-up for ILI9341-class TFT controllers, with the wiring
//! of the uGame S3 handheld as a ready-made board preset.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Compact init-sequence tables, validated at compile time when `const`
//! - Table encoder for building sequences at runtime
//! - `embedded-graphics` integration (with `graphics` feature)
//!
//! ## Table format
//!
//! Each record is `command, count, args..., [delay]`. The low 7 bits of
//! `count` give the number of argument bytes; bit 7 ([`command::DELAY`])
//! means one delay byte follows them. A delay byte of 0 waits 128 ms.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ili9341_init::{board, Display, Interface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let backlight = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst, backlight);
//!
//! let mut display = Display::new(interface, board::CONFIG);
//! let _ = display.reset(&mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// uGame S3 display wiring and init sequence
pub mod board;
/// ILI9341 command definitions and table encoding constants
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Init sequence tables and their interpreter
pub mod sequence;
/// Init sequence encoder
pub mod writer;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{Builder, COLOR_DEPTH_RGB565, Config, Dimensions, MAX_EXTENT};
pub use display::Display;
pub use error::{BuilderError, Error, SequenceError};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, Interface, RESET_PULSE_MS, RESET_RECOVERY_MS};
pub use sequence::{InitSequence, Instruction, Instructions};
#[cfg(feature = "alloc")]
pub use writer::encode_vec;
pub use writer::SequenceWriter;
