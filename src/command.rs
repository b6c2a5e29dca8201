//! ILI9341 command definitions
//!
//! Command bytes understood by the ILI9341 TFT controller, plus the constants
//! that define the compact init-sequence table encoding used by
//! [`InitSequence`](crate::InitSequence).
//!
//! Commands are sent over SPI with the DC pin low; their parameters follow
//! with DC high.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_init::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! // RGB565 pixel format
//! let _ = interface.send_command(command::PIXEL_FORMAT_SET);
//! let _ = interface.send_data(&[0x55]);
//! ```

// Table encoding

/// Delay flag in the argument-count byte of an init-sequence record
///
/// When set, one extra byte follows the arguments holding the delay in
/// milliseconds.
pub const DELAY: u8 = 0x80;

/// Mask selecting the argument count from the argument-count byte
pub const ARG_COUNT_MASK: u8 = 0x7F;

/// Maximum number of argument bytes a single record can carry
pub const MAX_ARGS: usize = ARG_COUNT_MASK as usize;

/// Delay applied when a record's delay byte is zero
///
/// Zero is not "no delay": it stands for 128 ms.
pub const ZERO_CODE_DELAY_MS: u32 = 128;

// System commands

/// No operation (0x00)
pub const NOP: u8 = 0x00;

/// Software reset (0x01)
///
/// Registers return to their defaults. Wait at least 5 ms before the next
/// command, 120 ms if the panel was in sleep-out mode.
pub const SOFT_RESET: u8 = 0x01;

/// Sleep out (0x11)
///
/// Leaves sleep mode. The supply and clock circuits need 120 ms to settle.
pub const SLEEP_OUT: u8 = 0x11;

/// Gamma curve select (0x26)
pub const GAMMA_SET: u8 = 0x26;

/// Display off (0x28)
pub const DISPLAY_OFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPLAY_ON: u8 = 0x29;

// Memory access

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Page (row) address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const PAGE_ADDRESS_SET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Pixel data follows until the next command.
pub const MEMORY_WRITE: u8 = 0x2C;

/// Memory access control, MADCTL (0x36)
///
/// Row/column exchange, mirroring and RGB/BGR order.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Vertical scrolling start address (0x37)
pub const VERTICAL_SCROLL_START: u8 = 0x37;

/// Pixel format set, COLMOD (0x3A)
///
/// 0x55 selects 16 bits per pixel on both the RGB and MCU interfaces.
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

// Panel control

/// Frame rate control in normal mode (0xB1)
pub const FRAME_RATE_CONTROL: u8 = 0xB1;

/// Display function control (0xB6)
pub const DISPLAY_FUNCTION_CONTROL: u8 = 0xB6;

/// Power control 1, GVDD level (0xC0)
pub const POWER_CONTROL_1: u8 = 0xC0;

/// Power control 2, step-up factor (0xC1)
pub const POWER_CONTROL_2: u8 = 0xC1;

/// VCOM control 1 (0xC5)
pub const VCOM_CONTROL_1: u8 = 0xC5;

/// VCOM control 2 (0xC7)
pub const VCOM_CONTROL_2: u8 = 0xC7;

/// Power control A (0xCB)
pub const POWER_CONTROL_A: u8 = 0xCB;

/// Power control B (0xCF)
pub const POWER_CONTROL_B: u8 = 0xCF;

/// Positive gamma correction (0xE0)
///
/// Requires 15 bytes.
pub const POSITIVE_GAMMA_CORRECTION: u8 = 0xE0;

/// Negative gamma correction (0xE1)
///
/// Requires 15 bytes.
pub const NEGATIVE_GAMMA_CORRECTION: u8 = 0xE1;

/// Driver timing control A (0xE8)
pub const DRIVER_TIMING_CONTROL_A: u8 = 0xE8;

/// Driver timing control B (0xEA)
pub const DRIVER_TIMING_CONTROL_B: u8 = 0xEA;

/// Power on sequence control (0xED)
pub const POWER_ON_SEQUENCE_CONTROL: u8 = 0xED;

/// Undocumented vendor register (0xEF) found in reference init code
pub const VENDOR_EF: u8 = 0xEF;

/// Enable 3-gamma function control (0xF2)
pub const ENABLE_3G: u8 = 0xF2;

/// Pump ratio control (0xF7)
pub const PUMP_RATIO_CONTROL: u8 = 0xF7;
