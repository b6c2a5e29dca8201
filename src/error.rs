//! Error types for the driver
//!
//! This module defines error types for init-sequence tables
//! ([`SequenceError`]), configuration building ([`BuilderError`]) and display
//! operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`SequenceError`] - Malformed tables and encoder misuse
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use ili9341_init::{BuilderError, Dimensions, InitSequence, SequenceError};
//!
//! // Record claims three arguments but only two follow
//! let result = InitSequence::new(&[0xEF, 3, 0x03, 0x80]);
//! assert!(matches!(result, Err(SequenceError::Truncated { offset: 0, len: 4 })));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(480, 320); // Too large
//! assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
//! ```

use crate::interface::DisplayInterface;

/// Largest extent of either axis supported by the ILI9341 (240x320 native)
pub const MAX_EXTENT: u16 = 320;

/// Errors raised while validating or encoding an init sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// The record starting at `offset` runs past the end of the table
    Truncated {
        /// Byte offset of the first byte of the offending record
        offset: usize,
        /// Total table length
        len: usize,
    },
    /// More argument bytes than the 7-bit count can describe
    TooManyArguments {
        /// Command the arguments belong to
        command: u8,
        /// Number of arguments supplied
        count: usize,
    },
    /// Delay that cannot be expressed in one delay byte
    ///
    /// Valid delays are 1..=255 ms. A zero delay is expressed by omitting it.
    InvalidDelay {
        /// Command the delay belongs to
        command: u8,
        /// Requested delay in milliseconds
        delay_ms: u32,
    },
    /// Output buffer cannot hold the next record
    BufferTooSmall {
        /// Bytes needed after the record is written
        required: usize,
        /// Buffer size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated { offset, len } => write!(
                f,
                "Malformed init sequence: record at offset {offset} overruns table of {len} bytes"
            ),
            Self::TooManyArguments { command, count } => write!(
                f,
                "Too many arguments for command {command:#04x}: {count} (max 127)"
            ),
            Self::InvalidDelay { command, delay_ms } => write!(
                f,
                "Invalid delay for command {command:#04x}: {delay_ms}ms (must be 1-255)"
            ),
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Sequence buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for SequenceError {}

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    /// Boot is aborted at the first failing transfer; nothing is retried.
    Interface(I::Error),
    /// Init sequence rejected
    Sequence(SequenceError),
    /// Address window outside the panel or with start after end
    InvalidWindow {
        /// First column
        x0: u16,
        /// First row
        y0: u16,
        /// Last column (inclusive)
        x1: u16,
        /// Last row (inclusive)
        y1: u16,
    },
}

impl<I: DisplayInterface> From<SequenceError> for Error<I> {
    fn from(err: SequenceError) -> Self {
        Self::Sequence(err)
    }
}

// Only the interface error needs `Debug`, not the interface itself
impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::Sequence(e) => f.debug_tuple("Sequence").field(e).finish(),
            Self::InvalidWindow { x0, y0, x1, y1 } => f
                .debug_struct("InvalidWindow")
                .field("x0", x0)
                .field("y0", y0)
                .field("x1", x1)
                .field("y1", y1)
                .finish(),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::Sequence(e) => write!(f, "{e}"),
            Self::InvalidWindow { x0, y0, x1, y1 } => {
                write!(f, "Invalid address window: ({x0}, {y0})..=({x1}, {y1})")
            }
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Init sequence was not specified
    ///
    /// [`Builder::init_sequence()`](crate::config::Builder::init_sequence) must be called before building.
    MissingInitSequence,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
    /// Color depth other than 16 bits per pixel
    UnsupportedColorDepth(u8),
    /// Panel offset pushes the last column or row past the 16-bit RAM address
    InvalidOffset {
        /// First RAM column requested
        column_start: u16,
        /// First RAM row requested
        row_start: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::MissingInitSequence => write!(f, "Init sequence must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (each axis must be 1-{MAX_EXTENT})"
            ),
            Self::UnsupportedColorDepth(depth) => {
                write!(f, "Unsupported color depth {depth} (only 16 bpp)")
            }
            Self::InvalidOffset {
                column_start,
                row_start,
            } => write!(
                f,
                "Invalid offset ({column_start}, {row_start}): panel would exceed RAM address range"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
