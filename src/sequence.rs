//! Init sequence tables and their interpreter
//!
//! Display controllers are brought up by a vendor-specified list of commands,
//! each with a few parameter bytes and sometimes a settling delay. This module
//! stores that list in the compact table format used by most MIPI-style
//! controller init code:
//!
//! ```text
//! command | count | args[count & 0x7F] | delay (only if count & 0x80)
//! ```
//!
//! A delay byte of `0` means 128 ms, any other value is the delay in
//! milliseconds.
//!
//! [`InitSequence::new`] checks that the records exactly cover the table, so
//! a malformed table is rejected before anything reaches the bus. Because it
//! is a `const fn`, a table held in a `const` can be checked at compile time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_init::{command, InitSequence};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use ili9341_init::DisplayInterface;
//! # struct MockInterface;
//! # impl DisplayInterface for MockInterface {
//! #     type Error = Infallible;
//! #     fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_backlight(&mut self, _on: bool) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut interface = MockInterface;
//! # let mut delay = MockDelay;
//! const TABLE: &[u8] = &[
//!     command::SOFT_RESET, command::DELAY, 0x00, // reset, wait 128ms
//!     command::PIXEL_FORMAT_SET, 1, 0x55,
//!     command::SLEEP_OUT, command::DELAY, 120,
//! ];
//!
//! let sequence = match InitSequence::new(TABLE) {
//!     Ok(sequence) => sequence,
//!     Err(_) => return,
//! };
//! assert_eq!(sequence.record_count(), 3);
//! let _ = sequence.execute(&mut interface, &mut delay);
//! ```

use embedded_hal::delay::DelayNs;

use crate::command::{ARG_COUNT_MASK, DELAY, ZERO_CODE_DELAY_MS};
use crate::error::SequenceError;
use crate::interface::DisplayInterface;

/// One decoded init-sequence record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// Command byte, sent with DC low
    pub command: u8,
    /// Parameter bytes, sent verbatim with DC high
    pub args: &'a [u8],
    /// Delay after the record, in milliseconds
    pub delay_ms: Option<u32>,
}

impl<'a> Instruction<'a> {
    /// Create an instruction without a delay
    pub const fn new(command: u8, args: &'a [u8]) -> Self {
        Self {
            command,
            args,
            delay_ms: None,
        }
    }

    /// Add a delay after the instruction
    pub const fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Number of table bytes this record occupies
    pub const fn encoded_len(&self) -> usize {
        2 + self.args.len() + if self.delay_ms.is_some() { 1 } else { 0 }
    }

    /// Send this record to the controller
    ///
    /// Sends the command, then the arguments as a single data transfer (none
    /// for an empty argument list), then blocks for the delay.
    ///
    /// # Errors
    ///
    /// Returns the interface error of the first failing transfer.
    pub fn apply<I, D>(&self, interface: &mut I, delay: &mut D) -> Result<(), I::Error>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        log::trace!("init: {}", self);
        interface.send_command(self.command)?;
        if !self.args.is_empty() {
            interface.send_data(self.args)?;
        }
        if let Some(ms) = self.delay_ms {
            delay.delay_ms(ms);
        }
        Ok(())
    }
}

impl core::fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x} {:02x?}", self.command, self.args)?;
        if let Some(ms) = self.delay_ms {
            write!(f, " +{ms}ms")?;
        }
        Ok(())
    }
}

/// A well-formed init sequence table
///
/// Holding an `InitSequence` proves every record lies inside the table and
/// the records end exactly at its last byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitSequence<'a> {
    bytes: &'a [u8],
    records: usize,
}

impl<'a> InitSequence<'a> {
    /// Validate a table
    ///
    /// An empty table is valid and sends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Truncated`] naming the first record that
    /// would read past the end of the table.
    pub const fn new(bytes: &'a [u8]) -> Result<Self, SequenceError> {
        let mut offset = 0;
        let mut records = 0;
        while offset < bytes.len() {
            match record_len(bytes, offset) {
                Some(len) => {
                    offset += len;
                    records += 1;
                }
                None => {
                    return Err(SequenceError::Truncated {
                        offset,
                        len: bytes.len(),
                    });
                }
            }
        }
        Ok(Self { bytes, records })
    }

    /// Raw table bytes
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Table length in bytes
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the table has no records
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of records in the table
    pub const fn record_count(&self) -> usize {
        self.records
    }

    /// Iterate over the decoded records in table order
    pub const fn instructions(&self) -> Instructions<'a> {
        Instructions {
            bytes: self.bytes,
            offset: 0,
        }
    }

    /// Sum of all record delays in milliseconds
    pub fn total_delay_ms(&self) -> u32 {
        self.instructions()
            .filter_map(|instruction| instruction.delay_ms)
            .sum()
    }

    /// Send every record to the controller
    ///
    /// Runs once, synchronously, while the caller has exclusive use of the
    /// interface. Returns the number of table bytes consumed, which is always
    /// the table length.
    ///
    /// # Errors
    ///
    /// Stops at the first failing transfer and returns its error. Records
    /// after it are not sent.
    pub fn execute<I, D>(&self, interface: &mut I, delay: &mut D) -> Result<usize, I::Error>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        let mut instructions = self.instructions();
        for instruction in &mut instructions {
            instruction.apply(interface, delay)?;
        }
        log::debug!(
            "init sequence sent: {} records, {} bytes",
            self.records,
            instructions.position()
        );
        Ok(instructions.position())
    }
}

impl<'a> TryFrom<&'a [u8]> for InitSequence<'a> {
    type Error = SequenceError;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl<'a> IntoIterator for &InitSequence<'a> {
    type Item = Instruction<'a>;
    type IntoIter = Instructions<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions()
    }
}

/// Iterator over the records of an [`InitSequence`]
#[derive(Clone, Debug)]
pub struct Instructions<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl Instructions<'_> {
    /// Bytes consumed so far
    pub const fn position(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Instruction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (instruction, len) = decode(self.bytes, self.offset)?;
        self.offset += len;
        Some(instruction)
    }
}

impl core::iter::FusedIterator for Instructions<'_> {}

/// Length of the record starting at `offset`, or `None` if it overruns
const fn record_len(bytes: &[u8], offset: usize) -> Option<usize> {
    if offset + 2 > bytes.len() {
        return None;
    }
    let raw = bytes[offset + 1];
    let delay_bytes = if raw & DELAY != 0 { 1 } else { 0 };
    let len = 2 + (raw & ARG_COUNT_MASK) as usize + delay_bytes;
    if offset + len > bytes.len() {
        None
    } else {
        Some(len)
    }
}

fn decode(bytes: &[u8], offset: usize) -> Option<(Instruction<'_>, usize)> {
    let len = record_len(bytes, offset)?;
    let record = bytes.get(offset..offset + len)?;
    let (&command, rest) = record.split_first()?;
    let (&raw, rest) = rest.split_first()?;
    let arg_count = (raw & ARG_COUNT_MASK) as usize;
    let args = rest.get(..arg_count)?;
    let delay_ms = if raw & DELAY != 0 {
        match *rest.get(arg_count)? {
            0 => Some(ZERO_CODE_DELAY_MS),
            code => Some(u32::from(code)),
        }
    } else {
        None
    };
    Some((
        Instruction {
            command,
            args,
            delay_ms,
        },
        len,
    ))
}
