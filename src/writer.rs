//! Init sequence encoder
//!
//! Builds a table in the format read by [`InitSequence`] from a list of
//! `(command, args, delay)` groups, without allocating.
//!
//! ## Example
//!
//! ```
//! use ili9341_init::{command, SequenceWriter};
//!
//! let mut buf = [0u8; 16];
//! let mut writer = SequenceWriter::new(&mut buf);
//! let pushed = writer
//!     .command(command::SOFT_RESET, &[], Some(128))
//!     .and_then(|w| w.command(command::PIXEL_FORMAT_SET, &[0x55], None))
//!     .and_then(|w| w.command(command::SLEEP_OUT, &[], Some(120)));
//! assert!(pushed.is_ok());
//!
//! let sequence = writer.finish();
//! assert_eq!(
//!     sequence.map(|s| s.as_bytes().to_owned()),
//!     Ok(vec![0x01, 0x80, 0x80, 0x3a, 0x01, 0x55, 0x11, 0x80, 0x78]),
//! );
//! ```

use crate::command::{DELAY, MAX_ARGS};
use crate::error::SequenceError;
use crate::sequence::{InitSequence, Instruction};

/// Writes init-sequence records into a caller-provided buffer
#[derive(Debug)]
pub struct SequenceWriter<'buf> {
    buf: &'buf mut [u8],
    len: usize,
}

impl<'buf> SequenceWriter<'buf> {
    /// Create a writer over an output buffer
    pub fn new(buf: &'buf mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one record
    ///
    /// A delay of exactly 128 ms is written as the literal byte `0x80`.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::TooManyArguments`] for more than 127 arguments
    /// - [`SequenceError::InvalidDelay`] for a delay of 0 or above 255 ms
    /// - [`SequenceError::BufferTooSmall`] if the record does not fit
    ///
    /// The buffer is left untouched on error.
    pub fn push(&mut self, instruction: &Instruction<'_>) -> Result<&mut Self, SequenceError> {
        let (count, delay) = encode_header(instruction)?;
        let required = self.len + instruction.encoded_len();
        let provided = self.buf.len();
        let out = self
            .buf
            .get_mut(self.len..required)
            .ok_or(SequenceError::BufferTooSmall { required, provided })?;

        let args_end = 2 + instruction.args.len();
        out[0] = instruction.command;
        out[1] = count;
        out[2..args_end].copy_from_slice(instruction.args);
        if let Some(delay) = delay {
            out[args_end] = delay;
        }

        self.len = required;
        Ok(self)
    }

    /// Append one record from its parts
    ///
    /// # Errors
    ///
    /// See [`push`](Self::push).
    pub fn command(
        &mut self,
        command: u8,
        args: &[u8],
        delay_ms: Option<u32>,
    ) -> Result<&mut Self, SequenceError> {
        self.push(&Instruction {
            command,
            args,
            delay_ms,
        })
    }

    /// Finish writing and borrow the written records as a sequence
    ///
    /// # Errors
    ///
    /// Propagates validation of the written bytes.
    pub fn finish(self) -> Result<InitSequence<'buf>, SequenceError> {
        let Self { buf, len } = self;
        let bytes: &'buf [u8] = buf;
        InitSequence::new(&bytes[..len])
    }
}

/// Encode a list of records into a new table
///
/// # Errors
///
/// Same record rules as [`SequenceWriter::push`].
#[cfg(feature = "alloc")]
pub fn encode_vec(instructions: &[Instruction<'_>]) -> Result<alloc::vec::Vec<u8>, SequenceError> {
    let total: usize = instructions.iter().map(Instruction::encoded_len).sum();
    let mut bytes = alloc::vec![0u8; total];
    let mut writer = SequenceWriter::new(&mut bytes);
    for instruction in instructions {
        writer.push(instruction)?;
    }
    Ok(bytes)
}

fn encode_header(instruction: &Instruction<'_>) -> Result<(u8, Option<u8>), SequenceError> {
    let count = instruction.args.len();
    if count > MAX_ARGS {
        return Err(SequenceError::TooManyArguments {
            command: instruction.command,
            count,
        });
    }
    let count = count as u8;
    match instruction.delay_ms {
        None => Ok((count, None)),
        Some(ms @ 1..=255) => Ok((count | DELAY, Some(ms as u8))),
        Some(delay_ms) => Err(SequenceError::InvalidDelay {
            command: instruction.command,
            delay_ms,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_writes_delay_and_plain_records() {
        let mut buf = [0u8; 8];
        let mut writer = SequenceWriter::new(&mut buf);
        assert!(writer.command(0x01, &[], Some(128)).is_ok());
        assert!(writer.command(0xEF, &[0x80, 0x02, 0x00], None).is_ok());
        assert_eq!(writer.len(), 8);

        let sequence = writer.finish().unwrap();
        assert_eq!(
            sequence.as_bytes(),
            &[0x01, 0x80, 0x80, 0xEF, 3, 0x80, 0x02, 0x00]
        );
        assert_eq!(sequence.record_count(), 2);
    }

    #[test]
    fn test_decoded_records_reencode_equivalently() {
        let table: &[u8] = &[0x01, 0x80, 0x00, 0xc5, 2, 0x3e, 0x28, 0x11, 0x80, 0x78];
        let sequence = InitSequence::new(table).unwrap();

        let mut buf = [0u8; 16];
        let mut writer = SequenceWriter::new(&mut buf);
        for instruction in &sequence {
            writer.push(&instruction).unwrap();
        }
        let rewritten = writer.finish().unwrap();

        let before: Vec<_> = sequence.instructions().collect();
        let after: Vec<_> = rewritten.instructions().collect();
        assert_eq!(before, after);
        // Zero delay code is rewritten as the explicit 128
        assert_eq!(rewritten.as_bytes()[2], 0x80);
    }

    #[test]
    fn test_too_many_arguments_rejected() {
        let args = [0u8; 128];
        let mut buf = [0u8; 256];
        let mut writer = SequenceWriter::new(&mut buf);
        let result = writer.command(0xE0, &args, None).map(|_| ());
        assert_eq!(
            result,
            Err(SequenceError::TooManyArguments {
                command: 0xE0,
                count: 128
            })
        );
        assert!(writer.is_empty());
    }

    #[test]
    fn test_max_arguments_accepted() {
        let args = [0xAAu8; MAX_ARGS];
        let mut buf = [0u8; MAX_ARGS + 2];
        let mut writer = SequenceWriter::new(&mut buf);
        assert!(writer.command(0xE0, &args, None).is_ok());
        let sequence = writer.finish().unwrap();
        assert_eq!(sequence.as_bytes()[1], 0x7F);
    }

    #[test]
    fn test_invalid_delays_rejected() {
        let mut buf = [0u8; 8];
        let mut writer = SequenceWriter::new(&mut buf);
        assert_eq!(
            writer.command(0x11, &[], Some(0)).map(|_| ()),
            Err(SequenceError::InvalidDelay {
                command: 0x11,
                delay_ms: 0
            })
        );
        assert_eq!(
            writer.command(0x11, &[], Some(256)).map(|_| ()),
            Err(SequenceError::InvalidDelay {
                command: 0x11,
                delay_ms: 256
            })
        );
        assert!(writer.command(0x11, &[], Some(255)).is_ok());
    }

    #[test]
    fn test_buffer_too_small_leaves_buffer_untouched() {
        let mut buf = [0u8; 4];
        let mut writer = SequenceWriter::new(&mut buf);
        assert!(writer.command(0x3a, &[0x55], None).is_ok());
        assert_eq!(
            writer.command(0x36, &[0x38], None).map(|_| ()),
            Err(SequenceError::BufferTooSmall {
                required: 6,
                provided: 4
            })
        );
        let sequence = writer.finish().unwrap();
        assert_eq!(sequence.as_bytes(), &[0x3a, 1, 0x55]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_encode_vec() {
        let bytes = encode_vec(&[
            Instruction::new(0x01, &[]).with_delay(128),
            Instruction::new(0x36, &[0x38]),
        ])
        .unwrap();
        assert_eq!(bytes, alloc::vec![0x01, 0x80, 0x80, 0x36, 1, 0x38]);
    }
}
