//! Bit-level reading over an in-memory byte slice.
//!
//! DEFLATE packs data LSB-first: within each byte the least significant bit
//! is consumed first, and multi-bit fields are assembled with the first bit
//! read in bit 0 of the result.
//!
//! # Example
//!
//! ```
//! use oxifbx_core::bitstream::BitReader;
//!
//! let data = [0b1011_0101, 0xAB];
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_byte().unwrap(), 0xAB); // discards the rest of byte 0
//! assert!(reader.is_empty());
//! ```

use crate::error::{InflateError, Result};

/// A forward-only bit reader over a borrowed byte slice.
///
/// The reader never seeks backwards. `bit_offset` is always in `0..8` and the
/// byte cursor never decreases. Reads past the end of the slice fail with
/// [`InflateError::OutOfData`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input bytes.
    data: &'a [u8],
    /// Index of the byte currently being consumed.
    byte_pos: usize,
    /// Bits already consumed from `data[byte_pos]`.
    bit_offset: u8,
}

impl<'a> BitReader<'a> {
    /// Create a new `BitReader` at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_offset: 0,
        }
    }

    /// Total input length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether every bit of the input has been consumed.
    pub fn is_empty(&self) -> bool {
        self.byte_pos >= self.data.len()
    }

    /// Current position in bits from the start of the input.
    pub fn bit_position(&self) -> u64 {
        self.byte_pos as u64 * 8 + self.bit_offset as u64
    }

    /// Index of the byte currently being consumed.
    pub fn byte_position(&self) -> usize {
        self.byte_pos
    }

    /// Bits consumed from the current byte (0-7).
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    /// Whole bytes left after aligning to the next byte boundary.
    pub fn remaining_bytes(&self) -> usize {
        let start = self.aligned_pos();
        self.data.len().saturating_sub(start)
    }

    /// Byte index the next aligned read would start at.
    fn aligned_pos(&self) -> usize {
        if self.bit_offset == 0 {
            self.byte_pos
        } else {
            self.byte_pos + 1
        }
    }

    fn eof(&self, needed_bits: u64) -> InflateError {
        InflateError::out_of_data(self.bit_position(), needed_bits)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = *self.data.get(self.byte_pos).ok_or_else(|| self.eof(1))?;
        let bit = (byte >> self.bit_offset) & 1;

        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_pos += 1;
        }

        Ok(bit != 0)
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32, with the first bit read in the LSB position.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        // Fail before consuming anything so the cursor stays meaningful.
        let available = (self.data.len() as u64 * 8).saturating_sub(self.bit_position());
        if available < count as u64 {
            return Err(self.eof(count as u64));
        }

        let mut result = 0u32;
        for i in 0..count {
            if self.read_bit()? {
                result |= 1 << i;
            }
        }

        Ok(result)
    }

    /// Discard any partially consumed byte.
    pub fn align_to_byte(&mut self) {
        if self.bit_offset != 0 {
            self.bit_offset = 0;
            self.byte_pos += 1;
        }
    }

    /// Read a whole byte, discarding any partially consumed byte first.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.align_to_byte();

        let byte = *self.data.get(self.byte_pos).ok_or_else(|| self.eof(8))?;
        self.byte_pos += 1;
        Ok(byte)
    }

    /// Read `count` whole bytes after aligning to a byte boundary.
    ///
    /// The length is checked against the remaining input before anything is
    /// consumed.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.align_to_byte();

        if self.remaining_bytes() < count {
            return Err(self.eof(count as u64 * 8));
        }

        let start = self.byte_pos;
        self.byte_pos += count;
        Ok(&self.data[start..start + count])
    }

    /// Read an aligned little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read an aligned big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
