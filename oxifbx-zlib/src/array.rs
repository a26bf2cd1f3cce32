//! FBX array properties.
//!
//! Binary FBX stores arrays as a one-byte type code followed by a small
//! header and the contents:
//!
//! ```text
//! +------+-----------+----------+-------------+==========+
//! | type | count u32 | enc u32  | comp_len u32| contents |
//! +------+-----------+----------+-------------+==========+
//! ```
//!
//! With `enc == 0` the contents are `count` little-endian elements. With
//! `enc == 1` they are a `comp_len` byte zlib stream that inflates to
//! exactly that many elements.

use crate::config::InflateConfig;
use crate::zlib::ZlibDecoder;
use oxifbx_core::BitReader;
use oxifbx_core::error::{InflateError, Result};
use std::borrow::Cow;
use tracing::debug;

/// Upper bound on DEFLATE output bytes per input byte.
const MAX_EXPANSION: usize = 1032;

/// Array contents encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ArrayEncoding {
    /// Uncompressed little-endian elements.
    Raw = 0,
    /// A zlib stream.
    Zlib = 1,
}

impl ArrayEncoding {
    /// Convert from the on-disk value.
    pub fn from_u32(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Raw),
            1 => Ok(Self::Zlib),
            other => Err(InflateError::corrupt(
                0,
                format!("Unknown array encoding: {}", other),
            )),
        }
    }
}

/// Array element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayElement {
    /// `f`: 32-bit float.
    F32,
    /// `d`: 64-bit float.
    F64,
    /// `i`: 32-bit signed integer.
    I32,
    /// `l`: 64-bit signed integer.
    I64,
    /// `b`: boolean, one byte each.
    Bool,
}

impl ArrayElement {
    /// Map an FBX type code to an element type.
    pub fn from_type_code(code: u8) -> Result<Self> {
        match code {
            b'f' => Ok(Self::F32),
            b'd' => Ok(Self::F64),
            b'i' => Ok(Self::I32),
            b'l' => Ok(Self::I64),
            b'b' => Ok(Self::Bool),
            other => Err(InflateError::corrupt(
                0,
                format!("Not an array type code: {:#04x}", other),
            )),
        }
    }

    /// The FBX type code.
    pub fn type_code(&self) -> u8 {
        match self {
            Self::F32 => b'f',
            Self::F64 => b'd',
            Self::I32 => b'i',
            Self::I64 => b'l',
            Self::Bool => b'b',
        }
    }

    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::F64 | Self::I64 => 8,
            Self::Bool => 1,
        }
    }
}

/// An array property borrowed from an FBX file buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayProperty<'a> {
    /// Element type.
    pub element: ArrayElement,
    /// Number of elements.
    pub count: u32,
    /// Contents encoding.
    pub encoding: ArrayEncoding,
    /// Encoded contents.
    pub payload: &'a [u8],
}

impl<'a> ArrayProperty<'a> {
    /// Parse an array property record starting at its type code.
    ///
    /// Returns the property and the number of bytes it occupies.
    pub fn parse(input: &'a [u8]) -> Result<(Self, usize)> {
        let mut reader = BitReader::new(input);

        let element = ArrayElement::from_type_code(reader.read_byte()?)?;
        let count = read_u32_le(&mut reader)?;
        let encoding = ArrayEncoding::from_u32(read_u32_le(&mut reader)?)?;
        let compressed_len = read_u32_le(&mut reader)?;

        let payload_len = match encoding {
            ArrayEncoding::Zlib => compressed_len as usize,
            ArrayEncoding::Raw => expected_len(element, count)?,
        };
        let payload = reader.read_bytes(payload_len)?;

        let property = Self {
            element,
            count,
            encoding,
            payload,
        };
        Ok((property, reader.byte_position()))
    }

    /// Uncompressed size in bytes: `count` times the element size.
    pub fn expected_len(&self) -> Result<usize> {
        expected_len(self.element, self.count)
    }

    /// Decoded contents, inflated when the property is compressed.
    ///
    /// Fails unless the contents hold exactly [`expected_len`](Self::expected_len)
    /// bytes.
    pub fn decode(&self) -> Result<Cow<'a, [u8]>> {
        let expected = self.expected_len()?;

        let data = match self.encoding {
            ArrayEncoding::Raw => Cow::Borrowed(self.payload),
            ArrayEncoding::Zlib => {
                let ceiling = self.payload.len().saturating_mul(MAX_EXPANSION);
                if expected > ceiling {
                    return Err(InflateError::corrupt(
                        0,
                        format!(
                            "Array of {} {:?} elements needs {} bytes, {} compressed bytes hold at most {}",
                            self.count,
                            self.element,
                            expected,
                            self.payload.len(),
                            ceiling
                        ),
                    ));
                }
                let config = InflateConfig::for_expected_len(expected);
                Cow::Owned(ZlibDecoder::new(config).decode(self.payload)?.data)
            }
        };

        if data.len() != expected {
            return Err(InflateError::corrupt(
                0,
                format!(
                    "Array of {} {:?} elements needs {} bytes, got {}",
                    self.count,
                    self.element,
                    expected,
                    data.len()
                ),
            ));
        }

        debug!(
            element = ?self.element,
            count = self.count,
            encoding = ?self.encoding,
            "decoded array property"
        );
        Ok(data)
    }

    /// Decode as 64-bit floats.
    pub fn to_f64s(&self) -> Result<Vec<f64>> {
        self.typed(ArrayElement::F64, f64::from_le_bytes)
    }

    /// Decode as 32-bit floats.
    pub fn to_f32s(&self) -> Result<Vec<f32>> {
        self.typed(ArrayElement::F32, f32::from_le_bytes)
    }

    /// Decode as 32-bit integers.
    pub fn to_i32s(&self) -> Result<Vec<i32>> {
        self.typed(ArrayElement::I32, i32::from_le_bytes)
    }

    /// Decode as 64-bit integers.
    pub fn to_i64s(&self) -> Result<Vec<i64>> {
        self.typed(ArrayElement::I64, i64::from_le_bytes)
    }

    /// Decode as booleans; any nonzero byte is `true`.
    pub fn to_bools(&self) -> Result<Vec<bool>> {
        self.typed(ArrayElement::Bool, |[b]: [u8; 1]| b != 0)
    }

    fn typed<T, const N: usize>(
        &self,
        want: ArrayElement,
        from: fn([u8; N]) -> T,
    ) -> Result<Vec<T>> {
        if self.element != want {
            return Err(InflateError::corrupt(
                0,
                format!("Array holds {:?} elements, not {:?}", self.element, want),
            ));
        }

        let data = self.decode()?;
        Ok(data
            .chunks_exact(N)
            .map(|chunk| {
                let mut bytes = [0u8; N];
                bytes.copy_from_slice(chunk);
                from(bytes)
            })
            .collect())
    }
}

fn expected_len(element: ArrayElement, count: u32) -> Result<usize> {
    (count as usize).checked_mul(element.size()).ok_or_else(|| {
        InflateError::corrupt(0, format!("Array of {} elements is too large", count))
    })
}

fn read_u32_le(reader: &mut BitReader<'_>) -> Result<u32> {
    let bytes = reader.read_bytes(4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
