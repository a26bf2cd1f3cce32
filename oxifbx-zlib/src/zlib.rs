//! Zlib stream decoding.
//!
//! The zlib format (RFC 1950) wraps raw DEFLATE data with a header and
//! an Adler-32 checksum. FBX stores compressed array properties in this
//! format.
//!
//! # Format
//!
//! ```text
//! +---+---+============+---+---+---+---+
//! |CMF|FLG| compressed |    ADLER32    |
//! +---+---+============+---+---+---+---+
//! ```
//!
//! - CMF: Compression Method and Flags
//!   - Bits 0-3: CM (Compression Method) - must be 8 for DEFLATE
//!   - Bits 4-7: CINFO (Compression Info) - log2(window size) - 8
//! - FLG: Flags
//!   - Bits 0-4: FCHECK - check bits so (CMF*256 + FLG) mod 31 == 0
//!   - Bit 5: FDICT - preset dictionary present (rejected)
//!   - Bits 6-7: FLEVEL - compression level (0-3)
//! - Compressed data (DEFLATE format)
//! - ADLER32: Adler-32 checksum of uncompressed data (big-endian); some
//!   writers omit it, see [`ChecksumMode`]

use crate::config::{ChecksumMode, InflateConfig};
use crate::inflate::{BlockRecord, Inflater, inflate_with};
use oxifbx_core::BitReader;
use oxifbx_core::error::{InflateError, Result};
use tracing::debug;

/// Compression method value for DEFLATE.
pub const CM_DEFLATE: u8 = 8;

/// Largest CINFO value (32KB window).
pub const MAX_CINFO: u8 = 7;

/// Size of the Adler-32 trailer in bytes.
pub const TRAILER_SIZE: usize = 4;

/// Zlib compression level indicator in header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ZlibLevel {
    /// Fastest compression.
    Fastest = 0,
    /// Fast compression.
    Fast = 1,
    /// Default compression.
    Default = 2,
    /// Maximum compression.
    Maximum = 3,
}

impl ZlibLevel {
    /// Convert the two FLEVEL bits to a level indicator.
    fn from_flevel(flevel: u8) -> Self {
        match flevel & 0x03 {
            0 => Self::Fastest,
            1 => Self::Fast,
            2 => Self::Default,
            _ => Self::Maximum,
        }
    }

    /// Lowercase name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Fast => "fast",
            Self::Default => "default",
            Self::Maximum => "maximum",
        }
    }
}

/// A validated two-byte zlib header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibHeader {
    /// Compression Method and Flags byte.
    pub cmf: u8,
    /// Flags byte.
    pub flg: u8,
}

impl ZlibHeader {
    /// Header size in bytes.
    pub const SIZE: usize = 2;

    /// Parse and validate the first two bytes of `input`.
    ///
    /// Rejects a compression method other than DEFLATE, a window larger than
    /// 32KB, a failing FCHECK and a preset dictionary.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let (cmf, flg) = match input {
            [cmf, flg, ..] => (*cmf, *flg),
            _ => {
                return Err(InflateError::out_of_data(
                    input.len() as u64 * 8,
                    (Self::SIZE - input.len()) as u64 * 8,
                ));
            }
        };

        let cm = cmf & 0x0F;
        if cm != CM_DEFLATE {
            return Err(InflateError::corrupt(
                0,
                format!("Unsupported compression method: {}", cm),
            ));
        }

        let cinfo = cmf >> 4;
        if cinfo > MAX_CINFO {
            return Err(InflateError::corrupt(
                0,
                format!("Invalid window size: CINFO={}", cinfo),
            ));
        }

        let check = (cmf as u16) * 256 + (flg as u16);
        if check % 31 != 0 {
            return Err(InflateError::corrupt(
                1,
                format!("Header check failed: {:#06x} is not a multiple of 31", check),
            ));
        }

        if (flg >> 5) & 1 != 0 {
            return Err(InflateError::corrupt(
                1,
                "Preset dictionary required but not supported",
            ));
        }

        Ok(Self { cmf, flg })
    }

    /// CINFO: base-2 logarithm of the window size, minus eight.
    pub fn cinfo(&self) -> u8 {
        self.cmf >> 4
    }

    /// LZ77 window size declared by the stream.
    pub fn window_size(&self) -> usize {
        1 << (self.cinfo() as usize + 8)
    }

    /// Compression level hint (FLEVEL).
    pub fn level(&self) -> ZlibLevel {
        ZlibLevel::from_flevel(self.flg >> 6)
    }
}

/// Adler-32 checksum calculator.
///
/// Adler-32 is a checksum algorithm designed by Mark Adler.
/// It is faster than CRC-32 but provides less protection against random errors.
#[derive(Clone, Debug)]
pub struct Adler32 {
    a: u32,
    b: u32,
}

/// Largest prime smaller than 65536.
const ADLER_MOD: u32 = 65521;

/// Number of bytes to process before reducing.
const NMAX: usize = 5552;

impl Adler32 {
    /// Create a new Adler-32 calculator.
    pub fn new() -> Self {
        Self { a: 1, b: 0 }
    }

    /// Update the checksum with more data.
    pub fn update(&mut self, data: &[u8]) {
        let mut a = self.a;
        let mut b = self.b;

        // Reduce every NMAX bytes so the sums stay within u32
        for chunk in data.chunks(NMAX) {
            for &byte in chunk {
                a += byte as u32;
                b += a;
            }
            a %= ADLER_MOD;
            b %= ADLER_MOD;
        }

        self.a = a;
        self.b = b;
    }

    /// Finalize and return the checksum.
    pub fn finish(&self) -> u32 {
        (self.b << 16) | self.a
    }

    /// Compute Adler-32 checksum of data in one shot.
    pub fn checksum(data: &[u8]) -> u32 {
        let mut adler = Self::new();
        adler.update(data);
        adler.finish()
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the Adler-32 trailer check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerStatus {
    /// The trailer was not inspected.
    Skipped,
    /// Fewer than four bytes followed the final block.
    Absent,
    /// The trailer was present and matched the output.
    Verified(u32),
}

impl TrailerStatus {
    /// Lowercase name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Absent => "absent",
            Self::Verified(_) => "verified",
        }
    }
}

/// What the decoder saw while inflating one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflateReport {
    /// The validated zlib header.
    pub header: ZlibHeader,
    /// Decoded blocks in emission order.
    pub blocks: Vec<BlockRecord>,
    /// Trailer check outcome.
    pub trailer: TrailerStatus,
    /// Input bytes consumed, header and trailer included.
    pub consumed: usize,
}

/// Decompressed output together with its [`InflateReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inflated {
    /// Decompressed bytes.
    pub data: Vec<u8>,
    /// Stream report.
    pub report: InflateReport,
}

/// Zlib stream decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibDecoder {
    config: InflateConfig,
}

impl ZlibDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: InflateConfig) -> Self {
        Self { config }
    }

    /// The decoder configuration.
    pub fn config(&self) -> &InflateConfig {
        &self.config
    }

    /// Decode one complete zlib stream.
    ///
    /// Any failure aborts the whole call; partial output is never returned.
    pub fn decode(&self, input: &[u8]) -> Result<Inflated> {
        let header = ZlibHeader::parse(input)?;
        debug!(
            cinfo = header.cinfo(),
            window_size = header.window_size(),
            level = header.level().as_str(),
            "zlib header"
        );

        let mut reader = BitReader::new(&input[ZlibHeader::SIZE..]);
        let mut inflater = Inflater::with_config(&self.config)?;
        inflater.inflate(&mut reader)?;

        // The block list is consumed here; the output moves out without a copy.
        let (data, blocks) = inflater.into_parts();

        reader.align_to_byte();
        let trailer = self.check_trailer(&mut reader, &data)?;
        debug!(
            output_len = data.len(),
            blocks = blocks.len(),
            trailer = trailer.as_str(),
            "zlib stream decoded"
        );

        Ok(Inflated {
            data,
            report: InflateReport {
                header,
                blocks,
                trailer,
                consumed: ZlibHeader::SIZE + reader.byte_position(),
            },
        })
    }

    fn check_trailer(&self, reader: &mut BitReader<'_>, data: &[u8]) -> Result<TrailerStatus> {
        let present = reader.remaining_bytes() >= TRAILER_SIZE;

        match (self.config.checksum, present) {
            (ChecksumMode::Ignore, _) => Ok(TrailerStatus::Skipped),
            (ChecksumMode::VerifyIfPresent, false) => Ok(TrailerStatus::Absent),
            (ChecksumMode::Require, false) => Err(InflateError::out_of_data(
                reader.bit_position(),
                (TRAILER_SIZE * 8) as u64,
            )),
            (_, true) => {
                let offset = reader.byte_position() + ZlibHeader::SIZE;
                let stored = reader.read_u32_be()?;
                let computed = Adler32::checksum(data);

                if stored != computed {
                    return Err(InflateError::corrupt(
                        offset as u64,
                        format!(
                            "Adler-32 mismatch: expected {:08x}, computed {:08x}",
                            stored, computed
                        ),
                    ));
                }

                Ok(TrailerStatus::Verified(stored))
            }
        }
    }
}

/// Decompress zlib format data with the default configuration.
///
/// # Example
///
/// ```
/// use oxifbx_zlib::zlib::zlib_inflate;
///
/// // A stored block holding "Hi", followed by its Adler-32.
/// let stream = [
///     0x78, 0x01, 0x01, 0x02, 0x00, 0xFD, 0xFF, b'H', b'i', 0x00, 0xFB, 0x00, 0xB2,
/// ];
/// assert_eq!(zlib_inflate(&stream).unwrap(), b"Hi");
/// ```
pub fn zlib_inflate(input: &[u8]) -> Result<Vec<u8>> {
    zlib_inflate_with(input, &InflateConfig::DEFAULT)
}

/// Decompress zlib format data with an explicit configuration.
pub fn zlib_inflate_with(input: &[u8], config: &InflateConfig) -> Result<Vec<u8>> {
    Ok(ZlibDecoder::new(*config).decode(input)?.data)
}

/// Decompress a bare DEFLATE stream that has no zlib header or trailer.
pub fn raw_inflate(input: &[u8]) -> Result<Vec<u8>> {
    inflate_with(input, &InflateConfig::DEFAULT)
}
