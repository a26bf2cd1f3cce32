//! DEFLATE decompression (inflate).
//!
//! This module implements the DEFLATE block decoder as specified in RFC 1951.
//! It supports all three block types:
//! - Type 0: Stored (uncompressed)
//! - Type 1: Fixed Huffman codes
//! - Type 2: Dynamic Huffman codes
//!
//! All blocks of one stream write into a single history buffer, because
//! back-references may reach into output produced by earlier blocks. Each
//! decoded block is recorded with the range of output it produced.

use crate::config::InflateConfig;
use crate::huffman::HuffmanTree;
use crate::tables::{
    CODE_LENGTH_ORDER, CODELEN_SYMBOL_COUNT, CODELEN_SYMBOLS, DISTANCE_EXTRA_BITS,
    DISTANCE_SYMBOL_COUNT, DISTANCE_SYMBOLS, END_OF_BLOCK, FIXED_DISTANCE_LENGTHS,
    FIXED_LITLEN_LENGTHS, LENGTH_EXTRA_BITS, LITLEN_SYMBOLS, MAX_LENGTH_SYMBOL, decode_distance,
    decode_length,
};
use oxifbx_core::error::{InflateError, Result};
use oxifbx_core::{BitReader, GrowBuf};
use std::fmt;
use tracing::{debug, trace};

/// Largest HLIT a dynamic header may declare.
const MAX_HLIT: usize = 286;

/// Largest HDIST a dynamic header may declare.
const MAX_HDIST: usize = 30;

/// Compression method of a DEFLATE block (the BTYPE field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// BTYPE 00: raw bytes.
    Stored,
    /// BTYPE 01: predefined Huffman codes.
    Fixed,
    /// BTYPE 10: Huffman codes transmitted in the block header.
    Dynamic,
}

impl BlockKind {
    /// Map a BTYPE value to a block kind. BTYPE 3 is reserved.
    pub fn from_btype(btype: u32) -> Option<Self> {
        match btype {
            0 => Some(Self::Stored),
            1 => Some(Self::Fixed),
            2 => Some(Self::Dynamic),
            _ => None,
        }
    }

    /// Lowercase name of this block kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Fixed => "fixed",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded block, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRecord {
    /// Block compression method.
    pub kind: BlockKind,
    /// Whether BFINAL was set.
    pub is_final: bool,
    /// Offset of the block's first output byte in the stream output.
    pub output_start: usize,
    /// Number of bytes the block produced.
    pub output_len: usize,
    /// Bit position of the block header in the input.
    pub input_bit_start: u64,
    /// Bit position just past the block in the input.
    pub input_bit_end: u64,
}

impl BlockRecord {
    /// Range of the stream output this block produced.
    pub fn output_range(&self) -> std::ops::Range<usize> {
        self.output_start..self.output_start + self.output_len
    }
}

/// The two predefined trees used by fixed blocks.
#[derive(Debug)]
struct FixedTrees {
    litlen: HuffmanTree,
    distance: HuffmanTree,
}

impl FixedTrees {
    fn build() -> Result<Self> {
        Ok(Self {
            litlen: HuffmanTree::from_lengths(&FIXED_LITLEN_LENGTHS, &LITLEN_SYMBOLS)?,
            distance: HuffmanTree::from_lengths(&FIXED_DISTANCE_LENGTHS, &DISTANCE_SYMBOLS)?,
        })
    }
}

/// DEFLATE block decoder.
///
/// One `Inflater` decodes one stream. The fixed trees are built the first
/// time a fixed block appears and reused for the rest of the stream.
#[derive(Debug)]
pub struct Inflater {
    /// Decoded stream output, also the back-reference history.
    output: GrowBuf<u8>,
    /// Decoded blocks in emission order.
    blocks: GrowBuf<BlockRecord>,
    /// Lazily built fixed trees.
    fixed: Option<FixedTrees>,
    /// Whether the final block has been decoded.
    finished: bool,
}

impl Inflater {
    /// Create a new DEFLATE decompressor with the default configuration.
    pub fn new() -> Self {
        Self {
            output: GrowBuf::new(),
            blocks: GrowBuf::new(),
            fixed: None,
            finished: false,
        }
    }

    /// Create a new DEFLATE decompressor honouring `config`'s output ceiling
    /// and size hint.
    pub fn with_config(config: &InflateConfig) -> Result<Self> {
        let mut output = match config.max_output {
            Some(limit) => GrowBuf::with_limit(limit),
            None => GrowBuf::new(),
        };
        if let Some(hint) = config.size_hint {
            output.reserve_hint(hint)?;
        }

        Ok(Self {
            output,
            ..Self::new()
        })
    }

    /// Decode blocks until the one with BFINAL set.
    pub fn inflate(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        while !self.finished {
            self.inflate_block(reader)?;
        }
        Ok(())
    }

    /// Decode a single block and record it.
    pub fn inflate_block(&mut self, reader: &mut BitReader<'_>) -> Result<BlockRecord> {
        let input_bit_start = reader.bit_position();
        let output_start = self.output.len();

        let is_final = reader.read_bit()?;
        let btype = reader.read_bits(2)?;

        let kind = BlockKind::from_btype(btype).ok_or_else(|| {
            InflateError::corrupt(reader.byte_position() as u64, "Reserved block type 3")
        })?;

        match kind {
            BlockKind::Stored => self.inflate_stored(reader)?,
            BlockKind::Fixed => self.inflate_fixed(reader)?,
            BlockKind::Dynamic => self.inflate_dynamic(reader)?,
        }

        let record = BlockRecord {
            kind,
            is_final,
            output_start,
            output_len: self.output.len() - output_start,
            input_bit_start,
            input_bit_end: reader.bit_position(),
        };
        self.blocks.push(record)?;
        self.finished = is_final;

        debug!(
            kind = %record.kind,
            is_final = record.is_final,
            output_len = record.output_len,
            "decoded deflate block"
        );

        Ok(record)
    }

    /// Decompress a stored (uncompressed) block.
    fn inflate_stored(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        // LEN and NLEN are byte aligned; any partial byte is discarded.
        let len = reader.read_u16_le()?;
        let nlen = reader.read_u16_le()?;

        if len != !nlen {
            return Err(InflateError::corrupt(
                reader.byte_position() as u64,
                format!("LEN/NLEN mismatch: {} vs {}", len, !nlen),
            ));
        }

        let bytes = reader.read_bytes(len as usize)?;
        self.output.extend_from_slice(bytes)
    }

    /// Decompress a block with fixed Huffman codes.
    fn inflate_fixed(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        if self.fixed.is_none() {
            self.fixed = Some(FixedTrees::build()?);
        }
        if let Some(trees) = &self.fixed {
            decode_symbols(&mut self.output, reader, &trees.litlen, &trees.distance)?;
        }
        Ok(())
    }

    /// Decompress a block with dynamic Huffman codes.
    fn inflate_dynamic(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        let (litlen_tree, dist_tree) = read_dynamic_trees(reader)?;
        decode_symbols(&mut self.output, reader, &litlen_tree, &dist_tree)
    }

    /// Whether the final block has been decoded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Output decoded so far.
    pub fn output(&self) -> &[u8] {
        self.output.as_slice()
    }

    /// Blocks decoded so far.
    pub fn blocks(&self) -> &[BlockRecord] {
        self.blocks.as_slice()
    }

    /// Consume the decoder, returning the output and the block list.
    pub fn into_parts(self) -> (Vec<u8>, Vec<BlockRecord>) {
        (self.output.into_vec(), self.blocks.into_vec())
    }

    /// Take ownership of the decompressed output.
    pub fn into_output(self) -> Vec<u8> {
        self.output.into_vec()
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

/// The LZ77 loop shared by fixed and dynamic blocks.
fn decode_symbols(
    output: &mut GrowBuf<u8>,
    reader: &mut BitReader<'_>,
    litlen_tree: &HuffmanTree,
    dist_tree: &HuffmanTree,
) -> Result<()> {
    loop {
        let code = litlen_tree.decode(reader)?;

        if code < END_OF_BLOCK {
            output.push(code as u8)?;
        } else if code == END_OF_BLOCK {
            break;
        } else if code <= MAX_LENGTH_SYMBOL {
            let length_idx = (code - 257) as usize;
            let extra = reader.read_bits(LENGTH_EXTRA_BITS[length_idx])? as u16;
            let length = decode_length(code, extra);

            let dist_code = dist_tree.decode(reader)?;
            if dist_code as usize >= DISTANCE_SYMBOL_COUNT {
                return Err(InflateError::corrupt(
                    reader.byte_position() as u64,
                    format!("Invalid distance code: {}", dist_code),
                ));
            }

            let dist_extra = reader.read_bits(DISTANCE_EXTRA_BITS[dist_code as usize])? as u16;
            let distance = decode_distance(dist_code, dist_extra) as usize;

            if distance > output.len() {
                return Err(InflateError::corrupt(
                    reader.byte_position() as u64,
                    format!(
                        "Distance {} too far back: only {} bytes decoded",
                        distance,
                        output.len()
                    ),
                ));
            }

            output.copy_match(distance, length as usize)?;
        } else {
            return Err(InflateError::corrupt(
                reader.byte_position() as u64,
                format!("Invalid literal/length code: {}", code),
            ));
        }
    }

    Ok(())
}

/// Decode a dynamic block header into literal/length and distance trees.
fn read_dynamic_trees(reader: &mut BitReader<'_>) -> Result<(HuffmanTree, HuffmanTree)> {
    let hlit = reader.read_bits(5)? as usize + 257;
    let hdist = reader.read_bits(5)? as usize + 1;
    let hclen = reader.read_bits(4)? as usize + 4;

    trace!(hlit, hdist, hclen, "dynamic block header");

    if hlit > MAX_HLIT || hdist > MAX_HDIST {
        return Err(InflateError::corrupt(
            reader.byte_position() as u64,
            format!("Too many codes: HLIT={} HDIST={}", hlit, hdist),
        ));
    }

    // Code length code lengths arrive in permuted order; the rest stay 0.
    let mut code_length_lengths = [0u8; CODELEN_SYMBOL_COUNT];
    for &position in CODE_LENGTH_ORDER.iter().take(hclen) {
        code_length_lengths[position] = reader.read_bits(3)? as u8;
    }

    let code_length_tree = HuffmanTree::from_lengths(&code_length_lengths, &CODELEN_SYMBOLS)?;

    let lengths = read_code_lengths(reader, &code_length_tree, hlit + hdist)?;
    let (litlen_lengths, dist_lengths) = lengths.split_at(hlit);

    if litlen_lengths[END_OF_BLOCK as usize] == 0 {
        return Err(InflateError::corrupt(
            reader.byte_position() as u64,
            "Missing end-of-block code",
        ));
    }

    let litlen_tree = HuffmanTree::from_lengths(litlen_lengths, &LITLEN_SYMBOLS[..hlit])?;
    let dist_tree = HuffmanTree::from_lengths(dist_lengths, &DISTANCE_SYMBOLS[..hdist])?;

    Ok((litlen_tree, dist_tree))
}

/// Decode `count` run-length encoded code lengths.
fn read_code_lengths(
    reader: &mut BitReader<'_>,
    code_length_tree: &HuffmanTree,
    count: usize,
) -> Result<Vec<u8>> {
    let mut lengths = vec![0u8; count];
    let mut i = 0;

    while i < count {
        let symbol = code_length_tree.decode(reader)?;

        let (value, repeat) = match symbol {
            0..=15 => (symbol as u8, 1),
            16 => {
                // Copy previous length 3-6 times
                if i == 0 {
                    return Err(InflateError::corrupt(
                        reader.byte_position() as u64,
                        "Repeat code 16 with no previous length",
                    ));
                }
                (lengths[i - 1], reader.read_bits(2)? as usize + 3)
            }
            17 => (0, reader.read_bits(3)? as usize + 3),
            18 => (0, reader.read_bits(7)? as usize + 11),
            _ => {
                return Err(InflateError::corrupt(
                    reader.byte_position() as u64,
                    format!("Invalid code length symbol: {}", symbol),
                ));
            }
        };

        if i + repeat > count {
            return Err(InflateError::corrupt(
                reader.byte_position() as u64,
                format!("Code length repeat overruns table: {} + {} > {}", i, repeat, count),
            ));
        }

        lengths[i..i + repeat].fill(value);
        i += repeat;
    }

    Ok(lengths)
}

/// Decompress a raw DEFLATE stream (no zlib header or trailer).
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    inflate_with(data, &InflateConfig::DEFAULT)
}

/// Decompress a raw DEFLATE stream with an explicit configuration.
///
/// Only the output ceiling and size hint apply; raw streams carry no
/// checksum.
pub fn inflate_with(data: &[u8], config: &InflateConfig) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    let mut inflater = Inflater::with_config(config)?;
    inflater.inflate(&mut reader)?;
    Ok(inflater.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxifbx_core::ErrorKind;

    /// LSB-first bit packer for hand-assembled streams.
    struct Bits {
        out: Vec<u8>,
        n: usize,
    }

    impl Bits {
        fn new() -> Self {
            Self { out: Vec::new(), n: 0 }
        }

        /// Write `count` bits of `value`, least significant first.
        fn put(&mut self, value: u32, count: usize) -> &mut Self {
            for i in 0..count {
                if self.n % 8 == 0 {
                    self.out.push(0);
                }
                if (value >> i) & 1 == 1 {
                    *self.out.last_mut().unwrap() |= 1 << (self.n % 8);
                }
                self.n += 1;
            }
            self
        }

        /// Write a Huffman code, most significant bit first.
        fn code(&mut self, code: u32, len: usize) -> &mut Self {
            for i in (0..len).rev() {
                self.put((code >> i) & 1, 1);
            }
            self
        }

        /// Fixed-code literal (0-143 only).
        fn lit(&mut self, byte: u8) -> &mut Self {
            assert!(byte < 144);
            self.code(0x30 + byte as u32, 8)
        }

        /// Fixed-code end of block.
        fn eob(&mut self) -> &mut Self {
            self.code(0, 7)
        }

        fn done(&self) -> Vec<u8> {
            self.out.clone()
        }
    }

    #[test]
    fn test_inflate_stored() {
        // Stored block: BFINAL=1, BTYPE=00, then aligned LEN=5, NLEN=!5, "Hello"
        let compressed = vec![
            0x01, // BFINAL=1, BTYPE=00, padding
            0x05, 0x00, // LEN=5
            0xFA, 0xFF, // NLEN
            b'H', b'e', b'l', b'l', b'o',
        ];

        let result = inflate(&compressed).unwrap();
        assert_eq!(result, b"Hello");
    }

    #[test]
    fn test_inflate_empty() {
        let compressed = vec![0x01, 0x00, 0x00, 0xFF, 0xFF];
        let result = inflate(&compressed).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_stored_nlen_mismatch() {
        let compressed = vec![0x01, 0x05, 0x00, 0xFB, 0xFF, 1, 2, 3, 4, 5];
        let err = inflate(&compressed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn test_stored_truncated() {
        let compressed = vec![0x01, 0x05, 0x00, 0xFA, 0xFF, 1, 2];
        let err = inflate(&compressed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfData);
    }

    #[test]
    fn test_stored_after_fixed_block_any_bit_offset() {
        // A fixed block leaves the reader mid-byte; the stored block that
        // follows must still pick up LEN at the next byte boundary.
        let mut bits = Bits::new();
        bits.put(0, 1).put(1, 2).lit(b'x').eob(); // 3 + 8 + 7 = 18 bits
        bits.put(1, 1).put(0, 2); // stored header at bit 18
        let mut data = bits.done();
        data.extend_from_slice(&[0x05, 0x00, 0xFA, 0xFF]);
        data.extend_from_slice(b"abcde");

        let result = inflate(&data).unwrap();
        assert_eq!(result, b"xabcde");
    }

    #[test]
    fn test_reserved_block_type() {
        // BFINAL=1, BTYPE=11
        let err = inflate(&[0b0000_0111]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
        assert!(err.to_string().contains("Reserved"));
    }

    #[test]
    fn test_fixed_literals() {
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2);
        for &b in b"Hi!" {
            bits.lit(b);
        }
        bits.eob();

        assert_eq!(inflate(&bits.done()).unwrap(), b"Hi!");
    }

    #[test]
    fn test_fixed_high_literal() {
        // Literal 200 uses the 9-bit range: 110010000 + (200 - 144).
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).code(0x190 + (200 - 144), 9).eob();
        assert_eq!(inflate(&bits.done()).unwrap(), vec![200u8]);
    }

    #[test]
    fn test_overlapping_copy() {
        // 'A', then length 10 (symbol 264) at distance 1 (distance code 0).
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).lit(b'A');
        bits.code(264 - 256, 7).code(0, 5);
        bits.eob();

        let result = inflate(&bits.done()).unwrap();
        assert_eq!(result.len(), 11);
        assert!(result.iter().all(|&b| b == b'A'));
    }

    #[test]
    fn test_length_with_extra_bits() {
        // "ab" then length 12 (symbol 265 + 1 extra bit = 1) at distance 2.
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).lit(b'a').lit(b'b');
        bits.code(265 - 256, 7).put(1, 1).code(1, 5);
        bits.eob();

        let result = inflate(&bits.done()).unwrap();
        assert_eq!(result, b"ab".repeat(7));
    }

    #[test]
    fn test_distance_too_far() {
        // One literal, then a match at distance 2.
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).lit(b'A');
        bits.code(257 - 256, 7).code(1, 5);
        bits.eob();

        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
        assert!(err.to_string().contains("too far back"));
    }

    #[test]
    fn test_invalid_fixed_length_symbol() {
        // Symbol 286 is 11000110 in the fixed code.
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).lit(b'A').code(0xC0 + 6, 8);
        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn test_invalid_fixed_distance_symbol() {
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).lit(b'A');
        bits.code(257 - 256, 7).code(30, 5);
        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn test_multi_block_concatenation() {
        let mut bits = Bits::new();
        bits.put(0, 1).put(1, 2).lit(b'a').lit(b'b').eob();
        bits.put(1, 1).put(1, 2).lit(b'c').eob();

        let data = bits.done();
        let mut reader = BitReader::new(&data);
        let mut inflater = Inflater::new();
        inflater.inflate(&mut reader).unwrap();

        let blocks = inflater.blocks().to_vec();
        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].is_final);
        assert!(blocks[1].is_final);
        assert_eq!(blocks[0].output_range(), 0..2);
        assert_eq!(blocks[1].output_range(), 2..3);
        assert_eq!(blocks[0].input_bit_end, blocks[1].input_bit_start);
        assert_eq!(inflater.into_output(), b"abc");
    }

    #[test]
    fn test_back_reference_across_blocks() {
        let mut bits = Bits::new();
        bits.put(0, 1).put(1, 2).lit(b'x').lit(b'y').eob();
        // Second block copies "xy" twice from the first block's output.
        bits.put(1, 1).put(1, 2).code(258 - 256, 7).code(1, 5).eob();

        assert_eq!(inflate(&bits.done()).unwrap(), b"xyxyxy");
    }

    #[test]
    fn test_truncated_fixed_block() {
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).lit(b'A');
        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfData);
    }

    #[test]
    fn test_output_limit() {
        let mut bits = Bits::new();
        bits.put(1, 1).put(1, 2).lit(b'A');
        bits.code(264 - 256, 7).code(0, 5);
        bits.eob();

        let config = InflateConfig::DEFAULT.with_max_output(8);
        let err = inflate_with(&bits.done(), &config).unwrap_err();
        assert_eq!(err, InflateError::limit_exceeded(8));

        let config = InflateConfig::DEFAULT.with_max_output(11);
        assert_eq!(inflate_with(&bits.done(), &config).unwrap().len(), 11);
    }

    /// Header for a dynamic block with the given HLIT, HDIST=1 and a code
    /// length code where symbols 1, 2, 16, 17 and 18 are present.
    ///
    /// Resulting codes: 1 -> 00, 2 -> 01, 16 -> 100, 17 -> 101, 18 -> 110.
    fn dynamic_prefix(bits: &mut Bits, hlit: u32) {
        bits.put(1, 1).put(2, 2);
        bits.put(hlit - 257, 5).put(0, 5);
        bits.put(14, 4); // HCLEN=18 reaches position 1
        // Order: 16 17 18 0 8 7 9 6 10 5 11 4 12 3 13 2 14 1
        let mut lens = [0u32; 18];
        lens[0] = 3; // 16
        lens[1] = 3; // 17
        lens[2] = 3; // 18
        lens[15] = 2; // 2
        lens[17] = 2; // 1
        for l in lens {
            bits.put(l, 3);
        }
    }

    #[test]
    fn test_dynamic_repeat_without_previous() {
        let mut bits = Bits::new();
        dynamic_prefix(&mut bits, 257);
        bits.code(0b100, 3).put(0, 2); // symbol 16 in the first slot
        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
        assert!(err.to_string().contains("no previous"));
    }

    #[test]
    fn test_dynamic_block() {
        // Literal/length lengths: 'a' (97) = 1, 256 = 2, 257 = 2; distance 0 = 1.
        let mut bits = Bits::new();
        dynamic_prefix(&mut bits, 258);
        bits.code(0b110, 3).put(97 - 11, 7); // 97 zeros
        bits.code(0b00, 2); // 'a' -> 1
        bits.code(0b110, 3).put(127, 7); // 138 zeros (98..=235)
        bits.code(0b110, 3).put(20 - 11, 7); // 20 zeros (236..=255)
        bits.code(0b01, 2).code(0b01, 2); // 256, 257 -> 2
        bits.code(0b00, 2); // distance 0 -> 1

        // Litlen codes: 'a' = 0, 256 = 10, 257 = 11. Distance 0 = 0.
        bits.code(0b0, 1); // 'a'
        bits.code(0b11, 2).code(0, 1); // length 3, distance 1
        bits.code(0b10, 2); // end of block

        assert_eq!(inflate(&bits.done()).unwrap(), b"aaaa");
    }

    #[test]
    fn test_dynamic_repeat_overrun() {
        let mut bits = Bits::new();
        dynamic_prefix(&mut bits, 257);
        bits.code(0b110, 3).put(127, 7); // 138
        bits.code(0b110, 3).put(127, 7); // 276 > 258
        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
        assert!(err.to_string().contains("overruns"));
    }

    #[test]
    fn test_dynamic_missing_end_of_block() {
        let mut bits = Bits::new();
        dynamic_prefix(&mut bits, 257);
        bits.code(0b00, 2).code(0b00, 2); // symbols 0, 1 -> length 1
        bits.code(0b110, 3).put(127, 7); // 138 zeros
        bits.code(0b110, 3).put(107, 7); // 118 zeros, 258 total incl. distance
        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
        assert!(err.to_string().contains("end-of-block"));
    }

    #[test]
    fn test_dynamic_too_many_codes() {
        let mut bits = Bits::new();
        bits.put(1, 1).put(2, 2).put(30, 5).put(0, 5).put(0, 4);
        let err = inflate(&bits.done()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn test_fixed_trees_reused() {
        let mut bits = Bits::new();
        bits.put(0, 1).put(1, 2).lit(b'a').eob();
        bits.put(1, 1).put(1, 2).lit(b'b').eob();

        let data = bits.done();
        let mut reader = BitReader::new(&data);
        let mut inflater = Inflater::new();

        inflater.inflate_block(&mut reader).unwrap();
        assert!(inflater.fixed.is_some());
        assert!(!inflater.is_finished());
        inflater.inflate_block(&mut reader).unwrap();
        assert!(inflater.is_finished());
        assert_eq!(inflater.output(), b"ab");
    }
}
