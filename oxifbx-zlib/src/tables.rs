//! Constant tables for DEFLATE decoding (RFC 1951).
//!
//! Pure data: the fixed Huffman code lengths, the LZ77 length and distance
//! base/extra-bit tables, and the code-length code transmission order. Any
//! deviation from the RFC breaks interoperability with every real zlib
//! stream, so the values are copied verbatim.

/// Size of the literal/length alphabet including the two unused codes 286-287.
pub const LITLEN_SYMBOL_COUNT: usize = 288;

/// Size of the distance alphabet.
pub const DISTANCE_SYMBOL_COUNT: usize = 30;

/// Size of the code length alphabet.
pub const CODELEN_SYMBOL_COUNT: usize = 19;

/// End of block symbol.
pub const END_OF_BLOCK: u16 = 256;

/// Largest valid length symbol.
pub const MAX_LENGTH_SYMBOL: u16 = 285;

const fn build_fixed_litlen_lengths() -> [u8; LITLEN_SYMBOL_COUNT] {
    let mut lengths = [0u8; LITLEN_SYMBOL_COUNT];
    let mut i = 0;
    while i < LITLEN_SYMBOL_COUNT {
        lengths[i] = match i {
            0..=143 => 8,
            144..=255 => 9,
            256..=279 => 7,
            _ => 8,
        };
        i += 1;
    }
    lengths
}

const fn build_symbols<const N: usize>() -> [u16; N] {
    let mut symbols = [0u16; N];
    let mut i = 0;
    while i < N {
        symbols[i] = i as u16;
        i += 1;
    }
    symbols
}

/// Fixed literal/length code lengths (RFC 1951 Section 3.2.6).
///
/// - Symbols 0-143: 8 bits
/// - Symbols 144-255: 9 bits
/// - Symbols 256-279: 7 bits
/// - Symbols 280-287: 8 bits
pub const FIXED_LITLEN_LENGTHS: [u8; LITLEN_SYMBOL_COUNT] = build_fixed_litlen_lengths();

/// Fixed distance code lengths: all 30 codes use 5 bits.
pub const FIXED_DISTANCE_LENGTHS: [u8; DISTANCE_SYMBOL_COUNT] = [5; DISTANCE_SYMBOL_COUNT];

/// Symbol index for the literal/length alphabet (0..288).
pub const LITLEN_SYMBOLS: [u16; LITLEN_SYMBOL_COUNT] = build_symbols();

/// Symbol index for the distance alphabet (0..30).
pub const DISTANCE_SYMBOLS: [u16; DISTANCE_SYMBOL_COUNT] = build_symbols();

/// Symbol index for the code length alphabet (0..19).
pub const CODELEN_SYMBOLS: [u16; CODELEN_SYMBOL_COUNT] = build_symbols();

/// Length code base values (RFC 1951 Section 3.2.5).
///
/// For length codes 257-285, this gives the base length value.
/// Extra bits are added to get the final length.
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, // 257-264
    11, 13, 15, 17, // 265-268
    19, 23, 27, 31, // 269-272
    35, 43, 51, 59, // 273-276
    67, 83, 99, 115, // 277-280
    131, 163, 195, 227, // 281-284
    258, // 285
];

/// Number of extra bits for length codes 257-285.
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, // 257-264
    1, 1, 1, 1, // 265-268
    2, 2, 2, 2, // 269-272
    3, 3, 3, 3, // 273-276
    4, 4, 4, 4, // 277-280
    5, 5, 5, 5, // 281-284
    0, // 285
];

/// Distance code base values (RFC 1951 Section 3.2.5).
pub const DISTANCE_BASE: [u16; DISTANCE_SYMBOL_COUNT] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Number of extra bits for distance codes 0-29.
pub const DISTANCE_EXTRA_BITS: [u8; DISTANCE_SYMBOL_COUNT] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Transmission order of the code length code lengths (RFC 1951 Section 3.2.7).
pub const CODE_LENGTH_ORDER: [usize; CODELEN_SYMBOL_COUNT] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Decode a match length from a length symbol (257-285) and its extra bits.
pub fn decode_length(symbol: u16, extra: u16) -> u16 {
    debug_assert!(
        (257..=MAX_LENGTH_SYMBOL).contains(&symbol),
        "Invalid length symbol: {}",
        symbol
    );
    LENGTH_BASE[(symbol - 257) as usize] + extra
}

/// Decode a match distance from a distance symbol (0-29) and its extra bits.
pub fn decode_distance(symbol: u16, extra: u16) -> u16 {
    debug_assert!(
        (symbol as usize) < DISTANCE_SYMBOL_COUNT,
        "Invalid distance symbol: {}",
        symbol
    );
    DISTANCE_BASE[symbol as usize] + extra
}
