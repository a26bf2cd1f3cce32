//! # OxiFBX Zlib
//!
//! Pure Rust zlib/DEFLATE decompression (RFC 1950, RFC 1951) for the
//! compressed array properties of binary FBX files.
//!
//! ## Features
//!
//! - **Decompression**: Full support for all DEFLATE block types
//!   - Stored (uncompressed) blocks
//!   - Fixed Huffman codes
//!   - Dynamic Huffman codes
//! - **Zlib framing**: header validation and optional Adler-32 trailer
//! - **FBX arrays**: encoding dispatch, exact-length checks and typed views
//!
//! There is no encoder.
//!
//! ## Example
//!
//! ```rust
//! use oxifbx_zlib::{ArrayElement, ArrayEncoding, ArrayProperty, zlib_inflate};
//!
//! // A stored block holding "Hi", followed by its Adler-32.
//! let stream = [
//!     0x78, 0x01, 0x01, 0x02, 0x00, 0xFD, 0xFF, b'H', b'i', 0x00, 0xFB, 0x00, 0xB2,
//! ];
//! assert_eq!(zlib_inflate(&stream).unwrap(), b"Hi");
//!
//! // The same bytes as a zlib-encoded boolean array.
//! let property = ArrayProperty {
//!     element: ArrayElement::Bool,
//!     count: 2,
//!     encoding: ArrayEncoding::Zlib,
//!     payload: &stream,
//! };
//! assert_eq!(property.to_bools().unwrap(), vec![true, true]);
//! ```
//!
//! ## Checksum Modes
//!
//! - `Ignore`: the trailer is never read
//! - `VerifyIfPresent`: checked when four bytes follow the final block (default)
//! - `Require`: must be present and match

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod array;
pub mod config;
pub mod huffman;
pub mod inflate;
pub mod tables;
pub mod zlib;

// Re-exports
pub use array::{ArrayElement, ArrayEncoding, ArrayProperty};
pub use config::{ChecksumMode, InflateConfig};
pub use huffman::HuffmanTree;
pub use inflate::{BlockKind, BlockRecord, Inflater, inflate, inflate_with};
pub use zlib::{
    Adler32, InflateReport, Inflated, TrailerStatus, ZlibDecoder, ZlibHeader, ZlibLevel,
    raw_inflate, zlib_inflate, zlib_inflate_with,
};
