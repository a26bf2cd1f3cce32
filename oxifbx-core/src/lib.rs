//! # OxiFBX Core
//!
//! Core components for the OxiFBX inflate pipeline.
//!
//! - [`bitstream`]: LSB-first bit reader over an in-memory byte slice
//! - [`buffer`]: growable buffers with geometric growth and fallible allocation
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     oxifbx inflate / inspect / array                    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: FBX array properties                                │
//! │     encoding dispatch, length checks, typed views       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     zlib framing, DEFLATE blocks, Huffman trees         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     BitReader, GrowBuf, InflateError                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxifbx_core::{BitReader, GrowBuf};
//!
//! let data = [0b0000_0101, 0x42];
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//!
//! let mut out = GrowBuf::new();
//! out.push(reader.read_byte().unwrap()).unwrap();
//! out.copy_match(1, 3).unwrap();
//! assert_eq!(out.as_slice(), &[0x42; 4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod buffer;
pub mod error;

// Re-exports for convenience
pub use bitstream::BitReader;
pub use buffer::GrowBuf;
pub use error::{ErrorKind, InflateError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::BitReader;
    pub use crate::buffer::GrowBuf;
    pub use crate::error::{ErrorKind, InflateError, Result};
}
