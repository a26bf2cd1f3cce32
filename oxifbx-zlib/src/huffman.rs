//! Canonical Huffman decode trees for DEFLATE.
//!
//! This module builds a Huffman decode tree from a table of code lengths as
//! specified in RFC 1951 Section 3.2.2, and decodes symbols by walking the
//! tree one bit at a time.
//!
//! # Alphabets
//!
//! DEFLATE uses three Huffman alphabets:
//! - **Literal/Length**: 0-285 (0-255 literals, 256 EOB, 257-285 lengths)
//! - **Distance**: 0-29 (back-reference distances)
//! - **Code Length**: 0-18 (for encoding dynamic Huffman trees)
//!
//! # Representation
//!
//! The tree is an arena of nodes addressed by `u32` handles. Node 0 is the
//! root. Dropping the tree frees the arena in one step, so there is no
//! recursive teardown regardless of how unbalanced the code is.

use oxifbx_core::BitReader;
use oxifbx_core::error::{InflateError, Result};

/// Maximum code length in DEFLATE (15 bits).
pub const MAX_CODE_LENGTH: usize = 15;

/// Handle of the root node.
const ROOT: u32 = 0;

/// One node of the decode trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    /// Interior node; index 0 is the `0` branch, index 1 the `1` branch.
    Internal([Option<u32>; 2]),
    /// Terminal node carrying a decoded symbol.
    Leaf(u16),
}

/// A canonical Huffman decode tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    /// Node arena; `nodes[0]` is the root.
    nodes: Vec<Node>,
    /// Number of symbols with a nonzero code length.
    symbol_count: usize,
    /// Longest code length present.
    max_code_length: u8,
}

impl HuffmanTree {
    /// Build a tree where symbol `i` has code length `code_lengths[i]`.
    pub fn from_code_lengths(code_lengths: &[u8]) -> Result<Self> {
        let symbols: Vec<u16> = (0..code_lengths.len() as u16).collect();
        Self::from_lengths(code_lengths, &symbols)
    }

    /// Build a tree from parallel arrays of code lengths and symbols.
    ///
    /// Canonical assignment per RFC 1951:
    /// 1. count the symbols sharing each nonzero length,
    /// 2. derive the first code of each length as
    ///    `code[L] = (code[L-1] + count[L-1]) << 1`,
    /// 3. hand out consecutive codes within a length in input order,
    /// 4. insert each code into the trie most significant bit first.
    ///
    /// Entries with length 0 are unused and never inserted.
    pub fn from_lengths(lengths: &[u8], symbols: &[u16]) -> Result<Self> {
        if lengths.len() != symbols.len() {
            return Err(InflateError::corrupt(
                0,
                format!(
                    "Code length table has {} lengths but {} symbols",
                    lengths.len(),
                    symbols.len()
                ),
            ));
        }

        // Count codes of each length
        let mut bl_count = [0u32; MAX_CODE_LENGTH + 1];
        let mut max_length = 0u8;

        for &len in lengths {
            if len as usize > MAX_CODE_LENGTH {
                return Err(InflateError::corrupt(
                    0,
                    format!("Code length {} exceeds maximum {}", len, MAX_CODE_LENGTH),
                ));
            }
            if len > 0 {
                bl_count[len as usize] += 1;
                max_length = max_length.max(len);
            }
        }

        Self::check_unique(lengths, symbols)?;

        // Compute first code for each length
        let mut next_code = [0u32; MAX_CODE_LENGTH + 1];
        let mut code = 0u32;
        for bits in 1..=MAX_CODE_LENGTH {
            code = (code + bl_count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        let symbol_count: u32 = bl_count[1..].iter().sum();
        let mut tree = Self {
            nodes: Vec::with_capacity(2 * symbol_count as usize + 1),
            symbol_count: symbol_count as usize,
            max_code_length: max_length,
        };
        tree.nodes.push(Node::Internal([None, None]));

        for (&len, &symbol) in lengths.iter().zip(symbols) {
            if len == 0 {
                continue;
            }
            let code = next_code[len as usize];
            next_code[len as usize] += 1;
            tree.insert(code, len, symbol)?;
        }

        Ok(tree)
    }

    /// Reject tables that list the same symbol twice.
    fn check_unique(lengths: &[u8], symbols: &[u16]) -> Result<()> {
        let max_symbol = symbols.iter().copied().max().unwrap_or(0) as usize;
        let mut seen = vec![false; max_symbol + 1];

        for (&len, &symbol) in lengths.iter().zip(symbols) {
            if len == 0 {
                continue;
            }
            let slot = &mut seen[symbol as usize];
            if *slot {
                return Err(InflateError::corrupt(
                    0,
                    format!("Symbol {} appears twice in code length table", symbol),
                ));
            }
            *slot = true;
        }

        Ok(())
    }

    /// Insert `symbol` at the path spelled by the low `len` bits of `code`.
    fn insert(&mut self, code: u32, len: u8, symbol: u16) -> Result<()> {
        if code >> len != 0 {
            return Err(Self::oversubscribed());
        }

        let mut node = ROOT;
        for i in (0..len).rev() {
            let bit = ((code >> i) & 1) as usize;
            let next_id = self.nodes.len() as u32;

            let children = match &mut self.nodes[node as usize] {
                Node::Internal(children) => children,
                Node::Leaf(_) => return Err(Self::oversubscribed()),
            };

            node = match children[bit] {
                Some(child) => child,
                None => {
                    children[bit] = Some(next_id);
                    let new_node = if i == 0 {
                        Node::Leaf(symbol)
                    } else {
                        Node::Internal([None, None])
                    };
                    self.nodes.push(new_node);
                    next_id
                }
            };

            // The final step must have created a fresh leaf.
            if i == 0 && self.nodes[node as usize] != Node::Leaf(symbol) {
                return Err(Self::oversubscribed());
            }
        }

        Ok(())
    }

    fn oversubscribed() -> InflateError {
        InflateError::corrupt(0, "Over-subscribed Huffman code lengths")
    }

    /// Decode one symbol by walking the tree from the root.
    ///
    /// Reads one bit per level: `1` follows the right branch, `0` the left.
    /// Reaching a missing branch means the stream used a code that the tree
    /// does not define, which is reported as corrupt data.
    pub fn decode(&self, reader: &mut BitReader<'_>) -> Result<u16> {
        let mut node = ROOT;
        loop {
            match self.nodes[node as usize] {
                Node::Leaf(symbol) => return Ok(symbol),
                Node::Internal(children) => {
                    let start = reader.bit_position();
                    let bit = reader.read_bit()? as usize;
                    node = children[bit].ok_or_else(|| {
                        InflateError::corrupt(
                            start / 8,
                            format!("Invalid Huffman code at bit position {}", start),
                        )
                    })?;
                }
            }
        }
    }

    /// Number of symbols that have a code.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Longest code length in this tree.
    pub fn max_code_length(&self) -> u8 {
        self.max_code_length
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    /// Enumerate `(symbol, code, length)` triples in canonical order.
    ///
    /// Codes are reported most significant bit first, as written in RFC 1951.
    pub fn codes(&self) -> Vec<(u16, u32, u8)> {
        let mut out = Vec::with_capacity(self.symbol_count);
        let mut stack = vec![(ROOT, 0u32, 0u8)];

        while let Some((id, code, len)) = stack.pop() {
            match self.nodes[id as usize] {
                Node::Leaf(symbol) => out.push((symbol, code, len)),
                Node::Internal(children) => {
                    // Push the 1 branch first so the 0 branch is visited first.
                    for bit in [1u32, 0] {
                        if let Some(child) = children[bit as usize] {
                            stack.push((child, (code << 1) | bit, len + 1));
                        }
                    }
                }
            }
        }

        out.sort_by_key(|&(_, code, len)| (len, code));
        out
    }
}
