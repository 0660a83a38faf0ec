//! Canonical Huffman compression over Unicode scalar values.
//!
//! Symbol frequencies build a binary Huffman tree; only the resulting code
//! lengths are stored, and both sides derive identical canonical codes from
//! them. The compressed form is Base64 text of this byte stream:
//!
//! ```text
//! varint  symbol count
//! repeat: varint code point, u8 code length     (canonical order)
//! u8      unused low bits in the final payload byte (0..=7)
//! bytes   payload, MSB-first
//! ```
//!
//! Varints are unsigned LEB128. Empty input compresses to the empty string.
//! A lone distinct symbol gets the one-bit code `0`.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use crate::byte_view::ByteView;
use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::base64::Base64Codec;
use super::errors::CodecError;

const MAX_CODE_LEN: u8 = 32;
/// Size of the Unicode code space; no valid table lists more symbols.
const MAX_SYMBOLS: u64 = 0x11_0000;

#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyCodec;

/// One entry of a canonical code: symbol, code length, code bits.
type CodeEntry = (char, u8, u32);

enum TreeNode {
    Leaf(char),
    Internal(usize, usize),
}

impl FrequencyCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn compress(&self, input: &str) -> Result<String, CodecError> {
        if input.is_empty() {
            return Ok(String::new());
        }

        let symbols = ByteView::new(input).scalars();
        let mut frequencies: BTreeMap<char, u64> = BTreeMap::new();
        for &c in &symbols {
            *frequencies.entry(c).or_insert(0) += 1;
        }

        let codes = canonical_codes(code_lengths(&frequencies)?)?;
        let table: HashMap<char, (u32, u8)> = codes
            .iter()
            .map(|&(symbol, len, code)| (symbol, (code, len)))
            .collect();

        let mut stream = Vec::new();
        write_varint(&mut stream, codes.len() as u64);
        for &(symbol, len, _) in &codes {
            write_varint(&mut stream, symbol as u64);
            stream.push(len);
        }

        let mut bits = BitWriter::new();
        for c in symbols {
            let &(code, len) = table.get(&c).ok_or(CodecError::UnsupportedCharacter(c))?;
            bits.push_bits(code, len);
        }
        let (payload, padding) = bits.finish();
        stream.push(padding);
        stream.extend_from_slice(&payload);

        Ok(Base64Codec::encode_bytes(&stream))
    }

    pub fn decompress(&self, input: &str) -> Result<String, CodecError> {
        if input.is_empty() {
            return Ok(String::new());
        }

        let bytes = Base64Codec::decode_bytes(input).map_err(|e| match e {
            CodecError::MalformedInput(reason) => {
                CodecError::malformed(format!("compressed stream is not Base64: {}", reason))
            }
            other => other,
        })?;
        let mut reader = ByteReader::new(&bytes);

        let entries = read_code_table(&mut reader)?;
        let tree = DecodeTree::build(&canonical_codes(entries)?)?;

        let padding = reader
            .u8()
            .ok_or_else(|| CodecError::malformed("missing payload header"))?;
        if padding > 7 {
            return Err(CodecError::malformed(format!(
                "payload padding of {} bits, at most 7 allowed",
                padding
            )));
        }
        let payload = reader.rest();
        if payload.is_empty() && padding != 0 {
            return Err(CodecError::malformed("padding declared for an empty payload"));
        }

        if let Some(&last) = payload.last() {
            let mask = (1u8 << padding) - 1;
            if last & mask != 0 {
                return Err(CodecError::malformed(format!(
                    "non-zero padding bits in the final payload byte (bit {})",
                    payload.len() * 8 - padding as usize
                )));
            }
        }

        let total_bits = payload.len() * 8 - padding as usize;
        let mut result = String::new();
        let mut node = DecodeTree::ROOT;

        for bit_index in 0..total_bits {
            let bit = (payload[bit_index / 8] >> (7 - bit_index % 8)) & 1;
            node = tree.child(node, bit).ok_or_else(|| {
                CodecError::malformed(format!(
                    "no code matches the bit sequence ending at payload bit {}",
                    bit_index
                ))
            })?;
            if let Some(symbol) = tree.symbol(node) {
                result.push(symbol);
                node = DecodeTree::ROOT;
            }
        }

        if node != DecodeTree::ROOT {
            return Err(CodecError::malformed("payload ends in the middle of a codeword"));
        }

        Ok(result)
    }
}

/// Code length per symbol from a Huffman tree over `frequencies`.
///
/// Ties are broken by code point, then by merge order, so the result is
/// deterministic.
fn code_lengths(frequencies: &BTreeMap<char, u64>) -> Result<Vec<(char, u8)>, CodecError> {
    if frequencies.len() == 1 {
        return Ok(frequencies.keys().map(|&c| (c, 1)).collect());
    }

    let mut nodes = Vec::with_capacity(frequencies.len() * 2);
    let mut heap = BinaryHeap::new();
    for (&symbol, &weight) in frequencies {
        heap.push(Reverse((weight, symbol as u64, nodes.len())));
        nodes.push(TreeNode::Leaf(symbol));
    }

    let mut merge_key = MAX_SYMBOLS;
    let root = loop {
        let Some(Reverse((w1, _, left))) = heap.pop() else {
            return Ok(Vec::new());
        };
        let Some(Reverse((w2, _, right))) = heap.pop() else {
            break left;
        };
        heap.push(Reverse((w1.saturating_add(w2), merge_key, nodes.len())));
        nodes.push(TreeNode::Internal(left, right));
        merge_key += 1;
    };

    let mut lengths = Vec::with_capacity(frequencies.len());
    let mut stack = vec![(root, 0u32)];
    while let Some((index, depth)) = stack.pop() {
        match nodes[index] {
            TreeNode::Leaf(symbol) => {
                if depth > MAX_CODE_LEN as u32 {
                    return Err(CodecError::Overflow);
                }
                lengths.push((symbol, depth as u8));
            }
            TreeNode::Internal(left, right) => {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
    }

    Ok(lengths)
}

/// Assign canonical codes: sorted by (length, symbol), each code is the
/// previous one plus one, shifted left on every length increase.
fn canonical_codes(mut lengths: Vec<(char, u8)>) -> Result<Vec<CodeEntry>, CodecError> {
    lengths.sort_by_key(|&(symbol, len)| (len, symbol));

    let mut codes = Vec::with_capacity(lengths.len());
    let mut code = 0u64;
    let mut prev_len = lengths.first().map(|&(_, len)| len).unwrap_or(0);

    for (symbol, len) in lengths {
        code <<= len - prev_len;
        if code >= 1u64 << len {
            return Err(CodecError::malformed(
                "code table is over-subscribed (lengths violate the Kraft inequality)",
            ));
        }
        codes.push((symbol, len, code as u32));
        code += 1;
        prev_len = len;
    }

    Ok(codes)
}

fn read_code_table(reader: &mut ByteReader<'_>) -> Result<Vec<(char, u8)>, CodecError> {
    let truncated = || CodecError::malformed("truncated code table");

    let count = reader.varint()?.ok_or_else(truncated)?;
    if count == 0 {
        return Err(CodecError::malformed("empty code table"));
    }
    if count > MAX_SYMBOLS {
        return Err(CodecError::malformed(format!(
            "code table declares {} symbols",
            count
        )));
    }

    let mut entries = Vec::with_capacity((count as usize).min(reader.remaining()));
    let mut seen = HashSet::new();
    for _ in 0..count {
        let codepoint = reader.varint()?.ok_or_else(truncated)?;
        let symbol = u32::try_from(codepoint)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                CodecError::malformed(format!("code table entry {:#X} is not a Unicode scalar value", codepoint))
            })?;
        let len = reader.u8().ok_or_else(truncated)?;
        if len == 0 || len > MAX_CODE_LEN {
            return Err(CodecError::malformed(format!(
                "code length {} for U+{:04X} outside 1..={}",
                len, symbol as u32, MAX_CODE_LEN
            )));
        }
        if !seen.insert(symbol) {
            return Err(CodecError::malformed(format!(
                "duplicate code table entry U+{:04X}",
                symbol as u32
            )));
        }
        entries.push((symbol, len));
    }

    Ok(entries)
}

fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Accumulates bits MSB-first into bytes.
struct BitWriter {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    fn push_bits(&mut self, code: u32, len: u8) {
        for bit_pos in (0..len).rev() {
            self.push_bit((code >> bit_pos) & 1 != 0);
        }
    }

    /// Packed bytes and the number of unused bits in the last one.
    fn finish(self) -> (Vec<u8>, u8) {
        let padding = ((8 - self.bit_count % 8) % 8) as u8;
        (self.bytes, padding)
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn u8(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// `Ok(None)` when the input ends before the varint does.
    fn varint(&mut self) -> Result<Option<u64>, CodecError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let Some(byte) = self.u8() else {
                return Ok(None);
            };
            if shift >= 64 {
                return Err(CodecError::malformed("varint longer than 64 bits"));
            }
            value |= ((byte & 0x7F) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(Some(value));
            }
            shift += 7;
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

#[derive(Default)]
struct DecodeNode {
    children: [Option<usize>; 2],
    symbol: Option<char>,
}

/// Binary decoding tree rebuilt from a canonical code table.
struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    const ROOT: usize = 0;

    fn build(codes: &[CodeEntry]) -> Result<Self, CodecError> {
        let collision = || CodecError::malformed("code table is not prefix-free");
        let mut nodes = vec![DecodeNode::default()];

        for &(symbol, len, code) in codes {
            let mut node = Self::ROOT;
            for bit_pos in (0..len).rev() {
                if nodes[node].symbol.is_some() {
                    return Err(collision());
                }
                let bit = ((code >> bit_pos) & 1) as usize;
                node = match nodes[node].children[bit] {
                    Some(child) => child,
                    None => {
                        nodes.push(DecodeNode::default());
                        let child = nodes.len() - 1;
                        nodes[node].children[bit] = Some(child);
                        child
                    }
                };
            }
            let leaf = &mut nodes[node];
            if leaf.symbol.is_some() || leaf.children.iter().any(Option::is_some) {
                return Err(collision());
            }
            leaf.symbol = Some(symbol);
        }

        Ok(Self { nodes })
    }

    fn child(&self, node: usize, bit: u8) -> Option<usize> {
        self.nodes[node].children[bit as usize]
    }

    fn symbol(&self, node: usize) -> Option<char> {
        self.nodes[node].symbol
    }
}

impl Codec for FrequencyCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Frequency
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        self.compress(input)
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        self.decompress(input)
    }
}
