//! URL percent-encoding over UTF-8 bytes.
//!
//! Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through; every other
//! byte becomes `%XX` with uppercase hex digits. Decoding accepts either case
//! and treats `+` as a literal plus sign.

use crate::byte_view::ByteView;
use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::errors::CodecError;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Clone, Copy, Default)]
pub struct PercentCodec;

impl PercentCodec {
    pub fn new() -> Self {
        Self
    }
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

fn hex_value(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

impl Codec for PercentCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Percent
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        let bytes = ByteView::new(input).bytes();
        let mut result = String::with_capacity(bytes.len() * 3);

        for &byte in bytes {
            if is_unreserved(byte) {
                result.push(byte as char);
            } else {
                result.push('%');
                result.push(HEX_UPPER[(byte >> 4) as usize] as char);
                result.push(HEX_UPPER[(byte & 0x0F) as usize] as char);
            }
        }

        Ok(result)
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        let mut bytes = Vec::with_capacity(input.len());
        let mut chars = input.chars().enumerate();
        let mut utf8 = [0u8; 4];

        while let Some((position, c)) = chars.next() {
            if c != '%' {
                bytes.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                continue;
            }

            let high = chars.next().and_then(|(_, h)| hex_value(h));
            let low = chars.next().and_then(|(_, l)| hex_value(l));
            match (high, low) {
                (Some(high), Some(low)) => bytes.push((high << 4) | low),
                _ => {
                    return Err(CodecError::malformed_at(
                        position,
                        "'%' not followed by two hex digits",
                    ));
                }
            }
        }

        ByteView::into_text(bytes)
    }
}
