//! Space-separated decimal byte values.
//!
//! Operates on UTF-8 bytes rather than code points, so non-ASCII text
//! round-trips: `é` becomes `195 169`.

use crate::byte_view::ByteView;
use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::binary::{join_byte_tokens, parse_byte_tokens};
use super::errors::CodecError;

#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiCodeCodec;

impl AsciiCodeCodec {
    pub fn new() -> Self {
        Self
    }
}

fn parse_decimal_token(token: &str) -> Result<u8, String> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err("is not a decimal integer".to_string());
    }
    token
        .parse::<u8>()
        .map_err(|_| "is outside the range 0..=255".to_string())
}

impl Codec for AsciiCodeCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::AsciiCode
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        Ok(join_byte_tokens(ByteView::new(input).bytes(), |b| {
            b.to_string()
        }))
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        ByteView::into_text(parse_byte_tokens(input, parse_decimal_token)?)
    }
}
