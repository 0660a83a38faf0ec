//! Hexadecimal over UTF-8 bytes: two lowercase digits per byte, no separator.

use crate::byte_view::ByteView;
use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::errors::CodecError;

#[derive(Debug, Clone, Copy, Default)]
pub struct HexCodec;

impl HexCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Reject non-hex characters by character position before byte decoding.
fn check_digits(input: &str) -> Result<(), CodecError> {
    match input
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        Some((position, c)) => Err(CodecError::malformed_at(
            position,
            format!("invalid hex digit '{}'", c),
        )),
        None => Ok(()),
    }
}

fn map_hex_error(err: hex::FromHexError) -> CodecError {
    match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            CodecError::malformed_at(index, format!("invalid hex digit '{}'", c))
        }
        hex::FromHexError::OddLength => {
            CodecError::malformed("odd number of hex digits")
        }
        hex::FromHexError::InvalidStringLength => {
            CodecError::malformed("invalid hex string length")
        }
    }
}

impl Codec for HexCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Hex
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        Ok(hex::encode(ByteView::new(input).bytes()))
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        check_digits(input)?;
        let bytes = hex::decode(input).map_err(map_hex_error)?;
        ByteView::into_text(bytes)
    }
}
