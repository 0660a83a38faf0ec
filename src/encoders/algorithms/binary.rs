//! Space-separated 8-bit binary tokens, one per UTF-8 byte.

use crate::byte_view::ByteView;
use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::errors::CodecError;

#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl BinaryCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Render each byte with `render` and join with single spaces.
pub(super) fn join_byte_tokens(bytes: &[u8], render: impl Fn(u8) -> String) -> String {
    bytes.iter().map(|&b| render(b)).collect::<Vec<_>>().join(" ")
}

/// Split on ASCII whitespace and parse every token back into a byte.
///
/// `parse` returns the rejection reason for a bad token.
pub(super) fn parse_byte_tokens(
    input: &str,
    parse: impl Fn(&str) -> Result<u8, String>,
) -> Result<Vec<u8>, CodecError> {
    input
        .split_ascii_whitespace()
        .enumerate()
        .map(|(index, token)| {
            parse(token).map_err(|reason| {
                CodecError::malformed(format!("token {} ('{}') {}", index, token, reason))
            })
        })
        .collect()
}

fn parse_binary_token(token: &str) -> Result<u8, String> {
    if token.len() != 8 || !token.bytes().all(|b| b == b'0' || b == b'1') {
        return Err("must be exactly 8 binary digits".to_string());
    }
    u8::from_str_radix(token, 2).map_err(|e| e.to_string())
}

impl Codec for BinaryCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Binary
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        Ok(join_byte_tokens(ByteView::new(input).bytes(), |b| {
            format!("{:08b}", b)
        }))
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        ByteView::into_text(parse_byte_tokens(input, parse_binary_token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let codec = BinaryCodec::new();
        assert_eq!(codec.encode("Hi").unwrap(), "01001000 01101001");
        assert_eq!(codec.encode("").unwrap(), "");
    }

    #[test]
    fn test_decode_tolerates_whitespace_runs() {
        let codec = BinaryCodec::new();
        assert_eq!(codec.decode("  01001000\n\t01101001 ").unwrap(), "Hi");
    }

    #[test]
    fn test_wrong_width_rejected() {
        let codec = BinaryCodec::new();
        assert_eq!(
            codec.decode("12").unwrap_err(),
            CodecError::malformed("token 0 ('12') must be exactly 8 binary digits")
        );
        assert!(matches!(
            codec.decode("0100100"),
            Err(CodecError::MalformedInput(_))
        ));
        assert!(matches!(
            codec.decode("01001000 0110100x"),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_roundtrip_multibyte() {
        let codec = BinaryCodec::new();
        let text = "añ€😀";
        assert_eq!(codec.decode(&codec.encode(text).unwrap()).unwrap(), text);
    }

    #[test]
    fn test_lone_continuation_byte_rejected() {
        let codec = BinaryCodec::new();
        assert!(matches!(
            codec.decode("10000000"),
            Err(CodecError::MalformedInput(_))
        ));
    }
}
