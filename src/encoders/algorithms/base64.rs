//! RFC 4648 Base64 over the UTF-8 bytes of the input.
//!
//! Wire format: standard alphabet `A-Z a-z 0-9 + /`, `=` padding to a
//! multiple of four characters. Decoding also accepts unpadded input, but
//! rejects characters outside the alphabet, misplaced or excess padding, a
//! dangling single character in the final group, and non-zero trailing bits.

use crate::byte_view::ByteView;
use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::errors::CodecError;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PADDING: char = '=';
const BITS_PER_CHAR: usize = 6;
const GROUP_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Base64Codec {
    pub fn new() -> Self {
        Self
    }

    /// Encode raw bytes. Also used to wrap binary compressor streams in text.
    pub fn encode_bytes(data: &[u8]) -> String {
        let output_chars = (data.len() * 8).div_ceil(BITS_PER_CHAR);
        let mut result = String::with_capacity(output_chars.div_ceil(GROUP_SIZE) * GROUP_SIZE);

        let mut bit_buffer = 0u32;
        let mut bits_in_buffer = 0usize;

        for &byte in data {
            bit_buffer = (bit_buffer << 8) | (byte as u32);
            bits_in_buffer += 8;

            while bits_in_buffer >= BITS_PER_CHAR {
                bits_in_buffer -= BITS_PER_CHAR;
                let index = ((bit_buffer >> bits_in_buffer) & 0x3F) as usize;
                result.push(ALPHABET[index] as char);
            }
            bit_buffer &= (1 << bits_in_buffer) - 1;
        }

        // Handle remaining bits
        if bits_in_buffer > 0 {
            let index = ((bit_buffer << (BITS_PER_CHAR - bits_in_buffer)) & 0x3F) as usize;
            result.push(ALPHABET[index] as char);
        }

        while result.len() % GROUP_SIZE != 0 {
            result.push(PADDING);
        }

        result
    }

    /// Decode to raw bytes without interpreting them as text.
    pub fn decode_bytes(encoded: &str) -> Result<Vec<u8>, CodecError> {
        let body = encoded.trim_end_matches(PADDING);
        let padding = encoded.len() - body.len();

        let mut result = Vec::with_capacity(body.len() * BITS_PER_CHAR / 8);
        let mut bit_buffer = 0u32;
        let mut bits_in_buffer = 0usize;
        let mut significant = 0usize;

        for (position, c) in body.chars().enumerate() {
            let digit = decode_char(c).ok_or_else(|| {
                CodecError::malformed_at(position, format!("invalid Base64 character '{}'", c))
            })?;

            bit_buffer = (bit_buffer << BITS_PER_CHAR) | digit;
            bits_in_buffer += BITS_PER_CHAR;

            if bits_in_buffer >= 8 {
                bits_in_buffer -= 8;
                result.push(((bit_buffer >> bits_in_buffer) & 0xFF) as u8);
            }
            bit_buffer &= (1 << bits_in_buffer) - 1;
            significant += 1;
        }

        if padding > 2 {
            return Err(CodecError::malformed(format!(
                "{} padding characters, at most 2 allowed",
                padding
            )));
        }
        if padding > 0 && encoded.len() % GROUP_SIZE != 0 {
            return Err(CodecError::malformed(format!(
                "padded input is {} characters, expected a multiple of {}",
                encoded.len(),
                GROUP_SIZE
            )));
        }
        if significant % GROUP_SIZE == 1 {
            return Err(CodecError::malformed(
                "final group holds a single character, which cannot encode a byte",
            ));
        }
        if bit_buffer != 0 {
            return Err(CodecError::malformed(
                "non-zero trailing bits in final character",
            ));
        }

        Ok(result)
    }
}

fn decode_char(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 26),
        '0'..='9' => Some(c as u32 - '0' as u32 + 52),
        '+' => Some(62),
        '/' => Some(63),
        _ => None,
    }
}

impl Codec for Base64Codec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Base64
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        Ok(Self::encode_bytes(ByteView::new(input).bytes()))
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        ByteView::into_text(Self::decode_bytes(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> Base64Codec {
        Base64Codec::new()
    }

    #[test]
    fn test_rfc4648_vectors() {
        let vectors = [
            ("", ""),
            ("f", "Zg=="),
            ("fo", "Zm8="),
            ("foo", "Zm9v"),
            ("foob", "Zm9vYg=="),
            ("fooba", "Zm9vYmE="),
            ("foobar", "Zm9vYmFy"),
        ];
        for (plain, encoded) in vectors {
            assert_eq!(codec().encode(plain).unwrap(), encoded);
            assert_eq!(codec().decode(encoded).unwrap(), plain);
        }
    }

    #[test]
    fn test_hello() {
        assert_eq!(codec().encode("hello").unwrap(), "aGVsbG8=");
        assert_eq!(codec().decode("aGVsbG8=").unwrap(), "hello");
    }

    #[test]
    fn test_non_ascii_roundtrip() {
        let text = "héllo wörld – 日本語 🦀";
        let encoded = codec().encode(text).unwrap();
        assert_eq!(codec().decode(&encoded).unwrap(), text);
        assert_eq!(codec().encode("é").unwrap(), "w6k=");
    }

    #[test]
    fn test_unpadded_accepted() {
        assert_eq!(codec().decode("aGVsbG8").unwrap(), "hello");
    }

    #[test]
    fn test_invalid_character() {
        let err = codec().decode("aGV_bG8=").unwrap_err();
        assert_eq!(
            err,
            CodecError::malformed("invalid Base64 character '_' at position 3")
        );
    }

    #[test]
    fn test_misplaced_padding() {
        assert!(matches!(
            codec().decode("aG=sbG8="),
            Err(CodecError::MalformedInput(_))
        ));
        assert!(matches!(
            codec().decode("Zg==="),
            Err(CodecError::MalformedInput(_))
        ));
        assert!(matches!(
            codec().decode("Zg="),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_dangling_character() {
        assert!(matches!(
            codec().decode("Zm9vY"),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_non_canonical_trailing_bits() {
        // "Zh==" carries a set bit below the single encoded byte
        assert!(matches!(
            codec().decode("Zh=="),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_payload_rejected() {
        // 0xFF 0xFE is not UTF-8
        let encoded = Base64Codec::encode_bytes(&[0xFF, 0xFE]);
        assert!(matches!(
            codec().decode(&encoded),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_bytes_roundtrip_all_values() {
        let data: Vec<u8> = (0..=255).collect();
        let encoded = Base64Codec::encode_bytes(&data);
        assert_eq!(Base64Codec::decode_bytes(&encoded).unwrap(), data);
    }
}
