//! The text/byte boundary shared by every codec.
//!
//! Codecs receive `&str` and return `String`. Character-oriented codecs walk
//! Unicode scalar values; byte-oriented codecs (hex, binary, ASCII-code,
//! percent, Base64) walk the UTF-8 encoding. On the way back, reassembled
//! bytes must form valid UTF-8 or the decode fails instead of substituting
//! replacement characters.

use crate::encoders::algorithms::errors::CodecError;

/// Borrowed view over a codec input.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    text: &'a str,
}

impl<'a> ByteView<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// UTF-8 bytes of the input.
    pub fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    /// Unicode scalar values of the input, collected for indexed access.
    pub fn scalars(&self) -> Vec<char> {
        self.text.chars().collect()
    }

    /// Reassemble decoded bytes into text.
    ///
    /// Invalid UTF-8 is reported with the byte offset of the first bad
    /// sequence.
    pub fn into_text(bytes: Vec<u8>) -> Result<String, CodecError> {
        String::from_utf8(bytes).map_err(|e| {
            CodecError::malformed(format!(
                "decoded bytes are not valid UTF-8 (first invalid byte at offset {})",
                e.utf8_error().valid_up_to()
            ))
        })
    }
}
