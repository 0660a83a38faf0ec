//! LZ-style dictionary compression over Unicode scalar values.
//!
//! Wire format is a text token stream built around the marker `~`:
//!
//! | Text              | Token                                   |
//! |-------------------|-----------------------------------------|
//! | any char but `~`  | literal                                 |
//! | `~~`              | literal `~`                             |
//! | `~<off>,<len>;`   | copy `len` chars from `off` chars back  |
//!
//! Offsets and lengths are decimal and at least 1. A copy may overlap the
//! data it produces (`len > off`), which is how long periodic runs collapse
//! into one token. Because every back-reference starts with the marker and
//! every literal marker is doubled, literal text such as `(3,4)` or `~1,2;`
//! can never be misread as a reference.

use crate::byte_view::ByteView;
use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::errors::CodecError;

const MARKER: char = '~';
const SEPARATOR: char = ',';
const TERMINATOR: char = ';';

/// Match-finder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryParams {
    /// How many characters back a match may start.
    pub window: usize,
    /// Shortest match emitted as a back-reference.
    pub min_match: usize,
    /// Longest single back-reference.
    pub max_match: usize,
    /// Upper bound on decompressed length, in characters.
    pub max_output: usize,
}

impl Default for DictionaryParams {
    fn default() -> Self {
        Self {
            window: 255,
            min_match: 3,
            max_match: 255,
            max_output: 64 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    BackRef { offset: usize, length: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryCodec {
    params: DictionaryParams,
}

impl DictionaryCodec {
    pub fn new(params: DictionaryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DictionaryParams {
        &self.params
    }

    pub fn compress(&self, input: &str) -> String {
        let chars = ByteView::new(input).scalars();
        let mut result = String::with_capacity(input.len());
        let mut pos = 0;

        while pos < chars.len() {
            let (offset, length) = self.longest_match(&chars, pos);
            if length >= self.params.min_match {
                write_token(&mut result, Token::BackRef { offset, length });
                pos += length;
            } else {
                write_token(&mut result, Token::Literal(chars[pos]));
                pos += 1;
            }
        }

        result
    }

    /// Greedy search for the longest earlier match within the window.
    ///
    /// Returns `(offset, length)`; ties go to the nearest candidate.
    fn longest_match(&self, chars: &[char], pos: usize) -> (usize, usize) {
        let window_start = pos.saturating_sub(self.params.window);
        let limit = self.params.max_match.min(chars.len() - pos);
        let mut best = (0, 0);

        for start in (window_start..pos).rev() {
            let mut length = 0;
            while length < limit && chars[start + length] == chars[pos + length] {
                length += 1;
            }
            if length > best.1 {
                best = (pos - start, length);
                if length == limit {
                    break;
                }
            }
        }

        best
    }

    pub fn decompress(&self, input: &str) -> Result<String, CodecError> {
        let mut output: Vec<char> = Vec::with_capacity(input.len());
        let mut reader = TokenReader::new(input);

        while let Some(token) = reader.next_token()? {
            match token {
                Token::Literal(c) => {
                    if output.len() >= self.params.max_output {
                        return Err(CodecError::Overflow);
                    }
                    output.push(c);
                }
                Token::BackRef { offset, length } => {
                    if offset > output.len() {
                        return Err(CodecError::malformed_at(
                            reader.token_start,
                            format!(
                                "back-reference offset {} exceeds the {} characters produced so far",
                                offset,
                                output.len()
                            ),
                        ));
                    }
                    let end = output
                        .len()
                        .checked_add(length)
                        .ok_or(CodecError::Overflow)?;
                    if end > self.params.max_output {
                        return Err(CodecError::Overflow);
                    }
                    let start = output.len() - offset;
                    // Char-by-char so overlapping copies see their own output
                    for i in 0..length {
                        let c = output[start + i];
                        output.push(c);
                    }
                }
            }
        }

        Ok(output.into_iter().collect())
    }
}

fn write_token(out: &mut String, token: Token) {
    match token {
        Token::Literal(MARKER) => {
            out.push(MARKER);
            out.push(MARKER);
        }
        Token::Literal(c) => out.push(c),
        Token::BackRef { offset, length } => {
            out.push(MARKER);
            out.push_str(&offset.to_string());
            out.push(SEPARATOR);
            out.push_str(&length.to_string());
            out.push(TERMINATOR);
        }
    }
}

/// Token parser over the compressed text.
///
/// Between tokens the reader is awaiting a token; a marker switches it to
/// parsing an escaped literal or a back-reference. Running out of input is
/// only a clean end while awaiting a token.
struct TokenReader<'a> {
    chars: std::iter::Peekable<std::iter::Enumerate<std::str::Chars<'a>>>,
    token_start: usize,
}

impl<'a> TokenReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().enumerate().peekable(),
            token_start: 0,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, CodecError> {
        let Some((position, c)) = self.chars.next() else {
            return Ok(None);
        };
        self.token_start = position;

        if c != MARKER {
            return Ok(Some(Token::Literal(c)));
        }

        match self.chars.peek() {
            None => Err(CodecError::malformed_at(position, "truncated token after '~'")),
            Some(&(_, MARKER)) => {
                self.chars.next();
                Ok(Some(Token::Literal(MARKER)))
            }
            Some(&(_, d)) if d.is_ascii_digit() => {
                let offset = self.read_number(SEPARATOR)?;
                let length = self.read_number(TERMINATOR)?;
                if offset == 0 || length == 0 {
                    return Err(CodecError::malformed_at(
                        position,
                        "back-reference offset and length must be at least 1",
                    ));
                }
                Ok(Some(Token::BackRef { offset, length }))
            }
            Some(&(at, other)) => Err(CodecError::malformed_at(
                at,
                format!("unexpected '{}' after '~'", other),
            )),
        }
    }

    /// Read one or more decimal digits closed by `terminator`.
    fn read_number(&mut self, terminator: char) -> Result<usize, CodecError> {
        let mut value: Option<usize> = None;

        loop {
            match self.chars.next() {
                Some((_, c)) if c == terminator && value.is_some() => {
                    return Ok(value.unwrap_or_default());
                }
                Some((_, c)) if c.is_ascii_digit() => {
                    let digit = c as usize - '0' as usize;
                    let next = value
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or(CodecError::Overflow)?;
                    value = Some(next);
                }
                Some((at, c)) if c == terminator => {
                    return Err(CodecError::malformed_at(
                        at,
                        format!("missing number before '{}'", terminator),
                    ));
                }
                Some((at, c)) => {
                    return Err(CodecError::malformed_at(
                        at,
                        format!("unexpected '{}' in back-reference, expected '{}'", c, terminator),
                    ));
                }
                None => {
                    return Err(CodecError::malformed_at(
                        self.token_start,
                        "truncated back-reference",
                    ));
                }
            }
        }
    }
}

impl Codec for DictionaryCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Dictionary
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        Ok(self.compress(input))
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        self.decompress(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> DictionaryCodec {
        DictionaryCodec::default()
    }

    #[test]
    fn test_repeated_pair_uses_backrefs() {
        let text = "ab".repeat(500);
        let compressed = codec().compress(&text);
        assert!(compressed.starts_with("ab~2,255;"));
        assert!(compressed.len() < text.len() / 10);
        assert_eq!(codec().decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn test_short_input_stays_literal() {
        assert_eq!(codec().compress("abc"), "abc");
        assert_eq!(codec().compress(""), "");
        assert_eq!(codec().decompress("").unwrap(), "");
    }

    #[test]
    fn test_single_repeated_char() {
        let text = "x".repeat(40);
        let compressed = codec().compress(&text);
        assert_eq!(compressed, "x~1,39;");
        assert_eq!(codec().decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn test_literal_markup_is_not_a_backref() {
        let codec = codec();
        for text in ["(3,4)", "~1,2;", "~~", "a~", "f(1,2) + f(1,2) + f(1,2)"] {
            let compressed = codec.compress(text);
            assert_eq!(codec.decompress(&compressed).unwrap(), text);
        }
        assert_eq!(codec.compress("~1,2;"), "~~1,2;");
    }

    #[test]
    fn test_multibyte_roundtrip() {
        let text = "日本語日本語日本語 · ünïcödé ünïcödé 🦀🦀🦀🦀";
        let compressed = codec().compress(text);
        assert_eq!(codec().decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn test_window_bounds_offsets() {
        let codec = DictionaryCodec::new(DictionaryParams {
            window: 4,
            ..DictionaryParams::default()
        });
        // "abcdef" repeats 6 back, outside a 4-char window
        let text = "abcdefabcdef";
        assert_eq!(codec.compress(text), text);
        assert_eq!(codec.decompress(text).unwrap(), text);
    }

    #[test]
    fn test_backref_past_output() {
        assert_eq!(
            codec().decompress("ab~3,2;").unwrap_err(),
            CodecError::malformed(
                "back-reference offset 3 exceeds the 2 characters produced so far at position 2"
            )
        );
        assert!(matches!(
            codec().decompress("~1,1;"),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_truncated_tokens() {
        for bad in ["ab~", "ab~2", "ab~2,", "ab~2,1", "ab~,1;", "ab~2;1;", "ab~x", "ab~0,1;"] {
            assert!(
                matches!(codec().decompress(bad), Err(CodecError::MalformedInput(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_expansion_bound() {
        let codec = DictionaryCodec::new(DictionaryParams {
            max_output: 100,
            ..DictionaryParams::default()
        });
        assert_eq!(codec.decompress("a~1,200;").unwrap_err(), CodecError::Overflow);
        assert_eq!(
            codec.decompress("a~1,99999999999999999999999;").unwrap_err(),
            CodecError::Overflow
        );
    }
}
