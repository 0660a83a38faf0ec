//! Run-length encoding over Unicode scalar values.
//!
//! Wire format: a sequence of `[count]symbol` tokens. The decimal count is
//! written only for runs of two or more. A symbol that is an ASCII digit or
//! the escape character `\` is written as `\` followed by the character, so
//! a count can never absorb literal data. `aaabccccd` compresses to
//! `3ab4cd`, `a7` to `a\7` and `111` to `3\1`.

use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::errors::CodecError;

/// Longest run written as a single token.
const MAX_RUN: usize = u32::MAX as usize;
const ESCAPE: char = '\\';

fn needs_escape(c: char) -> bool {
    c.is_ascii_digit() || c == ESCAPE
}

#[derive(Debug, Clone, Copy)]
pub struct RunLengthCodec {
    max_output: usize,
}

impl RunLengthCodec {
    /// `max_output` bounds the decompressed length in characters.
    pub fn new(max_output: usize) -> Self {
        Self { max_output }
    }

    pub fn compress(&self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            let mut run = 1usize;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }

            while run > 0 {
                let take = run.min(MAX_RUN);
                if take >= 2 {
                    result.push_str(&take.to_string());
                }
                if needs_escape(c) {
                    result.push(ESCAPE);
                }
                result.push(c);
                run -= take;
            }
        }

        result
    }

    pub fn decompress(&self, input: &str) -> Result<String, CodecError> {
        let mut result = String::with_capacity(input.len());
        let mut produced = 0usize;
        let mut chars = input.chars().enumerate().peekable();

        while let Some(&(start, _)) = chars.peek() {
            let mut count: Option<usize> = None;
            while let Some(&(_, d)) = chars.peek() {
                let Some(digit) = d.to_digit(10) else { break };
                chars.next();
                let value = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit as usize))
                    .ok_or(CodecError::Overflow)?;
                count = Some(value);
            }

            let Some((position, mut c)) = chars.next() else {
                return Err(CodecError::malformed_at(
                    start,
                    "run count is not followed by a character",
                ));
            };
            if c == ESCAPE {
                c = match chars.next() {
                    Some((_, escaped)) if needs_escape(escaped) => escaped,
                    Some((_, other)) => {
                        return Err(CodecError::malformed_at(
                            position,
                            format!("escape before '{}', expected a digit or '\\'", other),
                        ));
                    }
                    None => {
                        return Err(CodecError::malformed_at(
                            position,
                            "escape at end of input",
                        ));
                    }
                };
            }

            let run = count.unwrap_or(1);
            if run == 0 {
                return Err(CodecError::malformed_at(start, "zero-length run"));
            }

            produced = produced.checked_add(run).ok_or(CodecError::Overflow)?;
            if produced > self.max_output {
                return Err(CodecError::Overflow);
            }
            result.extend(std::iter::repeat_n(c, run));
        }

        Ok(result)
    }
}

impl Codec for RunLengthCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::RunLength
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        Ok(self.compress(input))
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        self.decompress(input)
    }
}
