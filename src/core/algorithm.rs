use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::encoders::algorithms::errors::{UnknownAlgorithmError, find_closest_algorithm};

/// Identifier of a codec in the registry.
///
/// The set is closed: every variant resolves to exactly one codec, so lookups
/// cannot fail. Unknown names are rejected while parsing, before the engine
/// is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    Base64,
    Percent,
    HtmlEntity,
    Hex,
    Binary,
    AsciiCode,
    RunLength,
    Dictionary,
    Frequency,
}

/// Whether a codec is a plain re-encoding or a compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    Transcoder,
    Compressor,
}

impl CodecKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodecKind::Transcoder => "transcoder",
            CodecKind::Compressor => "compressor",
        }
    }
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 9] = [
        AlgorithmId::Base64,
        AlgorithmId::Percent,
        AlgorithmId::HtmlEntity,
        AlgorithmId::Hex,
        AlgorithmId::Binary,
        AlgorithmId::AsciiCode,
        AlgorithmId::RunLength,
        AlgorithmId::Dictionary,
        AlgorithmId::Frequency,
    ];

    /// Canonical name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Base64 => "base64",
            AlgorithmId::Percent => "percent",
            AlgorithmId::HtmlEntity => "html_entity",
            AlgorithmId::Hex => "hex",
            AlgorithmId::Binary => "binary",
            AlgorithmId::AsciiCode => "ascii_code",
            AlgorithmId::RunLength => "run_length",
            AlgorithmId::Dictionary => "dictionary",
            AlgorithmId::Frequency => "frequency",
        }
    }

    /// Alternate names accepted by [`FromStr`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            AlgorithmId::Base64 => &["b64"],
            AlgorithmId::Percent => &["url", "urlencode"],
            AlgorithmId::HtmlEntity => &["html", "entity"],
            AlgorithmId::Hex => &["base16"],
            AlgorithmId::Binary => &["bin"],
            AlgorithmId::AsciiCode => &["ascii", "decimal"],
            AlgorithmId::RunLength => &["rle"],
            AlgorithmId::Dictionary => &["lz", "lz77"],
            AlgorithmId::Frequency => &["huffman"],
        }
    }

    pub fn kind(&self) -> CodecKind {
        match self {
            AlgorithmId::RunLength | AlgorithmId::Dictionary | AlgorithmId::Frequency => {
                CodecKind::Compressor
            }
            _ => CodecKind::Transcoder,
        }
    }

    /// Index into registry storage.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    fn all_names() -> Vec<&'static str> {
        AlgorithmId::ALL
            .iter()
            .flat_map(|id| std::iter::once(id.as_str()).chain(id.aliases().iter().copied()))
            .collect()
    }
}

impl FromStr for AlgorithmId {
    type Err = UnknownAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");

        AlgorithmId::ALL
            .iter()
            .find(|id| id.as_str() == needle || id.aliases().contains(&needle.as_str()))
            .copied()
            .ok_or_else(|| {
                let suggestion = find_closest_algorithm(&needle, &AlgorithmId::all_names());
                UnknownAlgorithmError::new(s, suggestion)
            })
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of a codec to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "compress")]
    Encode,
    #[serde(alias = "decompress")]
    Decode,
}

impl Direction {
    /// Verb for this direction on a codec of the given kind.
    pub fn verb(&self, kind: CodecKind) -> &'static str {
        match (self, kind) {
            (Direction::Encode, CodecKind::Transcoder) => "encode",
            (Direction::Decode, CodecKind::Transcoder) => "decode",
            (Direction::Encode, CodecKind::Compressor) => "compress",
            (Direction::Decode, CodecKind::Compressor) => "decompress",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb(CodecKind::Transcoder))
    }
}
