//! Reversible text transformations and compressors.
//!
//! Every codec maps a UTF-8 string to a UTF-8 string and back. Decoding
//! either fully succeeds or returns a [`CodecError`]; it never substitutes a
//! best-effort result.
//!
//! ```
//! use text_codec::{AlgorithmId, Direction, transform};
//!
//! let encoded = transform("hello", AlgorithmId::Base64, Direction::Encode).unwrap();
//! assert_eq!(encoded, "aGVsbG8=");
//! ```

mod byte_view;
mod core;
mod encoders;
pub mod history;
pub mod prelude;

pub use byte_view::ByteView;
pub use crate::core::algorithm::{AlgorithmId, CodecKind, Direction};
pub use crate::core::codec::Codec;
pub use crate::core::config::{ConfigError, DictionarySettings, EngineConfig, Limits, Settings};
pub use crate::core::registry::CodecRegistry;
pub use crate::core::request::{TransformOutcome, TransformRequest, TransformResult};
pub use encoders::algorithms::{
    AsciiCodeCodec, Base64Codec, BinaryCodec, CodecError, DictionaryCodec, DictionaryParams,
    FrequencyCodec, HexCodec, HtmlEntityCodec, PercentCodec, RunLengthCodec,
    UnknownAlgorithmError, find_closest_algorithm,
};
pub use history::{HistoryError, LogEntry, TransformLog};

/// Transforms `text` with the built-in registry.
pub fn transform(text: &str, algorithm: AlgorithmId, direction: Direction) -> TransformResult {
    CodecRegistry::builtin().lookup(algorithm).apply(text, direction)
}

/// Encodes (or compresses) `text` with the built-in registry.
pub fn encode(text: &str, algorithm: AlgorithmId) -> TransformResult {
    transform(text, algorithm, Direction::Encode)
}

/// Decodes (or decompresses) `text` with the built-in registry.
pub fn decode(text: &str, algorithm: AlgorithmId) -> TransformResult {
    transform(text, algorithm, Direction::Decode)
}
