pub mod ascii_code;
pub mod base64;
pub mod binary;
pub mod dictionary;
pub mod errors;
pub mod frequency;
pub mod hex;
pub mod html_entity;
pub mod percent;
pub mod run_length;

// Re-export codec types for the registry and public API
pub use ascii_code::AsciiCodeCodec;
pub use base64::Base64Codec;
pub use binary::BinaryCodec;
pub use dictionary::{DictionaryCodec, DictionaryParams};
pub use errors::{CodecError, UnknownAlgorithmError, find_closest_algorithm};
pub use frequency::FrequencyCodec;
pub use hex::HexCodec;
pub use html_entity::HtmlEntityCodec;
pub use percent::PercentCodec;
pub use run_length::RunLengthCodec;
