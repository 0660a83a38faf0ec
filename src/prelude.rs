//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use text_codec::prelude::*;
//!
//! let registry = CodecRegistry::new(&EngineConfig::default()).unwrap();
//! let request = TransformRequest::new("aaabccccd", AlgorithmId::RunLength, Direction::Encode);
//! assert_eq!(registry.transform(&request).unwrap(), "3ab4cd");
//! ```

pub use crate::{
    AlgorithmId,
    Codec,
    CodecError,
    CodecKind,
    // Engine
    CodecRegistry,
    Direction,
    // Config
    EngineConfig,
    TransformLog,
    TransformOutcome,
    TransformRequest,
    TransformResult,
    // Free functions over the built-in registry
    decode,
    encode,
    transform,
};
