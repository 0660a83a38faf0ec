use std::sync::OnceLock;

use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;
use crate::core::config::{ConfigError, EngineConfig};
use crate::core::request::{TransformRequest, TransformResult};
use crate::encoders::algorithms::{
    AsciiCodeCodec, Base64Codec, BinaryCodec, DictionaryCodec, FrequencyCodec, HexCodec,
    HtmlEntityCodec, PercentCodec, RunLengthCodec,
};

/// Maps every [`AlgorithmId`] to exactly one codec instance.
///
/// The registry is immutable once built. Codecs hold only their
/// configuration, so a registry can be shared freely across threads.
pub struct CodecRegistry {
    codecs: Vec<Box<dyn Codec>>,
}

impl CodecRegistry {
    /// Builds a registry from a validated configuration.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = Self::with_config(config);

        log::debug!(
            "codec registry ready: {} codecs, window={}, max_output={}",
            registry.codecs.len(),
            config.dictionary.window,
            config.limits.max_output
        );

        Ok(registry)
    }

    /// Codec registered for `id`. Total over the closed id set.
    pub fn lookup(&self, id: AlgorithmId) -> &dyn Codec {
        self.codecs[id.index()].as_ref()
    }

    /// Runs one request through the matching codec.
    pub fn transform(&self, request: &TransformRequest) -> TransformResult {
        log::trace!(
            "{} {} ({} bytes in)",
            request.direction.verb(request.algorithm.kind()),
            request.algorithm,
            request.text.len()
        );
        self.lookup(request.algorithm)
            .apply(&request.text, request.direction)
    }

    /// Registry built from the bundled configuration.
    pub fn builtin() -> &'static CodecRegistry {
        static DEFAULT: OnceLock<CodecRegistry> = OnceLock::new();
        // The default configuration always validates
        DEFAULT.get_or_init(|| CodecRegistry::with_config(&EngineConfig::default()))
    }

    fn with_config(config: &EngineConfig) -> Self {
        let codecs = AlgorithmId::ALL
            .iter()
            .map(|id| build_codec(*id, config))
            .collect();
        Self { codecs }
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.codecs.iter().map(|codec| codec.id()))
            .finish()
    }
}

fn build_codec(id: AlgorithmId, config: &EngineConfig) -> Box<dyn Codec> {
    match id {
        AlgorithmId::Base64 => Box::new(Base64Codec::new()),
        AlgorithmId::Percent => Box::new(PercentCodec::new()),
        AlgorithmId::HtmlEntity => Box::new(HtmlEntityCodec::new()),
        AlgorithmId::Hex => Box::new(HexCodec::new()),
        AlgorithmId::Binary => Box::new(BinaryCodec::new()),
        AlgorithmId::AsciiCode => Box::new(AsciiCodeCodec::new()),
        AlgorithmId::RunLength => Box::new(RunLengthCodec::new(config.limits.max_output)),
        AlgorithmId::Dictionary => Box::new(DictionaryCodec::new(config.dictionary_params())),
        AlgorithmId::Frequency => Box::new(FrequencyCodec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algorithm::Direction;
    use crate::encoders::algorithms::errors::CodecError;

    #[test]
    fn test_lookup_is_total() {
        let registry = CodecRegistry::new(&EngineConfig::default()).unwrap();
        for id in AlgorithmId::ALL {
            assert_eq!(registry.lookup(id).id(), id);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.dictionary.min_match = 0;
        assert!(matches!(
            CodecRegistry::new(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_transform_dispatches_direction() {
        let registry = CodecRegistry::builtin();
        let encoded = registry
            .transform(&TransformRequest::new("hi", AlgorithmId::Hex, Direction::Encode))
            .unwrap();
        assert_eq!(encoded, "6869");
        let decoded = registry
            .transform(&TransformRequest::new(encoded, AlgorithmId::Hex, Direction::Decode))
            .unwrap();
        assert_eq!(decoded, "hi");
    }

    #[test]
    fn test_configured_limit_reaches_codecs() {
        let mut config = EngineConfig::default();
        config.limits.max_output = 10;
        let registry = CodecRegistry::new(&config).unwrap();

        let rle = TransformRequest::new("11a", AlgorithmId::RunLength, Direction::Decode);
        assert_eq!(registry.transform(&rle).unwrap_err(), CodecError::Overflow);

        let lz = TransformRequest::new("a~1,20;", AlgorithmId::Dictionary, Direction::Decode);
        assert_eq!(registry.transform(&lz).unwrap_err(), CodecError::Overflow);
    }

    #[test]
    fn test_debug_lists_ids() {
        let rendered = format!("{:?}", CodecRegistry::builtin());
        assert!(rendered.contains("Base64"));
        assert!(rendered.contains("Frequency"));
    }
}
