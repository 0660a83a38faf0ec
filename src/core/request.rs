use serde::{Deserialize, Serialize};

use crate::core::algorithm::{AlgorithmId, CodecKind, Direction};
use crate::encoders::algorithms::errors::CodecError;

/// Input crossing the boundary into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub text: String,
    pub algorithm: AlgorithmId,
    pub direction: Direction,
}

impl TransformRequest {
    pub fn new(text: impl Into<String>, algorithm: AlgorithmId, direction: Direction) -> Self {
        Self {
            text: text.into(),
            algorithm,
            direction,
        }
    }
}

/// Full success or a single error; there are no partial results.
pub type TransformResult = Result<String, CodecError>;

/// Serializable summary of a finished transform.
///
/// Exactly one of `output` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformOutcome {
    pub algorithm: AlgorithmId,
    pub kind: CodecKind,
    pub direction: Direction,
    pub input_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransformOutcome {
    pub fn new(request: &TransformRequest, result: &TransformResult) -> Self {
        let (output, error) = match result {
            Ok(text) => (Some(text.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            algorithm: request.algorithm,
            kind: request.algorithm.kind(),
            direction: request.direction,
            input_chars: request.text.chars().count(),
            output_chars: output.as_ref().map(|text| text.chars().count()),
            output,
            error,
        }
    }

    /// Output length over input length, in characters.
    pub fn ratio(&self) -> Option<f64> {
        let output_chars = self.output_chars?;
        if self.input_chars == 0 {
            return None;
        }
        Some(output_chars as f64 / self.input_chars as f64)
    }
}
