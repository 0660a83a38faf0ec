use crate::core::algorithm::{AlgorithmId, Direction};
use crate::encoders::algorithms::errors::CodecError;

/// Contract shared by every reversible text transformation.
///
/// Both halves are pure: no internal state is read or written, so a codec can
/// be shared across threads and called concurrently. For every input `s` in
/// the codec's domain, `decode(&encode(s)?)? == s`.
///
/// Compressors implement the same pair; `encode` compresses and `decode`
/// decompresses.
pub trait Codec: Send + Sync {
    /// Registry identifier of this codec.
    fn id(&self) -> AlgorithmId;

    fn encode(&self, input: &str) -> Result<String, CodecError>;

    fn decode(&self, input: &str) -> Result<String, CodecError>;

    /// Run the half selected by `direction`.
    fn apply(&self, input: &str, direction: Direction) -> Result<String, CodecError> {
        match direction {
            Direction::Encode => self.encode(input),
            Direction::Decode => self.decode(input),
        }
    }
}
