//! Escaping of the five HTML-significant characters.
//!
//! Decoding is permissive: an `&` that does not start one of the five known
//! entities is kept verbatim. The decoder makes a single left-to-right pass
//! and never rescans its own output, so `&amp;lt;` becomes `&lt;`.

use crate::core::algorithm::AlgorithmId;
use crate::core::codec::Codec;

use super::errors::CodecError;

/// Entity table, longest entity first.
const ENTITIES: [(&str, char); 5] = [
    ("&quot;", '"'),
    ("&amp;", '&'),
    ("&#39;", '\''),
    ("&lt;", '<'),
    ("&gt;", '>'),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEntityCodec;

impl HtmlEntityCodec {
    pub fn new() -> Self {
        Self
    }
}

fn entity_for(c: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(_, plain)| *plain == c)
        .map(|(entity, _)| *entity)
}

impl Codec for HtmlEntityCodec {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HtmlEntity
    }

    fn encode(&self, input: &str) -> Result<String, CodecError> {
        let mut result = String::with_capacity(input.len());
        for c in input.chars() {
            match entity_for(c) {
                Some(entity) => result.push_str(entity),
                None => result.push(c),
            }
        }
        Ok(result)
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(amp) = rest.find('&') {
            result.push_str(&rest[..amp]);
            rest = &rest[amp..];

            match ENTITIES
                .iter()
                .find(|(entity, _)| rest.starts_with(entity))
            {
                Some((entity, plain)) => {
                    result.push(*plain);
                    rest = &rest[entity.len()..];
                }
                None => {
                    result.push('&');
                    rest = &rest[1..];
                }
            }
        }
        result.push_str(rest);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_anchor() {
        let codec = HtmlEntityCodec::new();
        let encoded = codec.encode("<a href=\"x\">").unwrap();
        assert_eq!(encoded, "&lt;a href=&quot;x&quot;&gt;");
        assert_eq!(codec.decode(&encoded).unwrap(), "<a href=\"x\">");
    }

    #[test]
    fn test_apostrophe_and_ampersand() {
        let codec = HtmlEntityCodec::new();
        assert_eq!(codec.encode("Tom & Jerry's").unwrap(), "Tom &amp; Jerry&#39;s");
    }

    #[test]
    fn test_no_double_decode() {
        let codec = HtmlEntityCodec::new();
        assert_eq!(codec.decode("&amp;lt;").unwrap(), "&lt;");
        assert_eq!(codec.encode("&lt;").unwrap(), "&amp;lt;");
    }

    #[test]
    fn test_unknown_entities_left_verbatim() {
        let codec = HtmlEntityCodec::new();
        assert_eq!(codec.decode("&nbsp; & &amp").unwrap(), "&nbsp; & &amp");
        assert_eq!(codec.decode("trailing &").unwrap(), "trailing &");
    }

    #[test]
    fn test_roundtrip_unicode() {
        let codec = HtmlEntityCodec::new();
        let text = "<p>ça « marche » & 'ok' · 👍</p>";
        let encoded = codec.encode(text).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), text);
    }
}
