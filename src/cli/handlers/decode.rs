use crate::cli::{args::TransformArgs, config::read_input, global::GlobalArgs};
use text_codec::{CodecRegistry, Direction, EngineConfig};

use super::encode::run_transform;

pub fn handle(
    args: TransformArgs,
    global: &GlobalArgs,
    config: &EngineConfig,
    registry: &CodecRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut text = read_input(args.file.as_ref(), global)?;
    strip_trailing_newline(&mut text);
    run_transform(&args, text, Direction::Decode, config, registry)
}

/// Drop the one trailing `\n` or `\r\n` that encode appends to its output.
fn strip_trailing_newline(text: &mut String) {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_newline() {
        for (input, expected) in [
            ("abc\n", "abc"),
            ("abc\r\n", "abc"),
            ("abc\n\n", "abc\n"),
            ("abc", "abc"),
            ("", ""),
        ] {
            let mut text = input.to_string();
            strip_trailing_newline(&mut text);
            assert_eq!(text, expected);
        }
    }
}
