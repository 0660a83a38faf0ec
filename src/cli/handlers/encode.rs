use crate::cli::{
    args::TransformArgs,
    config::{read_input, resolve_algorithm},
    global::GlobalArgs,
};
use std::fs;
use text_codec::{
    CodecRegistry, Direction, EngineConfig, TransformLog, TransformOutcome, TransformRequest,
};

pub fn handle(
    args: TransformArgs,
    global: &GlobalArgs,
    config: &EngineConfig,
    registry: &CodecRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(args.file.as_ref(), global)?;
    run_transform(&args, text, Direction::Encode, config, registry)
}

/// Shared pipeline for encode and decode: transform, then report.
pub(super) fn run_transform(
    args: &TransformArgs,
    text: String,
    direction: Direction,
    config: &EngineConfig,
    registry: &CodecRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let algorithm = resolve_algorithm(args.algorithm.as_deref(), config)?;
    let request = TransformRequest::new(text, algorithm, direction);
    let result = registry.transform(&request);
    let outcome = TransformOutcome::new(&request, &result);

    if args.stats {
        report_stats(&outcome);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    let output = result?;

    if let Some(history_path) = &args.history {
        let mut log = TransformLog::new();
        log.record(&request, &output);
        log.append_to_file(history_path)?;
    }

    if args.json {
        return Ok(());
    }

    // Encoded text ends with one newline, which decode strips again;
    // decoded text is written verbatim
    let rendered = match direction {
        Direction::Encode => format!("{}\n", output),
        Direction::Decode => output,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, rendered.as_bytes())?;
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

fn report_stats(outcome: &TransformOutcome) {
    let verb = outcome.direction.verb(outcome.kind);
    match (outcome.output_chars, outcome.ratio()) {
        (Some(out), Some(ratio)) => eprintln!(
            "{} {}: {} chars in, {} chars out (ratio {:.3})",
            verb, outcome.algorithm, outcome.input_chars, out, ratio
        ),
        (Some(out), None) => eprintln!(
            "{} {}: {} chars in, {} chars out",
            verb, outcome.algorithm, outcome.input_chars, out
        ),
        (None, _) => eprintln!(
            "{} {}: {} chars in, failed",
            verb, outcome.algorithm, outcome.input_chars
        ),
    }
}
