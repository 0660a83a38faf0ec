use crate::cli::args::HistoryArgs;
use text_codec::{LogEntry, TransformLog};

const PREVIEW_CHARS: usize = 40;

pub fn handle(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let log = TransformLog::load(&args.file)?;
    let entries = log.latest(args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No history entries in {}", args.file.display());
        return Ok(());
    }

    for entry in entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{}  {:<10} {:<12} {} -> {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.direction.verb(entry.algorithm.kind()),
        entry.algorithm,
        preview(&entry.input),
        preview(&entry.output)
    )
}

/// Debug-quoted text, cut to a fixed number of characters.
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return format!("{:?}", text);
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{:?}...", head)
}
