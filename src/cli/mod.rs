mod args;
mod config;
mod global;
mod handlers;

use clap::{Parser, Subcommand};
use std::io::Write;
use text_codec::CodecRegistry;

use args::{ConfigAction, HistoryArgs, TransformArgs};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "text-codec")]
#[command(version)]
#[command(about = "Reversible text encoders and compressors: Base64, percent, HTML entities, hex, binary, ASCII codes, run-length, dictionary and Huffman", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode or compress text
    #[command(visible_alias = "compress")]
    Encode(TransformArgs),

    /// Decode or decompress text
    #[command(visible_alias = "decompress")]
    Decode(TransformArgs),

    /// Inspect algorithms and configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show entries from a history log
    History(HistoryArgs),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let config = config::load_engine_config(&cli.global)?;

    match cli.command {
        Commands::Encode(args) => {
            let registry = CodecRegistry::new(&config)?;
            handlers::encode::handle(args, &cli.global, &config, &registry)
        }
        Commands::Decode(args) => {
            let registry = CodecRegistry::new(&config)?;
            handlers::decode::handle(args, &cli.global, &config, &registry)
        }
        Commands::Config { action } => handlers::config::handle(action, &config),
        Commands::History(args) => handlers::history::handle(args),
    }
}

/// `[LEVEL] message` on stderr; RUST_LOG overrides the flag-derived level.
fn init_logging(global: &GlobalArgs) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(global.log_level());

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.format(|buf, record| {
        writeln!(buf, "[{}] {}", record.level(), record.args())?;
        buf.flush()?;
        Ok(())
    });

    let _ = builder.try_init();
}
