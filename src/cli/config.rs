use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use text_codec::{AlgorithmId, EngineConfig};

use crate::cli::global::GlobalArgs;

/// Load configuration from `--config` or the standard override chain.
///
/// An explicit file is fatal on error; the standard chain only warns.
pub fn load_engine_config(global: &GlobalArgs) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config = match &global.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::load_with_overrides()?,
    };
    Ok(config)
}

/// Resolve an algorithm name, falling back to the configured default
pub fn resolve_algorithm(
    name: Option<&str>,
    config: &EngineConfig,
) -> Result<AlgorithmId, Box<dyn std::error::Error>> {
    match name {
        Some(name) => Ok(name.parse::<AlgorithmId>()?),
        None => Ok(config.settings.default_algorithm),
    }
}

/// Read UTF-8 text from a file or stdin, enforcing --max-size
pub fn read_input(
    file: Option<&PathBuf>,
    global: &GlobalArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let data = if let Some(file_path) = file {
        if global.max_size > 0 {
            let file_size = fs::metadata(file_path)?.len() as usize;

            if file_size > global.max_size {
                if !global.force {
                    return Err(format!(
                        "File size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
                        file_size, global.max_size
                    )
                    .into());
                }
                log::warn!(
                    "processing large file ({} bytes, limit: {} bytes)",
                    file_size,
                    global.max_size
                );
            }
        }

        fs::read(file_path)?
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;

        if global.max_size > 0 && buffer.len() > global.max_size {
            return Err(format!(
                "Input size ({} bytes) exceeds maximum ({} bytes). Use a FILE argument with --force for large inputs.",
                buffer.len(),
                global.max_size
            )
            .into());
        }

        buffer
    };

    String::from_utf8(data).map_err(|e| {
        format!(
            "Input is not valid UTF-8 text (first invalid byte at offset {})",
            e.utf8_error().valid_up_to()
        )
        .into()
    })
}
