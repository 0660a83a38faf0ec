use crate::cli::args::ConfigAction;
use text_codec::{AlgorithmId, EngineConfig};

pub fn handle(action: ConfigAction, config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::List { json } => handle_list(json, config),
        ConfigAction::Show => handle_show(config),
    }
}

fn handle_list(json: bool, config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let default = config.settings.default_algorithm;

    if json {
        let algorithms: Vec<_> = AlgorithmId::ALL
            .iter()
            .map(|id| {
                serde_json::json!({
                    "name": id.as_str(),
                    "kind": id.kind(),
                    "aliases": id.aliases(),
                    "default": *id == default,
                })
            })
            .collect();
        let output = serde_json::json!({ "algorithms": algorithms });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Available algorithms:\n");
    for id in AlgorithmId::ALL {
        let marker = if id == default { " (default)" } else { "" };
        println!(
            "  {:<12} {:<11} {}{}",
            id.as_str(),
            id.kind().as_str(),
            id.aliases().join(", "),
            marker
        );
    }

    Ok(())
}

fn handle_show(config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", config.to_toml()?);
    Ok(())
}
