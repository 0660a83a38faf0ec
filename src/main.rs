mod cli;

use text_codec::UnknownAlgorithmError;

fn main() {
    if let Err(e) = cli::run() {
        // Unknown algorithm errors carry their own prefix and hint
        if e.downcast_ref::<UnknownAlgorithmError>().is_some() {
            eprintln!("{}", e);
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }
}
