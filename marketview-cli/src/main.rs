//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use marketview_cli::CliError;

fn main() {
    pretty_env_logger::init();
    match marketview_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("marketview: {err}");
            std::process::exit(1);
        }
    }
}
