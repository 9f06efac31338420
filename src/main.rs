use command_hub_replacer::bootstrap::setup::initialize_logger;
use command_hub_replacer::common::errors::handle_error;
use command_hub_replacer::{Replacer, ReplacerConfig};
use log::error;

/// Exit status when startup fails before the replacement begins.
const STARTUP_EXIT_CODE: i32 = 2;

fn main() {
    if let Err(e) = initialize_logger() {
        eprintln!("Error during startup:\n{:?}", e);
        std::process::exit(STARTUP_EXIT_CODE);
    }

    let config = match ReplacerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            handle_error(e.context("Failed to load configuration"));
            std::process::exit(STARTUP_EXIT_CODE);
        }
    };

    if let Err(err) = Replacer::new(config).and_then(|replacer| replacer.run()) {
        let code = err.exit_code();
        if err.is_not_found() {
            error!("{}", err);
        } else {
            handle_error(anyhow::Error::new(err).context("Replacement aborted"));
        }
        std::process::exit(code);
    }
}
