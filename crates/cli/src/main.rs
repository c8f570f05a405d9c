use std::env;
use std::process::ExitCode;

use cli_tree_cli::{commands, exit_status};
use cli_tree_core::{Context, Error};
use log::{debug, warn};

fn main() -> ExitCode {
    env_logger::init();

    let context = Context::new();
    let handle = context.clone();
    if let Err(e) = ctrlc::set_handler(move || handle.cancel()) {
        warn!("Failed to install Ctrl-C handler: {e}");
    }

    let args: Vec<String> = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    debug!("Arguments: {:?}", args);

    let root = commands::root();
    let result = root.run(&context, &args);

    match &result {
        // Flag problems have already been reported together with usage.
        Ok(()) | Err(Error::Flag { .. }) => {}
        Err(e) => eprintln!("{e}"),
    }

    ExitCode::from(exit_status(&result))
}
