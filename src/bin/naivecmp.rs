//! naivecmp CLI Binary
//!
//! Compares two directory trees by file attributes and prints what exists
//! only on one side.

use clap::Parser;
use naivecmp::cli::{execute, map_error, resolve_settings, Cli};
use naivecmp::logging::init_logging;
use std::io::{IsTerminal, Write};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", map_error(&anyhow::Error::new(e)));
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(dir_a = %cli.dir_a.display(), dir_b = %cli.dir_b.display(), "naivecmp starting");

    let stdout = std::io::stdout();
    let terminal = stdout.is_terminal();
    let mut out = stdout.lock();
    match execute(&cli, &settings, &mut out, terminal).and_then(|()| Ok(out.flush()?)) {
        Ok(()) => info!("Command completed successfully"),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
