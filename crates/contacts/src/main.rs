//! Contacts CLI - interactive contact book
//!
//! Binary name: `contacts`

use std::{io, process};

use anyhow::Result;
use contacts::{cli, Shell};

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = cli::resolve_config(&matches)?;
    let store = cli::open_store(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(store, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

fn main() {
    // Logs go to stderr so the menu transcript on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err:#}");
        }

        let code = err
            .downcast_ref::<contacts_core::Error>()
            .map_or(1, contacts_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
