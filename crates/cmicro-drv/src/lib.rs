//! The driver: argument parsing, file reading, logging setup, and the
//! outermost fault-to-message translation around [`cmicro_eval::Machine`].

pub mod cli;
pub mod error;

use std::io::{self, BufReader, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use cli::Cli;
pub use error::DriverError;

/// Installs the tracing subscriber, reading `RUST_LOG` if set and
/// otherwise falling back to `directive`.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

/// Reads `path`, runs it through the evaluator against real stdin/stdout,
/// and reports the outcome as an exit code — 1 for a driver-level I/O
/// error, 0 otherwise (a fault prints its message to stdout and the
/// process still exits cleanly, per the language's diagnostic policy).
pub fn run(cli: &Cli) -> i32 {
    let path = cli.source.display().to_string();
    let source = match std::fs::read_to_string(&cli.source) {
        Ok(source) => source,
        Err(source_err) => {
            warn!(path = %path, error = %source_err, "failed to read source file");
            eprintln!("{}", DriverError::ReadSource { path, source: source_err });
            return 1;
        }
    };

    info!(path = %path, bytes = source.len(), "loaded source file");

    let stdin = BufReader::new(io::stdin());
    let stdout = io::stdout();
    let mut machine = match cmicro_eval::Machine::new(&source, stdin, stdout.lock()) {
        Ok(machine) => machine,
        Err(fault) => {
            println!("{fault}");
            return 0;
        }
    };

    match machine.run() {
        Ok(()) => {
            let _ = io::stdout().flush();
            info!("execution finished");
            0
        }
        Err(fault) => {
            warn!(%fault, "execution aborted");
            println!("{fault}");
            0
        }
    }
}
