use clap::error::ErrorKind;
use clap::Parser;
use cmicro_drv::{init_logging, run, Cli, DriverError};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version: let clap print its own message and exit 0.
        Err(err)
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
        {
            err.exit()
        }
        Err(_) => {
            eprintln!("{}", DriverError::Usage);
            std::process::exit(1);
        }
    };
    init_logging(cli.filter_directive());
    std::process::exit(run(&cli));
}
