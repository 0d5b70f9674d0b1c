//! Command-line surface: a single positional source-file argument, plus
//! the usual verbosity flag for the tracing layer.

use std::path::PathBuf;

use clap::Parser;

/// `cmicro <source-file>` — the entire CLI contract for the evaluator.
///
/// There are no subcommands: the language's grammar doesn't admit
/// separate compile/run phases, so there's nothing else for the CLI to
/// expose.
#[derive(Debug, Parser)]
#[command(name = "cmicro")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a single source file through the language's evaluator")]
pub struct Cli {
    /// Source file to execute.
    pub source: PathBuf,

    /// Increase log verbosity (-v, -vv). Defaults to warnings only; can
    /// also be set with `RUST_LOG`.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn filter_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_source_path() {
        let cli = Cli::parse_from(["cmicro", "program.lc"]);
        assert_eq!(cli.source, PathBuf::from("program.lc"));
        assert_eq!(cli.filter_directive(), "warn");
    }

    #[test]
    fn verbose_flags_stack_into_the_filter_directive() {
        let cli = Cli::parse_from(["cmicro", "-vv", "program.lc"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.filter_directive(), "debug");
    }

    #[test]
    fn missing_source_argument_is_rejected() {
        assert!(Cli::try_parse_from(["cmicro"]).is_err());
    }
}
