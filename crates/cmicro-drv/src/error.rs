//! Driver-level errors: everything outside the evaluator's own `Fault`
//! taxonomy — argument parsing and file I/O, both handled before a
//! [`cmicro_eval::Machine`] ever runs.

use thiserror::Error;

/// Errors the driver itself can raise, distinct from an evaluator
/// [`cmicro_eval::machine::Machine`] [`Fault`](cmicro_util::Fault), which
/// is printed rather than propagated as a `DriverError`.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("usage: cmicro <source-file>")]
    Usage,

    #[error("failed to read {path}: {source}")]
    ReadSource { path: String, source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_error_display() {
        assert_eq!(DriverError::Usage.to_string(), "usage: cmicro <source-file>");
    }

    #[test]
    fn read_source_error_includes_the_path() {
        let err = DriverError::ReadSource {
            path: "missing.lc".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.lc"));
    }
}
