//! The machine: lookahead window, binding store, and I/O streams bundled
//! together, plus the top-level entry point that runs a program.

use std::io::{BufRead, Write};

use cmicro_lex::LookaheadWindow;
use cmicro_util::Result;

use crate::bindings::Bindings;
use crate::prescan::prescan;

/// Owns every piece of mutable state the evaluator touches: the scanner
/// cursor (via the lookahead window), the binding store, the pending
/// return value of the call in progress, and the two I/O streams the
/// builtins read and write.
///
/// A `Machine` is created fresh per run of the driver and dropped at
/// exit — there is no state that outlives one source-file execution.
pub struct Machine<'a, R, W> {
    pub window: LookaheadWindow<'a>,
    pub bindings: Bindings,
    /// Set by `return expr;`, read back by the caller immediately after
    /// `call_function` returns.
    pub ret_val: i64,
    pub input: R,
    pub output: W,
}

impl<'a, R: BufRead, W: Write> Machine<'a, R, W> {
    pub fn new(source: &'a str, input: R, output: W) -> Result<Self> {
        Ok(Self {
            window: LookaheadWindow::new(source)?,
            bindings: Bindings::new(),
            ret_val: 0,
            input,
            output,
        })
    }

    /// Pre-scans the program, then invokes `main`. Faults propagate to
    /// the caller unchanged; a clean return (including the program
    /// falling off the end of `main` at EOF) yields `Ok(())`.
    pub fn run(&mut self) -> Result<()> {
        prescan(&mut self.window, &mut self.bindings)?;
        self.call_function("main")?;
        Ok(())
    }
}
