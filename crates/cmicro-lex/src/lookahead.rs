//! Fixed-width lookahead over the [`Scanner`].

use cmicro_util::Result;

use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

/// Width of the lookahead window. The grammar never needs to look more
/// than three tokens ahead (the deepest case is pre-scan's
/// `type ident (`).
pub const K: usize = 3;

/// A ring buffer of the next `K` tokens sitting above a [`Scanner`].
///
/// `LT(i)` and `consume()` are the only two primitives the rest of the
/// evaluator needs; everything else — re-entering a loop body, jumping
/// into a function — is built out of [`LookaheadWindow::seek_to`], which
/// reseeks the underlying scanner and refills the whole window.
pub struct LookaheadWindow<'a> {
    scanner: Scanner<'a>,
    buffer: Vec<Token<'a>>,
    /// Slot in `buffer` holding `LT(1)`.
    p: usize,
}

impl<'a> LookaheadWindow<'a> {
    /// Builds a window over `source`, prefilling it with the first `K`
    /// tokens.
    pub fn new(source: &'a str) -> Result<Self> {
        let mut scanner = Scanner::new(source);
        let mut buffer = Vec::with_capacity(K);
        for _ in 0..K {
            buffer.push(scanner.next_token()?);
        }
        Ok(Self { scanner, buffer, p: 0 })
    }

    /// The `i`-th upcoming token, 1-indexed.
    pub fn lt(&self, i: usize) -> Token<'a> {
        self.buffer[(self.p + i - 1) % K]
    }

    /// Shorthand for `self.lt(i).kind`.
    pub fn la(&self, i: usize) -> TokenKind {
        self.lt(i).kind
    }

    /// Advances by one token, pulling a replacement from the scanner.
    pub fn consume(&mut self) -> Result<()> {
        let next = self.scanner.next_token()?;
        self.buffer[self.p] = next;
        self.p = (self.p + 1) % K;
        Ok(())
    }

    /// `consume()` repeated `n` times.
    pub fn consume_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.consume()?;
        }
        Ok(())
    }

    /// Repositions the scanner to `offset` and rebuilds the window. This
    /// is the one mechanism behind every loop and function call: offsets
    /// recorded earlier become, in effect, jump targets.
    pub fn seek_to(&mut self, offset: usize) -> Result<()> {
        self.scanner.seek(offset);
        self.consume_n(K)
    }
}
