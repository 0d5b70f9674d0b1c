//! Scanner and lookahead window for the language's lexical layer.
//!
//! This crate has no notion of grammar or execution; it turns a source
//! buffer into tokens, on demand, from any byte offset. Everything above
//! it (pre-scan, the expression/statement evaluator) is built entirely out
//! of [`LookaheadWindow::la`]/[`LookaheadWindow::lt`]/[`LookaheadWindow::consume`]
//! and [`LookaheadWindow::seek_to`].

pub mod lookahead;
pub mod scanner;
pub mod token;

pub use lookahead::{LookaheadWindow, K};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
