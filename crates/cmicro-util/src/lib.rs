//! Shared fault type and small utilities used across the cmicro pipeline.
//!
//! Kept deliberately thin: the scanner, pre-scan pass, and evaluator all
//! speak `Fault`/`Result` from this crate, and reach for `rustc-hash`'s
//! `FxHashMap` for the global/function symbol tables instead of rolling a
//! bespoke string interner — nothing here needs an interned handle, just a
//! fast name lookup.

pub mod error;

pub use error::{Fault, Result};
pub use rustc_hash::{FxHashMap, FxHashSet};
