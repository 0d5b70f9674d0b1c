//! Statement dispatch and the function call protocol.
//!
//! `exec_block` is a single flat dispatch loop, not a recursive descent
//! over nested compound statements — a `{` seen mid-loop just flips a
//! flag and keeps looping in place. This mirrors the binding model: the
//! local stack has no sub-frames for nested blocks, so the statement
//! evaluator does not need sub-scopes for them either.

use std::io::{BufRead, Write};

use cmicro_lex::TokenKind;
use cmicro_util::{Fault, Result};

use crate::bindings::{FunctionBinding, TypeTag};
use crate::machine::Machine;
use crate::prescan::decl_names;

/// What happened at the end of a statement or a block.
///
/// `Continue` covers the ordinary cases — a closing `}`, a single
/// statement finishing, a `return` — all of which leave the caller (an
/// enclosing block, or the call protocol) free to carry on. `Halt` means
/// execution reached end-of-input mid-program, which terminates the
/// whole run; it propagates straight up through every enclosing block
/// and call frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Halt,
}

impl<'a, R: BufRead, W: Write> Machine<'a, R, W> {
    /// Advances through statements until a closing `}` or a `return`. If
    /// `LT(1)` is not `{` on entry, executes exactly one statement and
    /// returns instead of looping.
    pub fn exec_block(&mut self) -> Result<Signal> {
        let mut compound = false;
        loop {
            match self.window.la(1) {
                TokenKind::Ident => {
                    self.expr()?;
                    if self.window.la(1) != TokenKind::Semi {
                        return Err(Fault::ExpectSemicolon);
                    }
                    self.window.consume()?;
                }
                TokenKind::LBrace => {
                    self.window.consume()?;
                    compound = true;
                }
                TokenKind::RBrace => {
                    self.window.consume()?;
                    return Ok(Signal::Continue);
                }
                TokenKind::KwChar | TokenKind::KwInt => {
                    self.local_decl()?;
                }
                TokenKind::KwReturn => {
                    self.func_return()?;
                    return Ok(Signal::Continue);
                }
                TokenKind::KwIf => {
                    if self.exec_if()? == Signal::Halt {
                        return Ok(Signal::Halt);
                    }
                }
                TokenKind::KwElse => {
                    // A dangling else after a taken `if` — skip it.
                    self.find_end_of_block()?;
                }
                TokenKind::KwWhile => {
                    if self.exec_while()? == Signal::Halt {
                        return Ok(Signal::Halt);
                    }
                }
                TokenKind::KwDo => {
                    if self.exec_do()? == Signal::Halt {
                        return Ok(Signal::Halt);
                    }
                }
                TokenKind::KwFor => {
                    if self.exec_for()? == Signal::Halt {
                        return Ok(Signal::Halt);
                    }
                }
                TokenKind::Eof => return Ok(Signal::Halt),
                _ => {
                    self.window.consume()?;
                }
            }
            if !compound {
                break;
            }
        }
        Ok(Signal::Continue)
    }

    fn local_decl(&mut self) -> Result<()> {
        let (kind, names) = decl_names(&mut self.window)?;
        for name in names {
            self.bindings.declare_local(&name, kind);
        }
        Ok(())
    }

    fn func_return(&mut self) -> Result<()> {
        self.window.consume()?; // 'return'
        let value = self.expr()?;
        self.window.consume()?; // ';'
        self.ret_val = value;
        Ok(())
    }

    /// The then-branch always runs to completion and returns immediately
    /// on a true condition — a dangling `else`, if present, is left for
    /// the enclosing block's own `KwElse` dispatch to skip. On a false
    /// condition, the then-branch is skipped and the else-branch (if any)
    /// runs instead.
    fn exec_if(&mut self) -> Result<Signal> {
        self.window.consume()?; // 'if'
        let cond = self.expr()?;
        if cond != 0 {
            self.exec_block()
        } else {
            self.find_end_of_block()?;
            if self.window.la(1) != TokenKind::KwElse {
                return Ok(Signal::Continue);
            }
            self.window.consume()?; // 'else'
            self.exec_block()
        }
    }

    /// Evaluates the condition and, if true, runs the body once and
    /// seeks back to the `while` token — relying on the enclosing
    /// compound block's dispatch loop to re-hit `KwWhile` and call this
    /// again, rather than looping internally.
    fn exec_while(&mut self) -> Result<Signal> {
        let while_offset = self.window.lt(1).offset;
        self.window.consume()?; // 'while'
        let cond = self.expr()?;
        if cond == 0 {
            self.find_end_of_block()?;
            return Ok(Signal::Continue);
        }
        if self.exec_block()? == Signal::Halt {
            return Ok(Signal::Halt);
        }
        self.window.seek_to(while_offset)?;
        Ok(Signal::Continue)
    }

    /// Runs the body once, then checks the trailing condition; on a true
    /// condition seeks back to the `do` token. The re-lexed condition is
    /// deliberate: the specification calls out that the `while(...)`
    /// trailing a `do` block is re-scanned fresh on every iteration.
    fn exec_do(&mut self) -> Result<Signal> {
        let do_offset = self.window.lt(1).offset;
        self.window.consume()?; // 'do'
        if self.exec_block()? == Signal::Halt {
            return Ok(Signal::Halt);
        }
        if self.window.la(1) != TokenKind::KwWhile {
            return Err(Fault::ExpectWhileAfterDo);
        }
        self.window.consume()?; // 'while'
        let cond = self.expr()?;
        if cond != 0 {
            self.window.seek_to(do_offset)?;
        }
        Ok(Signal::Continue)
    }

    /// Unlike `while`/`do`, the `for` loop iterates with an explicit loop
    /// here rather than leaning on re-dispatch, matching how the
    /// reference machine implements it.
    fn exec_for(&mut self) -> Result<Signal> {
        self.window.consume_n(2)?; // 'for' '('
        self.expr()?; // init
        if self.window.la(1) != TokenKind::Semi {
            return Err(Fault::ExpectForInitSemicolon);
        }
        let cond_offset = self.window.lt(1).offset + 1;
        self.window.consume()?; // ';'

        loop {
            let cond = self.expr()?;
            if self.window.la(1) != TokenKind::Semi {
                return Err(Fault::ExpectForCondSemicolon);
            }
            let post_offset = self.window.lt(1).offset + 1;
            self.window.consume()?; // ';'

            let mut depth = 1i32;
            while depth != 0 {
                match self.window.la(1) {
                    TokenKind::LParen => depth += 1,
                    TokenKind::RParen => depth -= 1,
                    _ => {}
                }
                self.window.consume()?;
            }

            if cond == 0 {
                self.find_end_of_block()?;
                return Ok(Signal::Continue);
            }
            if self.exec_block()? == Signal::Halt {
                return Ok(Signal::Halt);
            }

            self.window.seek_to(post_offset)?;
            self.expr()?; // post, result discarded
            if self.window.la(1) != TokenKind::RParen {
                return Err(Fault::ExpectForCloseParen);
            }
            self.window.consume()?;
            self.window.seek_to(cond_offset)?;
        }
    }

    /// Skips the next `{ ... }` region by brace-counting. A non-taken
    /// branch without braces is only a single token wide in the cases
    /// this evaluator actually relies on seeking past (the remaining
    /// tokens of a bare statement fall through to `exec_block`'s default
    /// one-token-at-a-time arm on the next pass).
    fn find_end_of_block(&mut self) -> Result<()> {
        let mut depth = 0i32;
        loop {
            match self.window.la(1) {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            self.window.consume()?;
            if depth == 0 {
                break;
            }
        }
        Ok(())
    }

    /// `main` is special-cased: it never gets a frame base (nothing calls
    /// it, so there is no caller frame to protect), and control never
    /// returns from it in the ordinary sense — the whole program just
    /// ends when its block does.
    pub(crate) fn call_function(&mut self, name: &str) -> Result<()> {
        let function: FunctionBinding = *self
            .bindings
            .functions
            .get(name)
            .ok_or_else(|| Fault::UndefinedFunction(name.to_string()))?;

        if name == "main" {
            self.window.seek_to(function.offset)?;
            while self.window.la(1) != TokenKind::LBrace {
                self.window.consume()?;
            }
            self.exec_block()?;
            return Ok(());
        }

        let pre_call_len = self.bindings.locals_len();
        self.window.consume()?; // eat the function-name identifier
        self.get_args()?;
        let ret_offset = self.window.lt(1).offset;
        if pre_call_len > 0 {
            self.bindings.push_frame_base(pre_call_len - 1);
        }
        self.window.seek_to(function.offset)?;
        self.get_params()?;
        self.exec_block()?;
        self.window.seek_to(ret_offset)?;
        if pre_call_len > 0 {
            self.bindings.pop_frame_base();
        } else {
            self.bindings.clear_locals();
        }
        Ok(())
    }

    /// Evaluates each comma-separated actual argument and pushes them
    /// onto the local stack in reverse order, so the topmost local is the
    /// first argument — lining up with `get_params`'s descending walk.
    fn get_args(&mut self) -> Result<()> {
        if self.window.la(1) != TokenKind::LParen {
            return Err(Fault::ExpectArgsOpenParen);
        }
        if self.window.la(2) == TokenKind::RParen {
            self.window.consume_n(2)?;
            return Ok(());
        }
        self.window.consume()?; // '('
        let mut values = Vec::new();
        loop {
            values.push(self.expr()?);
            if self.window.la(1) != TokenKind::Comma {
                break;
            }
            self.window.consume()?;
        }
        if self.window.la(1) != TokenKind::RParen {
            return Err(Fault::ExpectArgsCloseParen);
        }
        self.window.consume()?;
        for value in values.into_iter().rev() {
            self.bindings.push_unnamed_local(value);
        }
        Ok(())
    }

    /// Binds each declared parameter's name and type onto the
    /// already-pushed argument locals, walking the local stack from the
    /// top down as the parameter list is read left to right.
    fn get_params(&mut self) -> Result<()> {
        while self.window.la(1) != TokenKind::LParen {
            self.window.consume()?;
        }
        if self.window.la(1) == TokenKind::LParen && self.window.la(2) == TokenKind::RParen {
            self.window.consume_n(2)?;
            return Ok(());
        }
        self.window.consume()?; // '('

        let mut slot = self.bindings.locals_len() as i64 - 1;
        while slot >= 0 {
            if self.window.la(1) == TokenKind::RParen {
                break;
            }
            let kind = TypeTag::from_keyword(self.window.la(1)).ok_or(Fault::ExpectParamType)?;
            self.window.consume()?;
            let name = self.window.lt(1).text.to_string();
            let local = &mut self.bindings.locals[slot as usize];
            local.kind = kind;
            local.name = name;
            self.window.consume()?;
            slot -= 1;
            if self.window.la(1) != TokenKind::Comma {
                break;
            }
            self.window.consume()?;
        }

        if self.window.la(1) != TokenKind::RParen {
            return Err(Fault::ExpectParamsCloseParen);
        }
        self.window.consume()?;
        Ok(())
    }
}
