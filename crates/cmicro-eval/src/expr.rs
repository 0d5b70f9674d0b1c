//! The expression evaluator: recursive descent over the precedence
//! ladder laid out in the specification (assignment, relational,
//! additive, multiplicative, exponent, unary, paren/atom).

use std::io::{BufRead, Write};

use cmicro_lex::TokenKind;
use cmicro_util::{Fault, Result};

use crate::machine::Machine;

impl<'a, R: BufRead, W: Write> Machine<'a, R, W> {
    /// Entry point. EOF yields no value (the expression layer is never
    /// reached when the evaluator has already terminated); a bare `;`
    /// yields `0` without consuming it, so that statement-level callers
    /// can still see and consume the semicolon themselves.
    pub fn expr(&mut self) -> Result<i64> {
        match self.window.la(1) {
            TokenKind::Eof => Ok(0),
            TokenKind::Semi => Ok(0),
            _ => self.assign(),
        }
    }

    /// Right-associative. `x = <assign>` stores into `x` and yields the
    /// stored value; anything else falls through to `rel`.
    fn assign(&mut self) -> Result<i64> {
        if self.window.la(1) == TokenKind::Ident && self.window.la(2) == TokenKind::Assign {
            let name = self.window.lt(1).text.to_string();
            self.window.consume_n(2)?;
            let value = self.assign()?;
            self.bindings.assign(&name, value)?;
            return Ok(value);
        }
        self.rel()
    }

    /// Non-associative: at most one relational operator per level.
    fn rel(&mut self) -> Result<i64> {
        let lhs = self.addsub()?;
        if self.window.la(1).is_relational() {
            let op = self.window.la(1);
            self.window.consume()?;
            let rhs = self.addsub()?;
            let result = match op {
                TokenKind::Lt => lhs < rhs,
                TokenKind::LtEq => lhs <= rhs,
                TokenKind::Gt => lhs > rhs,
                TokenKind::GtEq => lhs >= rhs,
                TokenKind::Eq => lhs == rhs,
                TokenKind::NotEq => lhs != rhs,
                _ => unreachable!("is_relational guarantees one of the six comparisons"),
            };
            return Ok(result as i64);
        }
        Ok(lhs)
    }

    fn addsub(&mut self) -> Result<i64> {
        let mut value = self.muldiv()?;
        loop {
            match self.window.la(1) {
                TokenKind::Plus => {
                    self.window.consume()?;
                    value += self.muldiv()?;
                }
                TokenKind::Minus => {
                    self.window.consume()?;
                    value -= self.muldiv()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn muldiv(&mut self) -> Result<i64> {
        let mut value = self.pow()?;
        loop {
            match self.window.la(1) {
                TokenKind::Star => {
                    self.window.consume()?;
                    value *= self.pow()?;
                }
                TokenKind::Slash => {
                    self.window.consume()?;
                    let rhs = self.pow()?;
                    if rhs == 0 {
                        return Err(Fault::DivisionByZero);
                    }
                    value /= rhs;
                }
                TokenKind::Percent => {
                    self.window.consume()?;
                    let rhs = self.pow()?;
                    if rhs == 0 {
                        return Err(Fault::DivisionByZero);
                    }
                    value %= rhs;
                }
                _ => return Ok(value),
            }
        }
    }

    /// Right-associative. `a ^ 0` is `1` for any `a`, including `a == 0`.
    /// A negative exponent hits neither the zero special case nor the
    /// repeat-multiply loop (which only runs while `remaining > 0`), so
    /// `value` is left exactly as `unary` set it: the base itself, not its
    /// reciprocal or `1`. The specification asks that this be documented,
    /// not "fixed".
    fn pow(&mut self) -> Result<i64> {
        let base = self.unary()?;
        if self.window.la(1) == TokenKind::Caret {
            self.window.consume()?;
            let exponent = self.pow()?;
            if exponent == 0 {
                return Ok(1);
            }
            let mut value = base;
            let mut remaining = exponent - 1;
            while remaining > 0 {
                value *= base;
                remaining -= 1;
            }
            return Ok(value);
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<i64> {
        let negate = match self.window.la(1) {
            TokenKind::Plus => {
                self.window.consume()?;
                false
            }
            TokenKind::Minus => {
                self.window.consume()?;
                true
            }
            _ => false,
        };
        let value = self.paren()?;
        Ok(if negate { -value } else { value })
    }

    fn paren(&mut self) -> Result<i64> {
        if self.window.la(1) == TokenKind::LParen {
            self.window.consume()?;
            let value = self.assign()?;
            if self.window.la(1) != TokenKind::RParen {
                return Err(Fault::UnbalancedParens);
            }
            self.window.consume()?;
            Ok(value)
        } else {
            self.atom()
        }
    }

    /// Identifier resolution order: builtin, then user function, then
    /// variable. Builtins and user-function calls are responsible for
    /// consuming their own tokens; only the variable case consumes a
    /// single identifier token here.
    fn atom(&mut self) -> Result<i64> {
        match self.window.la(1) {
            TokenKind::Ident => {
                let name = self.window.lt(1).text;
                if let Some(value) = self.dispatch_builtin(name)? {
                    Ok(value)
                } else if self.bindings.functions.contains_key(name) {
                    let name = name.to_string();
                    self.call_function(&name)?;
                    Ok(self.ret_val)
                } else {
                    let name = name.to_string();
                    let value = self.bindings.find(&name)?;
                    self.window.consume()?;
                    Ok(value)
                }
            }
            TokenKind::Num => {
                let text = self.window.lt(1).text;
                let value: i64 =
                    text.parse().map_err(|_| Fault::IntegerLiteralOverflow(text.to_string()))?;
                self.window.consume()?;
                Ok(value)
            }
            TokenKind::Char => {
                let value = self.window.lt(1).unquoted().bytes().next().unwrap_or(0) as i64;
                self.window.consume()?;
                Ok(value)
            }
            other => Err(Fault::UnexpectedToken(format!("{other:?}"))),
        }
    }
}
