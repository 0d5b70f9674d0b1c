//! The five builtin functions. Each is checked before user functions
//! during atom resolution and is responsible for consuming every token
//! of its own call, including the closing `)`.

use std::io::{BufRead, Write};

use cmicro_lex::TokenKind;
use cmicro_util::{Fault, Result};

use crate::machine::Machine;

impl<'a, R: BufRead, W: Write> Machine<'a, R, W> {
    /// Dispatches `name` to a builtin if it names one, running it and
    /// returning its value. Returns `Ok(None)` for any other name,
    /// leaving the window untouched so the caller can try user
    /// functions and then plain variables.
    pub(crate) fn dispatch_builtin(&mut self, name: &str) -> Result<Option<i64>> {
        Ok(Some(match name {
            "getch" => self.builtin_getch()?,
            "getnum" => self.builtin_getnum()?,
            "putch" => self.builtin_putch()?,
            "puts" => self.builtin_puts()?,
            "print" => self.builtin_print()?,
            _ => return Ok(None),
        }))
    }

    fn peek_byte(&mut self) -> Option<u8> {
        self.input.fill_buf().ok().and_then(|buf| buf.first().copied())
    }

    fn take_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.input.consume(1);
        Some(b)
    }

    /// Skips the remaining tokens of a no-argument-parsed call, through
    /// and including the closing `)`. Used by `getch`/`getnum`, which
    /// (per the call protocol they inherit) receive control with their
    /// own name token still unconsumed.
    fn skip_to_close_paren(&mut self) -> Result<()> {
        while self.window.la(1) != TokenKind::RParen {
            self.window.consume()?;
        }
        self.window.consume()
    }

    /// `getch()` — reads one byte from input; a read failure or
    /// end-of-input yields `0` rather than a fault, mirroring the host
    /// read primitive this builtin wraps.
    fn builtin_getch(&mut self) -> Result<i64> {
        let ch = self.take_byte().unwrap_or(0);
        self.skip_to_close_paren()?;
        Ok(ch as i64)
    }

    /// `getnum()` — reads one decimal integer, skipping leading
    /// whitespace and accepting an optional leading `-`.
    fn builtin_getnum(&mut self) -> Result<i64> {
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_whitespace()) {
            self.take_byte();
        }
        let negative = if self.peek_byte() == Some(b'-') {
            self.take_byte();
            true
        } else {
            false
        };
        let mut value: i64 = 0;
        let mut saw_digit = false;
        while let Some(b) = self.peek_byte() {
            if !b.is_ascii_digit() {
                break;
            }
            saw_digit = true;
            value = value * 10 + i64::from(b - b'0');
            self.take_byte();
        }
        if !saw_digit {
            value = 0;
        }
        self.skip_to_close_paren()?;
        Ok(if negative { -value } else { value })
    }

    /// `putch(expr)` — the parenthesized expression is parsed by the
    /// ordinary expression grammar (`expr`'s own paren handling consumes
    /// the `(` and `)`), so this builtin only has to check its own name.
    fn builtin_putch(&mut self) -> Result<i64> {
        self.expect_builtin_name("putch")?;
        self.window.consume()?;
        let value = self.expr()?;
        self.output.write_all(&[value as u8]).ok();
        Ok(value)
    }

    /// `puts("literal")` — unlike `putch`, this parses its own
    /// `( "..." )` shape directly rather than going through `expr`,
    /// since a string literal is not itself an expression form.
    fn builtin_puts(&mut self) -> Result<i64> {
        self.expect_builtin_name("puts")?;
        self.window.consume_n(2)?;
        if self.window.la(1) != TokenKind::Str {
            return Err(Fault::ExpectStringArg { name: "puts" });
        }
        let text = self.window.lt(1).unquoted().to_string();
        writeln!(self.output, "{text}").ok();
        self.window.consume()?;
        if self.window.la(1) != TokenKind::RParen {
            return Err(Fault::ExpectBuiltinCloseParen { name: "puts" });
        }
        self.window.consume()?;
        Ok(0)
    }

    /// `print(...)` — two modes. When the token right after `(` is a
    /// string literal, print it with a trailing newline; otherwise
    /// evaluate an expression and print its decimal value followed by a
    /// single space, no newline.
    fn builtin_print(&mut self) -> Result<i64> {
        self.expect_builtin_name("print")?;
        self.window.consume()?;
        if self.window.la(2) == TokenKind::Str {
            self.window.consume()?;
        }
        if self.window.la(1) == TokenKind::Str {
            let text = self.window.lt(1).unquoted().to_string();
            writeln!(self.output, "{text}").ok();
            self.window.consume()?;
            if self.window.la(1) != TokenKind::RParen {
                return Err(Fault::ExpectBuiltinCloseParen { name: "print" });
            }
            self.window.consume()?;
        } else {
            let value = self.expr()?;
            write!(self.output, "{value} ").ok();
        }
        Ok(0)
    }

    fn expect_builtin_name(&self, name: &'static str) -> Result<()> {
        if self.window.lt(1).text != name {
            return Err(Fault::ExpectBuiltinName { name });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::machine::Machine;
    use std::io::Cursor;

    fn run(source: &str, stdin: &str) -> String {
        let mut m = Machine::new(source, Cursor::new(stdin.as_bytes().to_vec()), Vec::new()).unwrap();
        m.run().unwrap();
        String::from_utf8(m.output).unwrap()
    }

    #[test]
    fn print_numeric_and_string_modes() {
        assert_eq!(run("int main(){ print(1+2*3); }", ""), "7 ");
        assert_eq!(run(r#"int main(){ print("hi"); }"#, ""), "hi\n");
    }

    #[test]
    fn puts_appends_newline_and_strips_quotes() {
        assert_eq!(run(r#"int main(){ puts("hello"); }"#, ""), "hello\n");
    }

    #[test]
    fn putch_writes_the_raw_byte() {
        assert_eq!(run("int main(){ putch(65); }", ""), "A");
    }

    #[test]
    fn getch_and_getnum_read_from_stdin() {
        assert_eq!(run("int main(){ putch(getch()); }", "Z"), "Z");
        assert_eq!(run("int main(){ print(getnum()); }", "42"), "42 ");
    }
}
