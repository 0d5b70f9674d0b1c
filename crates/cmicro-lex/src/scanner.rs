//! The hand-written scanner.
//!
//! `Scanner` walks an immutable `&str` buffer by byte offset, decoding one
//! UTF-8 code point at a time. It has no lookahead of its own — that lives
//! one layer up, in [`crate::lookahead::LookaheadWindow`] — and no notion
//! of "current token"; each call to [`Scanner::next_token`] assembles and
//! returns exactly one.

use cmicro_util::{Fault, Result};

use crate::token::{Token, TokenKind};

fn keyword(text: &str) -> Option<TokenKind> {
    Some(match text {
        "return" => TokenKind::KwReturn,
        "else" => TokenKind::KwElse,
        "if" => TokenKind::KwIf,
        "do" => TokenKind::KwDo,
        "for" => TokenKind::KwFor,
        "while" => TokenKind::KwWhile,
        "char" => TokenKind::KwChar,
        "int" => TokenKind::KwInt,
        _ => return None,
    })
}

/// Byte-offset-addressed scanner over an immutable source buffer.
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Repositions scanning to an absolute byte offset. The caller (the
    /// lookahead window) is responsible for refilling afterward.
    pub fn seek(&mut self, offset: usize) {
        debug_assert!(self.source.is_char_boundary(offset));
        self.pos = offset;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ') | Some('\t') | Some('\n') | Some('\r')) {
            self.bump();
        }
    }

    /// Scans and returns the next token, or a [`Fault`] if the input is
    /// lexically invalid at the current position.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        self.skip_whitespace();
        let start = self.pos;

        let Some(c) = self.bump() else {
            return Ok(self.emit(TokenKind::Eof, start));
        };

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => {
                if self.peek_char() == Some('*') {
                    self.bump();
                    return self.skip_block_comment();
                }
                TokenKind::Slash
            }
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '=' => {
                if self.peek_char() == Some('=') {
                    self.bump();
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.peek_char() == Some('=') {
                    self.bump();
                    TokenKind::NotEq
                } else {
                    // The original grammar lexes a bare `!` into nothing at
                    // all and silently keeps scanning; we treat it as the
                    // fault the specification recommends instead.
                    return Err(Fault::BareBang);
                }
            }
            '<' => {
                if self.peek_char() == Some('=') {
                    self.bump();
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek_char() == Some('=') {
                    self.bump();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '"' => {
                self.scan_delimited('"', Fault::UnterminatedString)?;
                TokenKind::Str
            }
            '\'' => {
                self.scan_delimited('\'', Fault::UnterminatedChar)?;
                TokenKind::Char
            }
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semi,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            c if c == '_' || c.is_alphabetic() => {
                self.scan_while(|c| c == '_' || c.is_alphanumeric());
                return Ok(self.emit_ident(start));
            }
            c if c.is_ascii_digit() => {
                self.scan_while(|c| c.is_ascii_digit());
                TokenKind::Num
            }
            other => return Err(Fault::InvalidCharacter(other)),
        };

        Ok(self.emit(kind, start))
    }

    fn scan_while(&mut self, pred: impl Fn(char) -> bool) {
        while matches!(self.peek_char(), Some(c) if pred(c)) {
            self.bump();
        }
    }

    /// Consumes up to and including the closing delimiter of a string or
    /// char literal. A newline or end-of-input before the delimiter is a
    /// fault — literals never span lines.
    fn scan_delimited(&mut self, close: char, unterminated: Fault) -> Result<()> {
        loop {
            match self.bump() {
                Some(c) if c == close => return Ok(()),
                Some('\n') | None => return Err(unterminated),
                Some(_) => continue,
            }
        }
    }

    /// Skips a `/* ... */` comment and restarts scanning, since a comment
    /// does not itself produce a token.
    fn skip_block_comment(&mut self) -> Result<Token<'a>> {
        match self.rest().find("*/") {
            Some(i) => {
                self.pos += i + 2;
                self.next_token()
            }
            None => Err(Fault::UnclosedComment),
        }
    }

    fn emit(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token { kind, offset: start, text: &self.source[start..self.pos] }
    }

    fn emit_ident(&self, start: usize) -> Token<'a> {
        let text = &self.source[start..self.pos];
        let kind = keyword(text).unwrap_or(TokenKind::Ident);
        Token { kind, offset: start, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut s = Scanner::new(source);
        let mut out = Vec::new();
        loop {
            let t = s.next_token().unwrap();
            let done = t.kind == TokenKind::Eof;
            out.push(t.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn single_punctuation() {
        assert_eq!(
            kinds("(){};,+-*%^"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semi,
                TokenKind::Comma,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Percent,
                TokenKind::Caret,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn two_char_operators_take_priority() {
        assert_eq!(kinds("== != <= >="), vec![
            TokenKind::Eq, TokenKind::NotEq, TokenKind::LtEq, TokenKind::GtEq, TokenKind::Eof,
        ]);
        assert_eq!(kinds("= < >"), vec![
            TokenKind::Assign, TokenKind::Lt, TokenKind::Gt, TokenKind::Eof,
        ]);
    }

    #[test]
    fn division_vs_comment() {
        let mut s = Scanner::new("a / /* skip */ b");
        assert_eq!(s.next_token().unwrap().kind, TokenKind::Ident);
        assert_eq!(s.next_token().unwrap().kind, TokenKind::Slash);
        assert_eq!(s.next_token().unwrap().kind, TokenKind::Ident);
    }

    #[test]
    fn unclosed_comment_is_a_fault() {
        let mut s = Scanner::new("/* never closes");
        assert_eq!(s.next_token().unwrap_err(), Fault::UnclosedComment);
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(
            kinds("if else while do for return char int"),
            vec![
                TokenKind::KwIf,
                TokenKind::KwElse,
                TokenKind::KwWhile,
                TokenKind::KwDo,
                TokenKind::KwFor,
                TokenKind::KwReturn,
                TokenKind::KwChar,
                TokenKind::KwInt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unicode_identifiers_are_permitted() {
        let mut s = Scanner::new("café = 1;");
        let t = s.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::Ident);
        assert_eq!(t.text, "café");
    }

    #[test]
    fn string_and_char_literals_keep_their_quotes() {
        let mut s = Scanner::new(r#""hi" 'a'"#);
        let str_tok = s.next_token().unwrap();
        assert_eq!(str_tok.kind, TokenKind::Str);
        assert_eq!(str_tok.text, "\"hi\"");
        assert_eq!(str_tok.unquoted(), "hi");

        let char_tok = s.next_token().unwrap();
        assert_eq!(char_tok.kind, TokenKind::Char);
        assert_eq!(char_tok.unquoted(), "a");
    }

    #[test]
    fn unterminated_string_is_a_fault() {
        let mut s = Scanner::new("\"no closing quote\n");
        assert_eq!(s.next_token().unwrap_err(), Fault::UnterminatedString);
    }

    #[test]
    fn bare_bang_is_a_fault() {
        let mut s = Scanner::new("! x");
        assert_eq!(s.next_token().unwrap_err(), Fault::BareBang);
    }

    #[test]
    fn invalid_character_is_a_fault() {
        let mut s = Scanner::new("@");
        assert_eq!(s.next_token().unwrap_err(), Fault::InvalidCharacter('@'));
    }

    #[test]
    fn seek_repositions_the_next_token() {
        let source = "int x; int y;";
        let mut s = Scanner::new(source);
        let second_int = source.rfind("int").unwrap();
        s.seek(second_int);
        let t = s.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::KwInt);
        assert_eq!(t.offset, second_int);
    }

    #[test]
    fn numbers_are_digit_runs() {
        let mut s = Scanner::new("1234 5");
        assert_eq!(s.next_token().unwrap().text, "1234");
        assert_eq!(s.next_token().unwrap().text, "5");
    }
}
