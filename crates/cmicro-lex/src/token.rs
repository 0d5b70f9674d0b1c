//! Token kinds and the borrowed `Token` value itself.

/// The kind of a token, including the handful of keywords the language
/// reserves (`char`/`int` double as both type keywords and statement
/// dispatch tags; see [`TokenKind::is_type_keyword`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semi,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    Assign,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    Ident,
    Num,
    Char,
    Str,

    KwReturn,
    KwElse,
    KwIf,
    KwDo,
    KwFor,
    KwWhile,
    KwChar,
    KwInt,

    Eof,
}

impl TokenKind {
    /// `char` and `int`: the only two declared types the language has.
    pub fn is_type_keyword(self) -> bool {
        matches!(self, TokenKind::KwChar | TokenKind::KwInt)
    }

    /// The six relational/equality operators, each of which appears at
    /// most once per relational expression (the grammar is non-associative
    /// at this level).
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
                | TokenKind::Eq
                | TokenKind::NotEq
        )
    }
}

/// A token as produced by the [`crate::scanner::Scanner`].
///
/// `text` borrows directly from the source buffer — tokens never own their
/// text, which is what makes it cheap to hold three of them live in the
/// lookahead window and to recreate one on re-seek without extra
/// allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Absolute byte offset of the token's first character in the source.
    pub offset: usize,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// The literal text with its surrounding quotes stripped, for string
    /// and char literals. Panics if called on any other kind — callers are
    /// expected to check `kind` first, mirroring how the evaluator only
    /// ever calls this after a `Str`/`Char` dispatch.
    pub fn unquoted(&self) -> &'a str {
        debug_assert!(matches!(self.kind, TokenKind::Str | TokenKind::Char));
        &self.text[1..self.text.len() - 1]
    }
}
