//! The fault type shared by every stage of the pipeline.
//!
//! The language has no recoverable error handling: scanning, pre-scan,
//! and execution all abort on the first fault they hit. Rather than give
//! each crate its own error enum and a web of `From` impls between them,
//! every stage returns `Result<_, Fault>` and the driver is the only place
//! a fault is finally reported.

use thiserror::Error;

/// A single unrecoverable fault raised by the scanner, the lookahead
/// window, the pre-scan pass, or the evaluator.
///
/// `Fault` carries only a message; the language's error-handling design
/// (see the propagation policy in the specification) does not distinguish
/// severities or attach source spans, so there is nothing else to carry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("invalid character: {0}")]
    InvalidCharacter(char),

    #[error("string literal unterminated")]
    UnterminatedString,

    #[error("char literal unterminated")]
    UnterminatedChar,

    #[error("unclosed comment")]
    UnclosedComment,

    #[error("bare '!' is not a valid token")]
    BareBang,

    #[error("expect semicolon after expression")]
    ExpectSemicolon,

    #[error("expect semicolon in declaration")]
    ExpectSemicolonInDecl,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("expect '(' to start argument list")]
    ExpectArgsOpenParen,

    #[error("expect ')' to end argument list")]
    ExpectArgsCloseParen,

    #[error("in function definition, param list expects a type")]
    ExpectParamType,

    #[error("expect right paren after params list")]
    ExpectParamsCloseParen,

    #[error("expect 'while' token after 'do' body")]
    ExpectWhileAfterDo,

    #[error("expect semicolon after init statement in 'for'")]
    ExpectForInitSemicolon,

    #[error("expect semicolon after condition statement in 'for'")]
    ExpectForCondSemicolon,

    #[error("after computing post statement, expect ')'")]
    ExpectForCloseParen,

    #[error("unexpected token: {0:?}")]
    UnexpectedToken(String),

    #[error("function {0} undefined")]
    UndefinedFunction(String),

    #[error("not find variable: {0}")]
    UndefinedVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer literal overflows: {0}")]
    IntegerLiteralOverflow(String),

    #[error("expect '{name}' func name")]
    ExpectBuiltinName { name: &'static str },

    #[error("expect string literal argument to {name}")]
    ExpectStringArg { name: &'static str },

    #[error("expect right paren in {name} call")]
    ExpectBuiltinCloseParen { name: &'static str },
}

/// Convenience alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, Fault>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_taxonomy_wording() {
        assert_eq!(Fault::InvalidCharacter('$').to_string(), "invalid character: $");
        assert_eq!(Fault::UnclosedComment.to_string(), "unclosed comment");
        assert_eq!(Fault::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn undefined_name_faults_carry_the_name() {
        let f = Fault::UndefinedVariable("x".to_string());
        assert!(f.to_string().contains('x'));
    }
}
