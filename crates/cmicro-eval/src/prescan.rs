//! The single pass that registers function entry offsets and global
//! declarations before execution begins.

use cmicro_lex::{LookaheadWindow, TokenKind};
use cmicro_util::{Fault, Result};

use crate::bindings::{Bindings, FunctionBinding, TypeTag};

/// Walks the whole token stream once from the start, registering every
/// top-level function and global declaration, then skipping the body of
/// each function by brace-counting. Leaves the window sitting at EOF;
/// execution re-seeks to `main`'s registered offset afterward.
pub fn prescan(window: &mut LookaheadWindow, bindings: &mut Bindings) -> Result<()> {
    let mut brace_depth: i32 = 0;

    loop {
        if window.la(1) == TokenKind::Eof {
            break;
        }

        if window.la(1).is_type_keyword() {
            if window.la(2) == TokenKind::Ident && window.la(3) == TokenKind::LParen {
                register_function(window, bindings)?;
            } else if window.la(2) == TokenKind::Ident {
                global_decl(window, bindings)?;
            }
        } else if window.la(1) == TokenKind::LBrace {
            window.consume()?;
            brace_depth += 1;
        }

        while brace_depth > 0 {
            match window.la(1) {
                TokenKind::LBrace => brace_depth += 1,
                TokenKind::RBrace => brace_depth -= 1,
                _ => {}
            }
            window.consume()?;
        }
    }

    Ok(())
}

fn register_function(window: &mut LookaheadWindow, bindings: &mut Bindings) -> Result<()> {
    let kind = TypeTag::from_keyword(window.la(1)).expect("type keyword guaranteed by caller");
    let offset = window.lt(1).offset;
    let name = window.lt(2).text.to_string();
    bindings.functions.insert(name, FunctionBinding { kind, offset });
    window.consume_n(3)?;
    while window.la(1) != TokenKind::LBrace {
        window.consume()?;
    }
    Ok(())
}

/// Shared by pre-scan (globals) and the statement evaluator (locals):
/// `type name (, name)* ;`.
pub fn decl_names(window: &mut LookaheadWindow) -> Result<(TypeTag, Vec<String>)> {
    let kind = TypeTag::from_keyword(window.la(1)).expect("type keyword guaranteed by caller");
    window.consume()?;
    let mut names = Vec::new();
    loop {
        names.push(window.lt(1).text.to_string());
        if window.la(2) != TokenKind::Comma {
            break;
        }
        window.consume_n(2)?;
    }
    if window.la(2) == TokenKind::Semi {
        window.consume_n(2)?;
    } else {
        return Err(Fault::ExpectSemicolonInDecl);
    }
    Ok((kind, names))
}

fn global_decl(window: &mut LookaheadWindow, bindings: &mut Bindings) -> Result<()> {
    let (kind, names) = decl_names(window)?;
    for name in names {
        bindings.declare_global(&name, kind);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (LookaheadWindow, Bindings) {
        let mut window = LookaheadWindow::new(source).unwrap();
        let mut bindings = Bindings::new();
        prescan(&mut window, &mut bindings).unwrap();
        (window, bindings)
    }

    #[test]
    fn registers_function_offset() {
        let source = "int f(int x) { return x; } int main() { return 0; }";
        let (_, bindings) = run(source);
        let f = bindings.functions.get("f").unwrap();
        assert_eq!(f.offset, source.find("int f").unwrap());
        assert!(bindings.functions.contains_key("main"));
    }

    #[test]
    fn registers_global_declaration() {
        let source = "int a, b; int main() { return 0; }";
        let (_, bindings) = run(source);
        assert!(bindings.globals.contains_key("a"));
        assert!(bindings.globals.contains_key("b"));
    }

    #[test]
    fn skips_nested_braces_inside_a_function_body() {
        let source = "int f() { if (1) { int x; } return 0; } int main() { return 0; }";
        let (window, bindings) = run(source);
        assert_eq!(window.la(1), cmicro_lex::TokenKind::Eof);
        assert!(bindings.functions.contains_key("f"));
    }

    #[test]
    fn missing_semicolon_in_global_decl_is_a_fault() {
        let source = "int a int main() {}";
        let mut window = LookaheadWindow::new(source).unwrap();
        let mut bindings = Bindings::new();
        assert_eq!(prescan(&mut window, &mut bindings).unwrap_err(), Fault::ExpectSemicolonInDecl);
    }
}
