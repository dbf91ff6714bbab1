//! # scenario-lint-lua
//!
//! Closed syntax tree for the Lua code embedded in scenario scripts.
//!
//! Parsing is done by [`full_moon`]; its tree is lowered into the enums of
//! [`ast`] so that the call walker can match every node kind exhaustively.
//! Grammar extensions without a counterpart here are reported as
//! [`LuaError::Unsupported`].
//!
//! ## Example
//!
//! ```
//! use scenario_lint_lua::{parse_chunk, StatementKind};
//!
//! let block = parse_chunk("show(bg, 'room')").unwrap();
//! assert!(matches!(block.statements[0].kind, StatementKind::Call(_)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod convert;
mod error;

pub use ast::{
    Block, Expr, FunctionBody, FunctionName, Statement, StatementKind, TableField, UnaryOp,
};
pub use error::{LuaError, Result};

/// Parses one code block.
///
/// # Errors
///
/// Returns [`LuaError::Syntax`] when the code is not valid Lua, and the other
/// variants when a literal or node cannot be lowered.
pub fn parse_chunk(code: &str) -> Result<Block> {
    let parsed = full_moon::parse(code).map_err(|errors| LuaError::from_grammar(&errors))?;
    convert::block(parsed.nodes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_shape(code: &str) -> Expr {
        let block = parse_chunk(code).unwrap();
        match block.statements.into_iter().next().map(|s| s.kind) {
            Some(StatementKind::Call(expr)) => expr,
            other => panic!("expected a call, got {other:?}"),
        }
    }

    #[test]
    fn test_method_chain_nests_receivers() {
        let Expr::MethodCall {
            receiver,
            method,
            args,
        } = call_shape("anim:move(cam, 1):fade(0.5)")
        else {
            panic!("expected a method call");
        };
        assert_eq!(method, "fade");
        assert_eq!(args, vec![Expr::Number(0.5)]);
        assert!(matches!(
            *receiver,
            Expr::MethodCall { ref method, .. } if method == "move"
        ));
    }

    #[test]
    fn test_string_and_table_call_forms() {
        let Expr::Call { args, .. } = call_shape("say 'hi\\n'") else {
            panic!("expected a call");
        };
        assert_eq!(args, vec![Expr::Str("hi\n".into())]);

        let Expr::Call { args, .. } = call_shape("show_loop{ 'a', k = [[raw\\n]] }") else {
            panic!("expected a call");
        };
        assert_eq!(
            args,
            vec![Expr::Table(vec![
                TableField::Positional(Expr::Str("a".into())),
                TableField::Named("k".into(), Expr::Str("raw\\n".into())),
            ])]
        );
    }

    #[test]
    fn test_dotted_callee_and_hex_literal() {
        let Expr::Call { callee, args } = call_shape("a.b(0xff, -1, nil)") else {
            panic!("expected a call");
        };
        assert!(matches!(*callee, Expr::Index { .. }));
        assert_eq!(args[0], Expr::Number(255.0));
        assert!(matches!(args[1], Expr::Unary { op: UnaryOp::Neg, .. }));
        assert_eq!(args[2], Expr::Nil);
    }

    #[test]
    fn test_statement_lines_and_kinds() {
        let block = parse_chunk("x = f()\n\nlocal y\nif x then g() end\nreturn y").unwrap();
        let lines: Vec<_> = block.statements.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 3, 4, 5]);
        assert!(matches!(block.statements[0].kind, StatementKind::Assign { .. }));
        assert!(matches!(block.statements[1].kind, StatementKind::Local { .. }));
        assert!(matches!(block.statements[2].kind, StatementKind::If { .. }));
        assert!(matches!(block.statements[3].kind, StatementKind::Return(_)));
    }

    #[test]
    fn test_comments_only_block_is_empty() {
        let block = parse_chunk("-- note\n--[[ long\ncomment ]]").unwrap();
        assert!(block.statements.is_empty());
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_chunk("show("), Err(LuaError::Syntax(_))));
        assert!(parse_chunk("x +").is_err());
    }
}
