//! Lowering of the `full_moon` syntax tree into [`crate::ast`].

use crate::ast::{
    Block, Expr, FunctionBody, FunctionName, Statement, StatementKind, TableField, UnaryOp,
};
use crate::error::{LuaError, Result};
use full_moon::ast::{
    self, Call, Field, FunctionArgs, Index, LastStmt, Parameter, Prefix, Stmt, Suffix, UnOp, Var,
};
use full_moon::node::Node;
use full_moon::tokenizer::{StringLiteralQuoteType, TokenReference, TokenType};

/// Lowers a parsed block.
pub(crate) fn block(block: &ast::Block) -> Result<Block> {
    let mut statements = Vec::new();
    for stmt in block.stmts() {
        statements.push(Statement {
            kind: statement(stmt)?,
            line: line_of(stmt),
        });
    }
    if let Some(last) = block.last_stmt() {
        statements.push(Statement {
            kind: last_statement(last)?,
            line: line_of(last),
        });
    }
    Ok(Block { statements })
}

fn statement(stmt: &Stmt) -> Result<StatementKind> {
    let kind = match stmt {
        Stmt::FunctionCall(call) => StatementKind::Call(function_call(call)?),
        Stmt::Assignment(assign) => StatementKind::Assign {
            targets: assign.variables().iter().map(var).collect::<Result<_>>()?,
            values: expressions(assign.expressions())?,
        },
        Stmt::LocalAssignment(local) => StatementKind::Local {
            names: local.names().iter().map(token_text).collect(),
            values: expressions(local.expressions())?,
        },
        Stmt::Do(body) => StatementKind::Do(block(body.block())?),
        Stmt::While(node) => StatementKind::While {
            condition: expr(node.condition())?,
            body: block(node.block())?,
        },
        Stmt::Repeat(node) => StatementKind::Repeat {
            body: block(node.block())?,
            condition: expr(node.until())?,
        },
        Stmt::If(node) => {
            let mut branches = vec![(expr(node.condition())?, block(node.block())?)];
            for branch in node.else_if().into_iter().flatten() {
                branches.push((expr(branch.condition())?, block(branch.block())?));
            }
            StatementKind::If {
                branches,
                otherwise: node.else_block().map(block).transpose()?,
            }
        }
        Stmt::NumericFor(node) => StatementKind::NumericFor {
            var: token_text(node.index_variable()),
            start: expr(node.start())?,
            limit: expr(node.end())?,
            step: node.step().map(expr).transpose()?,
            body: block(node.block())?,
        },
        Stmt::GenericFor(node) => StatementKind::GenericFor {
            names: node.names().iter().map(token_text).collect(),
            exprs: expressions(node.expressions())?,
            body: block(node.block())?,
        },
        Stmt::FunctionDeclaration(decl) => StatementKind::Function {
            name: FunctionName {
                path: decl.name().names().iter().map(token_text).collect(),
                method: decl.name().method_name().map(token_text),
            },
            body: function_body(decl.body())?,
        },
        Stmt::LocalFunction(local) => StatementKind::LocalFunction {
            name: token_text(local.name()),
            body: function_body(local.body())?,
        },
        Stmt::Goto(_) => {
            let text = stmt.to_string();
            StatementKind::Goto(text.trim().trim_start_matches("goto").trim().to_string())
        }
        Stmt::Label(_) => {
            let text = stmt.to_string();
            StatementKind::Label(text.trim().trim_matches(':').trim().to_string())
        }
        _ => return Err(unsupported(stmt)),
    };
    Ok(kind)
}

fn last_statement(last: &LastStmt) -> Result<StatementKind> {
    match last {
        LastStmt::Break(_) => Ok(StatementKind::Break),
        LastStmt::Return(ret) => Ok(StatementKind::Return(expressions(ret.returns())?)),
        _ => Err(unsupported(last)),
    }
}

fn expressions<'a>(list: impl IntoIterator<Item = &'a ast::Expression>) -> Result<Vec<Expr>> {
    list.into_iter().map(expr).collect()
}

fn expr(expression: &ast::Expression) -> Result<Expr> {
    let lowered = match expression {
        ast::Expression::BinaryOperator { lhs, rhs, .. } => Expr::Binary {
            lhs: Box::new(expr(lhs)?),
            rhs: Box::new(expr(rhs)?),
        },
        ast::Expression::UnaryOperator { unop, expression } => Expr::Unary {
            op: unary_op(unop).ok_or_else(|| unsupported(unop))?,
            operand: Box::new(expr(expression)?),
        },
        ast::Expression::Parentheses { expression, .. } => Expr::Paren(Box::new(expr(expression)?)),
        ast::Expression::Function(function) => Expr::Function(Box::new(function_body(&function.1)?)),
        ast::Expression::FunctionCall(call) => function_call(call)?,
        ast::Expression::TableConstructor(table) => Expr::Table(table_fields(table)?),
        ast::Expression::Number(token) => {
            let text = token_text(token);
            match number_value(&text) {
                Some(n) => Expr::Number(n),
                None => {
                    return Err(LuaError::MalformedNumber {
                        text,
                        line: line_of(token),
                    })
                }
            }
        }
        ast::Expression::String(token) => Expr::Str(string_value(token)),
        ast::Expression::Symbol(token) => match token_text(token).as_str() {
            "nil" => Expr::Nil,
            "true" => Expr::True,
            "false" => Expr::False,
            "..." => Expr::Vararg,
            _ => return Err(unsupported(token)),
        },
        ast::Expression::Var(v) => var(v)?,
        _ => return Err(unsupported(expression)),
    };
    Ok(lowered)
}

fn unary_op(op: &UnOp) -> Option<UnaryOp> {
    match op {
        UnOp::Minus(_) => Some(UnaryOp::Neg),
        UnOp::Not(_) => Some(UnaryOp::Not),
        UnOp::Hash(_) => Some(UnaryOp::Len),
        UnOp::Tilde(_) => Some(UnaryOp::BitNot),
        _ => None,
    }
}

fn var(v: &Var) -> Result<Expr> {
    match v {
        Var::Name(token) => Ok(Expr::Name(token_text(token))),
        Var::Expression(node) => suffixed(node.prefix(), node.suffixes()),
        _ => Err(unsupported(v)),
    }
}

fn function_call(call: &ast::FunctionCall) -> Result<Expr> {
    suffixed(call.prefix(), call.suffixes())
}

/// Folds `prefix.a[b](c):d(e)` left to right into nested nodes.
fn suffixed<'a>(prefix: &Prefix, suffixes: impl Iterator<Item = &'a Suffix>) -> Result<Expr> {
    let mut current = match prefix {
        Prefix::Name(token) => Expr::Name(token_text(token)),
        Prefix::Expression(inner) => expr(inner)?,
        _ => return Err(unsupported(prefix)),
    };

    for suffix in suffixes {
        current = match suffix {
            Suffix::Call(Call::AnonymousCall(args)) => Expr::Call {
                callee: Box::new(current),
                args: call_args(args)?,
            },
            Suffix::Call(Call::MethodCall(method)) => Expr::MethodCall {
                receiver: Box::new(current),
                method: token_text(method.name()),
                args: call_args(method.args())?,
            },
            Suffix::Index(Index::Brackets { expression, .. }) => Expr::Index {
                object: Box::new(current),
                key: Box::new(expr(expression)?),
            },
            Suffix::Index(Index::Dot { name, .. }) => Expr::Index {
                object: Box::new(current),
                key: Box::new(Expr::Str(token_text(name))),
            },
            _ => return Err(unsupported(suffix)),
        };
    }
    Ok(current)
}

fn call_args(args: &FunctionArgs) -> Result<Vec<Expr>> {
    match args {
        FunctionArgs::Parentheses { arguments, .. } => expressions(arguments),
        FunctionArgs::String(token) => Ok(vec![Expr::Str(string_value(token))]),
        FunctionArgs::TableConstructor(table) => Ok(vec![Expr::Table(table_fields(table)?)]),
        _ => Err(unsupported(args)),
    }
}

fn table_fields(table: &ast::TableConstructor) -> Result<Vec<TableField>> {
    table
        .fields()
        .iter()
        .map(|field| match field {
            Field::NoKey(value) => Ok(TableField::Positional(expr(value)?)),
            Field::NameKey { key, value, .. } => Ok(TableField::Named(token_text(key), expr(value)?)),
            Field::ExpressionKey { key, value, .. } => Ok(TableField::Keyed(expr(key)?, expr(value)?)),
            _ => Err(unsupported(field)),
        })
        .collect()
}

fn function_body(body: &ast::FunctionBody) -> Result<FunctionBody> {
    let mut params = Vec::new();
    let mut is_vararg = false;
    for param in body.parameters() {
        match param {
            Parameter::Name(token) => params.push(token_text(token)),
            Parameter::Ellipsis(_) => is_vararg = true,
            _ => return Err(unsupported(param)),
        }
    }
    Ok(FunctionBody {
        params,
        is_vararg,
        body: block(body.block())?,
    })
}

fn token_text(token: &TokenReference) -> String {
    token.token().to_string()
}

fn line_of<N: Node>(node: &N) -> usize {
    node.start_position().map_or(0, |p| p.line())
}

fn unsupported<N: Node + std::fmt::Display>(node: &N) -> LuaError {
    LuaError::Unsupported {
        code: node.to_string().trim().to_string(),
        line: line_of(node),
    }
}

/// Decoded contents of a string literal token.
fn string_value(token: &TokenReference) -> String {
    match token.token().token_type() {
        TokenType::StringLiteral {
            literal,
            quote_type: StringLiteralQuoteType::Brackets,
            ..
        } => literal.to_string(),
        TokenType::StringLiteral { literal, .. } => unescape(&literal.to_string()),
        _ => token_text(token),
    }
}

/// Resolves backslash escapes of a quoted string.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            'n' | '\n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            'z' => {
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
            }
            'x' => {
                let hex: String = (0..2).filter_map(|_| chars.next_if(char::is_ascii_hexdigit)).collect();
                push_code(&mut out, u32::from_str_radix(&hex, 16).ok());
            }
            'u' => {
                chars.next_if_eq(&'{');
                let hex: String = std::iter::from_fn(|| chars.next_if(char::is_ascii_hexdigit)).collect();
                chars.next_if_eq(&'}');
                push_code(&mut out, u32::from_str_radix(&hex, 16).ok());
            }
            d if d.is_ascii_digit() => {
                let mut digits = d.to_string();
                digits.extend((0..2).filter_map(|_| chars.next_if(char::is_ascii_digit)));
                push_code(&mut out, digits.parse().ok());
            }
            other => out.push(other),
        }
    }
    out
}

fn push_code(out: &mut String, code: Option<u32>) {
    out.push(code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER));
}

/// Value of a Lua numeral, decimal or hexadecimal.
pub(crate) fn number_value(text: &str) -> Option<f64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => hex_value(hex),
        None => text.parse().ok(),
    }
}

/// Hexadecimal numeral with optional fraction and binary exponent.
fn hex_value(text: &str) -> Option<f64> {
    let (mantissa, exponent) = match text.find(['p', 'P']) {
        Some(at) => (&text[..at], text[at + 1..].parse::<i32>().ok()?),
        None => (text, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut value = 0.0_f64;
    for c in whole.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0_f64;
    for c in fraction.chars() {
        scale /= 16.0;
        value += f64::from(c.to_digit(16)?) * scale;
    }
    Some(value * 2.0_f64.powi(exponent))
}
