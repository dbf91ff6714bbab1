//! Call-graph walker.
//!
//! Flattens the calls of one code block into a linear stream of
//! [`InvocationEvent`]s. Only directly sequenced calls are visited:
//!
//! - `f(a, b)` yields `f`; closures passed to it are walked in the same context.
//!   Calls nested inside its arguments are not visited.
//! - `a:f1(x):f2(y)` yields a pseudo-event for the receiver `a`, then `f1`
//!   and `f2`. Closures passed to any link see the context extended by `a`.
//! - Assignments and local declarations walk their values only.
//! - Loops, conditionals, returns and function definitions are skipped.

mod event;

pub use event::{resolve_name, ArgumentValue, InvocationEvent, LexicalContext};

use scenario_lint_lua::{parse_chunk, Block, Expr, LuaError, StatementKind, TableField};
use serde::{Deserialize, Serialize};

/// Name given to calls whose callee is not a plain or dotted name.
pub const UNRESOLVED_NAME: &str = "?";

/// Walker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerOptions {
    /// Chain links that stand for the action named by their first argument.
    pub wrapper_calls: Vec<String>,
}

impl Default for WalkerOptions {
    fn default() -> Self {
        Self {
            wrapper_calls: vec!["action".to_string()],
        }
    }
}

impl WalkerOptions {
    fn is_wrapper(&self, method: &str) -> bool {
        self.wrapper_calls.iter().any(|w| w == method)
    }
}

/// Parses and walks a code block.
///
/// # Errors
///
/// Returns the [`LuaError`] if the code does not parse.
pub fn walk_code(code: &str, options: &WalkerOptions) -> Result<Vec<InvocationEvent>, LuaError> {
    let block = parse_chunk(code)?;
    Ok(walk_block(&block, options))
}

/// Walks the top-level statements of a parsed block.
#[must_use]
pub fn walk_block(block: &Block, options: &WalkerOptions) -> Vec<InvocationEvent> {
    let mut walker = Walker {
        options,
        events: Vec::new(),
    };
    walker.block(block, &LexicalContext::new());
    walker.events
}

struct Walker<'o> {
    options: &'o WalkerOptions,
    events: Vec<InvocationEvent>,
}

impl Walker<'_> {
    fn block(&mut self, block: &Block, ctx: &LexicalContext) {
        // Every statement starts from the block's context.
        for statement in &block.statements {
            match &statement.kind {
                StatementKind::Call(expr) => self.expr(expr, ctx),
                StatementKind::Assign { values, .. } | StatementKind::Local { values, .. } => {
                    for value in values {
                        self.expr(value, ctx);
                    }
                }
                StatementKind::Empty
                | StatementKind::Do(_)
                | StatementKind::While { .. }
                | StatementKind::Repeat { .. }
                | StatementKind::If { .. }
                | StatementKind::NumericFor { .. }
                | StatementKind::GenericFor { .. }
                | StatementKind::Function { .. }
                | StatementKind::LocalFunction { .. }
                | StatementKind::Return(_)
                | StatementKind::Break
                | StatementKind::Goto(_)
                | StatementKind::Label(_) => {}
            }
        }
    }

    /// Visits calls inside a statement-level expression. Function literals are not entered.
    fn expr(&mut self, expr: &Expr, ctx: &LexicalContext) {
        match expr {
            Expr::Call { callee, args } => self.call(callee, args, ctx),
            Expr::MethodCall { .. } => self.chain(expr, ctx),
            Expr::Index { object, key } => {
                self.expr(object, ctx);
                self.expr(key, ctx);
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.expr(lhs, ctx);
                self.expr(rhs, ctx);
            }
            Expr::Unary { operand, .. } => self.expr(operand, ctx),
            Expr::Paren(inner) => self.expr(inner, ctx),
            Expr::Table(fields) => {
                for field in fields {
                    match field {
                        TableField::Positional(value) | TableField::Named(_, value) => {
                            self.expr(value, ctx);
                        }
                        TableField::Keyed(key, value) => {
                            self.expr(key, ctx);
                            self.expr(value, ctx);
                        }
                    }
                }
            }
            Expr::Nil
            | Expr::True
            | Expr::False
            | Expr::Number(_)
            | Expr::Str(_)
            | Expr::Vararg
            | Expr::Name(_)
            | Expr::Function(_) => {}
        }
    }

    /// Walks the bodies of closures passed as arguments.
    fn closures(&mut self, args: &[Expr], ctx: &LexicalContext) {
        for arg in args {
            if let Expr::Function(body) = arg {
                self.block(&body.body, ctx);
            }
        }
    }

    fn call(&mut self, callee: &Expr, args: &[Expr], ctx: &LexicalContext) {
        let name = resolve_name(callee).unwrap_or_else(|| {
            self.expr(callee, ctx);
            UNRESOLVED_NAME.to_string()
        });
        self.emit(name, args, ctx);
        self.closures(args, ctx);
    }

    fn chain(&mut self, expr: &Expr, ctx: &LexicalContext) {
        let mut links = Vec::new();
        let mut base = expr;
        while let Expr::MethodCall {
            receiver,
            method,
            args,
        } = base
        {
            links.push((method.as_str(), args.as_slice()));
            base = receiver.as_ref();
        }
        links.reverse();

        let inner = match resolve_name(base) {
            Some(receiver) => {
                self.emit(receiver.clone(), &[], ctx);
                ctx.with(receiver)
            }
            None => {
                self.expr(base, ctx);
                ctx.clone()
            }
        };

        for (method, args) in links {
            match args.split_first() {
                Some((first, rest)) if self.options.is_wrapper(method) && !first.is_function() => {
                    let name = ArgumentValue::from_expr(first)
                        .as_text()
                        .map_or_else(|| UNRESOLVED_NAME.to_string(), str::to_string);
                    self.emit(name, rest, ctx);
                }
                _ => self.emit(method.to_string(), args, ctx),
            }
            self.closures(args, &inner);
        }
    }

    fn emit(&mut self, name: String, args: &[Expr], ctx: &LexicalContext) {
        self.events.push(InvocationEvent {
            name,
            arguments: args.iter().map(ArgumentValue::from_expr).collect(),
            lexical_context: ctx.clone(),
        });
    }
}
