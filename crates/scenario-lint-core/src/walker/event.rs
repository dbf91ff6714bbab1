//! Invocation events produced by the walker.

use scenario_lint_lua::{Expr, TableField, UnaryOp};
use std::fmt;

/// Names of the chain receivers enclosing an invocation, outermost first.
///
/// Extending a context returns a new value; contexts already attached to
/// emitted events are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalContext(im::Vector<String>);

impl LexicalContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this context with `name` appended.
    #[must_use]
    pub fn with(&self, name: impl Into<String>) -> Self {
        let mut names = self.0.clone();
        names.push_back(name.into());
        Self(names)
    }

    /// Returns true if no receiver encloses the invocation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of enclosing receivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if `name` is one of the enclosing receivers.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Iterates over receiver names, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LexicalContext {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Statically known shape of a call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// `nil`
    Nil,
    /// `true` or `false`
    Bool(bool),
    /// A numeric literal, including a negated one.
    Number(f64),
    /// A string literal.
    Str(String),
    /// A plain or dotted name such as `cam` or `a.b`.
    Name(String),
    /// A table constructor.
    Table {
        /// Positional values.
        items: Vec<ArgumentValue>,
        /// `name = value` fields.
        fields: Vec<(String, ArgumentValue)>,
    },
    /// An anonymous function literal.
    Function,
    /// Anything whose value is not known without evaluation.
    Unknown,
}

impl ArgumentValue {
    /// Converts an argument expression.
    #[must_use]
    pub fn from_expr(expr: &Expr) -> Self {
        match expr {
            Expr::Nil => Self::Nil,
            Expr::True => Self::Bool(true),
            Expr::False => Self::Bool(false),
            Expr::Number(n) => Self::Number(*n),
            Expr::Str(s) => Self::Str(s.clone()),
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => match operand.as_ref() {
                Expr::Number(n) => Self::Number(-n),
                _ => Self::Unknown,
            },
            Expr::Function(_) => Self::Function,
            Expr::Table(fields) => {
                let mut items = Vec::new();
                let mut named = Vec::new();
                for field in fields {
                    match field {
                        TableField::Positional(value) => items.push(Self::from_expr(value)),
                        TableField::Named(name, value) => {
                            named.push((name.clone(), Self::from_expr(value)));
                        }
                        TableField::Keyed(Expr::Str(key), value) => {
                            named.push((key.clone(), Self::from_expr(value)));
                        }
                        TableField::Keyed(..) => {}
                    }
                }
                Self::Table {
                    items,
                    fields: named,
                }
            }
            Expr::Paren(inner) => Self::from_expr(inner),
            _ => resolve_name(expr).map_or(Self::Unknown, Self::Name),
        }
    }

    /// Text of a string or name argument.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Name(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value of a number argument.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for a literal `nil`.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Name(s) => write!(f, "{s}"),
            Self::Table { items, fields } => {
                write!(f, "{{")?;
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{item}")?;
                }
                for (name, value) in fields {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{name} = {value}")?;
                }
                write!(f, "}}")
            }
            Self::Function => write!(f, "function"),
            Self::Unknown => write!(f, "?"),
        }
    }
}

/// One flattened call.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationEvent {
    /// Called name, `?` when it cannot be resolved.
    pub name: String,
    /// Arguments in written order.
    pub arguments: Vec<ArgumentValue>,
    /// Receivers enclosing this call.
    pub lexical_context: LexicalContext,
}

impl InvocationEvent {
    /// Returns the argument at `index`.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&ArgumentValue> {
        self.arguments.get(index)
    }

    /// Text of the first argument, if it is a string or a name.
    #[must_use]
    pub fn first_arg_text(&self) -> Option<&str> {
        self.arg(0).and_then(ArgumentValue::as_text)
    }
}

impl fmt::Display for InvocationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")?;
        if !self.lexical_context.is_empty() {
            let names: Vec<_> = self.lexical_context.iter().collect();
            write!(f, " in [{}]", names.join(", "))?;
        }
        Ok(())
    }
}

/// Resolves a plain or dotted name expression.
#[must_use]
pub fn resolve_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name(name) => Some(name.clone()),
        Expr::Index { object, key } => match key.as_ref() {
            Expr::Str(field) => resolve_name(object).map(|base| format!("{base}.{field}")),
            _ => None,
        },
        Expr::Paren(inner) => resolve_name(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_extension_leaves_original_untouched() {
        let base = LexicalContext::new().with("a");
        let extended = base.with("b");
        assert_eq!(base.len(), 1);
        assert_eq!(extended.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(extended.contains("b"));
        assert!(!base.contains("b"));
    }

    #[test]
    fn test_argument_values() {
        let neg = Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(Expr::Number(0.5)),
        };
        assert_eq!(ArgumentValue::from_expr(&neg).as_number(), Some(-0.5));

        let dotted = Expr::Index {
            object: Box::new(Expr::Name("a".into())),
            key: Box::new(Expr::Str("b".into())),
        };
        assert_eq!(ArgumentValue::from_expr(&dotted).as_text(), Some("a.b"));

        let table = Expr::Table(vec![
            TableField::Positional(Expr::Number(1.0)),
            TableField::Named("k".into(), Expr::Str("v".into())),
        ]);
        assert_eq!(ArgumentValue::from_expr(&table).to_string(), "{1, k = 'v'}");
    }
}
