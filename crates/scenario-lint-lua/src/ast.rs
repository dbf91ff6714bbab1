//! Abstract syntax tree for embedded code.
//!
//! Every node kind is a variant of a closed enum, so consumers can match
//! exhaustively and the compiler flags any kind they forget to handle.

/// A sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

/// A statement together with the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The statement variant.
    pub kind: StatementKind,
    /// Line within the code block (1-based).
    pub line: usize,
}

/// Statement variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// A lone `;`.
    Empty,
    /// A function or method call used as a statement.
    Call(Expr),
    /// `a, b.c = x, y`
    Assign {
        /// Assignment targets (names or index expressions).
        targets: Vec<Expr>,
        /// Assigned values.
        values: Vec<Expr>,
    },
    /// `local a, b = x, y`
    Local {
        /// Declared names.
        names: Vec<String>,
        /// Initial values (may be empty).
        values: Vec<Expr>,
    },
    /// `do ... end`
    Do(Block),
    /// `while cond do ... end`
    While {
        /// Loop condition.
        condition: Expr,
        /// Loop body.
        body: Block,
    },
    /// `repeat ... until cond`
    Repeat {
        /// Loop body.
        body: Block,
        /// Exit condition.
        condition: Expr,
    },
    /// `if a then ... elseif b then ... else ... end`
    If {
        /// Condition/body pairs for `if` and each `elseif`.
        branches: Vec<(Expr, Block)>,
        /// The `else` body.
        otherwise: Option<Block>,
    },
    /// `for i = a, b, c do ... end`
    NumericFor {
        /// Loop variable.
        var: String,
        /// Start value.
        start: Expr,
        /// Limit value.
        limit: Expr,
        /// Optional step.
        step: Option<Expr>,
        /// Loop body.
        body: Block,
    },
    /// `for k, v in explist do ... end`
    GenericFor {
        /// Loop variables.
        names: Vec<String>,
        /// Iterator expressions.
        exprs: Vec<Expr>,
        /// Loop body.
        body: Block,
    },
    /// `function a.b:c() ... end`
    Function {
        /// Declared name.
        name: FunctionName,
        /// Parameters and body.
        body: FunctionBody,
    },
    /// `local function f() ... end`
    LocalFunction {
        /// Declared name.
        name: String,
        /// Parameters and body.
        body: FunctionBody,
    },
    /// `return a, b`
    Return(Vec<Expr>),
    /// `break`
    Break,
    /// `goto label`
    Goto(String),
    /// `::label::`
    Label(String),
}

/// Name in a `function` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionName {
    /// Dotted path segments (`a.b.c` → `["a", "b", "c"]`).
    pub path: Vec<String>,
    /// Method name after `:`.
    pub method: Option<String>,
}

/// Parameters and body of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBody {
    /// Named parameters.
    pub params: Vec<String>,
    /// Whether the parameter list ends with `...`.
    pub is_vararg: bool,
    /// Function body.
    pub body: Block,
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `nil`
    Nil,
    /// `true`
    True,
    /// `false`
    False,
    /// Numeric literal.
    Number(f64),
    /// String literal.
    Str(String),
    /// `...`
    Vararg,
    /// A plain name.
    Name(String),
    /// `object[key]` or `object.key` (key is a string literal for the latter).
    Index {
        /// Indexed expression.
        object: Box<Expr>,
        /// Key expression.
        key: Box<Expr>,
    },
    /// `callee(args)`
    Call {
        /// Called expression.
        callee: Box<Expr>,
        /// Arguments in order.
        args: Vec<Expr>,
    },
    /// `receiver:method(args)`
    MethodCall {
        /// Receiver expression.
        receiver: Box<Expr>,
        /// Method name.
        method: String,
        /// Arguments in order.
        args: Vec<Expr>,
    },
    /// Anonymous function literal.
    Function(Box<FunctionBody>),
    /// Table constructor.
    Table(Vec<TableField>),
    /// Binary operation. The operator is irrelevant to call shapes.
    Binary {
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Unary operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// Parenthesized expression.
    Paren(Box<Expr>),
}

impl Expr {
    /// Returns true for `f(...)` and `a:f(...)`.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call { .. } | Self::MethodCall { .. })
    }

    /// Returns true for an anonymous function literal.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }
}

/// A field in a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum TableField {
    /// `value`
    Positional(Expr),
    /// `name = value`
    Named(String, Expr),
    /// `[key] = value`
    Keyed(Expr, Expr),
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum UnaryOp {
    Not,
    Neg,
    Len,
    BitNot,
}
