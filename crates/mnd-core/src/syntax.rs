//! Language-neutral syntax model consumed by detectors.
//!
//! A front end lowers its parse tree into a flat, pre-order stream of
//! [`Node`]s. Each node owns the expressions relevant to its category as an
//! [`Expr`] tree, so detectors never touch the front end's tree types.

/// Location of a syntax element within one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize, len: usize) -> Self {
        Self {
            line,
            column,
            offset,
            len,
        }
    }
}

/// Token kind of a basic literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `42`, `0x2A`, `1_000`
    Int,
    /// `3.14`, `1e9`
    Float,
    /// `2i`
    Imaginary,
    /// `'a'`
    Rune,
    /// `"text"` or a raw string
    String,
}

/// A basic literal token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Token kind.
    pub kind: LiteralKind,
    /// Literal text exactly as written.
    pub text: String,
    /// Source location.
    pub span: Span,
}

impl Literal {
    /// Creates a literal.
    #[must_use]
    pub fn new(kind: LiteralKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Identifier name.
    pub name: String,
    /// Source location.
    pub span: Span,
}

/// `left <op> right`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// Left operand.
    pub left: Expr,
    /// Operator token (e.g., `+`, `<=`).
    pub op: String,
    /// Right operand.
    pub right: Expr,
    /// Source location of the whole expression.
    pub span: Span,
}

/// `<op> operand`
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    /// Operator token (e.g., `-`, `!`).
    pub op: String,
    /// Operand.
    pub operand: Expr,
    /// Source location of the whole expression.
    pub span: Span,
}

/// `(inner)`
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    /// Parenthesized expression.
    pub inner: Expr,
    /// Source location including the parentheses.
    pub span: Span,
}

/// `operand.field`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    /// Expression left of the dot.
    pub operand: Expr,
    /// Selected name.
    pub field: Ident,
    /// Source location of the whole expression.
    pub span: Span,
}

/// A call expression or type conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    /// Callee expression.
    pub callee: Expr,
    /// Arguments in source order.
    pub args: Vec<Expr>,
    /// Source location of the whole call.
    pub span: Span,
}

impl CallExpr {
    /// Returns `pkg.Func` when the callee is a selector on a plain identifier.
    #[must_use]
    pub fn qualified_name(&self) -> Option<String> {
        match &self.callee {
            Expr::Selector(sel) => match &sel.operand {
                Expr::Ident(prefix) => Some(format!("{}.{}", prefix.name, sel.field.name)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Basic literal.
    Literal(Literal),
    /// Binary expression.
    Binary(Box<BinaryExpr>),
    /// Unary expression.
    Unary(Box<UnaryExpr>),
    /// Parenthesized expression.
    Paren(Box<ParenExpr>),
    /// Call or conversion.
    Call(Box<CallExpr>),
    /// Selector expression.
    Selector(Box<SelectorExpr>),
    /// Identifier.
    Ident(Ident),
    /// Channel type such as `chan int`, valid as a `make` argument.
    ChanType(Span),
    /// Any other expression or type.
    Other(Span),
}

impl Expr {
    /// Returns the literal if this expression is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Returns the binary expression if this expression is one.
    #[must_use]
    pub fn as_binary(&self) -> Option<&BinaryExpr> {
        match self {
            Self::Binary(bin) => Some(bin),
            _ => None,
        }
    }
}

/// A `const` declaration, single or grouped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    /// Location of the `const` keyword.
    pub keyword: Span,
}

/// An assignment or short variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    /// Operator token (`=`, `+=`, `:=`, ...).
    pub op: String,
    /// Right-hand side values.
    pub rhs: Vec<Expr>,
    /// Source location of the statement.
    pub span: Span,
}

/// `key: value` inside a composite literal.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueExpr {
    /// Element value.
    pub value: Expr,
    /// Source location of the element.
    pub span: Span,
}

/// A `case` clause of an expression switch.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    /// Values listed after `case`.
    pub values: Vec<Expr>,
    /// Source location of the clause.
    pub span: Span,
}

/// An `if` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    /// Condition expression.
    pub condition: Expr,
    /// Source location of the statement.
    pub span: Span,
}

/// A `return` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    /// Returned values.
    pub results: Vec<Expr>,
    /// Source location of the statement.
    pub span: Span,
}

/// Discriminant of [`Node`], used by detector node filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Node::ConstDecl`]
    ConstDecl,
    /// [`Node::Call`]
    Call,
    /// [`Node::Assign`]
    Assign,
    /// [`Node::KeyValue`]
    KeyValue,
    /// [`Node::Paren`]
    Paren,
    /// [`Node::Case`]
    Case,
    /// [`Node::If`]
    If,
    /// [`Node::Return`]
    Return,
}

/// A syntax node delivered to detectors.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Constant declaration.
    ConstDecl(ConstDecl),
    /// Call expression (anywhere in the tree).
    Call(CallExpr),
    /// Assignment statement.
    Assign(AssignStmt),
    /// Keyed composite literal element.
    KeyValue(KeyValueExpr),
    /// Parenthesized expression (anywhere in the tree).
    Paren(ParenExpr),
    /// Switch case clause.
    Case(CaseClause),
    /// If statement.
    If(IfStmt),
    /// Return statement.
    Return(ReturnStmt),
}

impl Node {
    /// Returns this node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::ConstDecl(_) => NodeKind::ConstDecl,
            Self::Call(_) => NodeKind::Call,
            Self::Assign(_) => NodeKind::Assign,
            Self::KeyValue(_) => NodeKind::KeyValue,
            Self::Paren(_) => NodeKind::Paren,
            Self::Case(_) => NodeKind::Case,
            Self::If(_) => NodeKind::If,
            Self::Return(_) => NodeKind::Return,
        }
    }

    /// Source location of this node.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::ConstDecl(decl) => decl.keyword,
            Self::Call(call) => call.span,
            Self::Assign(assign) => assign.span,
            Self::KeyValue(kv) => kv.span,
            Self::Paren(paren) => paren.span,
            Self::Case(case) => case.span,
            Self::If(stmt) => stmt.span,
            Self::Return(ret) => ret.span,
        }
    }
}
