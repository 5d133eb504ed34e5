//! Expression tree for the restricted style-definition grammar.
//!
//! The tree only distinguishes the shapes the static evaluator can reduce.
//! Everything else that parses is kept as [`ExprKind::Opaque`] so callers
//! can point a diagnostic at it instead of failing.

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice the source text covered by this span.
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// An expression node with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Str(String),
    Num(f64),
    /// Template literal: `quasis.len() == exprs.len() + 1`.
    Template {
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },
    Ident(String),
    Member {
        object: Box<Expr>,
        property: MemberKey,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        arg: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Object(Vec<Prop>),
    Array(Vec<Expr>),
    /// Well-formed syntax outside the restricted grammar.
    Opaque,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKey {
    Named(String),
    Computed(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// A member of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    KeyValue {
        key: PropKey,
        key_span: Span,
        value: Expr,
    },
    Spread {
        arg: Expr,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropKey {
    Ident(String),
    Str(String),
    Num(f64),
    Computed(Box<Expr>),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Object literal members, if this is an object literal.
    pub fn as_object(&self) -> Option<&[Prop]> {
        match &self.kind {
            ExprKind::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Identifier name, if this is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// `(object, property)` for a non-computed member access on an identifier,
    /// e.g. `Math.abs` or `stylex.create`.
    pub fn member_path(&self) -> Option<(&str, &str)> {
        match &self.kind {
            ExprKind::Member {
                object,
                property: MemberKey::Named(property),
            } => object.as_ident().map(|o| (o, property.as_str())),
            _ => None,
        }
    }
}
