//! Static evaluation of style-definition expressions.
//!
//! [`evaluate`] is total over [`Expr`]: every node either reduces to a
//! [`Value`] or yields [`NonStatic`] pointing at the innermost node that
//! could not be reduced. It never fails for input it does not understand.

mod value;

use std::collections::HashMap;
use std::fmt;

pub use value::{ObjectValue, Value};

use crate::js::{BinaryOp, Expr, ExprKind, MemberKey, Prop, PropKey, Span, UnaryOp};
use crate::schema::SchemaRegistry;
use crate::util::js_number_to_string;

/// Why an expression could not be reduced.
#[derive(Debug, Clone, PartialEq)]
pub enum NonStaticReason {
    UnresolvedIdentifier(String),
    UnsupportedCall,
    UnsupportedExpression,
    NonNumericOperand,
    MissingMember(String),
}

impl fmt::Display for NonStaticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonStaticReason::UnresolvedIdentifier(name) => write!(f, "'{name}' is not a static binding"),
            NonStaticReason::UnsupportedCall => write!(f, "call cannot be evaluated statically"),
            NonStaticReason::UnsupportedExpression => write!(f, "expression cannot be evaluated statically"),
            NonStaticReason::NonNumericOperand => write!(f, "operand is not a number"),
            NonStaticReason::MissingMember(name) => write!(f, "member '{name}' is not defined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonStatic {
    pub span: Span,
    pub reason: NonStaticReason,
}

impl NonStatic {
    fn new(span: Span, reason: NonStaticReason) -> Self {
        Self { span, reason }
    }
}

/// Statically known bindings of one module.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    consts: HashMap<String, Value>,
    stylex: Vec<String>,
    /// Local name -> preset name.
    presets: HashMap<String, String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope where `stylex` is the only namespace name.
    pub fn with_stylex() -> Self {
        let mut scope = Self::new();
        scope.add_stylex_name("stylex");
        scope
    }

    pub fn bind_const(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.presets.remove(&name);
        self.consts.insert(name, value);
    }

    /// Forget any static binding of `name`.
    pub fn shadow(&mut self, name: &str) {
        self.consts.remove(name);
        self.presets.remove(name);
        self.stylex.retain(|n| n != name);
    }

    pub fn add_stylex_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.stylex.contains(&name) {
            self.stylex.push(name);
        }
    }

    pub fn add_preset_import(&mut self, local: impl Into<String>, preset: impl Into<String>) {
        self.presets.insert(local.into(), preset.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.consts.get(name)
    }

    pub fn is_stylex(&self, name: &str) -> bool {
        self.stylex.iter().any(|n| n == name)
    }

    pub fn stylex_names(&self) -> &[String] {
        &self.stylex
    }

    /// Whether `name` has any binding that would hide a global.
    fn is_bound(&self, name: &str) -> bool {
        self.consts.contains_key(name) || self.presets.contains_key(name) || self.is_stylex(name)
    }
}

const MATH_FUNCTIONS: &[&str] = &["abs", "floor", "ceil", "round"];

/// Reduce `expr` to a concrete value.
pub fn evaluate(expr: &Expr, scope: &Scope, registry: &SchemaRegistry) -> Result<Value, NonStatic> {
    Evaluator { scope, registry }.eval(expr)
}

/// Reduce an object-literal key to its string form.
pub fn evaluate_key(
    key: &PropKey,
    span: Span,
    scope: &Scope,
    registry: &SchemaRegistry,
) -> Result<String, NonStatic> {
    Evaluator { scope, registry }.key(key, span)
}

struct Evaluator<'a> {
    scope: &'a Scope,
    registry: &'a SchemaRegistry,
}

impl Evaluator<'_> {
    fn eval(&self, expr: &Expr) -> Result<Value, NonStatic> {
        let unsupported = || NonStatic::new(expr.span, NonStaticReason::UnsupportedExpression);
        match &expr.kind {
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Num(n) => Ok(Value::Num(*n)),
            ExprKind::Template { quasis, exprs } => {
                let mut out = String::new();
                for (i, quasi) in quasis.iter().enumerate() {
                    out.push_str(quasi);
                    if let Some(part) = exprs.get(i) {
                        let value = self.eval(part)?;
                        let text = value.to_js_string().ok_or_else(|| {
                            NonStatic::new(part.span, NonStaticReason::UnsupportedExpression)
                        })?;
                        out.push_str(&text);
                    }
                }
                Ok(Value::Str(out))
            }
            ExprKind::Ident(name) => self.ident(name, expr.span),
            ExprKind::Member { object, property } => self.member(expr, object, property),
            ExprKind::Call { callee, args } => self.call(expr, callee, args),
            ExprKind::Unary { op, arg } => {
                let n = self.number(arg)?;
                Ok(Value::Num(match op {
                    UnaryOp::Neg => -n,
                    UnaryOp::Plus => n,
                }))
            }
            ExprKind::Binary { op, left, right } => self.binary(*op, left, right),
            ExprKind::Object(props) => self.object(props).map(Value::Object),
            ExprKind::Array(_) | ExprKind::Opaque => Err(unsupported()),
        }
    }

    fn ident(&self, name: &str, span: Span) -> Result<Value, NonStatic> {
        if let Some(value) = self.scope.get(name) {
            return Ok(value.clone());
        }
        if let Some(preset) = self
            .scope
            .presets
            .get(name)
            .and_then(|preset| self.registry.preset(preset))
        {
            return Ok(Value::Object(preset.clone()));
        }
        Err(NonStatic::new(
            span,
            NonStaticReason::UnresolvedIdentifier(name.to_string()),
        ))
    }

    fn member(&self, expr: &Expr, object: &Expr, property: &MemberKey) -> Result<Value, NonStatic> {
        if let (Some(namespace), MemberKey::Named(name)) = (object.as_ident(), property)
            && self.scope.is_stylex(namespace)
        {
            return self
                .registry
                .preset(name)
                .map(|preset| Value::Object(preset.clone()))
                .ok_or_else(|| NonStatic::new(expr.span, NonStaticReason::MissingMember(name.clone())));
        }

        let target = self.eval(object)?;
        let key = match property {
            MemberKey::Named(name) => name.clone(),
            MemberKey::Computed(key) => self.eval(key)?.to_js_string().ok_or_else(|| {
                NonStatic::new(key.span, NonStaticReason::UnsupportedExpression)
            })?,
        };
        match target {
            Value::Object(object) => object
                .get(&key)
                .cloned()
                .ok_or_else(|| NonStatic::new(expr.span, NonStaticReason::MissingMember(key))),
            _ => Err(NonStatic::new(expr.span, NonStaticReason::MissingMember(key))),
        }
    }

    fn call(&self, expr: &Expr, callee: &Expr, args: &[Expr]) -> Result<Value, NonStatic> {
        let unsupported = || NonStatic::new(expr.span, NonStaticReason::UnsupportedCall);
        let Some(("Math", function)) = callee.member_path() else {
            return Err(unsupported());
        };
        if self.scope.is_bound("Math") || !MATH_FUNCTIONS.contains(&function) || args.len() != 1 {
            return Err(unsupported());
        }
        let n = self.number(&args[0])?;
        Ok(Value::Num(match function {
            "abs" => n.abs(),
            "floor" => n.floor(),
            "ceil" => n.ceil(),
            // half rounds toward +Infinity
            _ => (n + 0.5).floor(),
        }))
    }

    fn binary(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Value, NonStatic> {
        if op == BinaryOp::Add {
            let (l, r) = (self.eval(left)?, self.eval(right)?);
            return match (&l, &r) {
                (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
                _ => {
                    let concat = |value: &Value, span: Span| {
                        value
                            .to_js_string()
                            .ok_or_else(|| NonStatic::new(span, NonStaticReason::UnsupportedExpression))
                    };
                    Ok(Value::Str(concat(&l, left.span)? + &concat(&r, right.span)?))
                }
            };
        }
        let (a, b) = (self.number(left)?, self.number(right)?);
        Ok(Value::Num(match op {
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            BinaryOp::Add => a + b,
        }))
    }

    fn number(&self, expr: &Expr) -> Result<f64, NonStatic> {
        match self.eval(expr)? {
            Value::Num(n) => Ok(n),
            _ => Err(NonStatic::new(expr.span, NonStaticReason::NonNumericOperand)),
        }
    }

    fn object(&self, props: &[Prop]) -> Result<ObjectValue, NonStatic> {
        let mut object = ObjectValue::new();
        for prop in props {
            match prop {
                Prop::KeyValue {
                    key,
                    key_span,
                    value,
                } => {
                    let key = self.key(key, *key_span)?;
                    object.insert(key, self.eval(value)?);
                }
                Prop::Spread { arg, span } => match self.eval(arg)? {
                    Value::Object(spread) => object.extend_from(&spread),
                    _ => {
                        return Err(NonStatic::new(
                            *span,
                            NonStaticReason::UnsupportedExpression,
                        ));
                    }
                },
            }
        }
        Ok(object)
    }

    fn key(&self, key: &PropKey, span: Span) -> Result<String, NonStatic> {
        match key {
            PropKey::Ident(name) | PropKey::Str(name) => Ok(name.clone()),
            PropKey::Num(n) => Ok(js_number_to_string(*n)),
            PropKey::Computed(expr) => self
                .eval(expr)?
                .to_js_string()
                .ok_or_else(|| NonStatic::new(span, NonStaticReason::UnsupportedExpression)),
        }
    }
}
