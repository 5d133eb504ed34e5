//! Theme variables: `unstable_createVars` and `unstable_overrideVars`.
//!
//! A created theme is an object of `var(--<hash>)` references plus a
//! `__themeName__` entry, backed by one `:root` rule. An override maps the
//! theme name to a class whose rule redefines some of those variables.

use crate::compiler::{StyleRule, identifier};
use crate::eval::{ObjectValue, Scope, Value, evaluate};
use crate::js::{Expr, Span};
use crate::order::Priority;
use crate::schema::SchemaRegistry;
use crate::util::js_number_to_string;
use crate::validate::{Diagnostic, DiagnosticKind};

pub const THEME_NAME_KEY: &str = "__themeName__";

/// Result of a vars call: the object bound to the call's variable and the
/// rules it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct VarsOutput {
    pub value: ObjectValue,
    pub rules: Vec<StyleRule>,
}

/// A `<runtime>.unstable_*Vars(...)` call site.
#[derive(Debug, Clone, Copy)]
pub struct VarsCall<'a> {
    /// Callee as written, e.g. `stylex.unstable_createVars`.
    pub callee: &'a str,
    pub args: &'a [Expr],
    pub span: Span,
    /// Variable the call is assigned to.
    pub binding: Option<&'a str>,
}

pub struct VarsCompiler<'a> {
    pub scope: &'a Scope,
    pub registry: &'a SchemaRegistry,
    /// Module identifier; part of every theme name.
    pub file_id: &'a str,
    pub prefix: &'a str,
}

impl VarsCompiler<'_> {
    fn variable_name(&self, theme_name: &str, token: &str) -> String {
        format!("--{}", identifier(self.prefix, &format!("{theme_name}.{token}")))
    }

    fn check_call(&self, call: &VarsCall<'_>, arity: usize) -> Result<String, Diagnostic> {
        let Some(binding) = call.binding else {
            return Err(Diagnostic::new(DiagnosticKind::UnboundCall, call.span).with_key(call.callee));
        };
        if call.args.len() != arity {
            return Err(
                Diagnostic::new(DiagnosticKind::IllegalArgumentLength { expected: arity }, call.span)
                    .with_key(call.callee),
            );
        }
        Ok(binding.to_string())
    }

    /// Evaluate an object-literal argument of static strings and numbers.
    fn token_object(&self, call: &VarsCall<'_>, arg: &Expr) -> Result<ObjectValue, Diagnostic> {
        if arg.as_object().is_none() {
            return Err(
                Diagnostic::new(DiagnosticKind::NonObjectArgument, arg.span).with_key(call.callee)
            );
        }
        let non_static = |span| Diagnostic::new(DiagnosticKind::NonStaticValue, span).with_key(call.callee);
        let object = match evaluate(arg, self.scope, self.registry) {
            Ok(Value::Object(object)) => object,
            Ok(_) => return Err(non_static(arg.span)),
            Err(e) => return Err(non_static(e.span)),
        };
        if object.iter().any(|(_, value)| matches!(value, Value::Object(_))) {
            return Err(non_static(arg.span));
        }
        Ok(object)
    }

    pub fn create_vars(&self, call: &VarsCall<'_>) -> Result<VarsOutput, Diagnostic> {
        let binding = self.check_call(call, 1)?;
        let tokens = self.token_object(call, &call.args[0])?;

        let theme_name = identifier(self.prefix, &format!("{}.{binding}", self.file_id));
        let mut value = ObjectValue::new();
        value.insert(THEME_NAME_KEY, Value::Str(theme_name.clone()));
        let mut declarations = Vec::new();
        for (token, token_value) in tokens.iter() {
            let name = self.variable_name(&theme_name, token);
            declarations.push(format!("{name}:{}", token_text(token_value)));
            value.insert(token, Value::Str(format!("var({name})")));
        }

        let rules = if declarations.is_empty() {
            Vec::new()
        } else {
            vec![StyleRule::Theme {
                key: theme_name,
                css: format!(":root{{{}}}", declarations.join(";")),
                priority: Priority::ROOT_VARS,
            }]
        };
        Ok(VarsOutput { value, rules })
    }

    pub fn override_vars(&self, call: &VarsCall<'_>) -> Result<VarsOutput, Diagnostic> {
        self.check_call(call, 2)?;
        let (theme_arg, overrides_arg) = (&call.args[0], &call.args[1]);

        let theme = match evaluate(theme_arg, self.scope, self.registry) {
            Ok(Value::Object(theme)) => theme,
            Ok(_) => return Err(invalid_target(call, theme_arg.span)),
            Err(e) => {
                return Err(Diagnostic::new(DiagnosticKind::NonStaticValue, e.span).with_key(call.callee));
            }
        };
        let Some(theme_name) = theme.get(THEME_NAME_KEY).and_then(Value::as_str) else {
            return Err(invalid_target(call, theme_arg.span));
        };
        let overrides = self.token_object(call, overrides_arg)?;

        let declarations: Vec<_> = overrides
            .iter()
            .map(|(token, token_value)| {
                let name = theme
                    .get(token)
                    .and_then(Value::as_str)
                    .and_then(var_reference)
                    .map(str::to_string)
                    .unwrap_or_else(|| self.variable_name(theme_name, token));
                format!("{name}:{}", token_text(token_value))
            })
            .collect();
        let declarations = declarations.join(";");
        let class_name = identifier(self.prefix, &format!("{theme_name}|{declarations}"));

        let mut value = ObjectValue::new();
        value.insert(theme_name, Value::Str(class_name.clone()));
        let rules = if declarations.is_empty() {
            Vec::new()
        } else {
            vec![StyleRule::Theme {
                css: format!(".{class_name}{{{declarations}}}"),
                key: class_name,
                priority: Priority::THEME_OVERRIDE,
            }]
        };
        Ok(VarsOutput { value, rules })
    }
}

fn invalid_target(call: &VarsCall<'_>, span: Span) -> Diagnostic {
    Diagnostic::new(DiagnosticKind::InvalidOverrideTarget, span).with_key(call.callee)
}

fn token_text(value: &Value) -> String {
    match value {
        Value::Num(n) => js_number_to_string(*n),
        other => other.as_str().unwrap_or_default().to_string(),
    }
}

/// `--name` from `var(--name)`.
fn var_reference(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix("var(")?.strip_suffix(')')?.trim();
    inner.starts_with("--").then_some(inner)
}
