//! Style-definition validation and flattening.
//!
//! [`validate`] walks the argument of a `create()` call in document order.
//! Each property becomes a [`FlatRule`] tagged with the selector context it
//! was found under; every violation becomes a [`Diagnostic`]. Nested
//! selector and at-rule blocks share one depth counter and may only appear
//! directly under a namespace.

mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind};

use crate::eval::{ObjectValue, Scope, Value, evaluate, evaluate_key};
use crate::js::{Expr, Prop, Span};
use crate::schema::{KeyKind, PropertySpec, SchemaRegistry, SelectorContext};

/// How many diagnostics to collect before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Report every violation (linting).
    #[default]
    AllDiagnostics,
    /// Stop at the first violation (compilation).
    FailFast,
}

/// One validated declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRule<'r> {
    pub property: &'r PropertySpec,
    pub value: Value,
    pub context: SelectorContext,
    /// Span of the value expression.
    pub span: Span,
}

/// A validated namespace: its declarations in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNamespace<'r> {
    pub name: String,
    pub span: Span,
    pub rules: Vec<FlatRule<'r>>,
}

impl<'r> FlatNamespace<'r> {
    /// Insert a rule; a later declaration of the same property in the same
    /// context replaces the earlier one in place.
    fn push(&mut self, rule: FlatRule<'r>) {
        let existing = self
            .rules
            .iter_mut()
            .find(|r| r.property.key == rule.property.key && r.context == rule.context);
        match existing {
            Some(slot) => *slot = rule,
            None => self.rules.push(rule),
        }
    }
}

/// Validate the style-definition argument of a `create()` call.
pub fn validate<'r>(
    definition: &Expr,
    scope: &Scope,
    registry: &'r SchemaRegistry,
    mode: Mode,
) -> Result<Vec<FlatNamespace<'r>>, Vec<Diagnostic>> {
    let mut validator = Validator {
        scope,
        registry,
        mode,
        diagnostics: Vec::new(),
        namespaces: Vec::new(),
    };
    validator.definition(definition);
    if validator.diagnostics.is_empty() {
        Ok(validator.namespaces)
    } else {
        Err(validator.diagnostics)
    }
}

/// A value still in expression form, or already reduced (from a spread).
#[derive(Clone, Copy)]
enum Node<'e> {
    Expr(&'e Expr),
    Value(&'e Value, Span),
}

struct Validator<'s, 'r> {
    scope: &'s Scope,
    registry: &'r SchemaRegistry,
    mode: Mode,
    diagnostics: Vec<Diagnostic>,
    namespaces: Vec<FlatNamespace<'r>>,
}

impl<'r> Validator<'_, 'r> {
    fn done(&self) -> bool {
        self.mode == Mode::FailFast && !self.diagnostics.is_empty()
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if !self.done() {
            self.diagnostics.push(diagnostic);
        }
    }

    fn report_non_static(&mut self, span: Span, namespace: Option<&str>) {
        self.report(Diagnostic::new(DiagnosticKind::NonStaticValue, span).with_namespace(namespace));
    }

    fn definition(&mut self, definition: &Expr) {
        let Some(props) = definition.as_object() else {
            match evaluate(definition, self.scope, self.registry) {
                Ok(Value::Object(object)) => self.namespaces_from_value(&object, definition.span),
                Ok(_) => self.report(
                    Diagnostic::new(DiagnosticKind::NonObjectArgument, definition.span)
                        .with_key("stylex.create"),
                ),
                Err(non_static) => self.report_non_static(non_static.span, None),
            }
            return;
        };

        for prop in props {
            if self.done() {
                return;
            }
            match prop {
                Prop::KeyValue {
                    key,
                    key_span,
                    value,
                } => {
                    let name = match evaluate_key(key, *key_span, self.scope, self.registry) {
                        Ok(name) => name,
                        Err(non_static) => {
                            self.report_non_static(non_static.span, None);
                            continue;
                        }
                    };
                    self.namespace(name, *key_span, Node::Expr(value));
                }
                Prop::Spread { arg, span } => match evaluate(arg, self.scope, self.registry) {
                    Ok(Value::Object(object)) => self.namespaces_from_value(&object, *span),
                    Ok(_) => self.report(
                        Diagnostic::new(DiagnosticKind::NonObjectArgument, *span)
                            .with_key("stylex.create"),
                    ),
                    Err(non_static) => self.report_non_static(non_static.span, None),
                },
            }
        }
    }

    fn namespaces_from_value(&mut self, object: &ObjectValue, span: Span) {
        for (name, value) in object.iter() {
            if self.done() {
                return;
            }
            self.namespace(name.to_string(), span, Node::Value(value, span));
        }
    }

    fn namespace(&mut self, name: String, span: Span, node: Node<'_>) {
        let index = match self.namespaces.iter().position(|ns| ns.name == name) {
            Some(index) => {
                self.namespaces[index].rules.clear();
                self.namespaces[index].span = span;
                index
            }
            None => {
                self.namespaces.push(FlatNamespace {
                    name: name.clone(),
                    span,
                    rules: Vec::new(),
                });
                self.namespaces.len() - 1
            }
        };
        self.block(index, node, &SelectorContext::Base, |v| {
            Diagnostic::new(DiagnosticKind::NonObjectArgument, v).with_key("stylex.create")
        });
    }

    /// Walk the style object held by `node` under `context`. `not_object`
    /// builds the diagnostic for a node that is not a mapping.
    fn block(
        &mut self,
        namespace: usize,
        node: Node<'_>,
        context: &SelectorContext,
        not_object: impl FnOnce(Span) -> Diagnostic,
    ) {
        let ns_name = self.namespaces[namespace].name.clone();
        match node {
            Node::Expr(expr) => {
                if let Some(props) = expr.as_object() {
                    self.props(namespace, props, context);
                    return;
                }
                match evaluate(expr, self.scope, self.registry) {
                    Ok(Value::Object(object)) => {
                        self.object_value(namespace, &object, expr.span, context)
                    }
                    Ok(_) => self.report(not_object(expr.span).with_namespace(Some(&ns_name))),
                    Err(non_static) => self.report_non_static(non_static.span, Some(&ns_name)),
                }
            }
            Node::Value(Value::Object(object), span) => {
                self.object_value(namespace, object, span, context)
            }
            Node::Value(_, span) => self.report(not_object(span).with_namespace(Some(&ns_name))),
        }
    }

    fn props(&mut self, namespace: usize, props: &[Prop], context: &SelectorContext) {
        let ns_name = self.namespaces[namespace].name.clone();
        for prop in props {
            if self.done() {
                return;
            }
            match prop {
                Prop::KeyValue {
                    key,
                    key_span,
                    value,
                } => match evaluate_key(key, *key_span, self.scope, self.registry) {
                    Ok(key) => self.entry(namespace, &key, *key_span, Node::Expr(value), context),
                    Err(non_static) => self.report_non_static(non_static.span, Some(&ns_name)),
                },
                // spread keys are validated as if written inline
                Prop::Spread { arg, span } => match evaluate(arg, self.scope, self.registry) {
                    Ok(Value::Object(object)) => {
                        self.object_value(namespace, &object, *span, context)
                    }
                    Ok(_) => self.report_non_static(*span, Some(&ns_name)),
                    Err(non_static) => self.report_non_static(non_static.span, Some(&ns_name)),
                },
            }
        }
    }

    fn object_value(
        &mut self,
        namespace: usize,
        object: &ObjectValue,
        span: Span,
        context: &SelectorContext,
    ) {
        for (key, value) in object.iter() {
            if self.done() {
                return;
            }
            self.entry(namespace, key, span, Node::Value(value, span), context);
        }
    }

    fn entry(
        &mut self,
        namespace: usize,
        key: &str,
        key_span: Span,
        node: Node<'_>,
        context: &SelectorContext,
    ) {
        let registry = self.registry;
        let ns_name = self.namespaces[namespace].name.clone();
        let diagnostic = |kind| {
            Diagnostic::new(kind, key_span)
                .with_namespace(Some(&ns_name))
                .with_key(key)
        };

        match registry.classify(key) {
            KeyKind::Property(property) => {
                let (value, span) = match node {
                    Node::Expr(expr) => match evaluate(expr, self.scope, registry) {
                        Ok(value) => (value, expr.span),
                        Err(non_static) => {
                            let d = Diagnostic::new(DiagnosticKind::NonStaticValue, non_static.span)
                                .with_namespace(Some(&ns_name))
                                .with_key(key);
                            self.report(d);
                            return;
                        }
                    },
                    Node::Value(value, span) => (value.clone(), span),
                };
                if !property.value.accepts(&value) {
                    let d = Diagnostic::new(DiagnosticKind::InvalidValue, span)
                        .with_namespace(Some(&ns_name))
                        .with_key(key)
                        .with_value(value.describe());
                    self.report(d);
                    return;
                }
                self.namespaces[namespace].push(FlatRule {
                    property,
                    value,
                    context: context.clone(),
                    span,
                });
            }
            KeyKind::NestedSelector(pseudo) => {
                let nested = SelectorContext::pseudo(pseudo);
                self.nested(namespace, key, key_span, node, context, nested);
            }
            KeyKind::AtRule(kind) => {
                let nested = SelectorContext::at_rule(kind, key);
                self.nested(namespace, key, key_span, node, context, nested);
            }
            KeyKind::UnknownSelector => {
                self.report(diagnostic(DiagnosticKind::DisallowedNestedSelector))
            }
            KeyKind::Unknown => self.report(diagnostic(DiagnosticKind::UnknownKey)),
        }
    }

    fn nested(
        &mut self,
        namespace: usize,
        key: &str,
        key_span: Span,
        node: Node<'_>,
        context: &SelectorContext,
        nested: SelectorContext,
    ) {
        if context.depth() > 0 {
            let d = Diagnostic::new(DiagnosticKind::IllegalNestingDepth, key_span)
                .with_namespace(Some(&self.namespaces[namespace].name))
                .with_key(key);
            self.report(d);
            return;
        }
        let key = key.to_string();
        self.block(namespace, node, &nested, move |_| {
            Diagnostic::new(DiagnosticKind::DisallowedNestedSelector, key_span).with_key(key)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::parse_expression;

    fn run(source: &str, mode: Mode) -> Result<Vec<FlatNamespace<'static>>, Vec<Diagnostic>> {
        let expr = parse_expression(source).unwrap();
        validate(&expr, &Scope::with_stylex(), SchemaRegistry::standard(), mode)
    }

    fn kinds(source: &str) -> Vec<DiagnosticKind> {
        run(source, Mode::AllDiagnostics)
            .unwrap_err()
            .into_iter()
            .map(|d| d.kind)
            .collect()
    }

    #[test]
    fn test_flattens_nested_blocks() {
        let namespaces = run(
            "{default: {opacity: 0, ':hover': {opacity: 1}, '@media (max-width: 600px)': {width: '100%'}}}",
            Mode::AllDiagnostics,
        )
        .unwrap();
        assert_eq!(namespaces.len(), 1);
        let rules = &namespaces[0].rules;
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].context, SelectorContext::Base);
        assert!(matches!(rules[1].context, SelectorContext::Pseudo { .. }));
        assert!(matches!(rules[2].context, SelectorContext::AtRule { .. }));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(kinds("{default: {textAlin: 'left'}}"), vec![DiagnosticKind::UnknownKey]);
        assert_eq!(kinds("{default: {transition: 'all 0.3s ease'}}"), vec![DiagnosticKind::UnknownKey]);
    }

    #[test]
    fn test_invalid_value_names_property() {
        let diagnostics = run("{default: {textAlign: 'lfet'}}", Mode::AllDiagnostics).unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidValue);
        assert_eq!(diagnostics[0].key.as_deref(), Some("textAlign"));
        assert_eq!(diagnostics[0].value.as_deref(), Some("'lfet'"));
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(
            kinds("{default: {':focus': {':hover': {textAlign: 'left'}}}}"),
            vec![DiagnosticKind::IllegalNestingDepth]
        );
        assert_eq!(
            kinds("{default: {'@media (max-width: 1px)': {':hover': {color: 'red'}}}}"),
            vec![DiagnosticKind::IllegalNestingDepth]
        );
    }

    #[test]
    fn test_disallowed_selectors() {
        assert_eq!(
            kinds("{default: {':focs': {textAlign: 'left'}}}"),
            vec![DiagnosticKind::DisallowedNestedSelector]
        );
        assert_eq!(
            kinds("{default: {':hover': 'red'}}"),
            vec![DiagnosticKind::DisallowedNestedSelector]
        );
    }

    #[test]
    fn test_non_static_value() {
        assert_eq!(kinds("{default: {color: labelColor}}"), vec![DiagnosticKind::NonStaticValue]);
    }

    #[test]
    fn test_document_order_and_fail_fast() {
        let source = "{a: {textAlin: 1}, b: {textAlign: 'lfet'}, c: {color: labelColor}}";
        assert_eq!(
            kinds(source),
            vec![
                DiagnosticKind::UnknownKey,
                DiagnosticKind::InvalidValue,
                DiagnosticKind::NonStaticValue
            ]
        );
        let first = run(source, Mode::FailFast).unwrap_err();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].kind, DiagnosticKind::UnknownKey);
    }

    #[test]
    fn test_spread_validated_inline() {
        let namespaces = run(
            "{default: {...stylex.absoluteFill, position: 'relative'}}",
            Mode::AllDiagnostics,
        )
        .unwrap();
        let rules = &namespaces[0].rules;
        let position = rules.iter().find(|r| r.property.key == "position").unwrap();
        assert_eq!(position.value, Value::from("relative"));
        assert_eq!(rules.iter().filter(|r| r.property.key == "position").count(), 1);
    }

    #[test]
    fn test_computed_and_numeric_namespaces() {
        let namespaces = run(
            "{'default-1': {marginStart: 5}, ['x' + 1]: {marginStart: 5}, [0]: {marginEnd: -5}}",
            Mode::AllDiagnostics,
        )
        .unwrap();
        let names: Vec<_> = namespaces.iter().map(|ns| ns.name.as_str()).collect();
        assert_eq!(names, vec!["default-1", "x1", "0"]);
    }
}
