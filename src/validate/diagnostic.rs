//! Structured validation diagnostics.

use std::fmt;

use crate::js::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UnknownKey,
    InvalidValue,
    IllegalNestingDepth,
    DisallowedNestedSelector,
    NonStaticValue,
    IllegalArgumentLength { expected: usize },
    NonObjectArgument,
    UnboundCall,
    InvalidOverrideTarget,
}

impl DiagnosticKind {
    /// Stable identifier for machine-readable output.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UnknownKey => "UNKNOWN_KEY",
            DiagnosticKind::InvalidValue => "INVALID_VALUE",
            DiagnosticKind::IllegalNestingDepth => "ILLEGAL_NESTING_DEPTH",
            DiagnosticKind::DisallowedNestedSelector => "DISALLOWED_NESTED_SELECTOR",
            DiagnosticKind::NonStaticValue => "NON_STATIC_VALUE",
            DiagnosticKind::IllegalArgumentLength { .. } => "ILLEGAL_ARGUMENT_LENGTH",
            DiagnosticKind::NonObjectArgument => "NON_OBJECT_FOR_STYLEX_CALL",
            DiagnosticKind::UnboundCall => "UNBOUND_STYLEX_CALL_VALUE",
            DiagnosticKind::InvalidOverrideTarget => "INVALID_OVERRIDE_TARGET",
        }
    }
}

/// One violation, located at the offending node.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    /// Namespace the violation was found in.
    pub namespace: Option<String>,
    /// Offending key; for call-level diagnostics, the called function.
    pub key: Option<String>,
    /// Offending value, when one was evaluated.
    pub value: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            namespace: None,
            key: None,
            value: None,
        }
    }

    pub fn with_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.map(str::to_string);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Fixed user-facing message for this diagnostic.
    pub fn message(&self) -> String {
        let key = self.key.as_deref().unwrap_or_default();
        match self.kind {
            DiagnosticKind::UnknownKey => "This is not a key that is allowed by stylex".to_string(),
            DiagnosticKind::InvalidValue => {
                format!("This is not a valid value that can be used for {key}")
            }
            DiagnosticKind::IllegalNestingDepth => {
                "You cannot nest styles more than one level deep".to_string()
            }
            DiagnosticKind::DisallowedNestedSelector => "Nested styles can only be used for the pseudo selectors in the stylex allowlist and for @media queries".to_string(),
            DiagnosticKind::NonStaticValue => {
                "Only static values are allowed inside of a stylex.create() call".to_string()
            }
            DiagnosticKind::IllegalArgumentLength { expected } => {
                let plural = if expected == 1 { "" } else { "s" };
                format!("{key}() should have {expected} argument{plural}")
            }
            DiagnosticKind::NonObjectArgument => {
                format!("{key}() can only accept a style object")
            }
            DiagnosticKind::UnboundCall => "stylex calls must be bound to a bare variable".to_string(),
            DiagnosticKind::InvalidOverrideTarget => {
                "Can only override variables theme created with stylex.unstable_createVars()."
                    .to_string()
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())?;
        match (&self.namespace, &self.key) {
            (Some(namespace), Some(key)) => write!(f, " (at {namespace}.{key})"),
            (Some(namespace), None) => write!(f, " (at {namespace})"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let d = Diagnostic::new(DiagnosticKind::InvalidValue, Span::default())
            .with_namespace(Some("default"))
            .with_key("textAlign")
            .with_value("'lfet'");
        assert_eq!(d.message(), "This is not a valid value that can be used for textAlign");
        assert_eq!(
            d.to_string(),
            "This is not a valid value that can be used for textAlign (at default.textAlign)"
        );

        let d = Diagnostic::new(DiagnosticKind::IllegalArgumentLength { expected: 2 }, Span::default())
            .with_key("stylex.unstable_overrideVars");
        assert_eq!(d.message(), "stylex.unstable_overrideVars() should have 2 arguments");
    }
}
