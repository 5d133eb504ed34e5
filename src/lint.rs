//! Editor-facing checks for `create()` calls.
//!
//! Linting runs the same validator as the transform but never fails on a
//! diagnostic: every violation in the module is reported, in document
//! order. Only a syntax error stops it.

use std::ops::ControlFlow;

use log::debug;

use crate::error::Result;
use crate::eval::Value;
use crate::js::Span;
use crate::schema::SchemaRegistry;
use crate::transform::{CallKind, Scanner, mentions_stylex};
use crate::util::LineIndex;
use crate::validate::{Diagnostic, DiagnosticKind, Mode, validate};
use crate::vars::{VarsCall, VarsCompiler};

#[derive(Debug, Clone, PartialEq)]
pub struct LintOptions {
    pub import_sources: Vec<String>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            import_sources: vec!["stylex".to_string(), "@stylexjs/stylex".to_string()],
        }
    }
}

/// One reported problem. `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct LintMessage {
    #[cfg_attr(feature = "cli", serde(serialize_with = "serialize_kind"))]
    pub kind: DiagnosticKind,
    pub message: String,
    #[cfg_attr(feature = "cli", serde(skip))]
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

#[cfg(feature = "cli")]
fn serialize_kind<S: serde::Serializer>(kind: &DiagnosticKind, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.code())
}

pub fn lint_source(source: &str, options: &LintOptions) -> Result<Vec<LintMessage>> {
    lint_with(source, options, SchemaRegistry::standard())
}

pub fn lint_with(
    source: &str,
    options: &LintOptions,
    registry: &SchemaRegistry,
) -> Result<Vec<LintMessage>> {
    if !mentions_stylex(source) {
        return Ok(Vec::new());
    }
    let scanner = Scanner::new(source, &options.import_sources, registry)?;
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    scanner.scan(|site, scope| {
        match site.kind {
            CallKind::Create => match site.args.as_slice() {
                [definition] => {
                    if let Err(found) = validate(definition, scope, registry, Mode::AllDiagnostics) {
                        diagnostics.extend(found);
                    }
                }
                _ => diagnostics.push(
                    Diagnostic::new(DiagnosticKind::IllegalArgumentLength { expected: 1 }, site.span)
                        .with_key(site.callee()),
                ),
            },
            // vars results only matter as static values for later calls
            CallKind::CreateVars | CallKind::OverrideVars => {
                let callee = site.callee();
                let call = VarsCall {
                    callee: &callee,
                    args: &site.args,
                    span: site.span,
                    binding: site.binding.as_deref(),
                };
                let vars = VarsCompiler {
                    scope,
                    registry,
                    file_id: "",
                    prefix: "x",
                };
                let output = match site.kind {
                    CallKind::OverrideVars => vars.override_vars(&call),
                    _ => vars.create_vars(&call),
                };
                if let (Ok(output), Some(binding)) = (output, &site.binding) {
                    scope.bind_const(binding.clone(), Value::Object(output.value));
                }
            }
        }
        ControlFlow::Continue(())
    })?;

    diagnostics.sort_by_key(|d| d.span.start);
    let lines = LineIndex::new(source);
    let messages: Vec<_> = diagnostics
        .into_iter()
        .map(|d| {
            let (line, column) = lines.line_col(d.span.start);
            LintMessage {
                kind: d.kind,
                message: d.message(),
                span: d.span,
                line,
                column,
            }
        })
        .collect();
    debug!("lint: {} message(s)", messages.len());
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_call() {
        let source = "\
import stylex from 'stylex';
const a = stylex.create({default: {textAlign: 'lfet'}});
const b = stylex.create({default: {fontWeight: labelColor}});
";
        let messages = lint_source(source, &LintOptions::default()).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].kind, DiagnosticKind::InvalidValue);
        assert_eq!(messages[0].line, 2);
        assert_eq!(
            messages[0].message,
            "This is not a valid value that can be used for textAlign"
        );
        assert_eq!(messages[1].kind, DiagnosticKind::NonStaticValue);
        assert_eq!(messages[1].line, 3);
        assert_eq!(messages[1].column, 48);
    }

    #[test]
    fn test_created_vars_are_static() {
        let source = "\
const vars = stylex.unstable_createVars({labelColor: 'red'});
const styles = stylex.create({default: {color: vars.labelColor}});
";
        assert!(lint_source(source, &LintOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_syntax_error_aborts() {
        assert!(lint_source("stylex.create({default: {color: 'red'}", &LintOptions::default()).is_err());
    }
}
