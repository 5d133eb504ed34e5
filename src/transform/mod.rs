//! Whole-module transform: rewrite stylex calls in place.
//!
//! Every `create`, `unstable_createVars` and `unstable_overrideVars` call
//! is compiled in document order and its call expression replaced by the
//! resulting object literal. Compilation of a module is all-or-nothing: a
//! single diagnostic anywhere fails the whole module and no code is
//! produced.
//!
//! ```
//! use stylex_compiler::{TransformOptions, transform};
//!
//! let source = "import stylex from 'stylex';\n\
//!               const styles = stylex.create({root: {color: 'red'}});\n";
//! let out = transform(source, &TransformOptions::default()).unwrap();
//! assert!(out.code.contains("root: {"));
//! assert!(out.stylesheet.unwrap().contains("{color:red}"));
//! ```

pub mod scan;

use std::ops::ControlFlow;

use log::{debug, trace};

pub use scan::{CallKind, CallSite, Scanner, mentions_stylex};

use crate::compiler::{Compiler, RuleCache, StyleRule};
use crate::emit::{self, JsValue, namespaces_object};
use crate::error::{Error, Result};
use crate::eval::{ObjectValue, Scope, Value};
use crate::options::TransformOptions;
use crate::order::dedup;
use crate::schema::SchemaRegistry;
use crate::util::js_number_to_string;
use crate::validate::{self, Diagnostic, DiagnosticKind, Mode};
use crate::vars::{VarsCall, VarsCompiler};

/// A transformed module.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    pub code: String,
    /// Unique rules in first-seen order.
    pub rules: Vec<StyleRule>,
    /// Production stylesheet; `None` in development.
    pub stylesheet: Option<String>,
}

impl TransformOutput {
    fn unchanged(source: &str, dev: bool) -> Self {
        Self {
            code: source.to_string(),
            rules: Vec::new(),
            stylesheet: (!dev).then(String::new),
        }
    }
}

/// Transform one module with a private rule cache and the standard schema.
pub fn transform(source: &str, options: &TransformOptions) -> Result<TransformOutput> {
    let cache = RuleCache::new(options.class_name_prefix.clone());
    transform_with(source, options, &cache, SchemaRegistry::standard())
}

/// Transform one module against a shared cache and a given schema.
///
/// Class names come from `cache`, so its prefix wins over
/// `options.class_name_prefix`.
pub fn transform_with(
    source: &str,
    options: &TransformOptions,
    cache: &RuleCache,
    registry: &SchemaRegistry,
) -> Result<TransformOutput> {
    if !mentions_stylex(source) {
        trace!("{}: no stylex references", options.file_id);
        return Ok(TransformOutput::unchanged(source, options.dev));
    }

    let scanner = Scanner::new(source, &options.import_sources, registry)?;
    let mut unit = ModuleTransform {
        source,
        options,
        registry,
        compiler: Compiler::new(cache),
        prefix: cache.prefix(),
        edits: Vec::new(),
        rules: Vec::new(),
        diagnostics: Vec::new(),
    };
    let mut calls = 0usize;
    scanner.scan(|site, scope| {
        calls += 1;
        match unit.call(site, scope) {
            Ok(()) => ControlFlow::Continue(()),
            Err(mut diagnostics) => {
                unit.diagnostics.append(&mut diagnostics);
                if options.fail_fast {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        }
    })?;

    if !unit.diagnostics.is_empty() {
        debug!(
            "{}: {} diagnostic(s), module not transformed",
            options.file_id,
            unit.diagnostics.len()
        );
        return Err(Error::Diagnostics(unit.diagnostics));
    }

    let rules = dedup(unit.rules);
    debug!("{}: {calls} call(s), {} unique rule(s)", options.file_id, rules.len());
    let code = apply_edits(source, unit.edits);
    let stylesheet = (!options.dev).then(|| emit::stylesheet(&rules));
    Ok(TransformOutput {
        code,
        rules,
        stylesheet,
    })
}

/// Replace `start..end` with `text`; `start == end` inserts.
#[derive(Debug)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

struct ModuleTransform<'a> {
    source: &'a str,
    options: &'a TransformOptions,
    registry: &'a SchemaRegistry,
    compiler: Compiler<'a>,
    prefix: &'a str,
    edits: Vec<Edit>,
    rules: Vec<StyleRule>,
    diagnostics: Vec<Diagnostic>,
}

impl ModuleTransform<'_> {
    fn mode(&self) -> Mode {
        if self.options.fail_fast {
            Mode::FailFast
        } else {
            Mode::AllDiagnostics
        }
    }

    /// Whitespace the line holding `offset` starts with.
    fn indent(&self, offset: usize) -> &str {
        let line_start = self.source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line = &self.source[line_start..];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }

    fn call(&mut self, site: &CallSite, scope: &mut Scope) -> std::result::Result<(), Vec<Diagnostic>> {
        trace!("{}: {} at {}", self.options.file_id, site.callee(), site.span.start);
        let (replacement, rules) = match site.kind {
            CallKind::Create => self.create(site, scope)?,
            CallKind::CreateVars | CallKind::OverrideVars => self.vars(site, scope)?,
        };

        if self.options.dev && self.options.inject_runtime {
            let at_line_start =
                site.statement_start == 0 || self.source[..site.statement_start].ends_with('\n');
            let indent = if at_line_start { self.indent(site.statement_start) } else { "" };
            let block = emit::dev_block(&rules, &site.runtime, indent);
            if !block.is_empty() {
                self.edits.push(Edit {
                    start: site.statement_start,
                    end: site.statement_start,
                    text: block,
                });
            }
        }
        let text = replacement.render(self.indent(site.span.start));
        self.edits.push(Edit {
            start: site.span.start,
            end: site.span.end,
            text,
        });
        self.rules.extend(rules);
        Ok(())
    }

    fn create(
        &self,
        site: &CallSite,
        scope: &Scope,
    ) -> std::result::Result<(JsValue, Vec<StyleRule>), Vec<Diagnostic>> {
        let [definition] = site.args.as_slice() else {
            return Err(vec![
                Diagnostic::new(DiagnosticKind::IllegalArgumentLength { expected: 1 }, site.span)
                    .with_key(site.callee()),
            ]);
        };
        let namespaces = validate::validate(definition, scope, self.registry, self.mode())?;
        let compiled = self.compiler.compile_namespaces(&namespaces);
        let debug_prefix = self.options.dev.then(|| self.options.file_stem());
        Ok((
            namespaces_object(&compiled.namespaces, debug_prefix),
            compiled.rules,
        ))
    }

    fn vars(
        &self,
        site: &CallSite,
        scope: &mut Scope,
    ) -> std::result::Result<(JsValue, Vec<StyleRule>), Vec<Diagnostic>> {
        let callee = site.callee();
        let call = VarsCall {
            callee: &callee,
            args: &site.args,
            span: site.span,
            binding: site.binding.as_deref(),
        };
        let vars = VarsCompiler {
            scope,
            registry: self.registry,
            file_id: &self.options.file_id,
            prefix: self.prefix,
        };
        let output = match site.kind {
            CallKind::OverrideVars => vars.override_vars(&call),
            _ => vars.create_vars(&call),
        }
        .map_err(|d| vec![d])?;

        let literal = object_literal(&output.value);
        if let Some(binding) = &site.binding {
            scope.bind_const(binding.clone(), Value::Object(output.value));
        }
        Ok((literal, output.rules))
    }
}

fn object_literal(object: &ObjectValue) -> JsValue {
    JsValue::Object(
        object
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::Object(nested) => object_literal(nested),
                    Value::Num(n) => JsValue::Str(js_number_to_string(*n)),
                    Value::Str(s) => JsValue::Str(s.clone()),
                };
                (key.to_string(), value)
            })
            .collect(),
    )
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| (edit.start, edit.end));
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..]);
    out
}
