//! # stylex-compiler
//!
//! A static compiler for atomic CSS-in-JS style definitions.
//!
//! ## Features
//!
//! - Validate `stylex.create()` definitions against a closed schema of
//!   properties, pseudo-selectors and at-rules
//! - Compile every declaration to a content-addressed atomic class
//! - Expand logical `start`/`end` properties into direction-guarded pairs
//! - Rewrite call sites and emit runtime registrations or a stylesheet
//! - Theme variables via `unstable_createVars` / `unstable_overrideVars`
//!
//! ## Quick Start
//!
//! ```
//! use stylex_compiler::{TransformOptions, transform};
//!
//! let source = r#"
//! import stylex from '@stylexjs/stylex';
//! const styles = stylex.create({
//!   root: {marginStart: 5, ':hover': {color: 'red'}},
//! });
//! "#;
//!
//! let out = transform(source, &TransformOptions::default()).unwrap();
//! let css = out.stylesheet.unwrap();
//! assert!(css.contains("html:not([dir='rtl'])"));
//! assert!(css.contains(":hover{color:red}"));
//! ```
//!
//! ## Linting
//!
//! ```
//! use stylex_compiler::{LintOptions, lint_source};
//!
//! let messages = lint_source(
//!     "stylex.create({default: {textAlign: 'lfet'}})",
//!     &LintOptions::default(),
//! ).unwrap();
//! assert_eq!(messages[0].message, "This is not a valid value that can be used for textAlign");
//! ```
//!
//! ## Building Many Modules
//!
//! A [`Bundle`] compiles modules in parallel against one shared
//! [`RuleCache`] and produces a single ordered stylesheet.

pub mod bundle;
pub mod compiler;
pub mod emit;
pub mod error;
pub mod eval;
pub mod js;
pub mod lint;
pub mod options;
pub mod order;
pub mod schema;
pub mod transform;
pub(crate) mod util;
pub mod validate;
pub mod vars;

pub use bundle::{Bundle, BundleModule, BundleOutput, CompiledModule};
pub use compiler::{AtomicRule, CompiledNamespace, CompiledStyles, Compiler, RuleCache, StyleRule};
pub use error::{Error, Result};
pub use eval::{Scope, Value};
pub use lint::{LintMessage, LintOptions, lint_source};
pub use options::TransformOptions;
pub use order::Priority;
pub use schema::{KeyKind, SchemaRegistry};
pub use transform::{TransformOutput, transform, transform_with};
pub use validate::{Diagnostic, DiagnosticKind, Mode, validate};
