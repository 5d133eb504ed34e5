//! Lint tests ported from the stylex ESLint `valid-styles` rule tests.
//!
//! Each valid case must produce no messages; each invalid case exactly one,
//! with the rule's fixed message text.

use stylex_compiler::{DiagnosticKind, LintMessage, LintOptions, lint_source};

fn lint(source: &str) -> Vec<LintMessage> {
    lint_source(source, &LintOptions::default()).expect("source should parse")
}

fn assert_valid(source: &str) {
    let messages = lint(source);
    assert!(messages.is_empty(), "expected no messages for {source}, got {messages:?}");
}

fn assert_single(source: &str, message: &str) -> LintMessage {
    let mut messages = lint(source);
    assert_eq!(messages.len(), 1, "expected one message for {source}, got {messages:?}");
    let m = messages.remove(0);
    assert_eq!(m.message, message);
    m
}

// ============================================================================
// Valid definitions
// ============================================================================

#[test]
fn test_local_static_variables() {
    assert_valid(
        r#"
     const start = 'start';
     const styles = stylex.create({
       default: {
         ...stylex.absoluteFill,
         textAlign: start,
         MozOsxFontSmoothing: 'grayscale',
         WebkitFontSmoothing: 'antialiased',
         transitionProperty: 'opacity, transform',
         transitionDuration: '0.3s',
         transitionTimingFunction: 'ease',
       }
     });"#,
    );
}

#[test]
fn test_nested_pseudo_styles() {
    assert_valid(
        r#"
     const styles = stylex.create({
       default: {
         opacity: 0,
         ':hover': {
           opacity: 1
         },
         ':focus-visible': {
           border: "1px solid blue"
         }
       }
     });"#,
    );
}

#[test]
fn test_media_query() {
    assert_valid(
        r#"
     const styles = stylex.create({
       default: {
         width: '50%',
         '@media (max-width: 600px)': {
           width: '100%',
         }
       }
     });"#,
    );
}

#[test]
fn test_numbers_and_namespace_keys() {
    for source in [
        "stylex.create({default: {marginStart: 5}});",
        r#"stylex.create({"default-1": {marginStart: 5}});"#,
        r#"stylex.create({["default-1"]: {marginStart: 5}});"#,
        "stylex.create({0: {marginStart: 5}});",
        "stylex.create({[0]: {marginStart: 5}});",
        "stylex.create({default: {marginStart: -5}});",
        "stylex.create({default: {textAlign: 'start'}});",
    ] {
        assert_valid(source);
    }
}

#[test]
fn test_presets() {
    assert_valid(
        "stylex.create({
       default: {
         ...stylex.absoluteFill,
         textAlign: 'start',
       }
     });",
    );
}

#[test]
fn test_math_calls() {
    assert_valid(
        "stylex.create({
       default: {
         marginStart: Math.abs(-1),
         marginEnd: `${Math.floor(5 / 2)}px`,
         paddingStart: Math.ceil(5 / 2),
         paddingEnd: Math.round(5 / 2),
       },
     })",
    );
    assert_valid(
        "
     const x = 5;
     stylex.create({
       default: {
         marginStart: Math.abs(x),
         marginEnd: `${Math.floor(x)}px`,
         paddingStart: Math.ceil(-x),
         paddingEnd: Math.round(x / 2),
       },
     })",
    );
}

#[test]
fn test_webkit_search_pseudo_elements() {
    assert_valid(
        "
     stylex.create({
       default: {
         'WebkitAppearance': 'textfield',
         '::-webkit-search-decoration': {
           appearance: 'none',
         },
         '::-webkit-search-cancel-button': {
           appearance: 'none',
         },
         '::-webkit-search-results-button': {
           appearance: 'none',
         },
         '::-webkit-search-results-decoration': {
           appearance: 'none',
         },
       },
     })",
    );
}

#[test]
fn test_source_without_stylex_is_ignored() {
    assert_valid("const styles = {default: {textAlin: 'left'}};");
}

// ============================================================================
// Invalid definitions
// ============================================================================

const UNKNOWN_KEY: &str = "This is not a key that is allowed by stylex";

#[test]
fn test_unknown_keys() {
    let m = assert_single("stylex.create({default: {textAlin: 'left'}});", UNKNOWN_KEY);
    assert_eq!(m.kind, DiagnosticKind::UnknownKey);
    assert_eq!((m.line, m.column), (1, 26));

    assert_single("stylex.create({default: {transition: 'all 0.3s ease'}});", UNKNOWN_KEY);
    assert_single("stylex.create({default: {':hover': {textAlin: 'left'}}});", UNKNOWN_KEY);
}

#[test]
fn test_invalid_values() {
    let m = assert_single(
        "stylex.create({default: {textAlign: 'lfet'}});",
        "This is not a valid value that can be used for textAlign",
    );
    assert_eq!(m.kind, DiagnosticKind::InvalidValue);

    for source in [
        "stylex.create({default: {transitionProperty: 'all'}});",
        "stylex.create({default: {transitionProperty: 'height'}});",
    ] {
        assert_single(
            source,
            "This is not a valid value that can be used for transitionProperty",
        );
    }

    assert_single(
        "stylex.create({default: {':focus': {textAlign: 'lfet'}}});",
        "This is not a valid value that can be used for textAlign",
    );
}

#[test]
fn test_color_keywords() {
    assert_valid("stylex.create({default: {color: 'rebeccapurple', backgroundColor: 'transparent', fill: 'none'}});");
    assert_single(
        "stylex.create({default: {color: 'lfet'}});",
        "This is not a valid value that can be used for color",
    );
}

#[test]
fn test_disallowed_nested_selector() {
    let m = assert_single(
        "
         stylex.create({
           default: {
             ':focs': {
               textAlign: 'left'
             }
           }
         });
       ",
        "Nested styles can only be used for the pseudo selectors in the stylex allowlist and for @media queries",
    );
    assert_eq!(m.kind, DiagnosticKind::DisallowedNestedSelector);
    assert_eq!(m.line, 4);
}

#[test]
fn test_nesting_depth() {
    let m = assert_single(
        "
         stylex.create({
           default: {
             ':focus': {
               ':hover': {
                 textAlign: 'left'
               }
             }
           }
         });
       ",
        "You cannot nest styles more than one level deep",
    );
    assert_eq!(m.kind, DiagnosticKind::IllegalNestingDepth);
}

#[test]
fn test_unresolved_identifier() {
    let m = assert_single(
        "stylex.create({default: {color: labelColor}});",
        "Only static values are allowed inside of a stylex.create() call",
    );
    assert_eq!(m.kind, DiagnosticKind::NonStaticValue);
}

#[test]
fn test_messages_in_document_order() {
    let messages = lint(
        "stylex.create({
           a: {textAlin: 'left', textAlign: 'lfet'},
           b: {':focs': {color: 'red'}},
         });",
    );
    let kinds: Vec<_> = messages.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnknownKey,
            DiagnosticKind::InvalidValue,
            DiagnosticKind::DisallowedNestedSelector,
        ]
    );
    assert!(messages.iter().all(|m| m.line == 2 || m.line == 3));
}

#[test]
fn test_syntax_error_is_an_error() {
    assert!(lint_source("stylex.create({default: {", &LintOptions::default()).is_err());
}
