//! Theme variable validation, ported from the babel plugin's
//! `unstable_overrideVars` validation tests.

use stylex_compiler::{DiagnosticKind, Error, TransformOptions, TransformOutput, transform};

fn run(source: &str) -> Result<TransformOutput, Error> {
    transform(source, &TransformOptions::default().with_file_id("TestTheme.stylex.js"))
}

fn failure(source: &str) -> DiagnosticKind {
    let err = run(source).expect_err("source should be rejected");
    let diagnostics = err.diagnostics();
    assert_eq!(diagnostics.len(), 1, "{err}");
    diagnostics[0].kind
}

#[test]
fn test_must_be_bound_to_a_variable() {
    let source = "import stylex from 'stylex';
          stylex.unstable_overrideVars({__themeName__: 'x568ih9'}, {});";
    assert_eq!(failure(source), DiagnosticKind::UnboundCall);
}

#[test]
fn test_argument_validation() {
    let cases = [
        ("const variables = stylex.unstable_overrideVars();", DiagnosticKind::IllegalArgumentLength { expected: 2 }),
        ("const variables = stylex.unstable_overrideVars({});", DiagnosticKind::IllegalArgumentLength { expected: 2 }),
        ("const variables = stylex.unstable_overrideVars(genStyles(), {});", DiagnosticKind::NonStaticValue),
        ("const variables = stylex.unstable_overrideVars({}, {});", DiagnosticKind::InvalidOverrideTarget),
        (
            "const variables = stylex.unstable_overrideVars({__themeName__: 'x568ih9'}, genStyles());",
            DiagnosticKind::NonObjectArgument,
        ),
    ];
    for (call, expected) in cases {
        let source = format!("import stylex from 'stylex';\n{call}");
        assert_eq!(failure(&source), expected, "{call}");
    }

    let ok = run("import stylex from 'stylex';
          const variables = stylex.unstable_overrideVars({__themeName__: 'x568ih9'}, {});")
    .unwrap();
    assert!(ok.rules.is_empty());
}

#[test]
fn test_invalid_target_message() {
    let err = run("const variables = stylex.unstable_overrideVars({}, {});").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Can only override variables theme created with stylex.unstable_createVars()."
    );
}

#[test]
fn test_variable_keys_must_be_static() {
    let source = "import stylex from 'stylex';
          const variables = stylex.unstable_overrideVars(
            {__themeName__: 'x568ih9', labelColor: 'var(--labelColorHash)'},
            {[labelColor]: 'red',});";
    assert_eq!(failure(source), DiagnosticKind::NonStaticValue);
}

#[test]
fn test_values_must_be_static_numbers_or_strings() {
    let number = run("import stylex from 'stylex';
          const variables = stylex.unstable_overrideVars(
            {__themeName__: 'x568ih9', cornerRadius: 'var(--cornerRadiusHash)'},
            {cornerRadius: 5,}
          );")
    .unwrap();
    assert!(number.stylesheet.unwrap().ends_with("{--cornerRadiusHash:5}"));

    let string = run("import stylex from 'stylex';
          const variables = stylex.unstable_overrideVars(
            {__themeName__: 'x568ih9', labelColor: 'var(--labelColorHash)'},
            {labelColor: 'red',}
          );")
    .unwrap();
    assert!(string.stylesheet.unwrap().ends_with("{--labelColorHash:red}"));
    assert!(string.code.contains("x568ih9: \"x"));

    for value in ["labelColor", "labelColor()"] {
        let source = format!(
            "import stylex from 'stylex';
          const variables = stylex.unstable_overrideVars(
            {{__themeName__: 'x568ih9', labelColor: 'var(--labelColorHash)'}},
            {{labelColor: {value},}}
          );"
        );
        assert_eq!(failure(&source), DiagnosticKind::NonStaticValue, "{value}");
    }
}

#[test]
fn test_create_then_override_then_use() {
    let source = "import stylex from 'stylex';
export const vars = stylex.unstable_createVars({labelColor: 'red', gap: 4});
const dark = stylex.unstable_overrideVars(vars, {labelColor: 'white'});
const styles = stylex.create({label: {color: vars.labelColor}});
";
    let out = run(source).unwrap();
    let sheet = out.stylesheet.unwrap();
    let lines: Vec<_> = sheet.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(":root{--x"));
    assert!(lines[0].ends_with(":4}"));
    assert!(lines[1].ends_with(":white}"));
    assert!(lines[2].contains("{color:var(--x"));
    assert!(out.code.contains("export const vars = {\n  __themeName__: \"x"));
}

#[test]
fn test_theme_names_depend_on_file_and_binding() {
    let source = "const vars = stylex.unstable_createVars({a: 'red'});";
    let one = transform(source, &TransformOptions::default().with_file_id("one.js")).unwrap();
    let two = transform(source, &TransformOptions::default().with_file_id("two.js")).unwrap();
    assert_ne!(one.stylesheet, two.stylesheet);
    let again = transform(source, &TransformOptions::default().with_file_id("one.js")).unwrap();
    assert_eq!(one.code, again.code);
}
